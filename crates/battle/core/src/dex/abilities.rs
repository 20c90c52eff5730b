use crate::util::to_id;

/// Abilities whose effect is only active under a battle condition that the
/// feed reports as a volatile of the same id.
const TOGGLEABLE_ABILITIES: [&str; 14] = [
    "flashfire",
    "slowstart",
    "unburden",
    "zenmode",
    "intimidate",
    "protosynthesis",
    "quarkdrive",
    "plus",
    "minus",
    "stakeout",
    "truant",
    "flowergift",
    "powerconstruct",
    "schooling",
];

pub fn is_toggleable_ability(ability: &str) -> bool {
    TOGGLEABLE_ABILITIES.contains(&to_id(ability).as_str())
}

/// True when a toggleable `ability` is currently active per `volatiles`.
pub fn is_toggled(ability: &str, volatiles: &[String]) -> bool {
    let id = to_id(ability);
    TOGGLEABLE_ABILITIES.contains(&id.as_str())
        && volatiles.iter().any(|volatile| to_id(volatile) == id)
}
