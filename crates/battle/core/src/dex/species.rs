/// Battle-only forme tags. A combatant carrying one of these is the same
/// individual as its base form.
const BATTLE_FORME_TAGS: [&str; 7] = [
    "Mega", "Primal", "Gmax", "Eternamax", "Tera", "Terastal", "Stellar",
];

/// Strips battle-only forme suffixes (`"Charizard-Mega-X"` -> `"Charizard"`).
///
/// Regular formes and hyphenated names (`"Rotom-Wash"`, `"Ho-Oh"`) are
/// returned unchanged.
pub fn base_species(species_forme: &str) -> &str {
    let mut cut = species_forme.len();
    for (index, _) in species_forme.match_indices('-') {
        let rest = &species_forme[index + 1..];
        let tag = rest.split('-').next().unwrap_or_default();
        if BATTLE_FORME_TAGS.contains(&tag) {
            cut = index;
            break;
        }
    }
    &species_forme[..cut]
}
