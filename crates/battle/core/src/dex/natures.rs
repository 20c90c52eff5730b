/// Stats a nature can raise or lower.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum NatureStat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Nature {
    Adamant,
    Bashful,
    Bold,
    Brave,
    Calm,
    Careful,
    Docile,
    Gentle,
    Hasty,
    Impish,
    Jolly,
    Lax,
    Lonely,
    Mild,
    Modest,
    Naive,
    Naughty,
    Quiet,
    Quirky,
    Rash,
    Relaxed,
    Sassy,
    Serious,
    Timid,
    Hardy,
}

impl Nature {
    /// The raised and lowered stat, or `None` for neutral natures.
    pub const fn boosts(self) -> Option<(NatureStat, NatureStat)> {
        use NatureStat::*;
        match self {
            Nature::Adamant => Some((Atk, Spa)),
            Nature::Bold => Some((Def, Atk)),
            Nature::Brave => Some((Atk, Spe)),
            Nature::Calm => Some((Spd, Atk)),
            Nature::Careful => Some((Spd, Spa)),
            Nature::Gentle => Some((Spd, Def)),
            Nature::Hasty => Some((Spe, Def)),
            Nature::Impish => Some((Def, Spa)),
            Nature::Jolly => Some((Spe, Spa)),
            Nature::Lax => Some((Def, Spd)),
            Nature::Lonely => Some((Atk, Def)),
            Nature::Mild => Some((Spa, Def)),
            Nature::Modest => Some((Spa, Atk)),
            Nature::Naive => Some((Spe, Spd)),
            Nature::Naughty => Some((Atk, Spd)),
            Nature::Quiet => Some((Spa, Spe)),
            Nature::Rash => Some((Spa, Spd)),
            Nature::Relaxed => Some((Def, Spe)),
            Nature::Sassy => Some((Spd, Spe)),
            Nature::Timid => Some((Spe, Atk)),
            Nature::Bashful
            | Nature::Docile
            | Nature::Quirky
            | Nature::Serious
            | Nature::Hardy => None,
        }
    }

    pub const fn is_neutral(self) -> bool {
        self.boosts().is_none()
    }

    /// Multiplier (in tenths) the nature applies to `stat`: 11, 9 or 10.
    pub fn modifier(self, stat: NatureStat) -> u16 {
        match self.boosts() {
            Some((up, _)) if up == stat => 11,
            Some((_, down)) if down == stat => 9,
            _ => 10,
        }
    }
}

/// Natures tried by stat-spread inference, most common first.
///
/// Neutral natures are skipped except Hardy, which random formats use.
pub const COMMON_NATURES: [Nature; 21] = [
    Nature::Adamant,
    Nature::Modest,
    Nature::Jolly,
    Nature::Timid,
    Nature::Bold,
    Nature::Brave,
    Nature::Calm,
    Nature::Careful,
    Nature::Gentle,
    Nature::Hasty,
    Nature::Impish,
    Nature::Lax,
    Nature::Lonely,
    Nature::Mild,
    Nature::Naive,
    Nature::Naughty,
    Nature::Quiet,
    Nature::Rash,
    Nature::Relaxed,
    Nature::Sassy,
    Nature::Hardy,
];

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn five_natures_are_neutral() {
        let neutral = Nature::iter().filter(|n| n.is_neutral()).count();
        assert_eq!(neutral, 5);
    }

    #[test]
    fn common_natures_end_with_hardy() {
        assert_eq!(COMMON_NATURES.last(), Some(&Nature::Hardy));
        assert!(COMMON_NATURES[..20].iter().all(|n| !n.is_neutral()));
    }

    #[test]
    fn modifier_applies_raise_and_drop() {
        assert_eq!(Nature::Adamant.modifier(NatureStat::Atk), 11);
        assert_eq!(Nature::Adamant.modifier(NatureStat::Spa), 9);
        assert_eq!(Nature::Adamant.modifier(NatureStat::Spe), 10);
        assert_eq!("timid".parse::<Nature>().ok(), Some(Nature::Timid));
    }
}
