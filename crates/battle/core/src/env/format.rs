use crate::util::to_id;

/// Newest generation assumed when a format carries no `genN` prefix.
pub const LATEST_GENERATION: u8 = 9;

/// Substrings marking formats where learnsets do not constrain move choice.
const RULE_RELAXED_MARKERS: [&str; 2] = ["anythinggoes", "hackmons"];

/// Battle-format descriptor (`"gen9ou"`, `"gen8balancedhackmons"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Format(String);

impl Format {
    pub fn new(format: impl Into<String>) -> Self {
        Self(format.into())
    }

    /// Extracts the format from a battle id (`"battle-gen9ou-2004512"`).
    pub fn from_battle_id(battle_id: &str) -> Option<Self> {
        let mut parts = battle_id.split('-');
        if parts.next()? != "battle" {
            return None;
        }
        parts
            .next()
            .filter(|format| !format.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Generation number from the leading `genN`, defaulting to the latest.
    pub fn generation(&self) -> u8 {
        let id = to_id(&self.0);
        id.strip_prefix("gen")
            .map(|rest| {
                rest.chars()
                    .take_while(char::is_ascii_digit)
                    .collect::<String>()
            })
            .and_then(|digits| digits.parse().ok())
            .unwrap_or(LATEST_GENERATION)
    }

    /// True for anything-goes / hackmons-like formats.
    pub fn is_rule_relaxed(&self) -> bool {
        let id = to_id(&self.0);
        RULE_RELAXED_MARKERS
            .iter()
            .any(|marker| id.contains(marker))
    }

    /// Abilities exist from generation 3 onwards.
    pub fn has_abilities(&self) -> bool {
        self.generation() >= 3
    }

    /// Held items exist from generation 2 onwards.
    pub fn has_items(&self) -> bool {
        self.generation() >= 2
    }
}

impl core::fmt::Display for Format {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_reads_prefix() {
        assert_eq!(Format::new("gen9ou").generation(), 9);
        assert_eq!(Format::new("gen1randombattle").generation(), 1);
        assert_eq!(Format::new("[Gen 8] OU").generation(), 8);
        assert_eq!(Format::new("customgame").generation(), LATEST_GENERATION);
    }

    #[test]
    fn rule_relaxed_matches_known_markers_only() {
        assert!(Format::new("gen9anythinggoes").is_rule_relaxed());
        assert!(Format::new("gen8BalancedHackmons").is_rule_relaxed());
        assert!(!Format::new("gen9ou").is_rule_relaxed());
        assert!(!Format::new("gen9almostanyability").is_rule_relaxed());
    }

    #[test]
    fn format_from_battle_id() {
        assert_eq!(
            Format::from_battle_id("battle-gen9ou-2004512"),
            Some(Format::new("gen9ou"))
        );
        assert_eq!(Format::from_battle_id("b1"), None);
    }

    #[test]
    fn early_generations_lack_abilities_and_items() {
        assert!(!Format::new("gen1ou").has_items());
        assert!(!Format::new("gen2ou").has_abilities());
        assert!(Format::new("gen3ou").has_abilities());
    }
}
