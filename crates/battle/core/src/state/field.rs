use bitflags::bitflags;

use crate::util::to_id;

/// Battle-mode discriminator. Every valid [`FieldState`] carries one.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameType {
    #[default]
    Singles,
    Doubles,
    Triples,
    Multi,
    FreeForAll,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
    Snow,
    HarshSunshine,
    HeavyRain,
    StrongWinds,
}

impl Weather {
    /// Maps a feed weather name or id (`"RainDance"`, `"desolateland"`).
    pub fn from_feed(name: &str) -> Option<Self> {
        match to_id(name).as_str() {
            "sunnyday" | "sun" => Some(Self::Sun),
            "raindance" | "rain" => Some(Self::Rain),
            "sandstorm" | "sand" => Some(Self::Sand),
            "hail" => Some(Self::Hail),
            "snow" | "snowscape" => Some(Self::Snow),
            "desolateland" | "harshsunshine" => Some(Self::HarshSunshine),
            "primordialsea" | "heavyrain" => Some(Self::HeavyRain),
            "deltastream" | "strongwinds" => Some(Self::StrongWinds),
            _ => None,
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl Terrain {
    /// Maps a pseudo-weather name (`"Electric Terrain"`) to a terrain.
    pub fn from_feed(name: &str) -> Option<Self> {
        match to_id(name).as_str() {
            "electricterrain" => Some(Self::Electric),
            "grassyterrain" => Some(Self::Grassy),
            "mistyterrain" => Some(Self::Misty),
            "psychicterrain" => Some(Self::Psychic),
            _ => None,
        }
    }
}

bitflags! {
    /// Field-wide pseudo-weather conditions other than terrain.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PseudoWeather: u8 {
        const GRAVITY     = 1 << 0;
        const MAGIC_ROOM  = 1 << 1;
        const TRICK_ROOM  = 1 << 2;
        const WONDER_ROOM = 1 << 3;
        const FAIRY_LOCK  = 1 << 4;
        const MUD_SPORT   = 1 << 5;
        const WATER_SPORT = 1 << 6;
    }
}

impl PseudoWeather {
    pub fn from_feed(name: &str) -> Self {
        match to_id(name).as_str() {
            "gravity" => Self::GRAVITY,
            "magicroom" => Self::MAGIC_ROOM,
            "trickroom" => Self::TRICK_ROOM,
            "wonderroom" => Self::WONDER_ROOM,
            "fairylock" => Self::FAIRY_LOCK,
            "mudsport" => Self::MUD_SPORT,
            "watersport" => Self::WATER_SPORT,
            _ => Self::empty(),
        }
    }
}

bitflags! {
    /// Hazards and screens present on one side of the field.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SideConditions: u16 {
        const STEALTH_ROCK  = 1 << 0;
        const SPIKES        = 1 << 1;
        const TOXIC_SPIKES  = 1 << 2;
        const STICKY_WEB    = 1 << 3;
        const REFLECT       = 1 << 4;
        const LIGHT_SCREEN  = 1 << 5;
        const AURORA_VEIL   = 1 << 6;
        const TAILWIND      = 1 << 7;
        const SAFEGUARD     = 1 << 8;
        const MIST          = 1 << 9;
        const LUCKY_CHANT   = 1 << 10;
    }
}

impl SideConditions {
    pub fn from_feed(name: &str) -> Self {
        match to_id(name).as_str() {
            "stealthrock" => Self::STEALTH_ROCK,
            "spikes" => Self::SPIKES,
            "toxicspikes" => Self::TOXIC_SPIKES,
            "stickyweb" => Self::STICKY_WEB,
            "reflect" => Self::REFLECT,
            "lightscreen" => Self::LIGHT_SCREEN,
            "auroraveil" => Self::AURORA_VEIL,
            "tailwind" => Self::TAILWIND,
            "safeguard" => Self::SAFEGUARD,
            "mist" => Self::MIST,
            "luckychant" => Self::LUCKY_CHANT,
            _ => Self::empty(),
        }
    }
}

/// Per-side hazard/screen state. Layered hazards keep their layer count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideField {
    pub conditions: SideConditions,
    pub spikes: u8,
    pub toxic_spikes: u8,
}

/// Shared battle-wide conditions plus the active combatant of each side.
///
/// `attacker_*` refers to p1 and `defender_*` to p2.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldState {
    pub game_type: GameType,
    pub weather: Option<Weather>,
    pub terrain: Option<Terrain>,
    pub pseudo_weather: PseudoWeather,
    pub attacker_side: SideField,
    pub defender_side: SideField,
    pub attacker_index: Option<usize>,
    pub defender_index: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_names_map_to_conditions() {
        assert_eq!(Weather::from_feed("RainDance"), Some(Weather::Rain));
        assert_eq!(Weather::from_feed("Desolate Land"), Some(Weather::HarshSunshine));
        assert_eq!(Weather::from_feed("none"), None);
        assert_eq!(Terrain::from_feed("Psychic Terrain"), Some(Terrain::Psychic));
        assert_eq!(PseudoWeather::from_feed("Trick Room"), PseudoWeather::TRICK_ROOM);
        assert_eq!(SideConditions::from_feed("Stealth Rock"), SideConditions::STEALTH_ROCK);
        assert!(SideConditions::from_feed("Unknown").is_empty());
    }

    #[test]
    fn game_type_parses_case_insensitively() {
        assert_eq!("Doubles".parse::<GameType>().ok(), Some(GameType::Doubles));
        assert_eq!("freeforall".parse::<GameType>().ok(), Some(GameType::FreeForAll));
        assert!("rotation".parse::<GameType>().is_err());
    }
}
