use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::feed::PublicView;
use crate::reconcile::IdentityKey;
use crate::state::SideId;

/// Maximum number of definite moves a combatant carries.
pub const MAX_MOVES: usize = 4;

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
pub enum Gender {
    #[strum(serialize = "M")]
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Male,
    #[strum(serialize = "F")]
    #[cfg_attr(feature = "serde", serde(rename = "F"))]
    Female,
    #[default]
    #[strum(serialize = "N")]
    #[cfg_attr(feature = "serde", serde(rename = "N"))]
    Genderless,
}

/// Non-volatile status condition.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    /// The feed's explicit "no status" (`""`).
    #[cfg_attr(feature = "serde", serde(rename = ""))]
    #[strum(serialize = "")]
    Healthy,
    Brn,
    Par,
    Slp,
    Frz,
    Psn,
    Tox,
}

/// Stats that can carry stage boosts.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BoostStat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

/// Stage boosts relative to the neutral baseline of 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoostTable {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl BoostTable {
    /// Builds a table from a sparse stat map; missing stats are neutral.
    pub fn from_sparse(boosts: &BTreeMap<BoostStat, i8>) -> Self {
        let mut table = Self::default();
        for (&stat, &stage) in boosts {
            table.set(stat, stage);
        }
        table
    }

    pub fn get(&self, stat: BoostStat) -> i8 {
        match stat {
            BoostStat::Atk => self.atk,
            BoostStat::Def => self.def,
            BoostStat::Spa => self.spa,
            BoostStat::Spd => self.spd,
            BoostStat::Spe => self.spe,
            BoostStat::Accuracy => self.accuracy,
            BoostStat::Evasion => self.evasion,
        }
    }

    /// Sets a stage, clamped to the legal -6..=6 range.
    pub fn set(&mut self, stat: BoostStat, stage: i8) {
        let stage = stage.clamp(-6, 6);
        match stat {
            BoostStat::Atk => self.atk = stage,
            BoostStat::Def => self.def = stage,
            BoostStat::Spa => self.spa = stage,
            BoostStat::Spd => self.spd = stage,
            BoostStat::Spe => self.spe = stage,
            BoostStat::Accuracy => self.accuracy = stage,
            BoostStat::Evasion => self.evasion = stage,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}

/// Manual per-stat boost corrections entered by the presentation layer.
pub type BoostOverrides = BTreeMap<BoostStat, i8>;

/// Base or final stat spread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsTable {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatsTable {
    pub const fn new(hp: u16, atk: u16, def: u16, spa: u16, spd: u16, spe: u16) -> Self {
        Self {
            hp,
            atk,
            def,
            spa,
            spd,
            spe,
        }
    }

    pub const fn uniform(value: u16) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    /// Values in `hp/atk/def/spa/spd/spe` order.
    pub const fn to_array(&self) -> [u16; 6] {
        [self.hp, self.atk, self.def, self.spa, self.spd, self.spe]
    }

    pub const fn from_array(values: [u16; 6]) -> Self {
        Self::new(
            values[0], values[1], values[2], values[3], values[4], values[5],
        )
    }
}

/// A candidate value for an attribute public information cannot pin down,
/// optionally weighted by observed usage (0.0..=1.0).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alt {
    pub value: String,
    pub usage: Option<f64>,
}

impl Alt {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            usage: None,
        }
    }

    pub fn weighted(value: impl Into<String>, usage: f64) -> Self {
        Self {
            value: value.into(),
            usage: Some(usage),
        }
    }
}

/// Move knowledge partition.
///
/// `revealed` only grows. `learnset` and `other` never contain a revealed
/// name and are rebuilt by enrichment when the combatant's form changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveState {
    pub revealed: Vec<String>,
    pub learnset: Vec<String>,
    pub other: Vec<String>,
}

impl MoveState {
    /// Appends a newly revealed move, keeping reveal order and uniqueness.
    pub fn reveal(&mut self, name: &str) {
        if self.revealed.iter().any(|known| known == name) {
            return;
        }
        self.revealed.push(name.to_string());
        self.learnset.retain(|candidate| candidate != name);
        self.other.retain(|candidate| candidate != name);
    }

    pub fn is_revealed(&self, name: &str) -> bool {
        self.revealed.iter().any(|known| known == name)
    }
}

/// Canonical per-combatant record.
///
/// Created on first observation, replaced wholesale on every later sync, and
/// never removed for the life of the battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantRecord {
    /// Assigned once; never regenerated for this record.
    pub key: IdentityKey,
    /// Feed-native identifier (`"p1: Pikachu"`).
    pub ident: String,
    pub searchid: Option<String>,
    pub side: SideId,
    /// Roster position at the time the record was created.
    pub slot: usize,

    pub name: String,
    pub species_forme: String,
    pub details: Option<String>,
    pub level: u8,
    pub gender: Gender,
    pub shiny: bool,
    /// Infinite Fusion body species, when the details carry one.
    pub fusion_body: Option<String>,
    pub tera_type: Option<String>,

    pub hp: u32,
    pub max_hp: u32,
    pub status: Option<Status>,
    pub fainted: bool,

    pub ability: Option<String>,
    pub base_ability: Option<String>,
    pub ability_toggled: bool,
    pub item: Option<String>,
    pub prev_item: Option<String>,
    /// Definite move set, only known from the private view.
    pub moves: ArrayVec<String, MAX_MOVES>,
    /// Final stats, only known from the private view.
    pub stats: Option<StatsTable>,

    pub alt_abilities: Vec<Alt>,
    pub alt_items: Vec<Alt>,
    pub alt_moves: Vec<Alt>,

    pub move_state: MoveState,
    pub volatiles: Vec<String>,
    pub boosts: BoostTable,
    pub dirty_boosts: BoostOverrides,
}

impl CombatantRecord {
    /// Seeds a canonical record from the first public observation.
    ///
    /// Only the identifying shell is filled here; the merge unit layers every
    /// observed attribute on top.
    pub fn from_public(view: &PublicView, key: IdentityKey, slot: usize, side: SideId) -> Self {
        let details = view.details_info();
        let species_forme = view
            .species_forme
            .clone()
            .or(details.species)
            .unwrap_or_default();
        let name = view
            .name
            .clone()
            .unwrap_or_else(|| crate::util::ident_name(&view.ident).to_string());

        Self {
            key,
            ident: crate::util::normalize_ident(&view.ident),
            searchid: None,
            side: view.side.unwrap_or(side),
            slot,
            name,
            species_forme,
            details: None,
            level: 100,
            gender: Gender::default(),
            shiny: false,
            fusion_body: None,
            tera_type: None,
            hp: 0,
            max_hp: 0,
            status: None,
            fainted: false,
            ability: None,
            base_ability: None,
            ability_toggled: false,
            item: None,
            prev_item: None,
            moves: ArrayVec::new(),
            stats: None,
            alt_abilities: Vec::new(),
            alt_items: Vec::new(),
            alt_moves: Vec::new(),
            move_state: MoveState::default(),
            volatiles: Vec::new(),
            boosts: BoostTable::default(),
            dirty_boosts: BoostOverrides::new(),
        }
    }

    /// Records a manual boost correction for `stat`.
    pub fn set_boost_override(&mut self, stat: BoostStat, stage: i8) {
        self.dirty_boosts.insert(stat, stage.clamp(-6, 6));
    }

    /// Boost used by calculations: the manual override when one is set.
    pub fn effective_boost(&self, stat: BoostStat) -> i8 {
        self.dirty_boosts
            .get(&stat)
            .copied()
            .unwrap_or_else(|| self.boosts.get(stat))
    }
}
