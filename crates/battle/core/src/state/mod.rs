//! Canonical battle snapshot representation.
//!
//! A [`BattleState`] is the committed, read-only view of one battle that the
//! calculation and presentation layers consume. The runtime never mutates a
//! committed snapshot; it clones it, drives the reconcilers against the clone,
//! and swaps the finished value in as a whole.
mod combatant;
mod field;

pub use combatant::{
    Alt, BoostOverrides, BoostStat, BoostTable, CombatantRecord, Gender, MAX_MOVES, MoveState,
    StatsTable, Status,
};
pub use field::{
    FieldState, GameType, PseudoWeather, SideConditions, SideField, Terrain, Weather,
};

use crate::env::Format;
use crate::reconcile::IdentityKey;

/// Feed-assigned battle identifier (e.g. `"battle-gen9ou-2004512"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BattleId(pub String);

impl BattleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BattleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BattleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Feed-supplied change token.
///
/// Equality with the committed token means the feed re-emitted a state that
/// was already merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChangeToken(pub u64);

/// One of the two fixed player slots.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SideId {
    P1,
    P2,
}

impl SideId {
    pub const ALL: [SideId; 2] = [SideId::P1, SideId::P2];

    pub const fn opponent(self) -> SideId {
        match self {
            SideId::P1 => SideId::P2,
            SideId::P2 => SideId::P1,
        }
    }

    /// Reads the side prefix of a feed identifier (`"p2a: Ditto"` -> `P2`).
    pub fn from_ident(ident: &str) -> Option<SideId> {
        let prefix = ident.get(..2)?;
        prefix.parse().ok()
    }
}

/// Canonical record of one player's side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSideState {
    pub side: SideId,
    pub name: Option<String>,
    pub rating: Option<u32>,
    /// Insertion-ordered roster. Records are replaced in place, never removed.
    pub roster: Vec<CombatantRecord>,
    pub active_index: Option<usize>,
    pub selection_index: Option<usize>,
    /// When set, `selection_index` follows `active_index` after every sync.
    pub auto_select: bool,
    /// Identifier order frozen from the first private roster observation.
    pub order_anchor: Option<Vec<String>>,
}

impl PlayerSideState {
    pub fn new(side: SideId) -> Self {
        Self {
            side,
            name: None,
            rating: None,
            roster: Vec::new(),
            active_index: None,
            selection_index: None,
            auto_select: true,
            order_anchor: None,
        }
    }

    pub fn with_auto_select(mut self, auto_select: bool) -> Self {
        self.auto_select = auto_select;
        self
    }

    pub fn position_of(&self, key: &IdentityKey) -> Option<usize> {
        self.roster.iter().position(|record| &record.key == key)
    }

    pub fn find(&self, key: &IdentityKey) -> Option<&CombatantRecord> {
        self.roster.iter().find(|record| &record.key == key)
    }

    pub fn active(&self) -> Option<&CombatantRecord> {
        self.active_index.and_then(|index| self.roster.get(index))
    }

    pub fn selected(&self) -> Option<&CombatantRecord> {
        self.selection_index.and_then(|index| self.roster.get(index))
    }
}

/// Canonical snapshot of one battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    pub battle_id: BattleId,
    pub format: Format,
    /// Token of the last committed feed frame. `None` until the first commit.
    pub token: Option<ChangeToken>,
    pub p1: PlayerSideState,
    pub p2: PlayerSideState,
    pub field: FieldState,
}

impl BattleState {
    /// Creates the empty canonical shape for a freshly registered battle.
    pub fn new(battle_id: BattleId, format: Format) -> Self {
        Self {
            battle_id,
            format,
            token: None,
            p1: PlayerSideState::new(SideId::P1),
            p2: PlayerSideState::new(SideId::P2),
            field: FieldState::default(),
        }
    }

    pub fn side(&self, side: SideId) -> &PlayerSideState {
        match side {
            SideId::P1 => &self.p1,
            SideId::P2 => &self.p2,
        }
    }

    pub fn side_mut(&mut self, side: SideId) -> &mut PlayerSideState {
        match side {
            SideId::P1 => &mut self.p1,
            SideId::P2 => &mut self.p2,
        }
    }
}
