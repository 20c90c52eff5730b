//! Raw observation shapes delivered by the battle feed.
//!
//! The feed exposes two asymmetric views of the same roster:
//! [`PublicView`] (partially revealed, visible to everyone) and
//! [`PrivateView`] (fully known, only for the viewer's own side). Neither is a
//! canonical record; the merge unit folds them into a
//! [`crate::CombatantRecord`].
use std::collections::BTreeMap;

use crate::state::{BattleId, BoostStat, ChangeToken, Gender, SideId, StatsTable, Status};

/// Attributes carried by a feed `details` string
/// (`"Houndoom, L76, F, shiny, fusion: Jolteon"`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailsInfo {
    pub species: Option<String>,
    pub level: Option<u8>,
    pub gender: Option<Gender>,
    pub shiny: bool,
    pub fusion_body: Option<String>,
}

impl DetailsInfo {
    pub fn parse(details: &str) -> Self {
        let mut parts = details.split(',').map(str::trim);
        let mut info = DetailsInfo {
            species: parts.next().filter(|s| !s.is_empty()).map(str::to_string),
            ..DetailsInfo::default()
        };

        for part in parts {
            if let Some(level) = part.strip_prefix('L') {
                info.level = level.parse().ok();
            } else if let Some(body) = part.strip_prefix("fusion:") {
                info.fusion_body = Some(body.trim().to_string()).filter(|b| !b.is_empty());
            } else if part == "shiny" {
                info.shiny = true;
            } else if let Ok(gender) = part.parse::<Gender>() {
                info.gender = Some(gender);
            }
        }

        info
    }
}

/// Public, incrementally revealed observation of one combatant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PublicView {
    pub ident: String,
    pub searchid: Option<String>,
    pub name: Option<String>,
    pub species_forme: Option<String>,
    pub details: Option<String>,
    pub level: Option<u8>,
    pub gender: Option<Gender>,
    pub shiny: Option<bool>,
    /// Some feed-internal shapes omit the side reference.
    pub side: Option<SideId>,
    pub hp: Option<u32>,
    pub max_hp: Option<u32>,
    pub status: Option<Status>,
    pub fainted: Option<bool>,
    pub ability: Option<String>,
    pub base_ability: Option<String>,
    pub item: Option<String>,
    pub prev_item: Option<String>,
    pub tera_type: Option<String>,
    /// Move names seen so far.
    pub revealed_moves: Vec<String>,
    /// Current stage boosts. `None` means the view carries no boost data.
    pub boosts: Option<BTreeMap<BoostStat, i8>>,
    /// Volatile conditions currently applied. `None` means no data.
    pub volatiles: Option<Vec<String>>,
}

impl PublicView {
    pub fn new(ident: impl Into<String>, species_forme: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            species_forme: Some(species_forme.into()),
            ..Self::default()
        }
    }

    pub fn details_info(&self) -> DetailsInfo {
        self.details
            .as_deref()
            .map(DetailsInfo::parse)
            .unwrap_or_default()
    }

    /// Synthesizes the public shape of a combatant only the private view
    /// knows about (not yet revealed to the opponent).
    pub fn stub_from_private(private: &PrivateView) -> Self {
        Self {
            ident: private.ident.clone(),
            searchid: private.searchid.clone(),
            name: private.name.clone(),
            species_forme: Some(private.species_forme.clone()),
            details: private.details.clone(),
            level: private.level,
            gender: private.gender,
            shiny: private.shiny,
            side: None,
            hp: private.hp,
            max_hp: private.max_hp,
            ..Self::default()
        }
    }
}

/// Fully known observation of one of the viewer's own combatants.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrivateView {
    /// Feed-native secondary identifier used to pair with the public view.
    pub ident: String,
    pub searchid: Option<String>,
    pub name: Option<String>,
    pub species_forme: String,
    pub details: Option<String>,
    pub level: Option<u8>,
    pub gender: Option<Gender>,
    pub shiny: Option<bool>,
    pub hp: Option<u32>,
    pub max_hp: Option<u32>,
    pub status: Option<Status>,
    pub fainted: Option<bool>,
    pub ability: Option<String>,
    pub base_ability: Option<String>,
    pub item: Option<String>,
    pub tera_type: Option<String>,
    /// Move ids (`"thunderbolt"`), resolved to names through the move oracle.
    pub moves: Vec<String>,
    pub stats: Option<StatsTable>,
}

impl PrivateView {
    pub fn new(ident: impl Into<String>, species_forme: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            species_forme: species_forme.into(),
            ..Self::default()
        }
    }

    pub fn details_info(&self) -> DetailsInfo {
        self.details
            .as_deref()
            .map(DetailsInfo::parse)
            .unwrap_or_default()
    }
}

/// One side slot of the feed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedSide {
    pub side_id: SideId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<u32>,
    /// Working combatant array. The feed may reorder it between frames.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pokemon: Vec<PublicView>,
    /// Identifiers of the combatants currently on the field, by position.
    #[cfg_attr(feature = "serde", serde(default))]
    pub active: Vec<Option<String>>,
    /// Hazard/screen name to layer count.
    #[cfg_attr(feature = "serde", serde(default))]
    pub side_conditions: BTreeMap<String, u8>,
}

impl FeedSide {
    pub fn new(side_id: SideId) -> Self {
        Self {
            side_id,
            name: None,
            rating: None,
            pokemon: Vec::new(),
            active: Vec::new(),
            side_conditions: BTreeMap::new(),
        }
    }

    /// Identifier of the first active position, if occupied.
    pub fn lead_ident(&self) -> Option<&str> {
        self.active.first()?.as_deref()
    }
}

/// Read-only per-battle frame emitted by the feed.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleFeed {
    pub battle_id: Option<BattleId>,
    pub token: Option<ChangeToken>,
    /// Explicit viewer side, when the host exposes it.
    pub viewer_side: Option<SideId>,
    pub p1: Option<FeedSide>,
    pub p2: Option<FeedSide>,
    /// Private roster of the viewer's own side, in the viewer's team order.
    pub my_pokemon: Vec<PrivateView>,
    pub game_type: Option<String>,
    pub weather: Option<String>,
    pub pseudo_weather: Vec<String>,
}

impl BattleFeed {
    pub fn side(&self, side: SideId) -> Option<&FeedSide> {
        match side {
            SideId::P1 => self.p1.as_ref(),
            SideId::P2 => self.p2.as_ref(),
        }
    }
}
