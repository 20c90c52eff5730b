//! Canonical battle snapshots and the synchronous reconciliation rules.
//!
//! `battle-core` turns two asymmetric observations of the same battle (the
//! public, incrementally revealed feed and the viewer's private roster) into a
//! single identity-stable [`BattleState`]. Everything here is pure: the
//! asynchronous learnset enrichment and the commit discipline live in the
//! runtime crate, which drives the reconcilers exported from [`reconcile`].
//!
//! Modules are organized by responsibility:
//! - [`state`] holds the canonical snapshot types
//! - [`feed`] holds the raw public/private observation shapes
//! - [`reconcile`] hosts identity resolution and the roster/field merges
//! - [`env`] exposes reference-data oracles and the format context
//! - [`dex`] carries static game tables (natures, fusion, abilities)
//! - [`hydro`] is the stateless persisted-roster codec
pub mod dex;
pub mod env;
pub mod error;
pub mod feed;
pub mod hydro;
pub mod reconcile;
pub mod state;
pub mod util;

pub use env::{Format, MoveOracle, OracleError};
pub use error::{ErrorSeverity, SyncFault};
pub use feed::{BattleFeed, DetailsInfo, FeedSide, PrivateView, PublicView};
pub use hydro::{CodecError, RosterPreset, dehydrate_preset, hydrate_preset};
pub use reconcile::{
    IdentityKey, MergeContext, RosterInput, RosterOutcome, detect_viewer_side, identify,
    merge_combatant, reconcile_field, reconcile_roster,
};
pub use state::{
    Alt, BattleId, BattleState, BoostStat, BoostTable, ChangeToken, CombatantRecord, FieldState,
    GameType, Gender, MoveState, PlayerSideState, PseudoWeather, SideConditions, SideField,
    SideId, StatsTable, Status, Terrain, Weather,
};
