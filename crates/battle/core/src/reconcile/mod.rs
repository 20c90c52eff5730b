//! Synchronous reconciliation rules.
//!
//! Data flows one way: identity resolution, then the per-side roster merge
//! (which applies the combatant merge unit to every entry), then the field
//! merge. Each step takes the previous canonical value by reference and
//! returns a new value; none of them mutates committed state.
mod field;
mod identity;
mod merge;
mod roster;

pub use field::reconcile_field;
pub use identity::{IdentityKey, IdentitySource, Identifiable, identify};
pub use merge::{MergeContext, merge_combatant};
pub use roster::{RosterInput, RosterOutcome, detect_viewer_side, reconcile_roster};
