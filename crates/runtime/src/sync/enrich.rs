//! Learnset enrichment.
//!
//! Runs after every roster merge of a sync, only for records that were
//! created or changed forme. Lookups for different records run concurrently;
//! each future holds a disjoint `&mut` into the working copy.
use std::collections::BTreeSet;

use battle_core::{CombatantRecord, Format, IdentityKey, MoveOracle, SyncFault};
use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::oracle::{DexManager, Learnset};

/// Rebuilds the unseen-move sets of every record whose key is in `keys`.
pub async fn enrich_roster<'a, I>(records: I, keys: &[IdentityKey], dex: &DexManager, format: &Format)
where
    I: IntoIterator<Item = &'a mut CombatantRecord>,
{
    let pending = records
        .into_iter()
        .filter(|record| keys.contains(&record.key))
        .map(|record| enrich_record(record, dex, format));

    join_all(pending).await;
}

async fn enrich_record(record: &mut CombatantRecord, dex: &DexManager, format: &Format) {
    let learnset = match dex.learnset_for(&record.species_forme).await {
        Ok(learnset) => learnset,
        Err(error) => {
            warn!(
                target: "sync::enrich",
                species = %record.species_forme,
                key = %record.key,
                code = error.error_code(),
                error = %error,
                "Learnset lookup failed, unseen moves left empty"
            );
            record.move_state.learnset.clear();
            record.move_state.other.clear();
            return;
        }
    };

    let (learnable, other) =
        partition_moves(&record.move_state.revealed, &learnset, dex.moves(), format);

    debug!(
        target: "sync::enrich",
        species = %record.species_forme,
        key = %record.key,
        learnable = learnable.len(),
        other = other.len(),
        "Enriched move knowledge"
    );

    record.move_state.learnset = learnable;
    record.move_state.other = other;
}

/// Splits candidate move names into learnable-but-unseen and other-unseen.
///
/// Both lists exclude `revealed` and ids the catalog cannot name, and are
/// alphabetically ordered. `other` is only filled when the learnset is empty
/// or the format is rule-relaxed.
pub fn partition_moves(
    revealed: &[String],
    learnset: &Learnset,
    moves: &dyn MoveOracle,
    format: &Format,
) -> (Vec<String>, Vec<String>) {
    let learnable: BTreeSet<String> = learnset
        .keys()
        .filter_map(|id| moves.move_name(id))
        .filter(|name| !revealed.contains(name))
        .collect();

    let other: BTreeSet<String> = if learnable.is_empty() || format.is_rule_relaxed() {
        moves
            .move_ids()
            .iter()
            .filter_map(|id| moves.move_name(id))
            .filter(|name| !revealed.contains(name) && !learnable.contains(name))
            .collect()
    } else {
        BTreeSet::new()
    };

    (learnable.into_iter().collect(), other.into_iter().collect())
}
