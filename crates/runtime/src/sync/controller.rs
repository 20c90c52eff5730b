//! Synchronization controller.
//!
//! One [`Synchronizer`] owns the path from a feed frame to a committed
//! snapshot. `sync` takes `&mut self`, so requests for any battle it serves
//! run to completion one at a time; the worker task is its only owner.
use std::sync::Arc;

use battle_core::{
    BattleFeed, BattleState, FeedSide, Format, IdentityKey, PlayerSideState, PrivateView,
    RosterInput, SideId, detect_viewer_side, reconcile_field, reconcile_roster,
};
use tracing::{debug, warn};

use super::enrich::enrich_roster;
use crate::api::{Result, RuntimeError};
use crate::config::SyncConfig;
use crate::oracle::DexManager;
use crate::repository::BattleRepository;

/// Result of a sync request that did not fail.
///
/// Every variant carries the snapshot that is committed after the call.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The merged working copy was committed.
    Committed(Arc<BattleState>),
    /// The token matched the committed one; nothing was recomputed.
    Unchanged(Arc<BattleState>),
    /// The field could not be established; the working copy was dropped.
    FieldAborted(Arc<BattleState>),
}

impl SyncOutcome {
    pub fn snapshot(&self) -> &Arc<BattleState> {
        match self {
            SyncOutcome::Committed(state)
            | SyncOutcome::Unchanged(state)
            | SyncOutcome::FieldAborted(state) => state,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, SyncOutcome::Committed(_))
    }
}

/// Drives identity resolution, roster and field merges, and enrichment
/// against a private working copy, then swaps the copy in.
pub struct Synchronizer {
    repository: Arc<dyn BattleRepository>,
    dex: DexManager,
    config: SyncConfig,
}

impl Synchronizer {
    pub fn new(repository: Arc<dyn BattleRepository>, dex: DexManager, config: SyncConfig) -> Self {
        Self {
            repository,
            dex,
            config,
        }
    }

    pub fn repository(&self) -> &Arc<dyn BattleRepository> {
        &self.repository
    }

    /// Merges one feed frame.
    ///
    /// Contract violations (missing battle id, unregistered battle, missing
    /// learnset capability) fail the request without touching the committed
    /// snapshot. Everything else degrades and is logged.
    pub async fn sync(&mut self, feed: &BattleFeed) -> Result<SyncOutcome> {
        let battle_id = feed.battle_id.as_ref().ok_or(RuntimeError::MissingBattleId)?;
        let committed =
            self.repository
                .load(battle_id)?
                .ok_or_else(|| RuntimeError::UnknownBattle {
                    battle_id: battle_id.clone(),
                })?;

        if feed.token.is_some() && feed.token == committed.token {
            debug!(
                target: "sync::controller",
                battle_id = %battle_id,
                token = ?feed.token,
                "Change token unchanged, skipping sync"
            );
            return Ok(SyncOutcome::Unchanged(committed));
        }

        self.dex.learnsets()?;

        let mut next = (*committed).clone();
        let format = next.format.clone();
        let viewer = detect_viewer_side(feed);
        let mut enrich: [Vec<IdentityKey>; 2] = Default::default();

        for (side, pending) in SideId::ALL.into_iter().zip(enrich.iter_mut()) {
            let Some(feed_side) = feed.side(side) else {
                warn!(
                    target: "sync::controller",
                    battle_id = %battle_id,
                    side = %side,
                    "Side missing from feed, keeping prior roster"
                );
                continue;
            };
            if feed_side.side_id != side {
                warn!(
                    target: "sync::controller",
                    battle_id = %battle_id,
                    side = %side,
                    reported = %feed_side.side_id,
                    "Feed side id mismatch, keeping prior roster"
                );
                continue;
            }

            let private = (viewer == Some(side) && !feed.my_pokemon.is_empty())
                .then_some(feed.my_pokemon.as_slice());
            let side_state = next.side_mut(side);
            merge_player(side_state, feed_side);

            if feed_side.pokemon.is_empty() && private.is_none() {
                warn!(
                    target: "sync::controller",
                    battle_id = %battle_id,
                    side = %side,
                    "Side reports no combatants, keeping prior roster"
                );
                continue;
            }

            *pending = self.reconcile_side(side_state, feed_side, private, &format);
        }

        let Some(field) = reconcile_field(
            &next.field,
            feed,
            next.p1.active_index,
            next.p2.active_index,
        ) else {
            warn!(
                target: "sync::controller",
                battle_id = %battle_id,
                game_type = ?feed.game_type,
                "Field has no battle mode, discarding sync"
            );
            return Ok(SyncOutcome::FieldAborted(committed));
        };
        next.field = field;

        let [p1_keys, p2_keys] = &enrich;
        futures_util::join!(
            enrich_roster(next.p1.roster.iter_mut(), p1_keys, &self.dex, &format),
            enrich_roster(next.p2.roster.iter_mut(), p2_keys, &self.dex, &format),
        );

        next.token = feed.token;
        let committed = self.repository.commit(next)?;

        debug!(
            target: "sync::controller",
            battle_id = %battle_id,
            token = ?committed.token,
            p1 = committed.p1.roster.len(),
            p2 = committed.p2.roster.len(),
            "Committed battle snapshot"
        );

        Ok(SyncOutcome::Committed(committed))
    }

    /// Runs the roster pass for one side of the working copy and returns
    /// the keys that need enrichment.
    fn reconcile_side(
        &self,
        side_state: &mut PlayerSideState,
        feed_side: &FeedSide,
        private: Option<&[PrivateView]>,
        format: &Format,
    ) -> Vec<IdentityKey> {
        let side = side_state.side;
        let outcome = reconcile_roster(&RosterInput {
            side,
            prior: side_state,
            public: &feed_side.pokemon,
            private,
            active_ident: feed_side.lead_ident(),
            capacity: self.config.max_combatants,
            format,
            moves: self.dex.moves(),
        });

        for ident in &outcome.discarded {
            warn!(
                target: "sync::roster",
                side = %side,
                ident = %ident,
                capacity = self.config.max_combatants,
                "Roster at capacity, discarding new combatant"
            );
        }
        debug!(
            target: "sync::roster",
            side = %side,
            roster = outcome.roster.len(),
            new_or_changed = outcome.enrich.len(),
            active = ?outcome.active_index,
            "Reconciled roster"
        );

        side_state.roster = outcome.roster;
        side_state.order_anchor = outcome.order_anchor;
        side_state.active_index = outcome.active_index;
        side_state.selection_index = outcome.selection_index;
        outcome.enrich
    }
}

/// Copies display name and rating when the feed carries them.
fn merge_player(side_state: &mut PlayerSideState, feed_side: &FeedSide) {
    if let Some(name) = &feed_side.name
        && side_state.name.as_ref() != Some(name)
    {
        side_state.name = Some(name.clone());
    }
    if let Some(rating) = feed_side.rating {
        side_state.rating = Some(rating);
    }
}
