use std::borrow::Cow;

use crate::env::{Format, MoveOracle};
use crate::feed::{BattleFeed, PrivateView, PublicView};
use crate::reconcile::{IdentityKey, MergeContext, identify, merge_combatant};
use crate::state::{CombatantRecord, PlayerSideState, SideId};
use crate::util::normalize_ident;

/// Everything one side's roster pass reads.
#[derive(Clone, Copy)]
pub struct RosterInput<'a> {
    pub side: SideId,
    pub prior: &'a PlayerSideState,
    /// The feed's working combatant array for this side.
    pub public: &'a [PublicView],
    /// Present only when this side is the viewer's own.
    pub private: Option<&'a [PrivateView]>,
    /// The feed's first active pointer for this side.
    pub active_ident: Option<&'a str>,
    pub capacity: usize,
    pub format: &'a Format,
    pub moves: &'a dyn MoveOracle,
}

/// Result of one roster pass. Nothing in the prior side state is touched.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterOutcome {
    pub roster: Vec<CombatantRecord>,
    pub order_anchor: Option<Vec<String>>,
    pub active_index: Option<usize>,
    pub selection_index: Option<usize>,
    /// Records created or whose species/forme changed during this pass.
    pub enrich: Vec<IdentityKey>,
    /// Identifiers of new combatants dropped because the roster was full.
    pub discarded: Vec<String>,
}

/// The viewer's own side: the feed's explicit marker, else the side prefix
/// of the first private identifier.
pub fn detect_viewer_side(feed: &BattleFeed) -> Option<SideId> {
    feed.viewer_side.or_else(|| {
        feed.my_pokemon
            .first()
            .and_then(|private| SideId::from_ident(&private.ident))
    })
}

/// Merges one side's observations into its canonical roster.
pub fn reconcile_roster(input: &RosterInput<'_>) -> RosterOutcome {
    let private = input.private.filter(|private| !private.is_empty());

    let order_anchor = match (&input.prior.order_anchor, private) {
        (Some(anchor), _) => Some(anchor.clone()),
        (None, Some(private)) => Some(
            private
                .iter()
                .map(|view| normalize_ident(&view.ident))
                .collect(),
        ),
        (None, None) => None,
    };

    let working = working_sequence(input.public, private, order_anchor.as_deref());

    let mut roster = input.prior.roster.clone();
    let mut claimed = vec![false; roster.len()];
    let mut keys: Vec<(String, Option<IdentityKey>)> = Vec::with_capacity(working.len());
    let mut enrich = Vec::new();
    let mut discarded = Vec::new();

    for (slot, view) in working.iter().enumerate() {
        let ident = normalize_ident(&view.ident);
        let private_match = private.and_then(|private| {
            private
                .iter()
                .find(|candidate| normalize_ident(&candidate.ident) == ident)
        });

        // The private view carries the full identifying attributes, so it
        // keys own-side combatants even before they are publicly revealed.
        let key = match private_match {
            Some(private) => identify(private, slot, input.side),
            None => identify(&**view, slot, input.side),
        };

        let prior_index = roster
            .iter()
            .enumerate()
            .position(|(index, record)| !claimed[index] && record.key == key)
            .or_else(|| {
                roster.iter().enumerate().position(|(index, record)| {
                    !claimed[index] && record.slot == slot && record.ident == ident
                })
            });

        let ctx = MergeContext {
            side: input.side,
            slot,
            format: input.format,
            moves: input.moves,
        };
        let previous = prior_index.map(|index| &roster[index]);
        let merged = merge_combatant(previous, key, view, private_match, &ctx);

        match prior_index {
            Some(index) => {
                if roster[index].species_forme != merged.species_forme {
                    enrich.push(merged.key.clone());
                }
                keys.push((ident, Some(merged.key.clone())));
                claimed[index] = true;
                roster[index] = merged;
            }
            None if roster.len() >= input.capacity => {
                keys.push((ident.clone(), None));
                discarded.push(ident);
            }
            None => {
                enrich.push(merged.key.clone());
                keys.push((ident, Some(merged.key.clone())));
                roster.push(merged);
                claimed.push(true);
            }
        }
    }

    let active_index = input
        .active_ident
        .map(normalize_ident)
        .and_then(|active| {
            keys.iter()
                .find(|(ident, _)| *ident == active)
                .and_then(|(_, key)| key.as_ref())
        })
        .and_then(|key| roster.iter().position(|record| &record.key == key))
        .or(input.prior.active_index);

    let selection_index = if input.prior.auto_select {
        active_index
    } else {
        input.prior.selection_index
    };

    RosterOutcome {
        roster,
        order_anchor,
        active_index,
        selection_index,
        enrich,
        discarded,
    }
}

/// Orders the observations to iterate: the anchor order when one exists
/// (synthesizing a stub for combatants only the private view knows), else
/// the public array as given.
fn working_sequence<'a>(
    public: &'a [PublicView],
    private: Option<&'a [PrivateView]>,
    anchor: Option<&[String]>,
) -> Vec<Cow<'a, PublicView>> {
    let Some(anchor) = anchor else {
        return public.iter().map(Cow::Borrowed).collect();
    };

    let mut working: Vec<Cow<'a, PublicView>> = Vec::with_capacity(anchor.len());
    for ident in anchor {
        if let Some(view) = public
            .iter()
            .find(|view| normalize_ident(&view.ident) == *ident)
        {
            working.push(Cow::Borrowed(view));
        } else if let Some(view) = private
            .into_iter()
            .flatten()
            .find(|view| normalize_ident(&view.ident) == *ident)
        {
            working.push(Cow::Owned(PublicView::stub_from_private(view)));
        }
    }

    // Public entries outside the anchor keep their feed order after it.
    for view in public {
        let ident = normalize_ident(&view.ident);
        if !anchor.contains(&ident) {
            working.push(Cow::Borrowed(view));
        }
    }

    working
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoMoves;

    impl MoveOracle for NoMoves {
        fn move_name(&self, _id: &str) -> Option<String> {
            None
        }

        fn move_ids(&self) -> Vec<String> {
            Vec::new()
        }
    }

    fn input<'a>(
        prior: &'a PlayerSideState,
        public: &'a [PublicView],
        private: Option<&'a [PrivateView]>,
        format: &'a Format,
    ) -> RosterInput<'a> {
        RosterInput {
            side: SideId::P1,
            prior,
            public,
            private,
            active_ident: None,
            capacity: 6,
            format,
            moves: &NoMoves,
        }
    }

    fn apply(side: &mut PlayerSideState, outcome: RosterOutcome) {
        side.roster = outcome.roster;
        side.order_anchor = outcome.order_anchor;
        side.active_index = outcome.active_index;
        side.selection_index = outcome.selection_index;
    }

    fn names(side: &PlayerSideState) -> Vec<&str> {
        side.roster.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn public_only_roster_follows_feed_order() {
        let format = Format::new("gen9ou");
        let prior = PlayerSideState::new(SideId::P1);
        let public = vec![PublicView::new("p1: Pikachu", "Pikachu")];
        let outcome = reconcile_roster(&input(&prior, &public, None, &format));

        assert_eq!(outcome.roster.len(), 1);
        assert_eq!(
            outcome.roster[0].key,
            identify(&public[0], 0, SideId::P1)
        );
        assert_eq!(outcome.enrich, vec![outcome.roster[0].key.clone()]);
        assert!(outcome.order_anchor.is_none());
    }

    #[test]
    fn private_roster_anchors_and_stubs_unrevealed() {
        let format = Format::new("gen9ou");
        let prior = PlayerSideState::new(SideId::P1);
        let private = vec![
            PrivateView::new("p1: Ditto", "Ditto"),
            PrivateView::new("p1: Snorlax", "Snorlax"),
        ];
        let public = vec![PublicView::new("p1: Snorlax", "Snorlax")];
        let outcome = reconcile_roster(&input(&prior, &public, Some(&private), &format));

        assert_eq!(
            outcome.order_anchor,
            Some(vec!["p1: Ditto".to_string(), "p1: Snorlax".to_string()])
        );
        assert_eq!(outcome.roster.len(), 2);
        assert_eq!(outcome.roster[0].species_forme, "Ditto");
        assert!(outcome.roster[0].hp == 0 && outcome.roster[0].move_state.revealed.is_empty());
        assert_eq!(outcome.roster[1].species_forme, "Snorlax");
    }

    #[test]
    fn anchor_survives_feed_reordering() {
        let format = Format::new("gen9ou");
        let private = vec![
            PrivateView::new("p1: Alakazam", "Alakazam"),
            PrivateView::new("p1: Blissey", "Blissey"),
            PrivateView::new("p1: Corviknight", "Corviknight"),
        ];
        let mut side = PlayerSideState::new(SideId::P1);
        let first = vec![
            PublicView::new("p1: Alakazam", "Alakazam"),
            PublicView::new("p1: Blissey", "Blissey"),
            PublicView::new("p1: Corviknight", "Corviknight"),
        ];
        let outcome = reconcile_roster(&input(&side, &first, Some(&private), &format));
        apply(&mut side, outcome);
        let keys: Vec<_> = side.roster.iter().map(|r| r.key.clone()).collect();

        let reordered = vec![first[1].clone(), first[0].clone(), first[2].clone()];
        let mut next = input(&side, &reordered, Some(&private), &format);
        next.active_ident = Some("p1a: Blissey");
        let outcome = reconcile_roster(&next);
        apply(&mut side, outcome);

        assert_eq!(names(&side), vec!["Alakazam", "Blissey", "Corviknight"]);
        let rekeyed: Vec<_> = side.roster.iter().map(|r| r.key.clone()).collect();
        assert_eq!(keys, rekeyed);
        assert_eq!(side.active_index, Some(1));
        assert_eq!(side.selection_index, Some(1));
    }

    #[test]
    fn full_roster_discards_new_identity() {
        let format = Format::new("gen9ou");
        let mut side = PlayerSideState::new(SideId::P2);
        let public = vec![
            PublicView::new("p2: Gholdengo", "Gholdengo"),
            PublicView::new("p2: Kingambit", "Kingambit"),
        ];
        let mut first = input(&side, &public, None, &format);
        first.side = SideId::P2;
        first.capacity = 2;
        let outcome = reconcile_roster(&first);
        apply(&mut side, outcome);

        let mut grown = public.clone();
        grown.push(PublicView::new("p2: Dragapult", "Dragapult"));
        let mut next = input(&side, &grown, None, &format);
        next.side = SideId::P2;
        next.capacity = 2;
        let outcome = reconcile_roster(&next);

        assert_eq!(outcome.discarded, vec!["p2: Dragapult".to_string()]);
        assert_eq!(outcome.roster.len(), 2);
        assert_eq!(outcome.roster, side.roster);
    }

    #[test]
    fn forme_change_keeps_record_and_requests_enrichment() {
        let format = Format::new("gen9ou");
        let mut side = PlayerSideState::new(SideId::P1);
        let public = vec![PublicView::new("p1: Charizard", "Charizard")];
        let outcome = reconcile_roster(&input(&side, &public, None, &format));
        apply(&mut side, outcome);

        let mega = vec![PublicView::new("p1: Charizard", "Charizard-Mega-X")];
        let outcome = reconcile_roster(&input(&side, &mega, None, &format));
        assert_eq!(outcome.roster.len(), 1);
        assert_eq!(outcome.roster[0].species_forme, "Charizard-Mega-X");
        assert_eq!(outcome.enrich, vec![side.roster[0].key.clone()]);
    }

    #[test]
    fn unmatched_active_keeps_prior_index_and_manual_selection() {
        let format = Format::new("gen9ou");
        let mut side = PlayerSideState::new(SideId::P1).with_auto_select(false);
        side.selection_index = Some(0);
        let public = vec![
            PublicView::new("p1: Pikachu", "Pikachu"),
            PublicView::new("p1: Raichu", "Raichu"),
        ];
        let mut first = input(&side, &public, None, &format);
        first.active_ident = Some("p1a: Raichu");
        let outcome = reconcile_roster(&first);
        assert_eq!(outcome.active_index, Some(1));
        assert_eq!(outcome.selection_index, Some(0));
        apply(&mut side, outcome);

        let mut next = input(&side, &public, None, &format);
        next.active_ident = Some("p1a: Unknown");
        assert_eq!(reconcile_roster(&next).active_index, Some(1));
    }

    #[test]
    fn viewer_side_prefers_explicit_marker() {
        let mut feed = BattleFeed {
            my_pokemon: vec![PrivateView::new("p2: Ditto", "Ditto")],
            ..BattleFeed::default()
        };
        assert_eq!(detect_viewer_side(&feed), Some(SideId::P2));
        feed.viewer_side = Some(SideId::P1);
        assert_eq!(detect_viewer_side(&feed), Some(SideId::P1));
        assert_eq!(detect_viewer_side(&BattleFeed::default()), None);
    }
}
