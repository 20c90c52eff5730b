//! End-to-end sync scenarios driven through the runtime handle.

use std::sync::Arc;

use async_trait::async_trait;
use battle_core::{
    BattleFeed, BattleId, ChangeToken, FeedSide, Format, MoveOracle, OracleError, PrivateView,
    PublicView, SideId, identify,
};
use sync_runtime::{
    DexManager, InMemoryDex, Learnset, LearnsetOracle, RepositoryError, RuntimeError, SyncConfig,
    SyncEvent, SyncHandle, SyncOutcome, SyncRuntime,
};
use tokio::sync::{Notify, Semaphore};
use tokio::time::{Duration, sleep, timeout};

fn test_dex() -> InMemoryDex {
    InMemoryDex::new()
        .with_move("thunderbolt", "Thunderbolt")
        .with_move("voltswitch", "Volt Switch")
        .with_move("surf", "Surf")
        .with_move("transform", "Transform")
        .with_move("bodyslam", "Body Slam")
        .with_learnset("Pikachu", ["thunderbolt", "voltswitch", "surf"])
        .with_learnset("Ditto", ["transform"])
        .with_learnset("Snorlax", ["bodyslam", "surf"])
}

async fn start(config: SyncConfig, dex: DexManager) -> (SyncRuntime, SyncHandle) {
    let runtime = SyncRuntime::builder()
        .config(config.clone())
        .dex(dex)
        .build()
        .expect("runtime should build");
    let handle = runtime.handle();
    handle
        .register_battle(config.initial_state(BattleId::new("b1"), Format::new("gen9ou")))
        .await
        .expect("battle should register");
    (runtime, handle)
}

async fn start_default() -> (SyncRuntime, SyncHandle) {
    start(
        SyncConfig::default(),
        DexManager::from_shared(Arc::new(test_dex())),
    )
    .await
}

fn frame(token: u64, p1: Vec<PublicView>) -> BattleFeed {
    let mut side = FeedSide::new(SideId::P1);
    side.active = vec![p1.first().map(|view| view.ident.clone())];
    side.pokemon = p1;
    BattleFeed {
        battle_id: Some(BattleId::new("b1")),
        token: Some(ChangeToken(token)),
        p1: Some(side),
        p2: Some(FeedSide::new(SideId::P2)),
        game_type: Some("singles".into()),
        ..BattleFeed::default()
    }
}

#[tokio::test]
async fn public_only_combatant_is_keyed_and_enriched() {
    let (runtime, handle) = start_default().await;
    let pikachu = PublicView::new("p1: Pikachu", "Pikachu");

    let outcome = handle
        .sync(frame(1, vec![pikachu.clone()]))
        .await
        .expect("sync should succeed");
    assert!(outcome.is_committed());

    let state = outcome.snapshot();
    assert_eq!(state.token, Some(ChangeToken(1)));
    assert_eq!(state.p1.roster.len(), 1);

    let record = &state.p1.roster[0];
    assert_eq!(record.key, identify(&pikachu, 0, SideId::P1));
    assert!(record.alt_moves.is_empty());
    assert_eq!(
        record.move_state.learnset,
        vec!["Surf", "Thunderbolt", "Volt Switch"]
    );
    assert!(record.move_state.other.is_empty());
    assert_eq!(state.p1.active_index, Some(0));
    assert_eq!(state.p1.selection_index, Some(0));

    drop(handle);
    runtime.shutdown().await.expect("shutdown should succeed");
}

#[tokio::test]
async fn private_roster_anchors_order_and_stubs_unrevealed() {
    let (_runtime, handle) = start_default().await;

    let mut feed = frame(1, vec![PublicView::new("p1: Snorlax", "Snorlax")]);
    feed.my_pokemon = vec![
        PrivateView::new("p1: Ditto", "Ditto"),
        PrivateView::new("p1: Snorlax", "Snorlax"),
    ];

    let outcome = handle.sync(feed).await.expect("sync should succeed");
    let state = outcome.snapshot();

    assert_eq!(
        state.p1.order_anchor.as_deref(),
        Some(&["p1: Ditto".to_string(), "p1: Snorlax".to_string()][..])
    );
    let species: Vec<_> = state
        .p1
        .roster
        .iter()
        .map(|record| record.species_forme.as_str())
        .collect();
    assert_eq!(species, vec!["Ditto", "Snorlax"]);
    assert_eq!(state.p1.roster[0].move_state.learnset, vec!["Transform"]);
    assert_eq!(state.p1.active_index, Some(1));
}

#[tokio::test]
async fn anchored_order_survives_feed_reordering() {
    let (_runtime, handle) = start_default().await;
    let private = vec![
        PrivateView::new("p1: Pikachu", "Pikachu"),
        PrivateView::new("p1: Ditto", "Ditto"),
        PrivateView::new("p1: Snorlax", "Snorlax"),
    ];
    let public = |order: [&str; 3]| {
        order
            .iter()
            .map(|species| PublicView::new(format!("p1: {species}"), *species))
            .collect::<Vec<_>>()
    };

    let mut first = frame(1, public(["Ditto", "Pikachu", "Snorlax"]));
    first.my_pokemon = private.clone();
    let first = handle.sync(first).await.expect("first sync");

    let mut second = frame(2, public(["Snorlax", "Ditto", "Pikachu"]));
    second.my_pokemon = private;
    let second = handle.sync(second).await.expect("second sync");

    let keys = |outcome: &SyncOutcome| {
        outcome
            .snapshot()
            .p1
            .roster
            .iter()
            .map(|record| (record.species_forme.clone(), record.key.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&first), keys(&second));
    assert_eq!(keys(&first)[0].0, "Pikachu");
    assert_eq!(second.snapshot().p1.active_index, Some(2));
}

#[tokio::test]
async fn repeated_reveals_keep_one_record_and_known_values() {
    let (_runtime, handle) = start_default().await;

    let mut revealed = PublicView::new("p1: Pikachu", "Pikachu");
    revealed.item = Some("Light Ball".into());
    revealed.revealed_moves = vec!["Thunderbolt".into()];
    let first = handle
        .sync(frame(1, vec![revealed]))
        .await
        .expect("first sync");

    let mut later = PublicView::new("p1: Pikachu", "Pikachu");
    later.revealed_moves = vec!["Volt Switch".into()];
    later.hp = Some(40);
    let second = handle
        .sync(frame(2, vec![later]))
        .await
        .expect("second sync");

    let before = &first.snapshot().p1.roster[0];
    let after = &second.snapshot().p1.roster;
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].key, before.key);
    assert_eq!(after[0].item.as_deref(), Some("Light Ball"));
    assert_eq!(after[0].hp, 40);
    assert_eq!(after[0].move_state.revealed, vec!["Thunderbolt", "Volt Switch"]);
    assert_eq!(before.move_state.learnset, vec!["Surf", "Volt Switch"]);
    // A reveal only drops the move from the unseen set; no new lookup runs.
    assert_eq!(after[0].move_state.learnset, vec!["Surf"]);
}

#[tokio::test]
async fn stale_token_is_a_no_op() {
    let (_runtime, handle) = start_default().await;
    let mut events = handle.subscribe();
    let feed = frame(7, vec![PublicView::new("p1: Pikachu", "Pikachu")]);

    let first = handle.sync(feed.clone()).await.expect("first sync");
    let second = handle.sync(feed).await.expect("second sync");

    assert!(matches!(second, SyncOutcome::Unchanged(_)));
    assert!(Arc::ptr_eq(first.snapshot(), second.snapshot()));

    let committed = timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("event should arrive")
        .expect("bus open");
    assert!(matches!(committed, SyncEvent::Committed { .. }));
    let skipped = timeout(Duration::from_secs(1), events.recv())
        .await
        .expect("event should arrive")
        .expect("bus open");
    assert_eq!(
        skipped,
        SyncEvent::Skipped {
            battle_id: BattleId::new("b1"),
            token: Some(ChangeToken(7)),
        }
    );
}

#[tokio::test]
async fn full_roster_discards_new_combatants() {
    let config = SyncConfig {
        max_combatants: 2,
        ..SyncConfig::default()
    };
    let (_runtime, handle) = start(config, DexManager::from_shared(Arc::new(test_dex()))).await;

    let outcome = handle
        .sync(frame(
            1,
            vec![
                PublicView::new("p1: Pikachu", "Pikachu"),
                PublicView::new("p1: Ditto", "Ditto"),
                PublicView::new("p1: Snorlax", "Snorlax"),
            ],
        ))
        .await
        .expect("sync should succeed");

    let roster = &outcome.snapshot().p1.roster;
    assert_eq!(roster.len(), 2);
    assert!(roster.iter().all(|record| record.species_forme != "Snorlax"));
}

#[tokio::test]
async fn missing_game_type_keeps_committed_snapshot() {
    let (_runtime, handle) = start_default().await;
    let mut events = handle.subscribe();

    let committed = handle
        .sync(frame(1, vec![PublicView::new("p1: Pikachu", "Pikachu")]))
        .await
        .expect("first sync");

    let mut changed = PublicView::new("p1: Pikachu", "Pikachu");
    changed.item = Some("Light Ball".into());
    let mut broken = frame(2, vec![changed]);
    broken.game_type = None;

    let aborted = handle.sync(broken).await.expect("abort is not an error");
    assert!(matches!(aborted, SyncOutcome::FieldAborted(_)));
    assert!(Arc::ptr_eq(committed.snapshot(), aborted.snapshot()));

    let snapshot = handle
        .snapshot(BattleId::new("b1"))
        .await
        .expect("snapshot read")
        .expect("battle registered");
    assert_eq!(snapshot.token, Some(ChangeToken(1)));
    assert!(snapshot.p1.roster[0].item.is_none());

    let _ = events.recv().await;
    let event = events.recv().await.expect("bus open");
    assert!(matches!(event, SyncEvent::FieldAborted { .. }));
}

#[tokio::test]
async fn contract_violations_fail_the_request() {
    let (_runtime, handle) = start_default().await;

    let mut anonymous = frame(1, Vec::new());
    anonymous.battle_id = None;
    let error = handle.sync(anonymous).await.expect_err("no battle id");
    assert!(matches!(error, RuntimeError::MissingBattleId));

    let mut unknown = frame(1, Vec::new());
    unknown.battle_id = Some(BattleId::new("b404"));
    let error = handle.sync(unknown).await.expect_err("unregistered");
    assert!(matches!(error, RuntimeError::UnknownBattle { .. }));

    let error = handle
        .register_battle(SyncConfig::default().initial_state(BattleId::new("b1"), Format::new("gen9ou")))
        .await
        .expect_err("already registered");
    assert!(matches!(
        error,
        RuntimeError::Repository(RepositoryError::BattleExists(_))
    ));
}

#[tokio::test]
async fn missing_learnset_capability_rejects_sync() {
    let dex = DexManager::new(Arc::new(test_dex()), None);
    let (_runtime, handle) = start(SyncConfig::default(), dex).await;

    let error = handle
        .sync(frame(1, vec![PublicView::new("p1: Pikachu", "Pikachu")]))
        .await
        .expect_err("learnsets are required");
    assert!(matches!(
        error,
        RuntimeError::Oracle(OracleError::LearnsetsNotAvailable)
    ));

    let snapshot = handle
        .snapshot(BattleId::new("b1"))
        .await
        .expect("snapshot read")
        .expect("battle registered");
    assert!(snapshot.p1.roster.is_empty());
    assert!(snapshot.token.is_none());
}

#[tokio::test]
async fn rejected_lookup_still_commits_without_unseen_moves() {
    let dex = DexManager::from_shared(Arc::new(test_dex().failing_for("Pikachu")));
    let (_runtime, handle) = start(SyncConfig::default(), dex).await;

    let outcome = handle
        .sync(frame(1, vec![PublicView::new("p1: Pikachu", "Pikachu")]))
        .await
        .expect("degraded sync still commits");

    assert!(outcome.is_committed());
    let record = &outcome.snapshot().p1.roster[0];
    assert!(record.move_state.learnset.is_empty());
    assert!(record.move_state.other.is_empty());
}

#[tokio::test]
async fn builder_requires_dex() {
    let result = SyncRuntime::builder().build();
    assert!(matches!(result, Err(RuntimeError::MissingDex)));
}

#[tokio::test]
async fn removed_battle_is_unknown() {
    let (_runtime, handle) = start_default().await;

    let removed = handle
        .remove_battle(BattleId::new("b1"))
        .await
        .expect("remove should succeed");
    assert!(removed.is_some());

    let error = handle
        .sync(frame(1, Vec::new()))
        .await
        .expect_err("battle was removed");
    assert!(matches!(error, RuntimeError::UnknownBattle { .. }));
}

/// Dex whose learnset lookups suspend until the test releases them.
struct GatedDex {
    inner: InMemoryDex,
    gate: Semaphore,
    entered: Notify,
}

impl MoveOracle for GatedDex {
    fn move_name(&self, id: &str) -> Option<String> {
        self.inner.move_name(id)
    }

    fn move_ids(&self) -> Vec<String> {
        self.inner.move_ids()
    }
}

#[async_trait]
impl LearnsetOracle for GatedDex {
    async fn learnable(&self, species_id: &str) -> Result<Option<Learnset>, OracleError> {
        self.entered.notify_one();
        let _permit = self.gate.acquire().await.map_err(|_| OracleError::LookupFailed {
            species: species_id.to_string(),
            reason: "gate closed".into(),
        })?;
        self.inner.learnable(species_id).await
    }
}

#[tokio::test]
async fn request_during_enrichment_waits_for_commit() {
    let dex = Arc::new(GatedDex {
        inner: test_dex(),
        gate: Semaphore::new(0),
        entered: Notify::new(),
    });
    let (_runtime, handle) = start(SyncConfig::default(), DexManager::from_shared(dex.clone())).await;
    let mut events = handle.subscribe();

    let mut pikachu = PublicView::new("p1: Pikachu", "Pikachu");
    pikachu.item = Some("Light Ball".into());
    let first_handle = handle.clone();
    let first = tokio::spawn(async move { first_handle.sync(frame(1, vec![pikachu])).await });

    timeout(Duration::from_secs(1), dex.entered.notified())
        .await
        .expect("first sync should reach enrichment");

    let second_handle = handle.clone();
    let second = tokio::spawn(async move {
        second_handle
            .sync(frame(
                2,
                vec![
                    PublicView::new("p1: Pikachu", "Pikachu"),
                    PublicView::new("p1: Ditto", "Ditto"),
                ],
            ))
            .await
    });

    sleep(Duration::from_millis(50)).await;
    assert!(!first.is_finished());
    assert!(!second.is_finished());

    dex.gate.add_permits(8);

    let first = timeout(Duration::from_secs(1), first)
        .await
        .expect("first sync should finish")
        .expect("task should not panic")
        .expect("first sync should succeed");
    let second = timeout(Duration::from_secs(1), second)
        .await
        .expect("second sync should finish")
        .expect("task should not panic")
        .expect("second sync should succeed");

    assert_eq!(first.snapshot().token, Some(ChangeToken(1)));
    assert_eq!(first.snapshot().p1.roster.len(), 1);

    let state = second.snapshot();
    assert_eq!(state.token, Some(ChangeToken(2)));
    assert_eq!(state.p1.roster.len(), 2);
    assert_eq!(state.p1.roster[0].item.as_deref(), Some("Light Ball"));
    assert_eq!(
        state.p1.roster[0].move_state.learnset,
        vec!["Surf", "Thunderbolt", "Volt Switch"]
    );
    assert_eq!(state.p1.roster[1].move_state.learnset, vec!["Transform"]);

    for expected in [1, 2] {
        let event = timeout(Duration::from_secs(1), events.recv())
            .await
            .expect("event should arrive")
            .expect("bus open");
        assert_eq!(
            event,
            SyncEvent::Committed {
                battle_id: BattleId::new("b1"),
                token: Some(ChangeToken(expected)),
            }
        );
    }
}
