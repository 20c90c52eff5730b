//! Replays a recorded feed through a fresh runtime.
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use battle_core::{BattleFeed, BattleState, Format};
use sync_runtime::{JsonDex, SyncConfig, SyncRuntime};
use tracing::{info, warn};

const DEFAULT_FORMAT: &str = "gen9ou";

/// Syncs every frame in order and returns the last committed snapshot.
///
/// The first battle id found in the frames is registered before the replay
/// starts.
pub async fn run(frames: &Path, dex: &Path, format: Option<&str>) -> Result<Arc<BattleState>> {
    let text = std::fs::read_to_string(frames)
        .with_context(|| format!("failed to read frames from {}", frames.display()))?;
    let frames: Vec<BattleFeed> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse frames from {}", frames.display()))?;

    let Some(battle_id) = frames.iter().find_map(|frame| frame.battle_id.clone()) else {
        bail!("no frame carries a battle id");
    };

    let format = format
        .map(Format::new)
        .or_else(|| Format::from_battle_id(battle_id.as_str()))
        .unwrap_or_else(|| Format::new(DEFAULT_FORMAT));

    let dex = JsonDex::load(dex)?;
    info!(moves = dex.move_count(), learnsets = dex.has_learnsets(), "Reference data loaded");

    let config = SyncConfig::from_env();
    let runtime = SyncRuntime::builder()
        .config(config.clone())
        .dex(dex.into_manager())
        .build()?;
    let handle = runtime.handle();

    handle
        .register_battle(config.initial_state(battle_id.clone(), format))
        .await?;

    let mut committed = 0usize;
    for (index, frame) in frames.into_iter().enumerate() {
        match handle.sync(frame).await {
            Ok(outcome) if outcome.is_committed() => committed += 1,
            Ok(_) => {}
            Err(error) => warn!(frame = index, %error, "Frame rejected"),
        }
    }

    let snapshot = handle
        .snapshot(battle_id.clone())
        .await?
        .with_context(|| format!("battle {battle_id} disappeared during replay"))?;
    info!(battle_id = %battle_id, committed, "Replay finished");

    drop(handle);
    runtime.shutdown().await?;

    Ok(snapshot)
}
