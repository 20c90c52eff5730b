//! Runtime configuration loaded from defaults or the environment.
use std::env;

use battle_core::{BattleId, BattleState, Format};

/// Settings shared by the runtime, its worker, and the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncConfig {
    /// Maximum combatants retained per side roster.
    pub max_combatants: usize,
    /// Whether newly registered sides follow the active combatant.
    pub auto_select: bool,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_combatants: 6,
            auto_select: true,
            command_buffer_size: 32,
            event_buffer_size: 100,
        }
    }
}

impl SyncConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(max) = read_env::<usize>("SYNC_MAX_COMBATANTS") {
            config.max_combatants = max.max(1);
        }
        if let Some(auto_select) = read_env_bool("SYNC_AUTO_SELECT") {
            config.auto_select = auto_select;
        }

        // Channel configuration
        if let Some(capacity) = read_env::<usize>("SYNC_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("SYNC_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config
    }

    /// Empty canonical state for a new battle, with `auto_select` applied
    /// to both sides.
    pub fn initial_state(&self, battle_id: BattleId, format: Format) -> BattleState {
        let mut state = BattleState::new(battle_id, format);
        state.p1.auto_select = self.auto_select;
        state.p2.auto_select = self.auto_select;
        state
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
