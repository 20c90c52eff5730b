//! Feed replay tool.
//!
//! Replays recorded feed frames against reference data through the sync
//! runtime and prints the committed snapshot, or decodes a saved roster
//! preset.
mod replay;

use std::path::PathBuf;

use anyhow::Result;
use battle_core::hydro::{DEFAULT_DELIMITER, hydrate_preset};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "sync-cli")]
#[command(about = "Battle-state sync replay tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay feed frames and print the final committed snapshot as JSON
    Replay {
        /// JSON array of feed frames, in arrival order
        #[arg(long, env = "SYNC_FRAMES")]
        frames: PathBuf,

        /// Reference data file with moves and learnsets
        #[arg(long, env = "SYNC_DEX")]
        dex: PathBuf,

        /// Format id used when the battle is registered; derived from the
        /// battle id when omitted
        #[arg(long, env = "SYNC_FORMAT")]
        format: Option<String>,
    },

    /// Decode a saved roster preset and print it as JSON
    Preset {
        /// Dehydrated preset string
        encoded: String,

        #[arg(long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    match Cli::parse().cmd {
        Commands::Replay { frames, dex, format } => {
            let snapshot = replay::run(&frames, &dex, format.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(snapshot.as_ref())?);
        }
        Commands::Preset { encoded, delimiter } => {
            let preset = hydrate_preset(&encoded, delimiter)?;
            println!("{}", serde_json::to_string_pretty(&preset)?);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean JSON.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
