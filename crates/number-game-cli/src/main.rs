//! The Number Game, hot-seat in the terminal.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod command;
mod config;
mod session;

use config::Settings;
use session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the table
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_env()?;
    info!(
        players = settings.game.player_count,
        mode = ?settings.game.mode,
        power_ups = settings.game.power_ups_enabled,
        party = settings.game.party_mode,
        seed = ?settings.seed,
        fast = settings.fast,
        "Starting The Number Game"
    );

    Session::new(settings).run().await
}
