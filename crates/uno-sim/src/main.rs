//! Uno table simulator.
//!
//! Seats a bot in every chair and plays games to completion, narrating
//! events to the log.

use std::collections::BTreeMap;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uno_core::NullSink;

mod render;
mod settings;
mod table;

use render::ConsoleRenderer;
use settings::SimConfig;
use table::{GameResult, Table};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimConfig::load()?;

    info!(
        "Starting Uno simulation: {} game(s), {} seats",
        config.games, config.game.seat_count
    );

    let mut wins: BTreeMap<String, u32> = BTreeMap::new();
    let mut unfinished = 0;

    for index in 0..config.games {
        let game_config = config.game_config(index);
        let mut table = Table::new(&game_config, config.bot_seed(index))?;
        info!("Game {} (seed {})", index + 1, table.game.seed());

        let result = if config.quiet {
            table.play(config.max_turns, &mut NullSink)?
        } else {
            let mut renderer = ConsoleRenderer::new(&table.game);
            table.play(config.max_turns, &mut renderer)?
        };

        match result {
            GameResult::Won { name, turns, .. } => {
                info!("{} wins after {} turns", name, turns);
                *wins.entry(name).or_default() += 1;
            }
            GameResult::Stalemate { turns } => {
                warn!("Game stalled after {} turns: no seat can play or draw", turns);
                unfinished += 1;
            }
            GameResult::TimedOut { turns } => {
                warn!("Game stopped at the {}-turn limit", turns);
                unfinished += 1;
            }
        }
    }

    for (name, count) in &wins {
        info!("{}: {} win(s)", name, count);
    }
    if unfinished > 0 {
        info!("{} game(s) without a winner", unfinished);
    }

    Ok(())
}
