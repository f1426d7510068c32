//! Simulation settings.
//!
//! An optional JSON file named by `UNO_CONFIG` is read first; individual
//! environment variables override it.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use uno_core::GameConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Invalid game settings: {0}")]
    Game(#[from] uno_core::GameError),
}

/// Settings for a simulation run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Table setup shared by every game
    pub game: GameConfig,
    /// Number of games to play
    pub games: u32,
    /// Accepted actions before a game is abandoned
    pub max_turns: usize,
    /// Skip event narration
    pub quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            game: GameConfig {
                primary_seat: None,
                ..GameConfig::default()
            },
            games: 1,
            max_turns: 2_000,
            quiet: false,
        }
    }
}

impl SimConfig {
    /// Load settings from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`, which maps variable names to values
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("UNO_CONFIG") {
            Some(path) => {
                let path = PathBuf::from(path);
                debug!("Loading config from {}", path.display());
                let content = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::Read {
                        path: path.clone(),
                        source,
                    }
                })?;
                serde_json::from_str(&content)
                    .map_err(|source| ConfigError::Parse { path, source })?
            }
            None => Self::default(),
        };

        if let Some(seed) = parse_env(&lookup, "UNO_SEED")? {
            config.game.seed = Some(seed);
        }
        if let Some(games) = parse_env(&lookup, "UNO_GAMES")? {
            config.games = games;
        }
        if let Some(max_turns) = parse_env(&lookup, "UNO_MAX_TURNS")? {
            config.max_turns = max_turns;
        }
        if let Some(quiet) = lookup("UNO_QUIET") {
            config.quiet = !matches!(quiet.as_str(), "" | "0" | "false");
        }

        config.game.validate()?;
        Ok(config)
    }

    /// Game setup for the `index`-th game; a fixed seed advances per game
    pub fn game_config(&self, index: u32) -> GameConfig {
        GameConfig {
            seed: self.game.seed.map(|seed| seed.wrapping_add(u64::from(index))),
            ..self.game.clone()
        }
    }

    /// Seed for the bots of the `index`-th game, if runs are reproducible
    pub fn bot_seed(&self, index: u32) -> Option<u64> {
        self.game
            .seed
            .map(|seed| seed.wrapping_mul(31).wrapping_add(u64::from(index)))
    }
}

fn parse_env<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { key, value }),
        None => Ok(None),
    }
}
