//! Game setup parameters.

use crate::deck::NON_WILD_CARDS;
use crate::game::GameError;
use crate::player::SeatId;
use serde::{Deserialize, Serialize};

/// Fewest seats a game can have
pub const MIN_SEATS: usize = 2;

/// Most seats a game can have
pub const MAX_SEATS: usize = 10;

/// Configuration for a single game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of seats at the table
    pub seat_count: usize,
    /// Cards dealt to each seat at setup
    pub hand_size: usize,
    /// Seat names; empty means "Player 1", "Player 2", ...
    pub seat_names: Vec<String>,
    /// Seat that declares its own wild colors, `None` for all-automated play
    pub primary_seat: Option<SeatId>,
    /// RNG seed, `None` to draw one from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seat_count: 4,
            hand_size: 7,
            seat_names: Vec::new(),
            primary_seat: Some(0),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Standard four-seat game with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check that a game can actually be set up with these parameters
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.seat_count) {
            return Err(GameError::InvalidConfig(format!(
                "seat count must be between {} and {}, got {}",
                MIN_SEATS, MAX_SEATS, self.seat_count
            )));
        }
        if self.hand_size == 0 {
            return Err(GameError::InvalidConfig("hand size must be at least 1".into()));
        }
        // At least one non-wild card has to survive the deal to start the discard stack
        let dealt = self.seat_count.checked_mul(self.hand_size);
        if dealt.map_or(true, |n| n >= NON_WILD_CARDS) {
            return Err(GameError::InvalidConfig(format!(
                "{} seats of {} cards leave no starting card",
                self.seat_count, self.hand_size
            )));
        }
        if !self.seat_names.is_empty() && self.seat_names.len() != self.seat_count {
            return Err(GameError::InvalidConfig(format!(
                "expected {} seat names, got {}",
                self.seat_count,
                self.seat_names.len()
            )));
        }
        if let Some(primary) = self.primary_seat {
            if primary >= self.seat_count {
                return Err(GameError::InvalidConfig(format!(
                    "primary seat {} out of range",
                    primary
                )));
            }
        }
        Ok(())
    }

    /// Name for seat `id`
    pub fn seat_name(&self, id: SeatId) -> String {
        self.seat_names
            .get(id)
            .cloned()
            .unwrap_or_else(|| format!("Player {}", id + 1))
    }
}
