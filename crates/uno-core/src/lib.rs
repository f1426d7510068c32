//! Uno turn engine
//!
//! This crate provides the core game logic for a four-seat Uno table:
//! - Card, deck and seat model
//! - Move validation against the discard top
//! - Special card resolution (skip, reverse, draw2, wild_draw4)
//! - Wild color selection for automated seats
//! - Winner detection
//!
//! # Architecture
//!
//! Every action runs through one resolution path. Events describing what
//! happened are pushed into an [`EventSink`]; collecting, rendering or
//! ignoring them never changes the outcome.
//!
//! # Modules
//!
//! - [`card`]: Colors, values and cards
//! - [`deck`]: The draw pile
//! - [`player`]: Seats and hands
//! - [`rules`]: Move validation and the wild color chooser
//! - [`actions`]: Actions, events and event sinks
//! - [`game`]: Game state machine
//! - [`config`]: Game setup parameters
//! - [`bot`]: AI seat policies

pub mod actions;
pub mod bot;
pub mod card;
pub mod config;
pub mod deck;
pub mod game;
pub mod player;
pub mod rules;

// Re-export commonly used types
pub use actions::{EventSink, GameAction, GameEvent, NullSink, PlayOutcome};
pub use bot::{Bot, BotDifficulty};
pub use card::{Card, CardColor, CardValue};
pub use config::GameConfig;
pub use deck::{Deck, STANDARD_DECK_SIZE};
pub use game::{Direction, GameError, GamePhase, GameState};
pub use player::{ColorCounts, Seat, SeatId, SeatRole};
pub use rules::{choose_wild_color, is_valid_move, COLOR_PRIORITY};
