//! Game actions that seats can take.
//!
//! This module defines the requests a seat can make, the events that
//! result from them, and the sink those events are delivered to.

use crate::card::{Card, CardColor, CardValue};
use crate::player::SeatId;
use serde::{Deserialize, Serialize};

/// All possible actions a seat can take on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Play the card at `card_index` in the acting seat's hand.
    /// `declared_color` is only read when the primary seat plays a wild card.
    PlayCard {
        card_index: usize,
        declared_color: Option<CardColor>,
    },
    /// Take one card from the deck and end the turn
    DrawCard,
}

impl GameAction {
    /// Play a card with no color declaration
    pub fn play(card_index: usize) -> Self {
        GameAction::PlayCard {
            card_index,
            declared_color: None,
        }
    }

    /// Play a wild card, declaring its color
    pub fn play_wild(card_index: usize, color: CardColor) -> Self {
        GameAction::PlayCard {
            card_index,
            declared_color: Some(color),
        }
    }
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card landed on the discard stack
    CardPlayed {
        seat: SeatId,
        color: CardColor,
        value: CardValue,
    },

    /// An automated seat's wild color was picked by the engine
    WildColorChosen { seat: SeatId, color: CardColor },

    /// A seat lost its turn
    TurnSkipped { seat: SeatId },

    /// Turn order flipped
    DirectionReversed,

    /// A seat was made to draw by a draw2 or wild_draw4
    CardsForcedDraw { seat: SeatId, count: usize },

    /// A seat drew voluntarily
    CardDrawn { seat: SeatId },

    /// The discard stack (minus its top) was shuffled back into the deck
    DeckReshuffled { cards: usize },

    /// A forced draw could not be fully satisfied
    DeckExhausted { seat: SeatId, shortfall: usize },

    /// Turn passed to the next seat
    TurnPassed { next_seat: SeatId },

    /// A seat emptied its hand
    GameWon { seat: SeatId, name: String },
}

/// Receives events as the engine resolves an action.
///
/// Narration is a side channel: the engine behaves identically whether
/// events are rendered, collected, or dropped.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Result of an accepted play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    /// Seat that played
    pub seat: SeatId,
    /// The card as it sits on the discard stack, wild color assigned
    pub card: Card,
    /// Whose turn it is once all effects resolved
    pub next_seat: SeatId,
}
