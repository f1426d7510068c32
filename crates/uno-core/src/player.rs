//! Seats and their hands.

use crate::card::{Card, CardColor};
use serde::{Deserialize, Serialize};

/// Seat index in turn order
pub type SeatId = usize;

/// Who picks the color when this seat plays a wild card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatRole {
    /// Declares wild colors itself (the human seat)
    Primary,
    /// Wild colors are chosen by the engine
    Automated,
}

/// Tally of concrete colors held in a hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCounts {
    pub red: u32,
    pub blue: u32,
    pub green: u32,
    pub yellow: u32,
}

impl ColorCounts {
    pub fn get(&self, color: CardColor) -> u32 {
        match color {
            CardColor::Red => self.red,
            CardColor::Blue => self.blue,
            CardColor::Green => self.green,
            CardColor::Yellow => self.yellow,
            CardColor::Wild => 0,
        }
    }

    /// Count one more card of `color`; wild is not tallied
    pub fn add(&mut self, color: CardColor) {
        match color {
            CardColor::Red => self.red += 1,
            CardColor::Blue => self.blue += 1,
            CardColor::Green => self.green += 1,
            CardColor::Yellow => self.yellow += 1,
            CardColor::Wild => {}
        }
    }

    pub fn total(&self) -> u32 {
        self.red + self.blue + self.green + self.yellow
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// One seat at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub name: String,
    pub role: SeatRole,
    pub hand: Vec<Card>,
}

impl Seat {
    pub fn new(id: SeatId, name: String, role: SeatRole) -> Self {
        Self {
            id,
            name,
            role,
            hand: Vec::new(),
        }
    }

    pub fn is_primary(&self) -> bool {
        self.role == SeatRole::Primary
    }

    /// Add a card to the end of the hand
    pub fn receive(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Look at a card without removing it
    pub fn card_at(&self, index: usize) -> Option<&Card> {
        self.hand.get(index)
    }

    /// Remove and return the card at `index`, or `None` if out of bounds
    pub fn remove_at(&mut self, index: usize) -> Option<Card> {
        if index < self.hand.len() {
            Some(self.hand.remove(index))
        } else {
            None
        }
    }

    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    pub fn has_empty_hand(&self) -> bool {
        self.hand.is_empty()
    }

    /// Count the concrete colors in hand. Wild cards have no color yet and are skipped.
    pub fn color_counts(&self) -> ColorCounts {
        let mut counts = ColorCounts::default();
        for card in &self.hand {
            counts.add(card.color);
        }
        counts
    }
}
