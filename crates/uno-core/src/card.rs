//! Card model.
//!
//! A card is a color plus a value. Wild-typed cards carry `CardColor::Wild`
//! while in the deck or a hand, and get a concrete color when played.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    Red,
    Blue,
    Green,
    Yellow,
    /// Unassigned color of a wild card
    Wild,
}

impl CardColor {
    /// The four concrete colors, in wild-color tie-break priority order
    pub const CONCRETE: [CardColor; 4] = [
        CardColor::Red,
        CardColor::Blue,
        CardColor::Green,
        CardColor::Yellow,
    ];

    /// Whether this is one of the four playable colors
    pub fn is_concrete(&self) -> bool {
        !matches!(self, CardColor::Wild)
    }
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardColor::Red => "red",
            CardColor::Blue => "blue",
            CardColor::Green => "green",
            CardColor::Yellow => "yellow",
            CardColor::Wild => "wild",
        };
        write!(f, "{}", name)
    }
}

/// Card value: a number rank or one of the special faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardValue {
    /// Rank 0-9
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl CardValue {
    /// Whether the value makes the card wild-typed (always playable, color chosen on play)
    pub fn is_wild(&self) -> bool {
        matches!(self, CardValue::Wild | CardValue::WildDrawFour)
    }

    /// Whether playing this value triggers an effect beyond a plain turn advance
    pub fn is_special(&self) -> bool {
        matches!(
            self,
            CardValue::Skip | CardValue::Reverse | CardValue::DrawTwo | CardValue::WildDrawFour
        )
    }

    /// Number of cards the next seat is forced to draw
    pub fn forced_draw(&self) -> Option<usize> {
        match self {
            CardValue::DrawTwo => Some(2),
            CardValue::WildDrawFour => Some(4),
            _ => None,
        }
    }
}

impl fmt::Display for CardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardValue::Number(n) => write!(f, "{}", n),
            CardValue::Skip => write!(f, "skip"),
            CardValue::Reverse => write!(f, "reverse"),
            CardValue::DrawTwo => write!(f, "draw2"),
            CardValue::Wild => write!(f, "wild"),
            CardValue::WildDrawFour => write!(f, "wild_draw4"),
        }
    }
}

/// A single card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: CardColor,
    pub value: CardValue,
}

impl Card {
    pub fn new(color: CardColor, value: CardValue) -> Self {
        Self { color, value }
    }

    /// A colored number card
    pub fn number(color: CardColor, rank: u8) -> Self {
        Self::new(color, CardValue::Number(rank))
    }

    /// An unassigned wild card
    pub fn wild() -> Self {
        Self::new(CardColor::Wild, CardValue::Wild)
    }

    /// An unassigned wild draw four
    pub fn wild_draw_four() -> Self {
        Self::new(CardColor::Wild, CardValue::WildDrawFour)
    }

    pub fn is_wild(&self) -> bool {
        self.value.is_wild()
    }

    /// Same card with its color assigned
    pub fn with_color(self, color: CardColor) -> Self {
        Self { color, ..self }
    }

    /// Strip any assigned color from a wild card so it can go back into the deck
    pub fn reset(self) -> Self {
        if self.is_wild() {
            self.with_color(CardColor::Wild)
        } else {
            self
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_wild() && self.color == CardColor::Wild {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.color, self.value)
        }
    }
}
