//! Draw pile.
//!
//! The top of the deck is the end of the vector.

use crate::card::{Card, CardColor, CardValue};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Cards in a standard deck
pub const STANDARD_DECK_SIZE: usize = 108;

/// Cards in a standard deck that are not wild-typed
pub const NON_WILD_CARDS: usize = 100;

/// The draw pile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create the standard, unshuffled 108-card deck
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);

        for color in CardColor::CONCRETE {
            // One zero, two of everything else
            cards.push(Card::number(color, 0));
            for rank in 1..=9 {
                cards.push(Card::number(color, rank));
                cards.push(Card::number(color, rank));
            }
            for value in [CardValue::Skip, CardValue::Reverse, CardValue::DrawTwo] {
                cards.push(Card::new(color, value));
                cards.push(Card::new(color, value));
            }
        }

        cards.extend(std::iter::repeat(Card::wild()).take(4));
        cards.extend(std::iter::repeat(Card::wild_draw_four()).take(4));

        Self { cards }
    }

    /// Deck with an exact card order (last card is drawn first)
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Remove and return the top card
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Put a card at the bottom of the deck
    pub fn put_bottom(&mut self, card: Card) {
        self.cards.insert(0, card.reset());
    }

    /// Add recycled cards and reshuffle the whole pile
    pub fn refill<R: Rng + ?Sized>(&mut self, cards: impl IntoIterator<Item = Card>, rng: &mut R) {
        self.cards.extend(cards.into_iter().map(Card::reset));
        self.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
