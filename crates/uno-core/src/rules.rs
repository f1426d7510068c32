//! Play legality and wild color selection.
//!
//! Both functions here are pure with respect to game state, so seat
//! policies can call them speculatively while evaluating candidate moves.

use crate::card::{Card, CardColor};
use crate::player::ColorCounts;
use rand::seq::SliceRandom;
use rand::Rng;

/// Tie-break order for the wild color chooser, highest priority first
pub const COLOR_PRIORITY: [CardColor; 4] = CardColor::CONCRETE;

/// Whether `card` may be played on top of `top`.
///
/// Wild-typed cards are always legal. Anything else must match the top
/// card's color or value.
pub fn is_valid_move(card: &Card, top: &Card) -> bool {
    if card.is_wild() {
        return true;
    }
    card.color == top.color || card.value == top.value
}

/// Pick a color for an automated seat playing a wild card.
///
/// `counts` is the tally of the seat's hand (the wild card itself has no
/// color and contributes nothing). The most common color wins, ties going
/// to the earlier entry in [`COLOR_PRIORITY`]. A hand with no colored cards
/// gets a uniformly random color from `rng`.
pub fn choose_wild_color<R: Rng + ?Sized>(counts: &ColorCounts, rng: &mut R) -> CardColor {
    if counts.is_empty() {
        return *COLOR_PRIORITY.choose(rng).unwrap_or(&CardColor::Red);
    }

    let mut best = COLOR_PRIORITY[0];
    for color in COLOR_PRIORITY.iter().skip(1) {
        // Strictly greater keeps the higher-priority color on ties
        if counts.get(*color) > counts.get(best) {
            best = *color;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardValue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn counts(red: u32, blue: u32, green: u32, yellow: u32) -> ColorCounts {
        ColorCounts {
            red,
            blue,
            green,
            yellow,
        }
    }

    #[test]
    fn test_wild_always_valid() {
        let tops = [
            Card::number(CardColor::Red, 5),
            Card::new(CardColor::Blue, CardValue::Skip),
            Card::wild().with_color(CardColor::Green),
            Card::new(CardColor::Yellow, CardValue::DrawTwo),
        ];
        for top in &tops {
            assert!(is_valid_move(&Card::wild(), top));
            assert!(is_valid_move(&Card::wild_draw_four(), top));
        }
    }

    #[test]
    fn test_color_or_value_match() {
        let top = Card::number(CardColor::Red, 5);
        assert!(is_valid_move(&Card::number(CardColor::Green, 5), &top));
        assert!(is_valid_move(&Card::number(CardColor::Red, 9), &top));
        assert!(is_valid_move(&Card::new(CardColor::Red, CardValue::Skip), &top));
        assert!(!is_valid_move(&Card::number(CardColor::Blue, 4), &top));
        assert!(!is_valid_move(&Card::new(CardColor::Blue, CardValue::Reverse), &top));
    }

    #[test]
    fn test_action_cards_match_by_value() {
        let top = Card::new(CardColor::Yellow, CardValue::DrawTwo);
        assert!(is_valid_move(&Card::new(CardColor::Blue, CardValue::DrawTwo), &top));
        assert!(!is_valid_move(&Card::new(CardColor::Blue, CardValue::Skip), &top));
    }

    #[test]
    fn test_exhaustive_non_wild_rule() {
        let values = [
            CardValue::Number(0),
            CardValue::Number(7),
            CardValue::Skip,
            CardValue::Reverse,
            CardValue::DrawTwo,
        ];
        for c_color in CardColor::CONCRETE {
            for t_color in CardColor::CONCRETE {
                for c_value in values {
                    for t_value in values {
                        let card = Card::new(c_color, c_value);
                        let top = Card::new(t_color, t_value);
                        assert_eq!(
                            is_valid_move(&card, &top),
                            c_color == t_color || c_value == t_value,
                            "{} on {}",
                            card,
                            top
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_chooser_picks_majority() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_wild_color(&counts(1, 3, 0, 0), &mut rng), CardColor::Blue);
        assert_eq!(choose_wild_color(&counts(0, 0, 0, 2), &mut rng), CardColor::Yellow);
    }

    #[test]
    fn test_chooser_tie_break_priority() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_wild_color(&counts(2, 2, 2, 2), &mut rng), CardColor::Red);
        assert_eq!(choose_wild_color(&counts(0, 1, 1, 1), &mut rng), CardColor::Blue);
        assert_eq!(choose_wild_color(&counts(0, 0, 3, 3), &mut rng), CardColor::Green);
    }

    #[test]
    fn test_chooser_random_fallback_is_seeded() {
        let empty = ColorCounts::default();
        let a: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(99);
            (0..16).map(|_| choose_wild_color(&empty, &mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(99);
            (0..16).map(|_| choose_wild_color(&empty, &mut rng)).collect()
        };
        assert_eq!(a, b);
        assert!(a.iter().all(|c| c.is_concrete()));
    }
}
