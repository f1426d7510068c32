//! AI seat policies.
//!
//! The engine only decides whether a play is legal and what it does; these
//! bots decide which play to make:
//! - Easy: Random valid actions
//! - Medium: Rule-based (attack a seat close to winning, dump the commonest color, hold wilds)
//! - Hard: One-ply lookahead over every legal play, Medium breaks ties

use crate::actions::{GameAction, NullSink};
use crate::card::{Card, CardColor, CardValue};
use crate::game::{GamePhase, GameState};
use crate::player::{Seat, SeatId};
use crate::rules::choose_wild_color;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Hand size at which the next seat is treated as a threat
const THREAT_HAND_SIZE: usize = 2;

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
    Hard,
}

/// A bot that decides actions for one seat
#[derive(Debug, Clone)]
pub struct Bot {
    pub seat: SeatId,
    pub difficulty: BotDifficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(seat: SeatId, difficulty: BotDifficulty) -> Self {
        Self {
            seat,
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seat: SeatId, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            seat,
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose an action from the valid actions
    pub fn choose_action(&mut self, game: &GameState) -> Option<GameAction> {
        let valid_actions = game.valid_actions(self.seat);
        if valid_actions.is_empty() {
            return None;
        }

        match self.difficulty {
            BotDifficulty::Easy => self.choose_easy(&valid_actions),
            BotDifficulty::Medium => self.choose_medium(game, &valid_actions),
            BotDifficulty::Hard => self.choose_hard(game, &valid_actions),
        }
    }

    /// Easy: Just pick a random valid action
    fn choose_easy(&mut self, actions: &[GameAction]) -> Option<GameAction> {
        actions.choose(&mut self.rng).copied()
    }

    /// Medium: Rule-based play
    fn choose_medium(&mut self, game: &GameState, actions: &[GameAction]) -> Option<GameAction> {
        let seat = game.get_seat(self.seat)?;
        let plays = candidate_plays(seat, actions);

        if plays.is_empty() {
            return actions
                .contains(&GameAction::DrawCard)
                .then_some(GameAction::DrawCard);
        }

        let counts = seat.color_counts();
        let preferred = choose_wild_color(&counts, &mut self.rng);

        // Stop the next seat from going out
        let next_hand = game
            .get_seat(game.next_seat_index())
            .map_or(usize::MAX, Seat::hand_size);
        if next_hand <= THREAT_HAND_SIZE {
            if let Some((action, _)) = plays
                .iter()
                .find(|(_, card)| card.value.is_special() && !card.is_wild())
            {
                return Some(*action);
            }
            if let Some((action, _)) = plays.iter().find(|(action, card)| {
                card.value == CardValue::WildDrawFour && declares(action, preferred)
            }) {
                return Some(*action);
            }
        }

        // Shed the color we hold most of, action cards before numbers
        if let Some((action, _)) = plays
            .iter()
            .filter(|(_, card)| !card.is_wild())
            .max_by_key(|(_, card)| (counts.get(card.color), shed_rank(card)))
        {
            return Some(*action);
        }

        // Only wild cards left to play
        plays
            .iter()
            .find(|(action, card)| card.value == CardValue::Wild && declares(action, preferred))
            .or_else(|| plays.iter().find(|(action, _)| declares(action, preferred)))
            .or_else(|| plays.first())
            .map(|(action, _)| *action)
    }

    /// Hard: Score each play one step ahead
    fn choose_hard(&mut self, game: &GameState, actions: &[GameAction]) -> Option<GameAction> {
        let mut best_score = i64::MIN;
        let mut best: Vec<GameAction> = Vec::new();

        for action in actions
            .iter()
            .filter(|a| matches!(a, GameAction::PlayCard { .. }))
        {
            let mut trial = game.clone();
            if trial
                .apply_action_with_sink(self.seat, *action, &mut NullSink)
                .is_err()
            {
                continue;
            }

            let score = self.evaluate(&trial);
            if score > best_score {
                best_score = score;
                best.clear();
                best.push(*action);
            } else if score == best_score {
                best.push(*action);
            }
        }

        match best.len() {
            0 => self.choose_medium(game, actions),
            1 => best.first().copied(),
            _ => self.choose_medium(game, &best),
        }
    }

    /// Higher is better for this bot's seat
    fn evaluate(&self, state: &GameState) -> i64 {
        if let GamePhase::Finished { winner } = state.phase {
            return if winner == self.seat { 10_000 } else { -10_000 };
        }

        let own = state.get_seat(self.seat).map_or(0, Seat::hand_size) as i64;
        let opponents: Vec<i64> = state
            .seats
            .iter()
            .filter(|s| s.id != self.seat)
            .map(|s| s.hand_size() as i64)
            .collect();
        let closest = opponents.iter().copied().min().unwrap_or(0);
        let total: i64 = opponents.iter().sum();

        // Keep the most dangerous opponent loaded, then everyone else
        closest * 4 + total - own * 10
    }
}

/// Playable actions paired with the card each would play
fn candidate_plays(seat: &Seat, actions: &[GameAction]) -> Vec<(GameAction, Card)> {
    actions
        .iter()
        .filter_map(|action| match action {
            GameAction::PlayCard { card_index, .. } => {
                seat.card_at(*card_index).map(|card| (*action, *card))
            }
            GameAction::DrawCard => None,
        })
        .collect()
}

/// Whether a play declares `color`, or declares nothing (engine picks)
fn declares(action: &GameAction, color: CardColor) -> bool {
    match action {
        GameAction::PlayCard { declared_color, .. } => {
            declared_color.is_none() || *declared_color == Some(color)
        }
        GameAction::DrawCard => false,
    }
}

fn shed_rank(card: &Card) -> u8 {
    match card.value {
        CardValue::DrawTwo => 3,
        CardValue::Skip | CardValue::Reverse => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::deck::Deck;

    fn red(n: u8) -> Card {
        Card::number(CardColor::Red, n)
    }

    fn blue(n: u8) -> Card {
        Card::number(CardColor::Blue, n)
    }

    fn table(hands: Vec<Vec<Card>>, top: Card, primary: Option<SeatId>) -> GameState {
        let config = GameConfig {
            seat_count: hands.len(),
            primary_seat: primary,
            seed: Some(5),
            ..GameConfig::default()
        };
        GameState::with_layout(&config, hands, vec![top], Deck::standard()).unwrap()
    }

    #[test]
    fn test_easy_picks_valid_action() {
        let game = GameState::new(&GameConfig::seeded(12)).unwrap();
        let mut bot = Bot::with_seed(0, BotDifficulty::Easy, 1);
        let action = bot.choose_action(&game).unwrap();
        assert!(game.valid_actions(0).contains(&action));
    }

    #[test]
    fn test_no_action_off_turn() {
        let game = GameState::new(&GameConfig::seeded(12)).unwrap();
        let mut bot = Bot::with_seed(2, BotDifficulty::Medium, 1);
        assert_eq!(bot.choose_action(&game), None);
    }

    #[test]
    fn test_medium_draws_when_stuck() {
        let game = table(
            vec![vec![blue(1), blue(2)], vec![red(1)], vec![red(2)]],
            red(5),
            None,
        );
        let mut bot = Bot::with_seed(0, BotDifficulty::Medium, 1);
        assert_eq!(bot.choose_action(&game), Some(GameAction::DrawCard));
    }

    #[test]
    fn test_medium_attacks_threat() {
        let draw2 = Card::new(CardColor::Red, CardValue::DrawTwo);
        let game = table(
            vec![vec![red(7), draw2, red(8)], vec![blue(1)], vec![red(2), red(3), red(4)]],
            red(5),
            None,
        );
        let mut bot = Bot::with_seed(0, BotDifficulty::Medium, 1);
        assert_eq!(bot.choose_action(&game), Some(GameAction::play(1)));
    }

    #[test]
    fn test_medium_holds_wild() {
        let game = table(
            vec![
                vec![Card::wild(), blue(5), blue(2), red(9)],
                vec![red(1), red(2), red(3)],
                vec![red(2), red(3), red(4)],
            ],
            red(5),
            None,
        );
        let mut bot = Bot::with_seed(0, BotDifficulty::Medium, 1);
        // blue 5 matches by value and blue is the commonest color
        assert_eq!(bot.choose_action(&game), Some(GameAction::play(1)));
    }

    #[test]
    fn test_medium_primary_declares_majority_color() {
        let game = table(
            vec![
                vec![Card::wild(), blue(1), blue(2), Card::number(CardColor::Green, 3)],
                vec![red(1), red(2), red(3)],
                vec![red(2), red(3), red(4)],
            ],
            Card::number(CardColor::Yellow, 5),
            Some(0),
        );
        let mut bot = Bot::with_seed(0, BotDifficulty::Medium, 1);
        assert_eq!(
            bot.choose_action(&game),
            Some(GameAction::play_wild(0, CardColor::Blue))
        );
    }

    #[test]
    fn test_hard_takes_the_win() {
        let game = table(
            vec![vec![red(7)], vec![red(1), red(2)], vec![red(2), red(3)]],
            red(5),
            None,
        );
        let mut bot = Bot::with_seed(0, BotDifficulty::Hard, 1);
        assert_eq!(bot.choose_action(&game), Some(GameAction::play(0)));
    }

    #[test]
    fn test_hard_prefers_forcing_draws() {
        let draw2 = Card::new(CardColor::Red, CardValue::DrawTwo);
        let game = table(
            vec![vec![red(7), draw2, blue(1)], vec![blue(1)], vec![blue(2), blue(3)]],
            red(5),
            None,
        );
        let mut bot = Bot::with_seed(0, BotDifficulty::Hard, 1);
        assert_eq!(bot.choose_action(&game), Some(GameAction::play(1)));
    }
}
