//! A table of bots playing one game.

use serde::Serialize;
use tracing::debug;
use uno_core::{Bot, BotDifficulty, EventSink, GameConfig, GameError, GameState, SeatId};

/// Difficulty handed to each seat in turn
const SEAT_DIFFICULTIES: [BotDifficulty; 4] = [
    BotDifficulty::Medium,
    BotDifficulty::Hard,
    BotDifficulty::Medium,
    BotDifficulty::Easy,
];

/// How a game ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameResult {
    Won {
        seat: SeatId,
        name: String,
        turns: u32,
    },
    /// The seat to act could neither play nor draw
    Stalemate { turns: u32 },
    /// Turn limit reached
    TimedOut { turns: u32 },
}

/// A game plus one bot per seat
pub struct Table {
    pub game: GameState,
    bots: Vec<Bot>,
}

impl Table {
    /// Deal a game and seat the bots. `bot_seed` makes bot choices reproducible.
    pub fn new(config: &GameConfig, bot_seed: Option<u64>) -> Result<Self, GameError> {
        let game = GameState::new(config)?;
        let bots = (0..game.seat_count())
            .map(|seat| {
                let difficulty = SEAT_DIFFICULTIES[seat % SEAT_DIFFICULTIES.len()];
                match bot_seed {
                    Some(seed) => Bot::with_seed(seat, difficulty, seed.wrapping_add(seat as u64)),
                    None => Bot::new(seat, difficulty),
                }
            })
            .collect();

        Ok(Self { game, bots })
    }

    /// Play until a seat wins, nobody can act, or `max_turns` actions were taken
    pub fn play(
        &mut self,
        max_turns: usize,
        sink: &mut dyn EventSink,
    ) -> Result<GameResult, GameError> {
        for _ in 0..max_turns {
            if let Some(seat) = self.game.winning_seat() {
                return Ok(self.won(seat));
            }

            let seat = self.game.current_seat;
            let Some(action) = self.bots[seat].choose_action(&self.game) else {
                debug!(seat, "no valid action");
                return Ok(GameResult::Stalemate {
                    turns: self.game.turn_number,
                });
            };

            self.game.apply_action_with_sink(seat, action, sink)?;
        }

        Ok(match self.game.winning_seat() {
            Some(seat) => self.won(seat),
            None => GameResult::TimedOut {
                turns: self.game.turn_number,
            },
        })
    }

    fn won(&self, seat: SeatId) -> GameResult {
        GameResult::Won {
            seat,
            name: self.game.seats[seat].name.clone(),
            turns: self.game.turn_number,
        }
    }
}
