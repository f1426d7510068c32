//! Core game state machine.
//!
//! This module contains the main `GameState` struct: turn order, play
//! validation, special card resolution and winner detection.

use crate::actions::{EventSink, GameAction, GameEvent, PlayOutcome};
use crate::card::{Card, CardColor, CardValue};
use crate::config::{GameConfig, MIN_SEATS};
use crate::deck::Deck;
use crate::player::{Seat, SeatId, SeatRole};
use crate::rules::{choose_wild_color, is_valid_move};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Turn order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Seat indices increase (+1)
    Clockwise,
    /// Seat indices decrease (-1)
    CounterClockwise,
}

impl Direction {
    pub fn sign(&self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    InProgress,
    /// A seat emptied its hand
    Finished { winner: SeatId },
}

/// Errors that can occur when applying actions.
///
/// Every error means the action was rejected and the state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Game is over")]
    GameOver,

    #[error("No card at index {index} (hand has {hand_size})")]
    InvalidCardIndex { index: usize, hand_size: usize },

    #[error("Cannot play {card} on {top}")]
    IllegalMove { card: Card, top: Card },

    #[error("A color must be declared for a wild card")]
    ColorChoiceRequired,

    #[error("Deck and discard pile are exhausted")]
    DeckExhausted,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Inconsistent game state: {0}")]
    InvalidState(String),
}

/// The complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GameSnapshot")]
pub struct GameState {
    /// Seats in turn order
    pub seats: Vec<Seat>,
    /// Seat whose turn it is
    pub current_seat: SeatId,
    /// Turn order direction
    pub direction: Direction,
    /// Played cards, top of the stack last
    pub discard: Vec<Card>,
    /// Draw pile
    pub deck: Deck,
    /// Most recent wild color, for display only
    pub last_wild_color: Option<CardColor>,
    /// Current game phase
    pub phase: GamePhase,
    /// Accepted actions so far
    pub turn_number: u32,
    /// Random number generator seed (for deterministic replays)
    rng_seed: u64,
    #[serde(skip)]
    rng: StdRng,
}

/// Serialized form of `GameState`, checked before it becomes a live game
#[derive(Deserialize)]
struct GameSnapshot {
    seats: Vec<Seat>,
    current_seat: SeatId,
    direction: Direction,
    discard: Vec<Card>,
    deck: Deck,
    last_wild_color: Option<CardColor>,
    phase: GamePhase,
    turn_number: u32,
    rng_seed: u64,
}

impl TryFrom<GameSnapshot> for GameState {
    type Error = GameError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        let state = Self {
            seats: snapshot.seats,
            current_seat: snapshot.current_seat,
            direction: snapshot.direction,
            discard: snapshot.discard,
            deck: snapshot.deck,
            last_wild_color: snapshot.last_wild_color,
            phase: snapshot.phase,
            turn_number: snapshot.turn_number,
            rng_seed: snapshot.rng_seed,
            // The stream position is not recorded
            rng: StdRng::from_entropy(),
        };
        state.validate()?;
        Ok(state)
    }
}

impl GameState {
    /// Create and deal a new game
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let rng_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(rng_seed);

        let mut deck = Deck::standard();
        deck.shuffle(&mut rng);

        let mut state = Self {
            seats: Self::build_seats(config),
            current_seat: 0,
            direction: Direction::Clockwise,
            discard: Vec::new(),
            deck,
            last_wild_color: None,
            phase: GamePhase::InProgress,
            turn_number: 0,
            rng_seed,
            rng,
        };
        state.setup(config.hand_size)?;

        debug!(
            seed = rng_seed,
            seats = state.seats.len(),
            "new game dealt, starting card {:?}",
            state.top_card()
        );

        Ok(state)
    }

    /// Create a game with explicit hands, discard stack and deck. No dealing happens.
    pub fn with_layout(
        config: &GameConfig,
        hands: Vec<Vec<Card>>,
        discard: Vec<Card>,
        deck: Deck,
    ) -> Result<Self, GameError> {
        config.validate()?;

        if hands.len() != config.seat_count {
            return Err(GameError::InvalidConfig(format!(
                "expected {} hands, got {}",
                config.seat_count,
                hands.len()
            )));
        }
        if discard.is_empty() {
            return Err(GameError::InvalidConfig("discard stack cannot be empty".into()));
        }

        let mut seats = Self::build_seats(config);
        for (seat, hand) in seats.iter_mut().zip(hands) {
            seat.hand = hand;
        }

        let rng_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

        Ok(Self {
            seats,
            current_seat: 0,
            direction: Direction::Clockwise,
            discard,
            deck,
            last_wild_color: None,
            phase: GamePhase::InProgress,
            turn_number: 0,
            rng_seed,
            rng: StdRng::seed_from_u64(rng_seed),
        })
    }

    fn build_seats(config: &GameConfig) -> Vec<Seat> {
        (0..config.seat_count)
            .map(|id| {
                let role = if config.primary_seat == Some(id) {
                    SeatRole::Primary
                } else {
                    SeatRole::Automated
                };
                Seat::new(id, config.seat_name(id), role)
            })
            .collect()
    }

    /// Deal hands and turn over a non-wild starting card
    fn setup(&mut self, hand_size: usize) -> Result<(), GameError> {
        for seat in &mut self.seats {
            for _ in 0..hand_size {
                let card = self.deck.draw().ok_or(GameError::DeckExhausted)?;
                seat.receive(card);
            }
        }

        self.turn_starting_card()
    }

    /// Draw until a non-wild card comes up; each wild goes back and the deck is reshuffled
    fn turn_starting_card(&mut self) -> Result<(), GameError> {
        if self.deck.cards().iter().all(Card::is_wild) {
            return Err(GameError::DeckExhausted);
        }

        loop {
            let card = self.deck.draw().ok_or(GameError::DeckExhausted)?;
            if !card.is_wild() {
                self.discard.push(card);
                return Ok(());
            }
            trace!("starting card {} is wild, returning it to the deck", card);
            self.deck.put_bottom(card);
            self.deck.shuffle(&mut self.rng);
        }
    }

    // ==================== Queries ====================

    /// Get the number of seats
    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Get a seat by ID
    pub fn get_seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.get(id)
    }

    /// Seed the game RNG was created from
    pub fn seed(&self) -> u64 {
        self.rng_seed
    }

    /// Card a play has to match
    pub fn top_card(&self) -> Option<&Card> {
        self.discard.last()
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// Seat that would act after the current one, without changing anything
    pub fn next_seat_index(&self) -> SeatId {
        self.step_from(self.current_seat)
    }

    fn step_from(&self, seat: SeatId) -> SeatId {
        let n = self.seats.len() as isize;
        if n == 0 {
            return seat;
        }
        (seat as isize + self.direction.sign()).rem_euclid(n) as SeatId
    }

    /// Name of the first seat (by index) with an empty hand
    pub fn check_winner(&self) -> Option<&str> {
        self.winning_seat()
            .and_then(|id| self.get_seat(id))
            .map(|seat| seat.name.as_str())
    }

    /// Index of the first seat with an empty hand
    pub fn winning_seat(&self) -> Option<SeatId> {
        self.seats.iter().position(|seat| seat.has_empty_hand())
    }

    /// Total cards in the deck, the discard stack and every hand
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.discard.len()
            + self.seats.iter().map(Seat::hand_size).sum::<usize>()
    }

    /// Whether a card can still be drawn, counting a reshuffle of the discard stack
    pub fn can_draw(&self) -> bool {
        !self.deck.is_empty() || self.discard.len() > 1
    }

    /// Indices of the cards `seat` could legally play right now
    pub fn playable_indices(&self, seat: SeatId) -> Vec<usize> {
        let Some(s) = self.get_seat(seat) else {
            return Vec::new();
        };

        s.hand
            .iter()
            .enumerate()
            .filter(|(_, card)| match self.top_card() {
                Some(top) => is_valid_move(card, top),
                None => true,
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Get all currently valid actions for a seat
    pub fn valid_actions(&self, seat: SeatId) -> Vec<GameAction> {
        let mut actions = Vec::new();

        if self.is_finished() || seat != self.current_seat {
            return actions;
        }

        let primary = self.get_seat(seat).is_some_and(Seat::is_primary);

        for index in self.playable_indices(seat) {
            let is_wild = self.seats[seat].hand[index].is_wild();
            if is_wild && primary {
                for color in CardColor::CONCRETE {
                    actions.push(GameAction::play_wild(index, color));
                }
            } else {
                actions.push(GameAction::play(index));
            }
        }

        if self.can_draw() {
            actions.push(GameAction::DrawCard);
        }

        actions
    }

    /// Check the structural invariants a loaded or hand-edited state must hold
    pub fn validate(&self) -> Result<(), GameError> {
        if self.seats.len() < MIN_SEATS {
            return Err(GameError::InvalidState(format!(
                "need at least {} seats, got {}",
                MIN_SEATS,
                self.seats.len()
            )));
        }
        if self.current_seat >= self.seats.len() {
            return Err(GameError::InvalidState(format!(
                "current seat {} out of range for {} seats",
                self.current_seat,
                self.seats.len()
            )));
        }
        if self.discard.is_empty() {
            return Err(GameError::InvalidState("discard stack is empty".into()));
        }
        if let GamePhase::Finished { winner } = self.phase {
            if winner >= self.seats.len() {
                return Err(GameError::InvalidState(format!(
                    "winner {} out of range",
                    winner
                )));
            }
        }
        Ok(())
    }

    fn seat_out_of_range(&self) -> GameError {
        GameError::InvalidState(format!(
            "current seat {} out of range for {} seats",
            self.current_seat,
            self.seats.len()
        ))
    }

    /// Serialize the state for display or storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    // ==================== Actions ====================

    /// Apply an action to the game state, collecting the resulting events
    pub fn apply_action(
        &mut self,
        seat: SeatId,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();
        self.apply_action_with_sink(seat, action, &mut events)?;
        Ok(events)
    }

    /// Apply an action, delivering events to `sink` as they happen
    pub fn apply_action_with_sink(
        &mut self,
        seat: SeatId,
        action: GameAction,
        sink: &mut dyn EventSink,
    ) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if seat != self.current_seat {
            return Err(GameError::NotYourTurn);
        }

        match action {
            GameAction::PlayCard {
                card_index,
                declared_color,
            } => {
                self.play_card(card_index, declared_color, sink)?;
            }
            GameAction::DrawCard => {
                self.draw_from_deck(sink)?;
            }
        }

        Ok(())
    }

    /// Move the turn one seat in the current direction
    pub fn advance(&mut self) {
        self.current_seat = self.step_from(self.current_seat);
    }

    /// Play a card from the current seat's hand.
    ///
    /// The primary seat names the color of a wild card through
    /// `declared_color`; for any other seat the engine picks it and the
    /// declaration is ignored.
    pub fn play_card(
        &mut self,
        card_index: usize,
        declared_color: Option<CardColor>,
        sink: &mut dyn EventSink,
    ) -> Result<PlayOutcome, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }

        let seat_id = self.current_seat;
        let seat = self
            .seats
            .get(seat_id)
            .ok_or_else(|| self.seat_out_of_range())?;
        let candidate = *seat
            .card_at(card_index)
            .ok_or(GameError::InvalidCardIndex {
                index: card_index,
                hand_size: seat.hand_size(),
            })?;

        let mut chosen = None;
        let resolved = if candidate.is_wild() {
            let color = if seat.is_primary() {
                match declared_color {
                    Some(color) if color.is_concrete() => color,
                    _ => {
                        debug!(seat = seat_id, "wild card played without a color");
                        return Err(GameError::ColorChoiceRequired);
                    }
                }
            } else {
                let counts = seat.color_counts();
                let color = choose_wild_color(&counts, &mut self.rng);
                chosen = Some(color);
                color
            };
            candidate.with_color(color)
        } else {
            candidate
        };

        if let Some(top) = self.top_card() {
            if !is_valid_move(&resolved, top) {
                debug!(seat = seat_id, "rejected {} on {}", candidate, top);
                return Err(GameError::IllegalMove {
                    card: candidate,
                    top: *top,
                });
            }
        }

        // Accepted: every step from here on commits
        let played = self.seats[seat_id]
            .remove_at(card_index)
            .ok_or(GameError::InvalidCardIndex {
                index: card_index,
                hand_size: 0,
            })?
            .with_color(resolved.color);
        self.discard.push(played);

        if played.is_wild() {
            self.last_wild_color = Some(played.color);
        }
        if let Some(color) = chosen {
            sink.emit(GameEvent::WildColorChosen {
                seat: seat_id,
                color,
            });
        }
        sink.emit(GameEvent::CardPlayed {
            seat: seat_id,
            color: played.color,
            value: played.value,
        });

        if played.value.is_special() {
            self.resolve_special(played.value, sink);
        } else {
            self.advance();
        }

        self.finish_turn(sink);

        Ok(PlayOutcome {
            seat: seat_id,
            card: played,
            next_seat: self.current_seat,
        })
    }

    /// Current seat takes one card from the deck and the turn passes
    pub fn draw_from_deck(&mut self, sink: &mut dyn EventSink) -> Result<Card, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if !self.can_draw() {
            debug!(seat = self.current_seat, "nothing left to draw");
            return Err(GameError::DeckExhausted);
        }

        let seat_id = self.current_seat;
        if seat_id >= self.seats.len() {
            return Err(self.seat_out_of_range());
        }
        let card = self.take_from_deck(sink).ok_or(GameError::DeckExhausted)?;
        self.seats[seat_id].receive(card);
        sink.emit(GameEvent::CardDrawn { seat: seat_id });

        self.advance();
        self.finish_turn(sink);

        Ok(card)
    }

    // ==================== Helper Methods ====================

    /// Turn-state transitions for skip, reverse, draw2 and wild_draw4
    fn resolve_special(&mut self, value: CardValue, sink: &mut dyn EventSink) {
        if let Some(count) = value.forced_draw() {
            self.advance();
            let target = self.current_seat;
            self.force_draw(target, count, sink);
            sink.emit(GameEvent::TurnSkipped { seat: target });
            self.advance();
            return;
        }

        match value {
            CardValue::Skip => {
                self.advance();
                sink.emit(GameEvent::TurnSkipped {
                    seat: self.current_seat,
                });
                self.advance();
            }
            CardValue::Reverse => {
                self.direction = self.direction.flipped();
                sink.emit(GameEvent::DirectionReversed);
                self.advance();
                // Heads-up play: reversing alone would hand the turn straight back
                if self.seats.len() == 2 {
                    sink.emit(GameEvent::TurnSkipped {
                        seat: self.current_seat,
                    });
                    self.advance();
                }
            }
            _ => self.advance(),
        }

        trace!(
            "{} resolved, turn at seat {} ({:?})",
            value,
            self.current_seat,
            self.direction
        );
    }

    /// Give `seat` up to `count` cards. Short draws are reported, never rejected.
    fn force_draw(&mut self, seat: SeatId, count: usize, sink: &mut dyn EventSink) {
        let mut drawn = 0;
        for _ in 0..count {
            match self.take_from_deck(sink) {
                Some(card) => {
                    self.seats[seat].receive(card);
                    drawn += 1;
                }
                None => break,
            }
        }

        sink.emit(GameEvent::CardsForcedDraw { seat, count: drawn });

        if drawn < count {
            debug!(seat, drawn, count, "forced draw came up short");
            sink.emit(GameEvent::DeckExhausted {
                seat,
                shortfall: count - drawn,
            });
        }
    }

    /// Draw one card, reshuffling the discard stack into the deck first if needed
    fn take_from_deck(&mut self, sink: &mut dyn EventSink) -> Option<Card> {
        if self.deck.is_empty() {
            self.recycle_discard(sink);
        }
        self.deck.draw()
    }

    /// Return all but the top discard to the deck and shuffle
    fn recycle_discard(&mut self, sink: &mut dyn EventSink) {
        let Some(top) = self.discard.pop() else {
            return;
        };
        let recycled = std::mem::take(&mut self.discard);
        self.discard.push(top);

        if recycled.is_empty() {
            return;
        }

        let cards = recycled.len();
        self.deck.refill(recycled, &mut self.rng);
        debug!(cards, "discard stack reshuffled into the deck");
        sink.emit(GameEvent::DeckReshuffled { cards });
    }

    /// Close out an accepted action: report the next seat and check for a winner
    fn finish_turn(&mut self, sink: &mut dyn EventSink) {
        self.turn_number += 1;
        sink.emit(GameEvent::TurnPassed {
            next_seat: self.current_seat,
        });

        if let Some(winner) = self.winning_seat() {
            self.phase = GamePhase::Finished { winner };
            sink.emit(GameEvent::GameWon {
                seat: winner,
                name: self.seats[winner].name.clone(),
            });
        }
    }
}
