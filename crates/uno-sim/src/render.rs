//! Console narration of game events.

use tracing::info;
use uno_core::{EventSink, GameEvent, GameState, SeatId};

/// Writes a line to the log for each event
pub struct ConsoleRenderer {
    names: Vec<String>,
}

impl ConsoleRenderer {
    pub fn new(game: &GameState) -> Self {
        Self {
            names: game.seats.iter().map(|s| s.name.clone()).collect(),
        }
    }

    fn name(&self, seat: SeatId) -> &str {
        self.names.get(seat).map_or("?", String::as_str)
    }

    /// Text for an event
    pub fn describe(&self, event: &GameEvent) -> String {
        match event {
            GameEvent::CardPlayed { seat, color, value } => {
                format!("{} played {} {}", self.name(*seat), color, value)
            }
            GameEvent::WildColorChosen { seat, color } => {
                format!("{} chose {} for wild card", self.name(*seat), color)
            }
            GameEvent::TurnSkipped { seat } => format!("{} is skipped!", self.name(*seat)),
            GameEvent::DirectionReversed => "Reverse card played! Direction changed.".into(),
            GameEvent::CardsForcedDraw { seat, count } => {
                format!("{} draws {} cards", self.name(*seat), count)
            }
            GameEvent::CardDrawn { seat } => format!("{} drew a card from deck", self.name(*seat)),
            GameEvent::DeckReshuffled { cards } => {
                format!("Discard pile reshuffled into the deck ({} cards)", cards)
            }
            GameEvent::DeckExhausted { seat, shortfall } => format!(
                "Deck ran dry: {} is {} card(s) short",
                self.name(*seat),
                shortfall
            ),
            GameEvent::TurnPassed { next_seat } => {
                format!("Turn now goes to: {}", self.name(*next_seat))
            }
            GameEvent::GameWon { name, .. } => format!("{} has no cards left!", name),
        }
    }
}

impl EventSink for ConsoleRenderer {
    fn emit(&mut self, event: GameEvent) {
        info!("{}", self.describe(&event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uno_core::{CardColor, CardValue, GameConfig};

    #[test]
    fn test_describe_uses_seat_names() {
        let config = GameConfig {
            seat_names: vec!["Ana".into(), "Ben".into(), "Cy".into(), "Di".into()],
            seed: Some(1),
            ..GameConfig::default()
        };
        let game = GameState::new(&config).unwrap();
        let renderer = ConsoleRenderer::new(&game);

        assert_eq!(
            renderer.describe(&GameEvent::CardPlayed {
                seat: 1,
                color: CardColor::Green,
                value: CardValue::DrawTwo,
            }),
            "Ben played green draw2"
        );
        assert_eq!(
            renderer.describe(&GameEvent::CardsForcedDraw { seat: 2, count: 4 }),
            "Cy draws 4 cards"
        );
        assert_eq!(
            renderer.describe(&GameEvent::TurnPassed { next_seat: 3 }),
            "Turn now goes to: Di"
        );
    }
}
