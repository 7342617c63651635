//! Game trait, the message log every game keeps, and game construction.

pub mod arithmetic;
pub mod memory;
pub mod pattern;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::generator::RandomSource;
use crate::input::{ClickState, InputEvent};
use crate::score::ScoreReporter;
use crate::session::GameKind;

use arithmetic::state::Difficulty;
use memory::state::DEFAULT_SYMBOLS;

/// Trait that all games implement.
pub trait Game {
    fn kind(&self) -> GameKind;

    /// Handle an input event. Returns true if the event was consumed.
    fn handle_input(&mut self, event: &InputEvent) -> bool;

    /// Advance game logic by `delta_ticks` discrete ticks.
    fn tick(&mut self, delta_ticks: u32);

    /// Render the game into the given area.
    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>);
}

/// Top-level application state.
pub enum AppState {
    /// Game picker with best scores.
    Menu,
    Playing { game: Box<dyn Game> },
}

/// Everything a game needs from the shell at creation.
pub struct GameSetup {
    pub difficulty: Difficulty,
    pub reporter: ScoreReporter,
}

/// Create a game with a clock-seeded generator.
pub fn create_game(kind: GameKind, setup: GameSetup) -> Box<dyn Game> {
    let source = Box::new(RandomSource::from_clock());
    match kind {
        GameKind::MemoryMatch => Box::new(memory::MemoryGame::new(
            &DEFAULT_SYMBOLS,
            source,
            setup.reporter,
        )),
        GameKind::PatternRecall => Box::new(pattern::PatternGame::new(source, setup.reporter)),
        GameKind::ArithmeticSpeed => Box::new(arithmetic::ArithmeticGame::new(
            setup.difficulty,
            source,
            setup.reporter,
        )),
    }
}

/// Entries kept before the oldest are dropped.
pub const LOG_CAPACITY: usize = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Player-facing feedback lines ("Correct! +10 points", ...).
#[derive(Clone, Debug, Default)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: &str, is_important: bool) {
        self.entries.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.entries.len() > LOG_CAPACITY {
            self.entries.remove(0);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The newest `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_drops_oldest_past_capacity() {
        let mut log = GameLog::new();
        for i in 0..LOG_CAPACITY + 5 {
            log.push(&format!("line {}", i), false);
        }
        let kept = log.tail(usize::MAX);
        assert_eq!(kept.len(), LOG_CAPACITY);
        assert_eq!(kept[0].text, "line 5");
        assert_eq!(log.tail(1)[0].text, "line 34");
    }

    #[test]
    fn log_tail_is_oldest_first() {
        let mut log = GameLog::new();
        log.push("a", false);
        log.push("b", true);
        log.push("c", false);
        let tail: Vec<_> = log.tail(2).iter().map(|e| e.text.as_str()).collect();
        assert_eq!(tail, vec!["b", "c"]);
        assert_eq!(log.tail(10).len(), 3);
    }

    #[test]
    fn created_games_report_their_kind() {
        for kind in GameKind::ALL {
            let game = create_game(
                kind,
                GameSetup {
                    difficulty: Difficulty::Easy,
                    reporter: ScoreReporter::detached(),
                },
            );
            assert_eq!(game.kind(), kind);
        }
    }
}
