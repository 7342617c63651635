//! Memory Match: flip cards two at a time and find every pair.

pub mod actions;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::generator::ChallengeSource;
use crate::input::{ClickState, InputEvent};
use crate::score::ScoreReporter;
use crate::session::GameKind;

use actions::*;
use logic::SelectOutcome;
use state::{MemoryState, Symbol};

pub struct MemoryGame {
    pub state: MemoryState,
}

impl MemoryGame {
    /// Deals the first board right away.
    pub fn new(
        symbols: &[Symbol],
        source: Box<dyn ChallengeSource>,
        reporter: ScoreReporter,
    ) -> Self {
        let mut state = MemoryState::new(symbols, source, reporter);
        logic::start(&mut state);
        Self { state }
    }

    fn select(&mut self, index: usize) -> bool {
        if index >= self.state.board.len() {
            return false;
        }
        let outcome = logic::select_card(&mut self.state, index);
        if outcome != SelectOutcome::Ignored {
            log::trace!("memory: card {} -> {:?}", index, outcome);
        }
        true
    }
}

/// Keyboard letter for a board position ('a' for the first card).
pub fn card_key(index: usize) -> Option<char> {
    (index < 26).then(|| (b'a' + index as u8) as char)
}

impl Game for MemoryGame {
    fn kind(&self) -> GameKind {
        GameKind::MemoryMatch
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) if c.is_ascii_lowercase() => {
                self.select((*c as u8 - b'a') as usize)
            }
            InputEvent::Enter | InputEvent::Click(NEW_GAME) => {
                logic::reset(&mut self.state);
                true
            }
            InputEvent::Click(id) if *id >= SELECT_CARD_BASE => {
                self.select((id - SELECT_CARD_BASE) as usize)
            }
            _ => false,
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
