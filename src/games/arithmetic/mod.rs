//! Math Speed: answer as many arithmetic problems as possible in 60 seconds.

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
use state::{ArithmeticPhase, ArithmeticState, Difficulty};

pub struct ArithmeticGame {
    pub state: ArithmeticState,
}

impl ArithmeticGame {
    /// Waits on the start screen with `difficulty` preselected.
    pub fn new(
        difficulty: Difficulty,
        source: Box<dyn ChallengeSource>,
        reporter: ScoreReporter,
    ) -> Self {
        Self {
            state: ArithmeticState::new(difficulty, source, reporter),
        }
    }

    fn running(&self) -> bool {
        self.state.phase == ArithmeticPhase::Running
    }

    fn start(&mut self) -> bool {
        if self.running() {
            return false;
        }
        logic::start(&mut self.state);
        true
    }

    fn choose(&mut self, difficulty: Difficulty) -> bool {
        logic::set_difficulty(&mut self.state, difficulty)
    }

    fn submit(&mut self) -> bool {
        let outcome = logic::submit_entry(&mut self.state);
        log::trace!("math: {:?}", outcome);
        true
    }

    fn handle_key(&mut self, key: char) -> bool {
        if self.running() {
            return match key {
                '0'..='9' => self.state.entry.push_digit(key),
                '-' => self.state.entry.push_minus(),
                _ => false,
            };
        }
        match key {
            'e' => self.choose(Difficulty::Easy),
            'm' => self.choose(Difficulty::Medium),
            'h' => self.choose(Difficulty::Hard),
            's' | ' ' => self.start(),
            _ => false,
        }
    }

    fn handle_click(&mut self, action_id: u16) -> bool {
        match action_id {
            START => self.start(),
            id if (DIFFICULTY_BASE..DIFFICULTY_BASE + 3).contains(&id) => {
                match Difficulty::ALL.get((id - DIFFICULTY_BASE) as usize) {
                    Some(&d) => self.choose(d),
                    None => false,
                }
            }
            id if (KEYPAD_DIGIT_BASE..KEYPAD_DIGIT_BASE + 10).contains(&id) => {
                let digit = (b'0' + (id - KEYPAD_DIGIT_BASE) as u8) as char;
                self.handle_key(digit)
            }
            KEYPAD_MINUS => self.handle_key('-'),
            KEYPAD_BACKSPACE if self.running() => {
                self.state.entry.backspace();
                true
            }
            KEYPAD_SUBMIT if self.running() => self.submit(),
            _ => false,
        }
    }
}

impl Game for ArithmeticGame {
    fn kind(&self) -> GameKind {
        GameKind::ArithmeticSpeed
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Backspace if self.running() => {
                self.state.entry.backspace();
                true
            }
            InputEvent::Enter if self.running() => self.submit(),
            InputEvent::Enter => self.start(),
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Backspace => false,
        }
    }

    fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
