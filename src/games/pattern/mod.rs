//! Pattern Match: watch a color sequence, then repeat it. One color longer
//! every level.

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
use state::{PatternColor, PatternState};

pub struct PatternGame {
    pub state: PatternState,
}

impl PatternGame {
    /// Waits on the start screen until the player begins.
    pub fn new(source: Box<dyn ChallengeSource>, reporter: ScoreReporter) -> Self {
        Self {
            state: PatternState::new(source, reporter),
        }
    }

    fn start(&mut self) -> bool {
        if self.state.is_playing() {
            return false;
        }
        logic::start(&mut self.state);
        true
    }

    fn pick(&mut self, index: usize) -> bool {
        match PatternColor::from_index(index) {
            Some(color) => {
                let outcome = logic::submit_color(&mut self.state, color);
                log::trace!("pattern: {} -> {:?}", color.name(), outcome);
                true
            }
            None => false,
        }
    }
}

impl Game for PatternGame {
    fn kind(&self) -> GameKind {
        GameKind::PatternRecall
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c @ '1'..='6') => self.pick((*c as u8 - b'1') as usize),
            InputEvent::Key('s') | InputEvent::Key(' ') | InputEvent::Enter => self.start(),
            InputEvent::Click(START) => self.start(),
            InputEvent::Click(id) if *id >= PICK_COLOR_BASE => {
                self.pick((id - PICK_COLOR_BASE) as usize)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::testing::FixedSource;
    use state::{display_ticks, PatternPhase};
    use PatternColor::*;

    fn game(patterns: Vec<Vec<PatternColor>>) -> PatternGame {
        let source = FixedSource {
            patterns,
            ..FixedSource::default()
        };
        PatternGame::new(Box::new(source), ScoreReporter::detached())
    }

    #[test]
    fn idle_until_started() {
        let mut game = game(vec![]);
        assert_eq!(game.state.phase, PatternPhase::Idle);
        assert!(game.handle_input(&InputEvent::Key('s')));
        assert_eq!(game.state.phase, PatternPhase::Showing);
        // Starting again mid-run is refused.
        assert!(!game.handle_input(&InputEvent::Enter));
    }

    #[test]
    fn number_keys_enter_colors() {
        let mut game = game(vec![vec![Orange, Sky, Blue]]);
        game.handle_input(&InputEvent::Enter);
        game.tick(display_ticks(3));
        game.handle_input(&InputEvent::Key('1'));
        game.handle_input(&InputEvent::Key('4'));
        assert_eq!(game.state.attempt, vec![Orange, Sky]);
        game.handle_input(&InputEvent::Key('6'));
        assert_eq!(game.state.level, 2);
        assert!(!game.handle_input(&InputEvent::Key('7')));
    }

    #[test]
    fn color_pads_by_click() {
        let mut game = game(vec![vec![Gold, Gold, Pink]]);
        game.handle_input(&InputEvent::Click(START));
        game.tick(display_ticks(3));
        game.handle_input(&InputEvent::Click(PICK_COLOR_BASE + 1));
        game.handle_input(&InputEvent::Click(PICK_COLOR_BASE + 1));
        game.handle_input(&InputEvent::Click(PICK_COLOR_BASE + 5));
        assert_eq!(game.state.phase, PatternPhase::GameOver);
    }

    #[test]
    fn play_again_from_game_over() {
        let mut game = game(vec![vec![Gold, Gold, Pink]]);
        game.handle_input(&InputEvent::Enter);
        game.tick(display_ticks(3));
        for key in ['1', '1', '1'] {
            game.handle_input(&InputEvent::Key(key));
        }
        assert_eq!(game.state.phase, PatternPhase::GameOver);
        assert!(game.handle_input(&InputEvent::Enter));
        assert_eq!(game.state.phase, PatternPhase::Showing);
        assert_eq!(game.state.level, 1);
        assert_eq!(game.state.session.score, 0);
    }
}
