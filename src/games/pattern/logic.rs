//! Pattern Match game logic: pure functions over `PatternState`.

use super::state::{
    display_ticks, sequence_len, PatternColor, PatternPhase, PatternState, PatternTimer,
    POINTS_PER_LEVEL,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorOutcome {
    /// Not accepting input (showing, idle or over).
    Ignored,
    /// Stored; `entered` of `target` colors so far.
    Accepted { entered: usize, target: usize },
    /// Whole sequence right.
    LevelCleared { points: u32, next_level: u32 },
    /// A color was wrong; the run is over.
    GameOver { score: u32 },
}

pub fn start(state: &mut PatternState) {
    state.scheduler.cancel_all();
    state.level = 1;
    state.levels_cleared = 0;
    state.session.begin(state.scheduler.now());
    state.reporter.arm();
    state.log.clear();
    state.log.push("Watch the pattern carefully!", false);
    show_sequence(state);
    log::debug!("pattern: run started (generation {})", state.scheduler.generation());
}

/// Generate the sequence for the current level and put it on screen.
fn show_sequence(state: &mut PatternState) {
    let len = sequence_len(state.level);
    state.sequence = state.source.pattern(len);
    state.attempt.clear();
    state.phase = PatternPhase::Showing;
    state.scheduler.schedule(display_ticks(len), PatternTimer::HideSequence);
}

pub fn submit_color(state: &mut PatternState, color: PatternColor) -> ColorOutcome {
    if state.phase != PatternPhase::AwaitingInput {
        return ColorOutcome::Ignored;
    }

    state.attempt.push(color);
    let target = state.sequence.len();
    if state.attempt.len() < target {
        return ColorOutcome::Accepted {
            entered: state.attempt.len(),
            target,
        };
    }

    if state.attempt == state.sequence {
        let points = state.level * POINTS_PER_LEVEL;
        state.session.score += points;
        state.levels_cleared = state.level;
        state.log.push(&format!("Level {} complete! +{} points", state.level, points), true);
        log::debug!("pattern: level {} cleared, score {}", state.level, state.session.score);
        state.level += 1;
        show_sequence(state);
        ColorOutcome::LevelCleared {
            points,
            next_level: state.level,
        }
    } else {
        game_over(state);
        ColorOutcome::GameOver {
            score: state.session.score,
        }
    }
}

pub fn tick(state: &mut PatternState, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }
    if state.is_playing() {
        state.session.clock.advance(delta_ticks);
    }
    for timer in state.scheduler.advance(delta_ticks) {
        match timer {
            PatternTimer::HideSequence if state.phase == PatternPhase::Showing => {
                state.phase = PatternPhase::AwaitingInput;
                state.attempt.clear();
            }
            PatternTimer::HideSequence => {}
        }
    }
}

fn game_over(state: &mut PatternState) {
    state.scheduler.cancel_all();
    state.phase = PatternPhase::GameOver;
    state.session.finish();
    let score = state.session.score;
    let elapsed = state.session.elapsed_secs();
    state.log.push(&format!("Game Over! Final Score: {}", score), true);
    log::debug!(
        "pattern: run over at level {} after {} ticks",
        state.level,
        state.session.ticks_since_start(state.scheduler.now()).unwrap_or(0)
    );
    state.reporter.report(state.session.kind, score, elapsed);
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::generator::RandomSource;
    use crate::score::ScoreReporter;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_perfect_play_scores_triangular(seed in any::<u64>(), levels in 1u32..12) {
            let mut state = PatternState::new(
                Box::new(RandomSource::seeded(seed)),
                ScoreReporter::detached(),
            );
            start(&mut state);
            for level in 1..=levels {
                prop_assert_eq!(state.level, level);
                prop_assert_eq!(state.sequence.len(), 3 + (level as usize - 1));
                let len = state.sequence.len();
                tick(&mut state, display_ticks(len));
                let score_before = state.session.score;
                let target = state.sequence.clone();
                for c in target {
                    submit_color(&mut state, c);
                }
                prop_assert_eq!(state.session.score, score_before + level * 100);
            }
            prop_assert_eq!(state.session.score, 100 * levels * (levels + 1) / 2);
        }
    }
}
