//! Math Speed game logic: pure functions over `ArithmeticState`.

use super::state::{ArithmeticPhase, ArithmeticState, Difficulty, BASE_POINTS, STREAK_BONUS};

/// Result of submitting an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// No round in progress.
    Ignored,
    Correct { points: u32 },
    Incorrect { expected: i32 },
}

/// Points for a correct answer given the streak before it.
pub fn points_for(streak_before: u32) -> u32 {
    BASE_POINTS + streak_before * STREAK_BONUS
}

pub fn start(state: &mut ArithmeticState) {
    state.streak = 0;
    state.best_streak = 0;
    state.total_answered = 0;
    state.correct_answers = 0;
    state.entry.clear();
    state.problem = state.source.arithmetic_problem(state.difficulty);
    state.phase = ArithmeticPhase::Running;
    state.session.begin(state.now);
    state.reporter.arm();
    state.log.clear();
    state.log.push("Solve as many problems as you can in 60 seconds!", false);
    log::debug!("math: round started ({})", state.difficulty);
}

/// Change tiers between rounds. Ignored while a round is running.
pub fn set_difficulty(state: &mut ArithmeticState, difficulty: Difficulty) -> bool {
    if state.phase == ArithmeticPhase::Running {
        return false;
    }
    state.difficulty = difficulty;
    true
}

pub fn submit_answer(state: &mut ArithmeticState, value: i32) -> AnswerOutcome {
    if state.phase != ArithmeticPhase::Running {
        return AnswerOutcome::Ignored;
    }

    let expected = state.problem.answer();
    let outcome = if value == expected {
        let points = points_for(state.streak);
        state.session.score += points;
        state.streak += 1;
        state.best_streak = state.best_streak.max(state.streak);
        state.correct_answers += 1;
        state.log.push(&format!("Correct! +{} points", points), false);
        AnswerOutcome::Correct { points }
    } else {
        state.streak = 0;
        state.log.push(&format!("Incorrect! The answer was {}", expected), false);
        AnswerOutcome::Incorrect { expected }
    };

    state.total_answered += 1;
    state.problem = state.source.arithmetic_problem(state.difficulty);
    outcome
}

/// Submit whatever is in the entry buffer. Malformed input never reaches
/// `submit_answer`.
pub fn submit_entry(state: &mut ArithmeticState) -> AnswerOutcome {
    if state.phase != ArithmeticPhase::Running {
        return AnswerOutcome::Ignored;
    }
    match state.entry.take() {
        Some(value) => submit_answer(state, value),
        None => AnswerOutcome::Ignored,
    }
}

/// Run down the clock; the round ends when it hits zero.
pub fn tick(state: &mut ArithmeticState, delta_ticks: u32) {
    state.now += delta_ticks as u64;
    if state.phase != ArithmeticPhase::Running || delta_ticks == 0 {
        return;
    }
    state.session.clock.advance(delta_ticks);
    if state.session.clock.is_expired() {
        finish(state);
    }
}

fn finish(state: &mut ArithmeticState) {
    state.phase = ArithmeticPhase::Finished;
    state.session.finish();
    state.entry.clear();
    let score = state.session.score;
    let elapsed = state.session.elapsed_secs();
    state.log.push(
        &format!(
            "Time up! Final score: {} ({}/{} correct)",
            score, state.correct_answers, state.total_answered
        ),
        true,
    );
    log::debug!(
        "math: time up after {} ticks, {} answered",
        state.session.ticks_since_start(state.now).unwrap_or(0),
        state.total_answered
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
        fn prop_points_follow_streak(
            seed in any::<u64>(),
            hits in proptest::collection::vec(any::<bool>(), 0..60),
        ) {
            let mut state = ArithmeticState::new(
                Difficulty::Hard,
                Box::new(RandomSource::seeded(seed)),
                ScoreReporter::detached(),
            );
            start(&mut state);
            for hit in hits {
                let streak_before = state.streak;
                let score_before = state.session.score;
                let answer = state.problem.answer();
                let value = if hit { answer } else { answer + 1 };
                match submit_answer(&mut state, value) {
                    AnswerOutcome::Correct { points } => {
                        prop_assert!(hit);
                        prop_assert_eq!(points, 10 + 2 * streak_before);
                        prop_assert_eq!(state.streak, streak_before + 1);
                        prop_assert_eq!(state.session.score, score_before + points);
                    }
                    AnswerOutcome::Incorrect { .. } => {
                        prop_assert!(!hit);
                        prop_assert_eq!(state.streak, 0);
                        prop_assert_eq!(state.session.score, score_before);
                    }
                    AnswerOutcome::Ignored => prop_assert!(false, "round should be running"),
                }
            }
        }
    }
}
