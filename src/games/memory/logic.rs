//! Memory Match game logic: pure functions over `MemoryState`.

use super::state::{
    MemoryPhase, MemoryState, PairResolution, BASE_SCORE, FLIP_BACK_TICKS, MATCH_CONFIRM_TICKS,
    MOVE_PENALTY, SCORE_FLOOR, SECOND_PENALTY,
};

/// What a card selection did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Not running, out of range, already visible, or a pair is pending.
    Ignored,
    /// First card of a pair turned face-up.
    Flipped,
    /// Second card turned face-up and matches; it locks in shortly.
    PairMatched,
    /// Second card turned face-up and differs; both flip back shortly.
    PairMismatched,
}

/// `max(1000 − moves×10 − elapsed×2, 100)`.
pub fn score_for(moves: u32, elapsed_secs: u32) -> u32 {
    let raw = BASE_SCORE - moves as i64 * MOVE_PENALTY - elapsed_secs as i64 * SECOND_PENALTY;
    raw.max(SCORE_FLOOR) as u32
}

/// Deal a fresh face-down board and start counting. Anything still scheduled
/// from the previous board is cancelled.
pub fn start(state: &mut MemoryState) {
    state.scheduler.cancel_all();
    state.board = state.source.shuffled_deck(&state.symbols);
    state.pending.clear();
    state.moves = 0;
    state.matches = 0;
    state.phase = MemoryPhase::Running;
    state.session.begin(state.scheduler.now());
    state.reporter.arm();
    state.log.clear();
    state.log.push("Flip the cards and find every pair!", false);
    log::debug!(
        "memory: new board with {} pairs (generation {})",
        state.total_pairs(),
        state.scheduler.generation()
    );
}

/// Same as `start`; available from any phase.
pub fn reset(state: &mut MemoryState) {
    start(state);
}

pub fn select_card(state: &mut MemoryState, index: usize) -> SelectOutcome {
    if state.phase != MemoryPhase::Running || state.pair_pending() {
        return SelectOutcome::Ignored;
    }
    match state.board.get(index) {
        Some(card) if !card.is_visible() => {}
        _ => return SelectOutcome::Ignored,
    }

    state.board[index].face_up = true;
    state.pending.push(index);
    if !state.pair_pending() {
        return SelectOutcome::Flipped;
    }

    state.moves += 1;
    let (a, b) = (state.pending[0], state.pending[1]);
    if state.board[a].symbol == state.board[b].symbol {
        state.scheduler.schedule(MATCH_CONFIRM_TICKS, PairResolution::ConfirmMatch(a, b));
        SelectOutcome::PairMatched
    } else {
        state.scheduler.schedule(FLIP_BACK_TICKS, PairResolution::FlipBack(a, b));
        SelectOutcome::PairMismatched
    }
}

/// Advance the clock and run any pair resolutions that came due.
pub fn tick(state: &mut MemoryState, delta_ticks: u32) {
    if delta_ticks == 0 {
        return;
    }
    if state.phase == MemoryPhase::Running {
        state.session.clock.advance(delta_ticks);
    }
    for resolution in state.scheduler.advance(delta_ticks) {
        resolve(state, resolution);
    }
}

fn resolve(state: &mut MemoryState, resolution: PairResolution) {
    match resolution {
        PairResolution::ConfirmMatch(a, b) => {
            for i in [a, b] {
                if let Some(card) = state.board.get_mut(i) {
                    card.matched = true;
                }
            }
            state.matches += 1;
            state.pending.clear();
            state.log.push("Match found! 🎉", true);
            log::debug!("memory: pair {}/{} matched", state.matches, state.total_pairs());
            if state.matches == state.total_pairs() {
                win(state);
            }
        }
        PairResolution::FlipBack(a, b) => {
            for i in [a, b] {
                if let Some(card) = state.board.get_mut(i) {
                    card.face_up = false;
                }
            }
            state.pending.clear();
        }
    }
}

fn win(state: &mut MemoryState) {
    state.phase = MemoryPhase::Won;
    state.session.finish();
    let elapsed = state.session.elapsed_secs();
    let score = score_for(state.moves, elapsed);
    state.session.score = score;
    state.log.push(
        &format!("You won in {} moves and {} seconds! Score: {}", state.moves, elapsed, score),
        true,
    );
    log::debug!(
        "memory: board cleared after {} ticks",
        state.session.ticks_since_start(state.scheduler.now()).unwrap_or(0)
    );
    state.reporter.report(state.session.kind, score, elapsed);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::games::memory::state::DEFAULT_SYMBOLS;
    use crate::generator::testing::FixedSource;
    use crate::generator::RandomSource;
    use crate::score::testing::recording_reporter;
    use crate::score::ScoreReporter;
    use crate::session::SessionStatus;

    /// Board laid out unshuffled: symbol i sits at indices i and i + pairs.
    fn fixed_state(symbols: &[&'static str]) -> MemoryState {
        MemoryState::new(
            symbols,
            Box::new(FixedSource::default()),
            ScoreReporter::detached(),
        )
    }

    fn started(symbols: &[&'static str]) -> MemoryState {
        let mut state = fixed_state(symbols);
        start(&mut state);
        state
    }

    #[test]
    fn start_deals_face_down_board() {
        let state = started(&DEFAULT_SYMBOLS);
        assert_eq!(state.board.len(), 16);
        assert!(state.board.iter().all(|c| !c.face_up && !c.matched));
        assert_eq!(state.phase, MemoryPhase::Running);
        assert_eq!(state.moves, 0);
        assert_eq!(state.matches, 0);
        assert_eq!(state.session.status, SessionStatus::Running);
    }

    #[test]
    fn random_board_has_every_symbol_twice() {
        let mut state = MemoryState::new(
            &DEFAULT_SYMBOLS,
            Box::new(RandomSource::seeded(7)),
            ScoreReporter::detached(),
        );
        start(&mut state);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for card in &state.board {
            *counts.entry(card.symbol).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn select_before_start_is_ignored() {
        let mut state = fixed_state(&DEFAULT_SYMBOLS);
        assert_eq!(select_card(&mut state, 0), SelectOutcome::Ignored);
        assert_eq!(state.moves, 0);
    }

    #[test]
    fn out_of_range_and_repeat_selections_are_ignored() {
        let mut state = started(&DEFAULT_SYMBOLS);
        assert_eq!(select_card(&mut state, 99), SelectOutcome::Ignored);
        assert_eq!(select_card(&mut state, 0), SelectOutcome::Flipped);
        assert_eq!(select_card(&mut state, 0), SelectOutcome::Ignored);
        assert_eq!(state.pending, vec![0]);
        assert_eq!(state.moves, 0);
    }

    #[test]
    fn mismatch_flips_back_after_delay() {
        let mut state = started(&DEFAULT_SYMBOLS);
        select_card(&mut state, 0);
        assert_eq!(select_card(&mut state, 1), SelectOutcome::PairMismatched);
        assert_eq!(state.moves, 1);

        tick(&mut state, FLIP_BACK_TICKS - 1);
        assert!(state.board[0].face_up && state.board[1].face_up);
        assert!(state.pair_pending());

        tick(&mut state, 1);
        assert!(!state.board[0].face_up && !state.board[1].face_up);
        assert!(state.pending.is_empty());
        assert_eq!(state.matches, 0);
    }

    #[test]
    fn match_locks_in_after_delay() {
        let mut state = started(&DEFAULT_SYMBOLS);
        select_card(&mut state, 2);
        assert_eq!(select_card(&mut state, 10), SelectOutcome::PairMatched);
        assert_eq!(state.matches, 0);

        tick(&mut state, MATCH_CONFIRM_TICKS);
        assert_eq!(state.matches, 1);
        assert!(state.board[2].matched && state.board[10].matched);
        assert!(state.board[2].face_up);
        assert!(state.pending.is_empty());
        assert_eq!(select_card(&mut state, 2), SelectOutcome::Ignored);
    }

    #[test]
    fn selections_while_pair_pending_change_nothing() {
        let mut state = started(&DEFAULT_SYMBOLS);
        select_card(&mut state, 0);
        select_card(&mut state, 1);
        let board_before = state.board.clone();
        let moves_before = state.moves;

        for i in 2..16 {
            assert_eq!(select_card(&mut state, i), SelectOutcome::Ignored);
        }
        assert_eq!(state.board, board_before);
        assert_eq!(state.moves, moves_before);
    }

    #[test]
    fn single_pair_board_wins_and_reports_once() {
        let (reporter, seen) = recording_reporter();
        let mut state = MemoryState::new(&["🎨"], Box::new(FixedSource::default()), reporter);
        start(&mut state);

        select_card(&mut state, 0);
        select_card(&mut state, 1);
        tick(&mut state, MATCH_CONFIRM_TICKS);

        assert_eq!(state.matches, 1);
        assert_eq!(state.phase, MemoryPhase::Won);
        assert_eq!(state.session.status, SessionStatus::Finished);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].score, score_for(1, 0));

        tick(&mut state, 100);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn matches_and_wins_reach_the_log() {
        crate::logging::testing::capture();
        let mut state = started(&["🐙"]);
        select_card(&mut state, 0);
        select_card(&mut state, 1);
        tick(&mut state, MATCH_CONFIRM_TICKS);
        assert!(crate::logging::testing::seen("memory: pair 1/1 matched"));
        assert!(crate::logging::testing::seen("memory: board cleared after 5 ticks"));
    }

    #[test]
    fn full_game_scores_with_moves_and_time() {
        let (reporter, seen) = recording_reporter();
        let mut state =
            MemoryState::new(&DEFAULT_SYMBOLS, Box::new(FixedSource::default()), reporter);
        start(&mut state);

        // One miss, then every pair in order.
        select_card(&mut state, 0);
        select_card(&mut state, 1);
        tick(&mut state, FLIP_BACK_TICKS);
        for i in 0..8 {
            select_card(&mut state, i);
            select_card(&mut state, i + 8);
            tick(&mut state, MATCH_CONFIRM_TICKS);
            assert_eq!(state.phase == MemoryPhase::Won, state.matches == 8);
        }

        // 9 moves, 1s + 8 × 0.5s = 5s
        assert_eq!(state.moves, 9);
        assert_eq!(state.session.elapsed_secs(), 5);
        assert_eq!(state.session.score, 1000 - 90 - 10);
        assert_eq!(seen.borrow()[0].elapsed_secs, 5);
    }

    #[test]
    fn clock_stops_once_won() {
        let mut state = started(&["🌟"]);
        select_card(&mut state, 0);
        select_card(&mut state, 1);
        tick(&mut state, MATCH_CONFIRM_TICKS);
        tick(&mut state, 200);
        assert_eq!(state.session.elapsed_secs(), 0);
    }

    #[test]
    fn reset_discards_pending_resolutions() {
        let mut state = started(&DEFAULT_SYMBOLS);
        select_card(&mut state, 3);
        select_card(&mut state, 11);
        reset(&mut state);

        // The stale ConfirmMatch must not touch the fresh board.
        tick(&mut state, MATCH_CONFIRM_TICKS * 4);
        assert_eq!(state.matches, 0);
        assert!(state.board.iter().all(|c| !c.matched && !c.face_up));
        assert_eq!(state.moves, 0);
    }

    #[test]
    fn reset_after_win_starts_over() {
        let mut state = started(&["🎯"]);
        select_card(&mut state, 0);
        select_card(&mut state, 1);
        tick(&mut state, MATCH_CONFIRM_TICKS);
        assert_eq!(state.phase, MemoryPhase::Won);

        reset(&mut state);
        assert_eq!(state.phase, MemoryPhase::Running);
        assert_eq!(state.session.score, 0);
        assert_eq!(select_card(&mut state, 0), SelectOutcome::Flipped);
    }

    #[test]
    fn score_floor() {
        assert_eq!(score_for(0, 0), 1000);
        assert_eq!(score_for(8, 30), 1000 - 80 - 60);
        assert_eq!(score_for(90, 0), 100);
        assert_eq!(score_for(50, 200), 100);
        assert_eq!(score_for(u32::MAX, u32::MAX), 100);
    }
}
