//! Memory Match state definitions.

use crate::games::GameLog;
use crate::generator::ChallengeSource;
use crate::schedule::Scheduler;
use crate::score::ScoreReporter;
use crate::session::{GameKind, GameSession};
use crate::time::{SessionClock, TICKS_PER_SEC};

pub type Symbol = &'static str;

/// The eight picture symbols of the standard 4x4 board.
pub const DEFAULT_SYMBOLS: [Symbol; 8] = ["🎨", "🌟", "🎯", "💡", "🎪", "🎭", "🌈", "✨"];

/// Delay before a matching pair is locked in (0.5s).
pub const MATCH_CONFIRM_TICKS: u32 = TICKS_PER_SEC / 2;
/// Delay before a mismatched pair turns face-down again (1s).
pub const FLIP_BACK_TICKS: u32 = TICKS_PER_SEC;

pub const BASE_SCORE: i64 = 1000;
pub const MOVE_PENALTY: i64 = 10;
pub const SECOND_PENALTY: i64 = 2;
pub const SCORE_FLOOR: i64 = 100;

/// Cards per row on screen.
pub const BOARD_COLUMNS: u16 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: usize,
    pub symbol: Symbol,
    pub face_up: bool,
    /// Matched cards stay face-up and can no longer be selected.
    pub matched: bool,
}

impl Card {
    pub fn new(id: usize, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            face_up: false,
            matched: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.face_up || self.matched
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryPhase {
    Idle,
    Running,
    Won,
}

/// Resolutions of a full pending pair, run after their cosmetic delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairResolution {
    ConfirmMatch(usize, usize),
    FlipBack(usize, usize),
}

pub struct MemoryState {
    pub session: GameSession,
    pub phase: MemoryPhase,
    /// Symbols dealt onto the board, each exactly twice.
    pub symbols: Vec<Symbol>,
    pub board: Vec<Card>,
    /// Face-up cards awaiting evaluation (0..=2 board indices).
    pub pending: Vec<usize>,
    pub moves: u32,
    pub matches: u32,
    pub scheduler: Scheduler<PairResolution>,
    pub reporter: ScoreReporter,
    pub source: Box<dyn ChallengeSource>,
    pub log: GameLog,
}

impl MemoryState {
    pub fn new(
        symbols: &[Symbol],
        source: Box<dyn ChallengeSource>,
        reporter: ScoreReporter,
    ) -> Self {
        Self {
            session: GameSession::new(GameKind::MemoryMatch, SessionClock::count_up()),
            phase: MemoryPhase::Idle,
            symbols: symbols.to_vec(),
            board: Vec::new(),
            pending: Vec::new(),
            moves: 0,
            matches: 0,
            scheduler: Scheduler::new(),
            reporter,
            source,
            log: GameLog::new(),
        }
    }

    pub fn total_pairs(&self) -> u32 {
        self.symbols.len() as u32
    }

    /// True while two cards are face-up and unresolved.
    pub fn pair_pending(&self) -> bool {
        self.pending.len() == 2
    }
}
