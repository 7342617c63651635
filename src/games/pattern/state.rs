//! Pattern Match state definitions.

use crate::games::GameLog;
use crate::generator::ChallengeSource;
use crate::schedule::Scheduler;
use crate::score::ScoreReporter;
use crate::session::{GameKind, GameSession};
use crate::time::{SessionClock, TICKS_PER_SEC};

/// Pattern length on level 1.
pub const BASE_LENGTH: usize = 3;
pub const POINTS_PER_LEVEL: u32 = 100;
/// Display window: 1s plus 0.5s per color.
pub const SHOW_BASE_TICKS: u32 = TICKS_PER_SEC;
pub const SHOW_PER_COLOR_TICKS: u32 = TICKS_PER_SEC / 2;

/// The six-color palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternColor {
    Orange,
    Gold,
    Yellow,
    Sky,
    Pink,
    Blue,
}

impl PatternColor {
    /// Palette order; also the on-screen button order (keys 1-6).
    pub const ALL: [PatternColor; 6] = [
        PatternColor::Orange,
        PatternColor::Gold,
        PatternColor::Yellow,
        PatternColor::Sky,
        PatternColor::Pink,
        PatternColor::Blue,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PatternColor::Orange => "orange",
            PatternColor::Gold => "gold",
            PatternColor::Yellow => "yellow",
            PatternColor::Sky => "sky",
            PatternColor::Pink => "pink",
            PatternColor::Blue => "blue",
        }
    }

    pub fn index(self) -> usize {
        match self {
            PatternColor::Orange => 0,
            PatternColor::Gold => 1,
            PatternColor::Yellow => 2,
            PatternColor::Sky => 3,
            PatternColor::Pink => 4,
            PatternColor::Blue => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        PatternColor::ALL.get(index).copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternPhase {
    Idle,
    /// The sequence is on screen; input is ignored.
    Showing,
    AwaitingInput,
    GameOver,
}

/// Deferred transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternTimer {
    HideSequence,
}

/// Sequence length on a given level (1-based).
pub fn sequence_len(level: u32) -> usize {
    BASE_LENGTH + level.saturating_sub(1) as usize
}

/// How long a sequence of `len` colors stays on screen.
pub fn display_ticks(len: usize) -> u32 {
    SHOW_BASE_TICKS + SHOW_PER_COLOR_TICKS * len as u32
}

pub struct PatternState {
    pub session: GameSession,
    pub phase: PatternPhase,
    pub level: u32,
    /// Target for the current level; fixed until the level ends.
    pub sequence: Vec<PatternColor>,
    pub attempt: Vec<PatternColor>,
    /// Highest level completed this run.
    pub levels_cleared: u32,
    pub scheduler: Scheduler<PatternTimer>,
    pub reporter: ScoreReporter,
    pub source: Box<dyn ChallengeSource>,
    pub log: GameLog,
}

impl PatternState {
    pub fn new(source: Box<dyn ChallengeSource>, reporter: ScoreReporter) -> Self {
        Self {
            session: GameSession::new(GameKind::PatternRecall, SessionClock::count_up()),
            phase: PatternPhase::Idle,
            level: 1,
            sequence: Vec::new(),
            attempt: Vec::new(),
            levels_cleared: 0,
            scheduler: Scheduler::new(),
            reporter,
            source,
            log: GameLog::new(),
        }
    }

    /// Play in progress (showing or waiting for input).
    pub fn is_playing(&self) -> bool {
        matches!(self.phase, PatternPhase::Showing | PatternPhase::AwaitingInput)
    }
}
