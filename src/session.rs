//! One play-through of a mini-game, from start to its terminal state.

use serde::{Deserialize, Serialize};

use crate::time::SessionClock;

/// The three playable mini-games.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameKind {
    #[serde(rename = "memory")]
    MemoryMatch,
    #[serde(rename = "math")]
    ArithmeticSpeed,
    #[serde(rename = "pattern")]
    PatternRecall,
}

impl GameKind {
    /// Tab order on the play screen.
    pub const ALL: [GameKind; 3] = [
        GameKind::MemoryMatch,
        GameKind::ArithmeticSpeed,
        GameKind::PatternRecall,
    ];

    /// Short identifier used in URLs and score-book keys.
    pub fn slug(self) -> &'static str {
        match self {
            GameKind::MemoryMatch => "memory",
            GameKind::ArithmeticSpeed => "math",
            GameKind::PatternRecall => "pattern",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        GameKind::ALL.into_iter().find(|k| k.slug() == slug)
    }

    pub fn title(self) -> &'static str {
        match self {
            GameKind::MemoryMatch => "Memory Match",
            GameKind::ArithmeticSpeed => "Math Speed",
            GameKind::PatternRecall => "Pattern Match",
        }
    }

    pub fn index(self) -> usize {
        match self {
            GameKind::MemoryMatch => 0,
            GameKind::ArithmeticSpeed => 1,
            GameKind::PatternRecall => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    Running,
    Finished,
}

/// Bookkeeping shared by every engine: status, clock and running score.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub kind: GameKind,
    pub status: SessionStatus,
    /// Scheduler tick at which the current run began.
    pub started_at: Option<u64>,
    pub clock: SessionClock,
    pub score: u32,
}

impl GameSession {
    pub fn new(kind: GameKind, clock: SessionClock) -> Self {
        Self {
            kind,
            status: SessionStatus::NotStarted,
            started_at: None,
            clock,
            score: 0,
        }
    }

    /// Start (or restart) the run: zero the score and restart the clock.
    pub fn begin(&mut self, now_tick: u64) {
        self.status = SessionStatus::Running;
        self.started_at = Some(now_tick);
        self.score = 0;
        self.clock.start();
    }

    /// Enter the terminal state and freeze the clock.
    pub fn finish(&mut self) {
        self.status = SessionStatus::Finished;
        self.clock.stop();
    }

    /// Ticks from the start of the current run to `now_tick`; `None` before
    /// the first run.
    pub fn ticks_since_start(&self, now_tick: u64) -> Option<u64> {
        self.started_at.map(|t| now_tick.saturating_sub(t))
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.elapsed_secs()
    }
}
