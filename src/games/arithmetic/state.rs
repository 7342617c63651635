//! Math Speed state definitions.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::games::GameLog;
use crate::generator::ChallengeSource;
use crate::score::ScoreReporter;
use crate::session::{GameKind, GameSession};
use crate::time::SessionClock;

/// Length of one round, in seconds.
pub const TIME_BUDGET_SECS: u32 = 60;
pub const BASE_POINTS: u32 = 10;
pub const STREAK_BONUS: u32 = 2;
/// Streak at which the streak badge lights up.
pub const HOT_STREAK: u32 = 5;
/// Longest answer the entry buffer accepts (sign included).
pub const MAX_ANSWER_LEN: usize = 6;

/// Operand range tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Inclusive bounds for both operands.
    pub fn operand_range(self) -> RangeInclusive<i32> {
        match self {
            Difficulty::Easy => 1..=10,
            Difficulty::Medium => 1..=50,
            Difficulty::Hard => 10..=99,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
        }
    }

    pub fn apply(self, a: i32, b: i32) -> i32 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArithmeticProblem {
    pub a: i32,
    pub b: i32,
    pub op: Operator,
}

impl ArithmeticProblem {
    pub fn new(a: i32, b: i32, op: Operator) -> Self {
        Self { a, b, op }
    }

    /// The one correct result. Subtraction may go negative.
    pub fn answer(&self) -> i32 {
        self.op.apply(self.a, self.b)
    }
}

impl fmt::Display for ArithmeticProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.a, self.op.symbol(), self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithmeticPhase {
    Idle,
    Running,
    Finished,
}

/// Typed answer before submission. Only well-formed integers leave it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerEntry {
    text: String,
}

impl AnswerEntry {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() || self.text.len() >= MAX_ANSWER_LEN {
            return false;
        }
        self.text.push(digit);
        true
    }

    /// A minus sign is only accepted as the first character.
    pub fn push_minus(&mut self) -> bool {
        if !self.text.is_empty() {
            return false;
        }
        self.text.push('-');
        true
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Parse and clear. Empty or sign-only input stays put and yields `None`.
    pub fn take(&mut self) -> Option<i32> {
        let value = self.text.parse::<i32>().ok()?;
        self.text.clear();
        Some(value)
    }
}

pub struct ArithmeticState {
    pub session: GameSession,
    pub phase: ArithmeticPhase,
    pub difficulty: Difficulty,
    pub problem: ArithmeticProblem,
    pub streak: u32,
    pub best_streak: u32,
    pub total_answered: u32,
    pub correct_answers: u32,
    pub entry: AnswerEntry,
    pub reporter: ScoreReporter,
    pub source: Box<dyn ChallengeSource>,
    pub log: GameLog,
    /// Ticks seen since the game was created.
    pub now: u64,
}

impl ArithmeticState {
    pub fn new(
        difficulty: Difficulty,
        source: Box<dyn ChallengeSource>,
        reporter: ScoreReporter,
    ) -> Self {
        Self {
            session: GameSession::new(
                GameKind::ArithmeticSpeed,
                SessionClock::count_down(TIME_BUDGET_SECS),
            ),
            phase: ArithmeticPhase::Idle,
            difficulty,
            problem: ArithmeticProblem::new(0, 0, Operator::Add),
            streak: 0,
            best_streak: 0,
            total_answered: 0,
            correct_answers: 0,
            entry: AnswerEntry::default(),
            reporter,
            source,
            log: GameLog::new(),
            now: 0,
        }
    }

    pub fn time_left(&self) -> u32 {
        self.session
            .clock
            .remaining_secs()
            .unwrap_or(TIME_BUDGET_SECS)
    }
}
