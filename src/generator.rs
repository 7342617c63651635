//! Randomized game content: arithmetic problems, color patterns, card decks.
//!
//! Engines only see the [`ChallengeSource`] trait so tests can substitute a
//! deterministic source.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::games::arithmetic::state::{ArithmeticProblem, Difficulty, Operator};
use crate::games::memory::state::{Card, Symbol};
use crate::games::pattern::state::PatternColor;

pub trait ChallengeSource {
    /// Operands uniform over the tier's inclusive range, operator uniform.
    fn arithmetic_problem(&mut self, difficulty: Difficulty) -> ArithmeticProblem;

    /// `len` colors, each uniform over the palette. Repeats allowed.
    fn pattern(&mut self, len: usize) -> Vec<PatternColor>;

    /// Every symbol twice, uniformly permuted, numbered by position.
    fn shuffled_deck(&mut self, symbols: &[Symbol]) -> Vec<Card>;
}

/// [`ChallengeSource`] backed by any `rand` generator.
pub struct RandomSource<R = SmallRng> {
    rng: R,
}

impl RandomSource<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    /// Seeded from the wall clock (and `Math.random` in the browser).
    pub fn from_clock() -> Self {
        Self::seeded(clock_seed())
    }
}

impl<R: Rng> RandomSource<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ChallengeSource for RandomSource<R> {
    fn arithmetic_problem(&mut self, difficulty: Difficulty) -> ArithmeticProblem {
        let range = difficulty.operand_range();
        let a = self.rng.random_range(range.clone());
        let b = self.rng.random_range(range);
        let op = Operator::ALL[self.rng.random_range(0..Operator::ALL.len())];
        ArithmeticProblem::new(a, b, op)
    }

    fn pattern(&mut self, len: usize) -> Vec<PatternColor> {
        (0..len)
            .map(|_| PatternColor::ALL[self.rng.random_range(0..PatternColor::ALL.len())])
            .collect()
    }

    fn shuffled_deck(&mut self, symbols: &[Symbol]) -> Vec<Card> {
        let mut deck: Vec<Symbol> = symbols.iter().chain(symbols.iter()).copied().collect();
        // Fisher–Yates
        deck.shuffle(&mut self.rng);
        deck.into_iter()
            .enumerate()
            .map(|(id, symbol)| Card::new(id, symbol))
            .collect()
    }
}

#[cfg(target_arch = "wasm32")]
fn clock_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    now ^ (noise << 32)
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}
