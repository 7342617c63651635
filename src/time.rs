//! Game clocks.
//!
//! `draw_web()` runs at ~60fps with a variable delta. [`FrameClock`] turns
//! those timestamps into a fixed number of discrete ticks per second so the
//! game engines stay deterministic. [`SessionClock`] then folds ticks into
//! whole seconds, counting either up (elapsed time) or down (a time budget).

/// Game ticks per real-time second. Every engine delay is expressed in ticks.
pub const TICKS_PER_SEC: u32 = 10;

/// Largest frame delta (ms) fed into the accumulator.
const MAX_FRAME_DELTA_MS: f64 = 500.0;

pub struct FrameClock {
    /// Milliseconds per tick (e.g. 100ms = 10 ticks/sec)
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks
    accumulator: f64,
    pub total_ticks: u64,
    /// Timestamp of the previous frame, None before the first one
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (from `performance.now()`), once per frame.
    /// Returns how many game ticks elapsed since the previous frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // A hidden tab stops drawing; don't replay minutes of ticks at once.
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}

/// Direction a [`SessionClock`] counts in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockMode {
    /// Elapsed time accumulates until the clock is stopped.
    CountUp,
    /// A fixed budget in seconds runs down to zero.
    CountDown { budget_secs: u32 },
}

/// Per-session second counter driven by game ticks.
///
/// Ticks only count while the clock is running. A count-down clock stops
/// on its own once the budget is spent.
#[derive(Clone, Debug)]
pub struct SessionClock {
    mode: ClockMode,
    ticks_per_sec: u32,
    /// Ticks accumulated toward the next whole second.
    carry: u32,
    elapsed_secs: u32,
    running: bool,
}

impl SessionClock {
    pub fn count_up() -> Self {
        Self::with_mode(ClockMode::CountUp)
    }

    pub fn count_down(budget_secs: u32) -> Self {
        Self::with_mode(ClockMode::CountDown { budget_secs })
    }

    fn with_mode(mode: ClockMode) -> Self {
        Self {
            mode,
            ticks_per_sec: TICKS_PER_SEC,
            carry: 0,
            elapsed_secs: 0,
            running: false,
        }
    }

    /// Zero the clock and start counting. Calling this on a running clock restarts it.
    pub fn start(&mut self) {
        self.carry = 0;
        self.elapsed_secs = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Seconds left on a count-down clock; `None` when counting up.
    pub fn remaining_secs(&self) -> Option<u32> {
        match self.mode {
            ClockMode::CountUp => None,
            ClockMode::CountDown { budget_secs } => {
                Some(budget_secs.saturating_sub(self.elapsed_secs))
            }
        }
    }

    /// True once a count-down clock has reached zero.
    pub fn is_expired(&self) -> bool {
        self.remaining_secs() == Some(0)
    }

    /// Advance by `delta_ticks` game ticks. Returns the number of whole
    /// seconds that elapsed (0 while stopped).
    pub fn advance(&mut self, delta_ticks: u32) -> u32 {
        if !self.running || delta_ticks == 0 {
            return 0;
        }
        self.carry += delta_ticks;
        let mut secs = self.carry / self.ticks_per_sec;
        self.carry %= self.ticks_per_sec;

        if let ClockMode::CountDown { budget_secs } = self.mode {
            secs = secs.min(budget_secs.saturating_sub(self.elapsed_secs));
        }
        self.elapsed_secs += secs;

        if self.is_expired() {
            self.carry = 0;
            self.running = false;
        }
        secs
    }
}

/// Format whole seconds as `m:ss`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
