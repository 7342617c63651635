//! Tick-based deferred actions tagged with a session generation.
//!
//! Engines schedule cosmetic delays (flip a card back, end a pattern
//! display) here instead of on ambient timers. Starting a new session bumps
//! the generation; anything scheduled under an older generation is dropped
//! the next time the scheduler advances and never fires.

#[derive(Clone, Debug)]
struct Deferred<A> {
    generation: u32,
    due_tick: u64,
    action: A,
}

#[derive(Clone, Debug)]
pub struct Scheduler<A> {
    generation: u32,
    now: u64,
    pending: Vec<Deferred<A>>,
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            now: 0,
            pending: Vec::new(),
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ticks seen since the scheduler was created.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Run `action` once `delay_ticks` more ticks have passed. Returns the
    /// tick it is due on.
    pub fn schedule(&mut self, delay_ticks: u32, action: A) -> u64 {
        let due_tick = self.now + delay_ticks as u64;
        self.pending.push(Deferred {
            generation: self.generation,
            due_tick,
            action,
        });
        due_tick
    }

    /// Invalidate everything scheduled so far. Returns the new generation.
    pub fn cancel_all(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Number of live (current generation) actions still waiting.
    #[cfg(test)]
    pub fn pending_len(&self) -> usize {
        self.pending
            .iter()
            .filter(|d| d.generation == self.generation)
            .count()
    }

    /// Advance time and return the actions that came due, earliest first.
    /// Actions due on the same tick keep their scheduling order.
    pub fn advance(&mut self, delta_ticks: u32) -> Vec<A> {
        self.now += delta_ticks as u64;
        let generation = self.generation;
        let now = self.now;

        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.pending.len());
        for d in self.pending.drain(..) {
            if d.generation != generation {
                continue;
            }
            if d.due_tick <= now {
                due.push(d);
            } else {
                waiting.push(d);
            }
        }
        self.pending = waiting;

        due.sort_by_key(|d| d.due_tick);
        due.into_iter().map(|d| d.action).collect()
    }
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_fires_when_due() {
        let mut s = Scheduler::new();
        s.schedule(5, "flip");
        assert!(s.advance(4).is_empty());
        assert_eq!(s.advance(1), vec!["flip"]);
        assert_eq!(s.pending_len(), 0);
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut s = Scheduler::new();
        s.schedule(0, 1);
        assert_eq!(s.advance(0), vec![1]);
    }

    #[test]
    fn due_actions_come_out_in_time_order() {
        let mut s = Scheduler::new();
        s.schedule(10, "late");
        s.schedule(3, "early");
        s.schedule(3, "early-second");
        assert_eq!(s.advance(20), vec!["early", "early-second", "late"]);
    }

    #[test]
    fn cancelled_generation_never_fires() {
        let mut s = Scheduler::new();
        s.schedule(5, "stale");
        assert_eq!(s.cancel_all(), 1);
        s.schedule(5, "fresh");
        assert_eq!(s.generation(), 1);
        assert_eq!(s.pending_len(), 1);
        assert_eq!(s.advance(10), vec!["fresh"]);
    }

    #[test]
    fn advance_tracks_now() {
        let mut s: Scheduler<()> = Scheduler::new();
        s.advance(3);
        s.advance(4);
        assert_eq!(s.now(), 7);
        assert_eq!(s.schedule(2, ()), 9);
    }
}
