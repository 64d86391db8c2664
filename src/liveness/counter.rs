//! Failure-tolerance countdown.
//!
//! The counter starts at `capacity` and is decremented once per heartbeat
//! tick. Once exhausted, every tick is a trip-decision tick until the owner
//! calls [`FailureToleranceCounter::reset`], which the monitor only does when
//! a decision tick succeeds. A sustained failure therefore keeps deciding on
//! every tick instead of opening a fresh grace window.

/// Position of a heartbeat tick within the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTick {
    /// Countdown still running; this tick's outcome is discarded.
    Pending { remaining: u32 },
    /// Countdown exhausted; this tick's outcome decides the state.
    TripDecision,
}

/// Bounded countdown of heartbeat ticks before trip decisions begin.
#[derive(Debug, Clone)]
pub struct FailureToleranceCounter {
    capacity: u32,
    remaining: u32,
}

impl FailureToleranceCounter {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            remaining: capacity,
        }
    }

    /// Advance by one tick. An exhausted counter stays exhausted.
    pub fn tick(&mut self) -> CounterTick {
        if self.remaining == 0 {
            return CounterTick::TripDecision;
        }
        self.remaining -= 1;
        CounterTick::Pending {
            remaining: self.remaining,
        }
    }

    /// Restart the countdown at full capacity.
    pub fn reset(&mut self) {
        self.remaining = self.capacity;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_then_decides() {
        let mut counter = FailureToleranceCounter::new(3);
        assert_eq!(counter.tick(), CounterTick::Pending { remaining: 2 });
        assert_eq!(counter.tick(), CounterTick::Pending { remaining: 1 });
        assert_eq!(counter.tick(), CounterTick::Pending { remaining: 0 });
        assert_eq!(counter.tick(), CounterTick::TripDecision);
        assert_eq!(counter.remaining(), 0);
    }

    #[test]
    fn test_exhausted_counter_decides_until_reset() {
        let mut counter = FailureToleranceCounter::new(2);
        let decisions: Vec<usize> = (1..=6)
            .filter(|_| counter.tick() == CounterTick::TripDecision)
            .collect();
        assert_eq!(decisions, vec![3, 4, 5, 6]);

        counter.reset();
        assert_eq!(counter.remaining(), 2);
        assert_eq!(counter.tick(), CounterTick::Pending { remaining: 1 });
    }

    #[test]
    fn test_reset_after_each_decision_repeats_cadence() {
        let mut counter = FailureToleranceCounter::new(2);
        let mut decisions = Vec::new();
        for n in 1..=9 {
            if counter.tick() == CounterTick::TripDecision {
                decisions.push(n);
                counter.reset();
            }
        }
        assert_eq!(decisions, vec![3, 6, 9]);
    }

    #[test]
    fn test_zero_capacity_decides_every_tick() {
        let mut counter = FailureToleranceCounter::new(0);
        assert_eq!(counter.tick(), CounterTick::TripDecision);
        counter.reset();
        assert_eq!(counter.tick(), CounterTick::TripDecision);
    }
}
