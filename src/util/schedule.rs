//! Fixed-deadline tick schedule.
//!
//! Deadlines are `start + n * interval`. A consumer that falls behind sees
//! every overdue deadline as due, one after another, so no tick is lost and
//! each sample still covers exactly one interval.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct TickSchedule {
    interval: Duration,
    /// `None` once the deadline no longer fits in an `Instant`.
    next: Option<Instant>,
}

impl TickSchedule {
    /// First tick is due one `interval` after `start`.
    pub fn new(start: Instant, interval: Duration) -> Self {
        Self {
            interval,
            next: start.checked_add(interval),
        }
    }

    /// Time left before the next tick; zero when it is due, `None` if it never will be.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next.map(|next| next.saturating_duration_since(now))
    }

    /// Consumes the current deadline and schedules the next one.
    pub fn advance(&mut self) {
        self.next = self.next.and_then(|next| next.checked_add(self.interval));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn first_tick_is_one_interval_out() {
        let start = Instant::now();
        let schedule = TickSchedule::new(start, 100 * MS);
        assert_eq!(schedule.remaining(start), Some(100 * MS));
        assert_eq!(schedule.remaining(start + 40 * MS), Some(60 * MS));
        assert_eq!(schedule.remaining(start + 100 * MS), Some(Duration::ZERO));
    }

    #[test]
    fn overdue_deadlines_are_all_delivered() {
        let start = Instant::now();
        let mut schedule = TickSchedule::new(start, 100 * MS);

        // Consumer wakes 550ms in: deadlines 100..=500 are due back to back.
        let now = start + 550 * MS;
        let mut due = 0;
        while schedule.remaining(now) == Some(Duration::ZERO) {
            due += 1;
            schedule.advance();
        }
        assert_eq!(due, 5);
        assert_eq!(schedule.remaining(now), Some(50 * MS));
    }

    #[test]
    fn deadlines_do_not_drift() {
        let start = Instant::now();
        let mut schedule = TickSchedule::new(start, 100 * MS);
        for _ in 0..10 {
            schedule.advance();
        }
        assert_eq!(schedule.remaining(start), Some(1100 * MS));
    }

    #[test]
    fn huge_interval_never_fires() {
        let start = Instant::now();
        let mut schedule = TickSchedule::new(start, Duration::MAX);
        assert_eq!(schedule.remaining(start), None);
        schedule.advance();
        assert_eq!(schedule.remaining(start), None);
    }
}
