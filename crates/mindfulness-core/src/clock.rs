//! Time sources and waits.
//!
//! Activities never call `Local::now()` or `thread::sleep` directly. They read
//! time through a [`Clock`] and wait through a [`Pacer`], so a [`ManualClock`]
//! can stand in for both and simulate whole sessions instantly.

use std::cell::Cell;
use std::time::Duration;

use chrono::{DateTime, Local};

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// How a wait should be presented while it elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseStyle {
    /// Rotating `| / - \` animation.
    Spinner,
    /// Whole seconds counting down to 1.
    Countdown,
    /// Nothing shown.
    Silent,
}

/// Blocks the caller for a fixed duration.
///
/// A pause, once begun, runs to completion.
pub trait Pacer {
    fn pause(&self, style: PauseStyle, duration: Duration);
}

/// The real clock: local time, real sleeps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

impl Pacer for SystemClock {
    fn pause(&self, _style: PauseStyle, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Simulated clock for tests and dry runs.
///
/// Time only moves when [`advance`](Self::advance) is called or a pause is
/// taken through its [`Pacer`] implementation.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Local>>,
    paused: Cell<Duration>,
    pauses: Cell<usize>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Cell::new(start),
            paused: Cell::new(Duration::ZERO),
            pauses: Cell::new(0),
        }
    }

    /// Start at the current local time.
    pub fn starting_now() -> Self {
        Self::new(Local::now())
    }

    pub fn advance(&self, by: Duration) {
        let delta = chrono::Duration::from_std(by).unwrap_or_else(|_| chrono::Duration::zero());
        self.now.set(self.now.get() + delta);
    }

    /// Total time spent in pauses.
    pub fn total_paused(&self) -> Duration {
        self.paused.get()
    }

    /// Number of pauses taken.
    pub fn pause_count(&self) -> usize {
        self.pauses.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_now()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        self.now.get()
    }
}

impl Pacer for ManualClock {
    fn pause(&self, _style: PauseStyle, duration: Duration) {
        self.advance(duration);
        self.paused.set(self.paused.get() + duration);
        self.pauses.set(self.pauses.get() + 1);
    }
}

/// A wall-clock instant past which a loop must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    end: DateTime<Local>,
}

impl Deadline {
    pub fn after(clock: &dyn Clock, duration: Duration) -> Self {
        let now = clock.now();
        let end = chrono::Duration::from_std(duration)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or_else(|| now + chrono::Duration::days(36_500));
        Self { end }
    }

    pub fn end(&self) -> DateTime<Local> {
        self.end
    }

    /// Time left, read from the live clock. `None` once the deadline is reached.
    pub fn remaining(&self, clock: &dyn Clock) -> Option<Duration> {
        (self.end - clock.now())
            .to_std()
            .ok()
            .filter(|left| !left.is_zero())
    }

    pub fn is_reached(&self, clock: &dyn Clock) -> bool {
        self.remaining(clock).is_none()
    }

    /// `min(pause, remaining)`, or `None` once the deadline is reached.
    pub fn cap(&self, clock: &dyn Clock, pause: Duration) -> Option<Duration> {
        self.remaining(clock).map(|left| left.min(pause))
    }

    /// Remaining time rounded up to whole seconds (0 once reached).
    pub fn remaining_secs_ceil(&self, clock: &dyn Clock) -> u64 {
        match self.remaining(clock) {
            Some(left) if left.subsec_nanos() > 0 => left.as_secs() + 1,
            Some(left) => left.as_secs(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_on_pause() {
        let clock = ManualClock::starting_now();
        let start = clock.now();
        clock.pause(PauseStyle::Spinner, Duration::from_secs(3));
        assert_eq!(clock.now() - start, chrono::Duration::seconds(3));
        assert_eq!(clock.total_paused(), Duration::from_secs(3));
        assert_eq!(clock.pause_count(), 1);
    }

    #[test]
    fn deadline_remaining_tracks_live_clock() {
        let clock = ManualClock::starting_now();
        let deadline = Deadline::after(&clock, Duration::from_secs(10));
        assert_eq!(deadline.remaining(&clock), Some(Duration::from_secs(10)));

        clock.advance(Duration::from_secs(4));
        assert_eq!(deadline.remaining(&clock), Some(Duration::from_secs(6)));
        assert_eq!(
            deadline.cap(&clock, Duration::from_secs(8)),
            Some(Duration::from_secs(6))
        );

        clock.advance(Duration::from_secs(6));
        assert!(deadline.is_reached(&clock));
        assert_eq!(deadline.cap(&clock, Duration::from_secs(8)), None);
    }

    #[test]
    fn remaining_secs_rounds_up() {
        let clock = ManualClock::starting_now();
        let deadline = Deadline::after(&clock, Duration::from_secs(5));
        clock.advance(Duration::from_millis(4_200));
        assert_eq!(deadline.remaining_secs_ceil(&clock), 1);
        clock.advance(Duration::from_secs(2));
        assert_eq!(deadline.remaining_secs_ceil(&clock), 0);
    }
}
