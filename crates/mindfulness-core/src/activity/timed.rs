//! Deadline-driven activity sequencing.
//!
//! A [`TimedActivity`] runs one session: it validates the requested duration,
//! moves through its lifecycle and appends exactly one completion record when
//! the work finishes.
//!
//! ## State Transitions
//!
//! ```text
//! NotStarted -> Running -> Finished
//! ```
//!
//! There is no cancelled state; a session either fails validation before it
//! starts or runs to its deadline.
//!
//! ## Usage
//!
//! ```ignore
//! let mut activity = TimedActivity::new("Reflection Activity", runtime)
//!     .with_pause(Duration::from_secs(6));
//! let completion = activity.run(30, &mut questions, |q| println!("{q}"))?;
//! ```

use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{LineSource, Runtime};
use crate::clock::{Clock, Deadline, PauseStyle};
use crate::error::{CoreError, Result};
use crate::log_sink::LogRecord;
use crate::sampler::ShuffleBag;

/// Pause between sampled items when none is configured.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityState {
    NotStarted,
    Running,
    Finished,
}

/// Outcome of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub session_id: Uuid,
    pub name: String,
    pub duration_secs: u64,
    /// Items sampled by [`TimedActivity::run`]; 0 for custom bodies.
    pub ticks: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
}

/// Reject non-positive durations.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDuration`] when `seconds <= 0`.
pub fn validate_duration(seconds: i64) -> Result<u64> {
    u64::try_from(seconds)
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or(CoreError::InvalidDuration { seconds })
}

/// One bounded-duration session.
pub struct TimedActivity<'a> {
    name: String,
    pause: Duration,
    runtime: Runtime<'a>,
    state: ActivityState,
}

impl<'a> TimedActivity<'a> {
    pub fn new(name: impl Into<String>, runtime: Runtime<'a>) -> Self {
        Self {
            name: name.into(),
            pause: DEFAULT_PAUSE,
            runtime,
            state: ActivityState::NotStarted,
        }
    }

    /// Interval between sampled items in [`run`](Self::run).
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Draw from `bag` and hand each item to `tick` until the deadline passes.
    ///
    /// Waits between items are `min(pause, remaining)`, with the remaining
    /// time re-read from the clock every iteration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDuration`] for non-positive durations; in
    /// that case nothing is logged.
    pub fn run<T, R, F>(
        &mut self,
        duration_secs: i64,
        bag: &mut ShuffleBag<T, R>,
        mut tick: F,
    ) -> Result<Completion>
    where
        T: Clone,
        R: rand::Rng,
        F: FnMut(&T),
    {
        let pause = self.pause;
        let mut ticks = 0;
        let mut completion = self.run_with(duration_secs, |scope| {
            let deadline = scope.deadline();
            ticks = scope.sample_until(&deadline, bag, pause, PauseStyle::Spinner, &mut tick);
            Ok(None)
        })?;
        completion.ticks = ticks;
        Ok(completion)
    }

    /// Run an arbitrary body inside the session lifecycle.
    ///
    /// The body's return value becomes the record's item count. If the body
    /// fails, the error is returned and no record is written.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDuration`] for non-positive durations, or
    /// whatever the body returns.
    pub fn run_with<F>(&mut self, duration_secs: i64, body: F) -> Result<Completion>
    where
        F: FnOnce(&Scope<'_>) -> Result<Option<usize>>,
    {
        let secs = validate_duration(duration_secs)?;
        if self.state != ActivityState::NotStarted {
            tracing::warn!(activity = %self.name, state = ?self.state, "timed activity reused");
        }

        let session_id = Uuid::new_v4();
        let started_at = self.runtime.clock.now();
        self.state = ActivityState::Running;
        tracing::debug!(activity = %self.name, %session_id, duration_secs = secs, "activity running");

        let scope = Scope {
            session_id,
            duration: Duration::from_secs(secs),
            runtime: self.runtime,
        };
        let items = match body(&scope) {
            Ok(items) => items,
            Err(e) => {
                self.state = ActivityState::Finished;
                return Err(e);
            }
        };

        self.state = ActivityState::Finished;
        let finished_at = self.runtime.clock.now();
        let record = LogRecord {
            timestamp: finished_at,
            activity: self.name.clone(),
            duration_secs: secs,
            items,
        };
        self.runtime.log.append(&record);
        tracing::debug!(activity = %self.name, %session_id, ?items, "activity finished");

        Ok(Completion {
            session_id,
            name: self.name.clone(),
            duration_secs: secs,
            ticks: 0,
            items,
            started_at,
            finished_at,
        })
    }
}

/// What a running session body can reach.
pub struct Scope<'a> {
    session_id: Uuid,
    duration: Duration,
    runtime: Runtime<'a>,
}

impl<'a> Scope<'a> {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The configured session length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration.as_secs()
    }

    pub fn clock(&self) -> &'a dyn Clock {
        self.runtime.clock
    }

    pub fn input(&self) -> &'a dyn LineSource {
        self.runtime.input
    }

    pub fn now(&self) -> DateTime<Local> {
        self.runtime.clock.now()
    }

    /// A deadline `duration` from the current instant.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.runtime.clock, self.duration)
    }

    pub fn pause(&self, style: PauseStyle, duration: Duration) {
        if !duration.is_zero() {
            self.runtime.pacer.pause(style, duration);
        }
    }

    /// Pause for `min(duration, remaining)`. Returns `false` if the deadline
    /// had already passed.
    pub fn pause_within(&self, deadline: &Deadline, style: PauseStyle, duration: Duration) -> bool {
        match deadline.cap(self.runtime.clock, duration) {
            Some(wait) => {
                self.pause(style, wait);
                true
            }
            None => false,
        }
    }

    /// The sampling loop: draw, tick, wait capped to the deadline, repeat.
    ///
    /// Returns the number of items drawn.
    pub fn sample_until<T, R, F>(
        &self,
        deadline: &Deadline,
        bag: &mut ShuffleBag<T, R>,
        pause: Duration,
        style: PauseStyle,
        tick: &mut F,
    ) -> usize
    where
        T: Clone,
        R: rand::Rng,
        F: FnMut(&T),
    {
        let mut drawn = 0;
        while !deadline.is_reached(self.runtime.clock) {
            let item = bag.draw();
            tick(&item);
            drawn += 1;
            // A zero-length wait would never advance the clock.
            match deadline.cap(self.runtime.clock, pause) {
                Some(wait) if !wait.is_zero() => self.pause(style, wait),
                _ => break,
            }
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::log_sink::MemoryLogSink;

    struct NoInput;

    impl LineSource for NoInput {
        fn read_line(&self, _timeout: Duration) -> Option<String> {
            None
        }
    }

    fn runtime<'a>(clock: &'a ManualClock, log: &'a MemoryLogSink) -> Runtime<'a> {
        Runtime {
            clock,
            pacer: clock,
            log,
            input: &NoInput,
        }
    }

    #[test]
    fn final_wait_is_capped_to_deadline() {
        let clock = ManualClock::starting_now();
        let log = MemoryLogSink::new();
        let start = clock.now();
        let mut bag = ShuffleBag::seeded(vec!["q1", "q2", "q3"], 5).unwrap();

        let mut activity = TimedActivity::new("Reflection Activity", runtime(&clock, &log))
            .with_pause(Duration::from_secs(6));
        let completion = activity.run(5, &mut bag, |_| {}).unwrap();

        assert_eq!(clock.now() - start, chrono::Duration::seconds(5));
        assert_eq!(completion.ticks, 1);
        assert_eq!(activity.state(), ActivityState::Finished);
    }

    #[test]
    fn run_logs_configured_duration_once() {
        let clock = ManualClock::starting_now();
        let log = MemoryLogSink::new();
        let mut bag = ShuffleBag::seeded(vec!["a", "b"], 1).unwrap();

        let mut seen = Vec::new();
        let mut activity = TimedActivity::new("Reflection Activity", runtime(&clock, &log));
        let completion = activity.run(12, &mut bag, |item| seen.push(*item)).unwrap();

        assert_eq!(seen.len(), 2);
        assert_eq!(completion.ticks, 2);
        let records = log.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].to_string().contains("Duration: 12 seconds"));
        assert_eq!(records[0].items, None);
    }

    #[test]
    fn non_positive_duration_is_rejected_without_log() {
        let clock = ManualClock::starting_now();
        let log = MemoryLogSink::new();
        let mut bag = ShuffleBag::seeded(vec!["a"], 1).unwrap();

        for secs in [0, -4] {
            let mut activity = TimedActivity::new("Breathing Activity", runtime(&clock, &log));
            let err = activity.run(secs, &mut bag, |_| {}).unwrap_err();
            assert!(matches!(err, CoreError::InvalidDuration { seconds } if seconds == secs));
            assert_eq!(activity.state(), ActivityState::NotStarted);
        }
        assert!(log.is_empty());
        assert_eq!(clock.pause_count(), 0);
    }

    #[test]
    fn elapsed_time_is_read_from_clock_not_counted() {
        let clock = ManualClock::starting_now();
        let log = MemoryLogSink::new();
        let mut bag = ShuffleBag::seeded(vec!["a", "b", "c"], 2).unwrap();

        // Each tick stalls for 10s, as if the user had wandered off.
        let mut activity = TimedActivity::new("Reflection Activity", runtime(&clock, &log));
        let completion = activity
            .run(20, &mut bag, |_| clock.advance(Duration::from_secs(10)))
            .unwrap();

        // 10s stall, 6s pause, 10s stall: the deadline passed during the
        // second stall, so no second pause is taken.
        assert_eq!(completion.ticks, 2);
        assert_eq!(clock.total_paused(), Duration::from_secs(6));
        assert_eq!(clock.pause_count(), 1);
    }

    #[test]
    fn zero_pause_stops_after_one_item() {
        let clock = ManualClock::starting_now();
        let log = MemoryLogSink::new();
        let mut bag = ShuffleBag::seeded(vec!["a", "b", "c"], 3).unwrap();

        let mut ticks = 0;
        let mut activity = TimedActivity::new("Reflection Activity", runtime(&clock, &log))
            .with_pause(Duration::ZERO);
        let completion = activity
            .run(5, &mut bag, |_| {
                ticks += 1;
                assert!(ticks < 100, "sampling loop did not stop");
            })
            .unwrap();

        assert_eq!(completion.ticks, 1);
        assert_eq!(clock.pause_count(), 0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn failing_body_writes_no_record() {
        let clock = ManualClock::starting_now();
        let log = MemoryLogSink::new();
        let mut activity = TimedActivity::new("Listing Activity", runtime(&clock, &log));

        let result = activity.run_with(10, |_| Err(CoreError::EmptyItemPool));
        assert!(result.is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn run_with_records_item_count() {
        let clock = ManualClock::starting_now();
        let log = MemoryLogSink::new();
        let mut activity = TimedActivity::new("Listing Activity", runtime(&clock, &log));

        let completion = activity
            .run_with(30, |scope| {
                assert_eq!(scope.duration_secs(), 30);
                scope.pause(PauseStyle::Silent, scope.duration());
                Ok(Some(3))
            })
            .unwrap();

        assert_eq!(completion.items, Some(3));
        assert_eq!(
            log.records()[0].to_string().split(" | ").last(),
            Some("Items: 3")
        );
    }
}
