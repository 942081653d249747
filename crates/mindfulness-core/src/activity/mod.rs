//! Guided activities.
//!
//! Every activity runs inside a [`TimedActivity`] session, which owns
//! validation, the lifecycle and the completion record. [`run_session`] adds
//! the shared framing (get ready, well done, summary) around an
//! [`Activity`] body.

mod breathing;
mod listing;
mod reflection;
mod timed;

pub use breathing::BreathingActivity;
pub use listing::ListingActivity;
pub use reflection::ReflectionActivity;
pub use timed::{
    validate_duration, ActivityState, Completion, Scope, TimedActivity, DEFAULT_PAUSE,
};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, Pacer, PauseStyle};
use crate::error::Result;
use crate::events::Event;
use crate::log_sink::LogSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Breathing,
    Reflection,
    Listing,
}

impl ActivityKind {
    /// Menu order.
    pub const ALL: [ActivityKind; 3] = [
        ActivityKind::Breathing,
        ActivityKind::Reflection,
        ActivityKind::Listing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ActivityKind::Breathing => "Breathing Activity",
            ActivityKind::Reflection => "Reflection Activity",
            ActivityKind::Listing => "Listing Activity",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ActivityKind::Breathing => {
                "This activity will help you relax by walking you through breathing in and out \
                 slowly. Clear your mind and focus on your breathing."
            }
            ActivityKind::Reflection => {
                "This activity will help you reflect on times in your life when you have shown \
                 strength and resilience. This will help you recognize the power you have and \
                 how you can use it in other aspects of your life."
            }
            ActivityKind::Listing => {
                "This activity will help you reflect on the good things in your life by having \
                 you list as many things as you can in a certain area."
            }
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breathing" | "breathe" => Ok(ActivityKind::Breathing),
            "reflection" | "reflect" => Ok(ActivityKind::Reflection),
            "listing" | "list" => Ok(ActivityKind::Listing),
            other => Err(format!("unknown activity: {other}")),
        }
    }
}

/// Blocking line input with a timeout.
pub trait LineSource {
    /// Wait up to `timeout` for one line. `None` on timeout or closed input;
    /// implementations must not return early in that case.
    fn read_line(&self, timeout: Duration) -> Option<String>;
}

/// Collaborators shared by every session, built once at process start.
#[derive(Clone, Copy)]
pub struct Runtime<'a> {
    pub clock: &'a dyn Clock,
    pub pacer: &'a dyn Pacer,
    pub log: &'a dyn LogSink,
    pub input: &'a dyn LineSource,
}

/// The activity-specific part of a session.
pub trait Activity {
    fn kind(&self) -> ActivityKind;

    /// Run the body. Returns the item count to record, if any.
    ///
    /// # Errors
    ///
    /// Implementations return an error only if the activity cannot proceed.
    fn perform(&mut self, scope: &Scope<'_>, emit: &mut dyn FnMut(Event)) -> Result<Option<usize>>;
}

/// Pauses framing every session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPacing {
    pub get_ready: Duration,
    pub cool_down: Duration,
    pub summary: Duration,
}

impl Default for SessionPacing {
    fn default() -> Self {
        Self {
            get_ready: Duration::from_secs(3),
            cool_down: Duration::from_secs(3),
            summary: Duration::from_secs(2),
        }
    }
}

/// Run one complete session of `activity`.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDuration`](crate::CoreError::InvalidDuration)
/// before anything is emitted if `duration_secs <= 0`.
pub fn run_session(
    activity: &mut dyn Activity,
    duration_secs: i64,
    runtime: Runtime<'_>,
    pacing: &SessionPacing,
    emit: &mut dyn FnMut(Event),
) -> Result<Completion> {
    let kind = activity.kind();
    let mut session = TimedActivity::new(kind.name(), runtime);
    session.run_with(duration_secs, |scope| {
        emit(Event::ActivityStarted {
            session_id: scope.session_id(),
            activity: kind,
            name: kind.name().to_string(),
            description: kind.description().to_string(),
            duration_secs: scope.duration_secs(),
            at: scope.now(),
        });
        emit(Event::GetReady);
        scope.pause(PauseStyle::Spinner, pacing.get_ready);

        let items = activity.perform(scope, emit)?;

        emit(Event::WellDone);
        scope.pause(PauseStyle::Spinner, pacing.cool_down);
        emit(Event::ActivityCompleted {
            session_id: scope.session_id(),
            activity: kind,
            name: kind.name().to_string(),
            duration_secs: scope.duration_secs(),
            at: scope.now(),
        });
        scope.pause(PauseStyle::Spinner, pacing.summary);
        Ok(items)
    })
}
