use std::time::Duration;

use super::{Activity, ActivityKind, Scope};
use crate::clock::PauseStyle;
use crate::error::Result;
use crate::events::{BreathPhase, Event};

/// Alternating breathe-in / breathe-out countdowns until the deadline.
#[derive(Debug, Clone)]
pub struct BreathingActivity {
    inhale: Duration,
    exhale: Duration,
}

impl BreathingActivity {
    pub fn new(inhale: Duration, exhale: Duration) -> Self {
        Self { inhale, exhale }
    }

    pub fn inhale(&self) -> Duration {
        self.inhale
    }

    pub fn exhale(&self) -> Duration {
        self.exhale
    }
}

impl Default for BreathingActivity {
    fn default() -> Self {
        Self::new(Duration::from_secs(4), Duration::from_secs(6))
    }
}

impl Activity for BreathingActivity {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Breathing
    }

    fn perform(&mut self, scope: &Scope<'_>, emit: &mut dyn FnMut(Event)) -> Result<Option<usize>> {
        let deadline = scope.deadline();
        let clock = scope.clock();

        for (phase, length) in [(BreathPhase::In, self.inhale), (BreathPhase::Out, self.exhale)]
            .into_iter()
            .cycle()
        {
            let Some(wait) = deadline.cap(clock, length) else {
                break;
            };
            emit(Event::BreathPhase {
                phase,
                secs: length.as_secs(),
            });
            // Zero-length phases would never advance the clock.
            if wait.is_zero() {
                break;
            }
            scope.pause(PauseStyle::Countdown, wait);
        }
        Ok(None)
    }
}
