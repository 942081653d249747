use std::time::Duration;

use super::{Activity, ActivityKind, Scope};
use crate::clock::PauseStyle;
use crate::error::Result;
use crate::events::Event;
use crate::prompts;
use crate::sampler::ShuffleBag;

/// Shows a prompt, gives thinking time, then collects lines until the deadline.
///
/// The thinking countdown happens before the deadline is set. The completion
/// record carries the number of items listed.
#[derive(Debug, Clone)]
pub struct ListingActivity {
    prompts: ShuffleBag<String>,
    think: Duration,
}

impl ListingActivity {
    pub fn new(prompts: ShuffleBag<String>) -> Self {
        Self {
            prompts,
            think: Duration::from_secs(5),
        }
    }

    /// Built-in listing prompts, seeded for reproducible draws.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in set; the `Result` mirrors [`ShuffleBag::seeded`].
    pub fn with_builtin_prompts(seed: u64) -> Result<Self> {
        Ok(Self::new(ShuffleBag::seeded(
            prompts::owned(prompts::LISTING_PROMPTS),
            seed,
        )?))
    }

    pub fn with_think(mut self, think: Duration) -> Self {
        self.think = think;
        self
    }
}

impl Activity for ListingActivity {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Listing
    }

    fn perform(&mut self, scope: &Scope<'_>, emit: &mut dyn FnMut(Event)) -> Result<Option<usize>> {
        emit(Event::PromptShown {
            prompt: self.prompts.draw(),
        });
        emit(Event::ThinkingStarted {
            secs: self.think.as_secs(),
        });
        scope.pause(PauseStyle::Countdown, self.think);
        emit(Event::ListingOpened);

        let clock = scope.clock();
        let deadline = scope.deadline();
        let mut items = Vec::new();
        while let Some(left) = deadline.remaining(clock) {
            emit(Event::TimeLeft {
                remaining_secs: deadline.remaining_secs_ceil(clock),
            });
            let Some(line) = scope.input().read_line(left) else {
                continue;
            };
            let item = line.trim();
            if !item.is_empty() {
                items.push(item.to_string());
                emit(Event::ItemListed {
                    item: item.to_string(),
                    count: items.len(),
                });
            }
        }

        let count = items.len();
        emit(Event::ListingSummary { items });
        Ok(Some(count))
    }
}
