use std::time::Duration;

use super::{Activity, ActivityKind, Scope};
use crate::clock::PauseStyle;
use crate::error::Result;
use crate::events::Event;
use crate::prompts;
use crate::sampler::ShuffleBag;

/// One prompt, then questions from a shuffle bag until the deadline.
///
/// The deadline starts before the preparation spinner, so preparation time
/// counts toward the session.
#[derive(Debug, Clone)]
pub struct ReflectionActivity {
    prompts: ShuffleBag<String>,
    questions: ShuffleBag<String>,
    prep: Duration,
    question_pause: Duration,
}

impl ReflectionActivity {
    pub fn new(prompts: ShuffleBag<String>, questions: ShuffleBag<String>) -> Self {
        Self {
            prompts,
            questions,
            prep: Duration::from_secs(3),
            question_pause: super::DEFAULT_PAUSE,
        }
    }

    /// Built-in prompts and questions, seeded for reproducible draws.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in sets; the `Result` mirrors [`ShuffleBag::seeded`].
    pub fn with_builtin_prompts(seed: u64) -> Result<Self> {
        Ok(Self::new(
            ShuffleBag::seeded(prompts::owned(prompts::REFLECTION_PROMPTS), seed)?,
            ShuffleBag::seeded(
                prompts::owned(prompts::REFLECTION_QUESTIONS),
                seed.wrapping_add(1),
            )?,
        ))
    }

    pub fn with_prep(mut self, prep: Duration) -> Self {
        self.prep = prep;
        self
    }

    pub fn with_question_pause(mut self, pause: Duration) -> Self {
        self.question_pause = pause;
        self
    }

    pub fn questions(&self) -> &ShuffleBag<String> {
        &self.questions
    }
}

impl Activity for ReflectionActivity {
    fn kind(&self) -> ActivityKind {
        ActivityKind::Reflection
    }

    fn perform(&mut self, scope: &Scope<'_>, emit: &mut dyn FnMut(Event)) -> Result<Option<usize>> {
        emit(Event::PromptShown {
            prompt: self.prompts.draw(),
        });
        emit(Event::ReflectionOpened);

        let deadline = scope.deadline();
        scope.pause_within(&deadline, PauseStyle::Spinner, self.prep);

        let asked = scope.sample_until(
            &deadline,
            &mut self.questions,
            self.question_pause,
            PauseStyle::Spinner,
            &mut |question: &String| {
                emit(Event::QuestionShown {
                    question: question.clone(),
                })
            },
        );
        tracing::debug!(asked, "reflection questions shown");
        Ok(None)
    }
}
