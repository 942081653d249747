pub mod activity;
pub mod config;
pub mod menu;

use mindfulness_core::{
    Activity, ActivityKind, Config, FileLogSink, Runtime, SessionPacing, SystemClock,
};

use crate::terminal::{StdinLines, TerminalPacer};

/// Global flags shared by every command.
pub struct Options {
    pub json: bool,
    pub seed: Option<u64>,
}

/// Process-wide collaborators, built once and handed to every session.
pub struct Context {
    pub config: Config,
    pub json: bool,
    seed: Option<u64>,
    clock: SystemClock,
    pacer: TerminalPacer,
    log: FileLogSink,
    pub input: StdinLines,
}

impl Context {
    pub fn new(options: &Options) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let log = config.log_sink()?;
        tracing::debug!(path = %log.path().display(), "activity log");
        Ok(Self {
            seed: options.seed.or(config.seed),
            json: options.json,
            clock: SystemClock,
            pacer: TerminalPacer::new(!options.json),
            log,
            input: StdinLines::spawn(),
            config,
        })
    }

    pub fn runtime(&self) -> Runtime<'_> {
        Runtime {
            clock: &self.clock,
            pacer: &self.pacer,
            log: &self.log,
            input: &self.input,
        }
    }

    pub fn pacing(&self) -> SessionPacing {
        self.config.session_pacing()
    }

    pub fn pacer(&self) -> &TerminalPacer {
        &self.pacer
    }

    pub fn build_activity(
        &self,
        kind: ActivityKind,
    ) -> Result<Box<dyn Activity>, Box<dyn std::error::Error>> {
        Ok(match kind {
            ActivityKind::Breathing => Box::new(self.config.breathing_activity()),
            ActivityKind::Reflection => Box::new(self.config.reflection_activity(self.seed)?),
            ActivityKind::Listing => Box::new(self.config.listing_activity(self.seed)?),
        })
    }
}
