//! # Mindfulness Core Library
//!
//! This library provides the core logic for the Mindfulness program: guided
//! breathing, reflection and listing activities run against a wall-clock
//! deadline. The `mindfulness` CLI is a thin console layer over it.
//!
//! ## Architecture
//!
//! - **Shuffle bag**: without-replacement prompt sampling that refills itself
//!   once exhausted, with an injectable, seedable random source
//! - **Timed activity**: a deadline-driven session lifecycle that re-reads the
//!   clock every iteration and writes one completion record per run
//! - **Clock and pacer**: injectable time source and waits, so whole sessions
//!   can be simulated without sleeping
//! - **Activity log**: explicit, best-effort, append-only log sink
//! - **Storage**: TOML-based configuration in the data directory
//!
//! ## Key Components
//!
//! - [`ShuffleBag`]: prompt sampler
//! - [`TimedActivity`]: session state machine
//! - [`run_session`]: full guided session around an [`Activity`]
//! - [`LogSink`]: completion record destination
//! - [`Config`]: application configuration management

pub mod activity;
pub mod clock;
pub mod error;
pub mod events;
pub mod log_sink;
pub mod prompts;
pub mod sampler;
pub mod storage;

pub use activity::{
    run_session, Activity, ActivityKind, ActivityState, BreathingActivity, Completion,
    LineSource, ListingActivity, ReflectionActivity, Runtime, Scope, SessionPacing,
    TimedActivity,
};
pub use clock::{Clock, Deadline, ManualClock, Pacer, PauseStyle, SystemClock};
pub use error::{ConfigError, CoreError, LogWriteError, Result};
pub use events::{BreathPhase, Event};
pub use log_sink::{FileLogSink, LogRecord, LogSink, MemoryLogSink};
pub use sampler::ShuffleBag;
pub use storage::{data_dir, Config};
