use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::activity::ActivityKind;

/// Which half of a breath cycle is being guided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    In,
    Out,
}

/// Everything an activity wants shown to the user is an Event.
/// The CLI renders them as text or as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ActivityStarted {
        session_id: Uuid,
        activity: ActivityKind,
        name: String,
        description: String,
        duration_secs: u64,
        at: DateTime<Local>,
    },
    /// Lead-in before the activity body starts.
    GetReady,
    PromptShown {
        prompt: String,
    },
    /// Reflection: questions are about to follow.
    ReflectionOpened,
    QuestionShown {
        question: String,
    },
    BreathPhase {
        phase: BreathPhase,
        secs: u64,
    },
    /// Listing: thinking time before the clock starts.
    ThinkingStarted {
        secs: u64,
    },
    /// Listing: the user may start entering items.
    ListingOpened,
    TimeLeft {
        remaining_secs: u64,
    },
    ItemListed {
        item: String,
        count: usize,
    },
    ListingSummary {
        items: Vec<String>,
    },
    WellDone,
    ActivityCompleted {
        session_id: Uuid,
        activity: ActivityKind,
        name: String,
        duration_secs: u64,
        at: DateTime<Local>,
    },
}
