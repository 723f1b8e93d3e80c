pub mod config;
pub mod energy;
pub mod error;
pub mod mood;
pub mod sentiment;

pub use config::StrideConfig;
pub use energy::{Difficulty, EnergyTier, SlotSuggestion, TimeEnergyModel};
pub use error::StrideError;
pub use mood::{classify, Mood, MoodReading};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One task's decomposition: the task text and its ordered steps.
///
/// Opaque to the ledger — it stores and returns plans without inspecting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPlan {
    pub task: String,
    pub steps: Vec<String>,
}

/// A single plan-generation event in the progress ledger.
///
/// Immutable after append except for the completion fields, which transition
/// once from unset to set. `energy_level` and the completion fields carry
/// serde defaults so entries persisted by older versions still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based, assigned as ledger length + 1 at append time.
    pub id: u64,
    pub timestamp: DateTime<Local>,
    pub user_query: String,
    #[serde(default)]
    pub energy_level: Option<String>,
    pub generated_plan: Vec<TaskPlan>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
}
