use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const EXPORT_SCHEMA_VERSION: u32 = 1;

/// Top-level progression export document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ProgressionExport {
    pub learning_path: LearningPathDoc,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct LearningPathDoc {
    pub schema_version: u32,
    /// Scheduler profile the path was produced with
    pub profile: String,
    /// Units in dependency order
    pub units: Vec<LearningUnitDoc>,
    /// Sum of unit estimates, in minutes
    pub total_duration: u64,
    pub review_schedule: Vec<UnitReviewDoc>,
    pub skill_building_order: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct LearningUnitDoc {
    pub id: String,
    pub level: String,
    pub focus_area: String,
    /// Member vocabulary records, as loaded
    pub terms: Vec<serde_json::Value>,
    pub prerequisites: Vec<String>,
    /// Minutes
    pub estimated_time: u32,
    pub review_points: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct UnitReviewDoc {
    pub unit: String,
    pub focus_area: String,
    pub checkpoints: Vec<ReviewCheckpointDoc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ReviewCheckpointDoc {
    /// Days after the unit is first studied
    pub day: u32,
    /// `day_<n>`
    pub label: String,
    pub actions: Vec<String>,
}

/// Machine-readable failure report printed by the CLI in `--json` mode
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub hint: Option<String>,
}

/// JSON Schema of [`ProgressionExport`]
#[must_use]
pub fn export_schema() -> schemars::Schema {
    schemars::schema_for!(ProgressionExport)
}
