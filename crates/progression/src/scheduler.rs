use crate::error::Result;
use crate::order::order_units;
use crate::profile::ProgressionProfile;
use crate::schedule::{review_schedule, skill_order, UnitReview};
use crate::unit::{build_units, LearningUnit};
use vocab_graph::{DependencyGraph, DependencyGraphBuilder};
use vocab_model::VocabularyRecord;
use vocab_protocol::{
    LearningPathDoc, LearningUnitDoc, ProgressionExport, ReviewCheckpointDoc, UnitReviewDoc,
    EXPORT_SCHEMA_VERSION,
};

/// Ordered learning units plus review schedule and skill order
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionPath {
    pub profile: String,
    pub units: Vec<LearningUnit>,
    pub total_minutes: u64,
    pub review_schedule: Vec<UnitReview>,
    pub skill_order: Vec<String>,
}

/// Turns a vocabulary collection and its dependency graph into a
/// [`ProgressionPath`]
#[derive(Debug, Clone, Default)]
pub struct LearningUnitScheduler {
    profile: ProgressionProfile,
}

impl LearningUnitScheduler {
    pub fn new(profile: ProgressionProfile) -> Self {
        Self { profile }
    }

    #[must_use]
    pub fn profile(&self) -> &ProgressionProfile {
        &self.profile
    }

    pub fn schedule(
        &self,
        records: &[VocabularyRecord],
        graph: &DependencyGraph,
    ) -> Result<ProgressionPath> {
        let units = build_units(records, graph, &self.profile)?;
        let units = order_units(units)?;

        let review_schedule = review_schedule(&units, self.profile.review_days());
        let skill_order = skill_order(&units, self.profile.core_skills());
        let total_minutes: u64 = units
            .iter()
            .map(|unit| u64::from(unit.estimated_minutes))
            .sum();

        log::info!(
            "Progression path: {} units, {} minutes total",
            units.len(),
            total_minutes
        );

        Ok(ProgressionPath {
            profile: self.profile.name().to_string(),
            units,
            total_minutes,
            review_schedule,
            skill_order,
        })
    }

    /// Build the dependency graph and schedule in one call
    pub fn optimize(&self, records: &[VocabularyRecord]) -> Result<ProgressionPath> {
        let graph = DependencyGraphBuilder::new().build(records);
        self.schedule(records, &graph)
    }
}

impl ProgressionPath {
    #[must_use]
    pub fn unit(&self, id: &str) -> Option<&LearningUnit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    /// Index of a unit in the final order
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.units.iter().position(|unit| unit.id == id)
    }

    /// Export document; fails only if a member record cannot be serialized
    pub fn to_export(&self) -> serde_json::Result<ProgressionExport> {
        let units: Vec<LearningUnitDoc> = self
            .units
            .iter()
            .map(|unit| -> serde_json::Result<LearningUnitDoc> {
                Ok(LearningUnitDoc {
                    id: unit.id.clone(),
                    level: unit.level.to_string(),
                    focus_area: unit.focus_area.clone(),
                    terms: unit
                        .terms
                        .iter()
                        .map(serde_json::to_value)
                        .collect::<serde_json::Result<Vec<_>>>()?,
                    prerequisites: unit.prerequisites.iter().cloned().collect(),
                    estimated_time: unit.estimated_minutes,
                    review_points: unit.review_points.clone(),
                })
            })
            .collect::<serde_json::Result<_>>()?;

        let review_schedule = self
            .review_schedule
            .iter()
            .map(|review| UnitReviewDoc {
                unit: review.unit_id.clone(),
                focus_area: review.focus_area.clone(),
                checkpoints: review
                    .checkpoints
                    .iter()
                    .map(|checkpoint| ReviewCheckpointDoc {
                        day: checkpoint.day,
                        label: checkpoint.label(),
                        actions: checkpoint.actions.clone(),
                    })
                    .collect(),
            })
            .collect();

        Ok(ProgressionExport {
            learning_path: LearningPathDoc {
                schema_version: EXPORT_SCHEMA_VERSION,
                profile: self.profile.clone(),
                units,
                total_duration: self.total_minutes,
                review_schedule,
                skill_building_order: self.skill_order.clone(),
            },
        })
    }
}
