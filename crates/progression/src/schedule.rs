use crate::unit::LearningUnit;
use std::collections::HashSet;

/// One spaced-repetition checkpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCheckpoint {
    /// Days after the unit is first studied
    pub day: u32,
    pub actions: Vec<String>,
}

impl ReviewCheckpoint {
    #[must_use]
    pub fn label(&self) -> String {
        format!("day_{}", self.day)
    }
}

/// Checkpoints for one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitReview {
    pub unit_id: String,
    pub focus_area: String,
    pub checkpoints: Vec<ReviewCheckpoint>,
}

/// One review entry per unit, in the given order
pub fn review_schedule(units: &[LearningUnit], review_days: &[u32]) -> Vec<UnitReview> {
    units
        .iter()
        .map(|unit| UnitReview {
            unit_id: unit.id.clone(),
            focus_area: unit.focus_area.clone(),
            checkpoints: review_days
                .iter()
                .map(|&day| ReviewCheckpoint {
                    day,
                    actions: vec![
                        format!("Review {} vocabulary", unit.focus_area),
                        "Practice with exercises".to_string(),
                        "Check retention".to_string(),
                    ],
                })
                .collect(),
        })
        .collect()
}

/// Core skills, then `<focus>_mastery` per focus area in first-seen order
pub fn skill_order(units: &[LearningUnit], core_skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    core_skills
        .iter()
        .cloned()
        .chain(
            units
                .iter()
                .filter(|unit| seen.insert(unit.focus_area.as_str()))
                .map(|unit| format!("{}_mastery", unit.focus_area)),
        )
        .collect()
}
