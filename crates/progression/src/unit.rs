use crate::error::Result;
use crate::profile::ProgressionProfile;
use std::collections::{BTreeMap, BTreeSet};
use vocab_graph::DependencyGraph;
use vocab_model::{group_by_level, CefrLevel, VocabularyRecord};

/// Terms sharing a level and a focus area, studied together
#[derive(Debug, Clone, PartialEq)]
pub struct LearningUnit {
    /// `<level>:<focus>`
    pub id: String,
    pub level: CefrLevel,
    pub focus_area: String,
    /// Member records in input order
    pub terms: Vec<VocabularyRecord>,
    /// Union of the members' prerequisite terms
    pub prerequisites: BTreeSet<String>,
    pub estimated_minutes: u32,
    pub review_points: Vec<String>,
}

impl LearningUnit {
    #[must_use]
    pub fn unit_id(level: CefrLevel, focus: &str) -> String {
        format!("{level}:{focus}")
    }

    /// Source terms this unit teaches
    pub fn taught_terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|record| record.bg.as_str())
    }

    /// True when some prerequisite of `self` is taught by `other`
    #[must_use]
    pub fn depends_on(&self, other: &LearningUnit) -> bool {
        other
            .taught_terms()
            .any(|term| self.prerequisites.contains(term))
    }
}

fn review_points(focus: &str) -> Vec<String> {
    vec![
        format!("Practice {focus} vocabulary"),
        format!("Use terms in {focus} contexts"),
        "Review related grammar points".to_string(),
    ]
}

/// Group records into units: per scheduled level, one group per tag
/// (a multi-tagged record joins every group once). Records with an empty
/// tag list join the fallback focus. Groups smaller than the profile
/// minimum are dropped.
pub fn build_units(
    records: &[VocabularyRecord],
    graph: &DependencyGraph,
    profile: &ProgressionProfile,
) -> Result<Vec<LearningUnit>> {
    let mut units = Vec::new();
    let by_level = group_by_level(records);

    for &level in profile.levels() {
        let Some(level_records) = by_level.get(&level) else {
            continue;
        };

        let mut focus_groups: BTreeMap<&str, Vec<&VocabularyRecord>> = BTreeMap::new();
        for &record in level_records {
            let foci: BTreeSet<&str> = if record.tags.is_empty() {
                BTreeSet::from([profile.fallback_focus()])
            } else {
                record.tags.iter().map(String::as_str).collect()
            };
            for focus in foci {
                focus_groups.entry(focus).or_default().push(record);
            }
        }

        for (focus, members) in focus_groups {
            if members.len() < profile.min_unit_terms() {
                log::debug!(
                    "Skipping {level}:{focus}: {} term(s) below minimum {}",
                    members.len(),
                    profile.min_unit_terms()
                );
                continue;
            }

            let mut prerequisites = BTreeSet::new();
            for member in &members {
                let member_prereqs = graph.prerequisites(&member.bg)?;
                prerequisites.extend(member_prereqs.into_iter().map(str::to_string));
            }

            units.push(LearningUnit {
                id: LearningUnit::unit_id(level, focus),
                level,
                focus_area: focus.to_string(),
                terms: members.into_iter().cloned().collect(),
                prerequisites,
                estimated_minutes: profile.unit_minutes(),
                review_points: review_points(focus),
            });
        }
    }

    log::info!("Created {} learning units", units.len());
    Ok(units)
}
