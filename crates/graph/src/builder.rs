use crate::types::{DependencyGraph, DependencyKind};
use petgraph::graph::NodeIndex;
use vocab_model::{group_by_level, VocabularyRecord};

/// Build a dependency graph from vocabulary records
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyGraphBuilder;

impl DependencyGraphBuilder {
    pub const fn new() -> Self {
        Self
    }

    /// Build graph from records. Empty input yields an empty graph.
    pub fn build(&self, records: &[VocabularyRecord]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();

        // Phase 1: one node per distinct term
        let nodes: Vec<NodeIndex> = records
            .iter()
            .map(|record| graph.add_term(&record.bg, record.level))
            .collect();

        // Phase 2: level progression
        let by_level = group_by_level(records);
        for (record, &node) in records.iter().zip(&nodes) {
            let Some(previous) = record.level.previous() else {
                continue;
            };
            let Some(candidates) = by_level.get(&previous) else {
                continue;
            };
            for candidate in candidates {
                if !record.shares_tag_or_context(candidate) {
                    continue;
                }
                if let Some(prereq) = graph.find_node(&candidate.bg) {
                    graph.add_dependency(node, prereq, DependencyKind::LevelProgression);
                }
            }
        }

        // Phase 3: semantic relations, any level
        for (record, &node) in records.iter().zip(&nodes) {
            for (other, &other_node) in records.iter().zip(&nodes) {
                if other.bg != record.bg && is_semantically_dependent(record, other) {
                    graph.add_dependency(node, other_node, DependencyKind::SemanticRelation);
                }
            }
        }

        log::info!(
            "Built dependency graph: {} terms, {} edges",
            graph.term_count(),
            graph.edge_count()
        );
        log::debug!("Dependency edges by kind: {:?}", graph.kind_counts());

        graph
    }
}

/// `record` depends on `other` when it names `other` as a related form,
/// or one of its tags falls in `other`'s semantic field.
fn is_semantically_dependent(record: &VocabularyRecord, other: &VocabularyRecord) -> bool {
    if record.related_forms.iter().any(|form| *form == other.bg) {
        return true;
    }
    record
        .tags
        .iter()
        .any(|tag| other.semantic_field.iter().any(|field| field == tag))
}
