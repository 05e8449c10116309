use crate::error::{GraphError, Result};
use crate::types::{DependencyGraph, DependencyKind};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// Flat term -> prerequisites view, the exported form of the graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteMap {
    pub terms: usize,
    pub edges: usize,
    pub prerequisites: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Direct prerequisites of a term (outgoing edges)
    pub fn prerequisites(&self, term: &str) -> Result<BTreeSet<&str>> {
        let node = self.require(term)?;
        Ok(self.neighbour_terms(node, Direction::Outgoing))
    }

    /// Terms that list this term as a prerequisite (incoming edges)
    pub fn dependents(&self, term: &str) -> Result<BTreeSet<&str>> {
        let node = self.require(term)?;
        Ok(self.neighbour_terms(node, Direction::Incoming))
    }

    /// Kinds recorded on the edge `term -> prerequisite`, if any
    pub fn dependency_kinds(
        &self,
        term: &str,
        prerequisite: &str,
    ) -> Option<&BTreeSet<DependencyKind>> {
        let from = self.find_node(term)?;
        let to = self.find_node(prerequisite)?;
        self.graph
            .find_edge(from, to)
            .map(|edge| &self.graph[edge].kinds)
    }

    /// Every prerequisite reachable from `term` within `max_depth` hops,
    /// with its shortest distance. Sorted by distance, then term.
    pub fn transitive_prerequisites(
        &self,
        term: &str,
        max_depth: usize,
    ) -> Result<Vec<(String, usize)>> {
        let start = self.require(term)?;
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        let mut result = Vec::new();

        visited.insert(start);
        queue.push_back((start, 0usize));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for edge in self.graph.edges(current) {
                let target = edge.target();
                if visited.insert(target) {
                    if let Some(node) = self.get_node(target) {
                        result.push((node.term.clone(), depth + 1));
                    }
                    queue.push_back((target, depth + 1));
                }
            }
        }

        result.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Ok(result)
    }

    /// Snapshot of every term and its sorted prerequisites
    #[must_use]
    pub fn to_prerequisite_map(&self) -> PrerequisiteMap {
        let prerequisites = self
            .nodes()
            .map(|(idx, node)| {
                let prereqs = self
                    .neighbour_terms(idx, Direction::Outgoing)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                (node.term.clone(), prereqs)
            })
            .collect();

        PrerequisiteMap {
            terms: self.term_count(),
            edges: self.edge_count(),
            prerequisites,
        }
    }

    /// Edge count per dependency kind (an edge may count towards both)
    #[must_use]
    pub fn kind_counts(&self) -> BTreeMap<DependencyKind, usize> {
        let mut counts = BTreeMap::new();
        for edge in self.graph.edge_weights() {
            for kind in &edge.kinds {
                *counts.entry(*kind).or_insert(0) += 1;
            }
        }
        counts
    }

    fn require(&self, term: &str) -> Result<NodeIndex> {
        self.find_node(term)
            .ok_or_else(|| GraphError::TermNotFound(term.to_string()))
    }

    fn neighbour_terms(&self, node: NodeIndex, direction: Direction) -> BTreeSet<&str> {
        self.graph
            .neighbors_directed(node, direction)
            .filter_map(|idx| self.get_node(idx))
            .map(|n| n.term.as_str())
            .collect()
    }
}
