use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use vocab_model::CefrLevel;

/// Term in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermNode {
    /// Source-language term (record `bg`)
    pub term: String,

    /// Level of the first record carrying this term
    pub level: CefrLevel,
}

/// Why one term is a prerequisite of another
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Related term one CEFR tier below
    LevelProgression,

    /// Related form or semantic-field membership
    SemanticRelation,
}

/// Edge from a dependent term to one of its prerequisites
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub kinds: BTreeSet<DependencyKind>,
}

/// Directed graph: term -> prerequisite term
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    pub graph: DiGraph<TermNode, DependencyEdge>,

    /// Term -> NodeIndex mapping for fast lookup
    pub term_index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            term_index: HashMap::new(),
        }
    }

    /// Add a term; an already known term keeps its first node
    pub fn add_term(&mut self, term: &str, level: CefrLevel) -> NodeIndex {
        if let Some(&idx) = self.term_index.get(term) {
            return idx;
        }
        let idx = self.graph.add_node(TermNode {
            term: term.to_string(),
            level,
        });
        self.term_index.insert(term.to_string(), idx);
        idx
    }

    /// Record that `dependent` requires `prerequisite`.
    ///
    /// Repeated edges collapse into one, accumulating their kinds.
    /// Returns false for self-edges, which are never stored.
    pub fn add_dependency(
        &mut self,
        dependent: NodeIndex,
        prerequisite: NodeIndex,
        kind: DependencyKind,
    ) -> bool {
        if dependent == prerequisite {
            return false;
        }
        match self.graph.find_edge(dependent, prerequisite) {
            Some(edge) => {
                self.graph[edge].kinds.insert(kind);
            }
            None => {
                let mut kinds = BTreeSet::new();
                kinds.insert(kind);
                self.graph
                    .add_edge(dependent, prerequisite, DependencyEdge { kinds });
            }
        }
        true
    }

    /// Find node by term
    pub fn find_node(&self, term: &str) -> Option<NodeIndex> {
        self.term_index.get(term).copied()
    }

    /// Get node data
    pub fn get_node(&self, idx: NodeIndex) -> Option<&TermNode> {
        self.graph.node_weight(idx)
    }

    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.term_index.contains_key(term)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &TermNode)> {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx).map(|node| (idx, node)))
    }

    pub fn term_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
