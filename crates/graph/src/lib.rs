//! # Vocabulary Graph
//!
//! Term-to-prerequisite relationships derived from a vocabulary collection.
//!
//! ## Architecture
//!
//! ```text
//! VocabularyRecord[]
//!     │
//!     ├──> Dependency Graph Builder
//!     │      ├─ Level progression: rank r depends on related terms at rank r-1
//!     │      │    (shared tag or shared example context)
//!     │      └─ Semantic relation: related forms, tag ∩ semantic field
//!     │
//!     └──> Dependency Graph (petgraph)
//!            ├─ Nodes: terms (source-language form + level)
//!            └─ Edges: dependent -> prerequisite, tagged with dependency kinds
//! ```

mod builder;
mod error;
mod graph;
mod types;

pub use builder::DependencyGraphBuilder;
pub use error::{GraphError, Result};
pub use graph::PrerequisiteMap;
pub use types::{DependencyEdge, DependencyGraph, DependencyKind, TermNode};
