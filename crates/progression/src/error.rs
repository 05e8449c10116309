use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProgressionError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgressionError {
    /// Units require each other's terms; `cycle` starts and ends on the same unit id
    #[error("Cyclic dependency between learning units: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error("Dependency graph error: {0}")]
    Graph(#[from] vocab_graph::GraphError),
}

impl ProgressionError {
    /// Unit ids involved in a cycle, without the closing repeat
    #[must_use]
    pub fn cycle_units(&self) -> &[String] {
        match self {
            Self::CyclicDependency { cycle } if !cycle.is_empty() => &cycle[..cycle.len() - 1],
            _ => &[],
        }
    }
}
