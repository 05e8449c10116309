//! # Vocabulary Progression
//!
//! Plans a learning path through a vocabulary collection.
//!
//! ## Pipeline
//!
//! ```text
//! VocabularyRecord[] + DependencyGraph
//!     │
//!     ├──> Unit construction
//!     │      └─ per scheduled level, one unit per tag with >= min_unit_terms members
//!     │
//!     ├──> Topological ordering
//!     │      └─ unit A after unit B when A needs a term B teaches; cycles fail
//!     │
//!     └──> Review schedule + skill order
//! ```
//!
//! ## Example
//!
//! ```rust
//! use vocab_model::{CefrLevel, VocabularyRecord};
//! use vocab_progression::LearningUnitScheduler;
//!
//! let records: Vec<VocabularyRecord> = ["здравей", "чао", "привет"]
//!     .into_iter()
//!     .map(|term| VocabularyRecord::new(term, "", CefrLevel::A1).with_tags(["greeting"]))
//!     .collect();
//!
//! let path = LearningUnitScheduler::default().optimize(&records).unwrap();
//! assert_eq!(path.units.len(), 1);
//! assert_eq!(path.total_minutes, 30);
//! ```

mod error;
mod order;
mod profile;
mod schedule;
mod scheduler;
mod unit;

pub use error::{ProgressionError, Result};
pub use order::order_units;
pub use profile::ProgressionProfile;
pub use schedule::{review_schedule, skill_order, ReviewCheckpoint, UnitReview};
pub use scheduler::{LearningUnitScheduler, ProgressionPath};
pub use unit::{build_units, LearningUnit};
