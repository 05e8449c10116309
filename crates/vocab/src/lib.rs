//! # Vocabulary Model
//!
//! Typed records for the Bulgarian–German vocabulary dataset, plus loading
//! and saving of vocabulary collections.
//!
//! ## Document shapes
//!
//! ```text
//! { "vocabulary": [ { "bg": "здравей", "de": "hallo", "level": "A1", ... } ] }
//!
//! [ { "bg": "здравей", "de": "hallo", "level": "A1", ... } ]
//! ```
//!
//! Both shapes load into the same [`VocabularyCollection`]. Every record must
//! carry a source term (`bg`) and a CEFR `level`; everything else is optional.
//! Fields this crate does not model are kept and written back unchanged.
//!
//! ## Example
//!
//! ```rust
//! use vocab_model::{CefrLevel, VocabularyCollection};
//!
//! let json = r#"{"vocabulary":[{"bg":"здравей","de":"hallo","level":"A1","tags":["greeting"]}]}"#;
//! let collection = VocabularyCollection::from_slice(json.as_bytes()).unwrap();
//!
//! let record = &collection.records()[0];
//! assert_eq!(record.level, CefrLevel::A1);
//! assert!(record.has_tag("greeting"));
//! ```

mod collection;
mod error;
mod level;
mod types;

pub use collection::{group_by_level, VocabularyCollection};
pub use error::{Result, VocabError};
pub use level::CefrLevel;
pub use types::{UsageExample, VocabularyRecord};
