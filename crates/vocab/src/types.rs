use crate::level::CefrLevel;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// One vocabulary entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VocabularyRecord {
    /// Source (Bulgarian) term; also the term identifier
    pub bg: String,

    /// Target (German) term
    #[serde(default)]
    pub de: String,

    /// CEFR proficiency tier
    pub level: CefrLevel,

    /// Focus labels (topic, part of speech, ...)
    #[serde(default)]
    pub tags: Vec<String>,

    /// Usage examples
    #[serde(default)]
    pub examples: Vec<UsageExample>,

    /// Source terms this entry names as related or derived forms
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_forms: Vec<String>,

    /// Semantic-field labels this entry belongs to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub semantic_field: Vec<String>,

    /// Fields not modelled here, kept for export
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VocabularyRecord {
    /// Create a record with only the required fields
    pub fn new(bg: impl Into<String>, de: impl Into<String>, level: CefrLevel) -> Self {
        Self {
            bg: bg.into(),
            de: de.into(),
            level,
            tags: Vec::new(),
            examples: Vec::new(),
            related_forms: Vec::new(),
            semantic_field: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Builder: add tags, skipping ones already present
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self.dedup_tags();
        self
    }

    /// Builder: add an example carrying a context label
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.examples.push(UsageExample::with_context(context));
        self
    }

    /// Builder: add related forms
    #[must_use]
    pub fn with_related_forms<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related_forms.extend(forms.into_iter().map(Into::into));
        self
    }

    /// Builder: add semantic-field labels
    #[must_use]
    pub fn with_semantic_field<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.semantic_field.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Non-empty context labels across all examples
    #[must_use]
    pub fn contexts(&self) -> BTreeSet<&str> {
        self.examples
            .iter()
            .filter_map(|ex| ex.context.as_deref())
            .filter(|ctx| !ctx.trim().is_empty())
            .collect()
    }

    /// True when the two records share a tag or an example context
    #[must_use]
    pub fn shares_tag_or_context(&self, other: &VocabularyRecord) -> bool {
        if self.tags.iter().any(|tag| other.has_tag(tag)) {
            return true;
        }
        let ours = self.contexts();
        !ours.is_empty() && other.contexts().iter().any(|ctx| ours.contains(ctx))
    }

    /// Collapse repeated tags, keeping the first occurrence
    pub(crate) fn dedup_tags(&mut self) {
        let mut seen = BTreeSet::new();
        self.tags.retain(|tag| seen.insert(tag.clone()));
    }
}

/// Example sentence attached to a record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UsageExample {
    /// Situational label ("restaurant", "greeting", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub de: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UsageExample {
    pub fn with_context(context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..Default::default()
        }
    }
}
