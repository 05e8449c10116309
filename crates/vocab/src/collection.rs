use crate::error::{Result, VocabError};
use crate::level::CefrLevel;
use crate::types::VocabularyRecord;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Records in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VocabularyCollection {
    records: Vec<VocabularyRecord>,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    vocabulary: &'a [VocabularyRecord],
}

impl VocabularyCollection {
    pub fn new(records: Vec<VocabularyRecord>) -> Self {
        let mut records = records;
        for record in &mut records {
            record.dedup_tags();
        }
        Self { records }
    }

    /// Load from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let collection = Self::from_slice(&bytes)?;
        log::info!(
            "Loaded {} vocabulary records from {}",
            collection.len(),
            path.display()
        );
        Ok(collection)
    }

    /// Parse a JSON document: `{"vocabulary": [...]}` or a bare array
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let document: Value = serde_json::from_slice(bytes)?;
        let entries = match document {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map.remove("vocabulary") {
                Some(Value::Array(entries)) => entries,
                Some(other) => {
                    return Err(VocabError::invalid_document(format!(
                        "'vocabulary' must be an array, found {}",
                        json_kind(&other)
                    )))
                }
                None => {
                    return Err(VocabError::invalid_document(
                        "expected a top-level 'vocabulary' array",
                    ))
                }
            },
            other => {
                return Err(VocabError::invalid_document(format!(
                    "expected an object or array, found {}",
                    json_kind(&other)
                )))
            }
        };

        let records = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| parse_record(index, entry))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(records))
    }

    /// Write `{"vocabulary": [...]}` as pretty UTF-8 JSON
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(
            writer,
            &DocumentRef {
                vocabulary: &self.records,
            },
        )?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(fs::File::create(path.as_ref())?);
        self.to_writer(&mut writer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    #[must_use]
    pub fn records(&self) -> &[VocabularyRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<VocabularyRecord>> for VocabularyCollection {
    fn from(records: Vec<VocabularyRecord>) -> Self {
        Self::new(records)
    }
}

/// Records bucketed by level, input order kept inside each bucket
#[must_use]
pub fn group_by_level(
    records: &[VocabularyRecord],
) -> BTreeMap<CefrLevel, Vec<&VocabularyRecord>> {
    let mut buckets: BTreeMap<CefrLevel, Vec<&VocabularyRecord>> = BTreeMap::new();
    for record in records {
        buckets.entry(record.level).or_default().push(record);
    }
    buckets
}

fn parse_record(index: usize, entry: Value) -> Result<VocabularyRecord> {
    let Value::Object(map) = &entry else {
        return Err(VocabError::invalid_field(
            index,
            "record",
            format!("expected an object, found {}", json_kind(&entry)),
        ));
    };

    let term = match map.get("bg") {
        None | Some(Value::Null) => {
            return Err(VocabError::MissingField { index, field: "bg" });
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(VocabError::MissingField { index, field: "bg" });
        }
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(VocabError::invalid_field(
                index,
                "bg",
                format!("expected a string, found {}", json_kind(other)),
            ));
        }
    };

    match map.get("level") {
        None | Some(Value::Null) => {
            return Err(VocabError::MissingField {
                index,
                field: "level",
            });
        }
        Some(Value::String(level)) => {
            if level.parse::<CefrLevel>().is_err() {
                return Err(VocabError::UnknownLevel {
                    index,
                    term,
                    level: level.clone(),
                });
            }
        }
        Some(other) => {
            return Err(VocabError::invalid_field(
                index,
                "level",
                format!("expected a string, found {}", json_kind(other)),
            ));
        }
    }

    serde_json::from_value(entry)
        .map_err(|err| VocabError::invalid_field(index, "record", err.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn loads_wrapped_and_bare_documents() {
        let wrapped = r#"{"vocabulary":[{"bg":"вода","de":"Wasser","level":"A1"}]}"#;
        let bare = r#"[{"bg":"вода","de":"Wasser","level":"A1"}]"#;
        let a = VocabularyCollection::from_slice(wrapped.as_bytes()).unwrap();
        let b = VocabularyCollection::from_slice(bare.as_bytes()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn empty_collection_is_valid() {
        let collection = VocabularyCollection::from_slice(br#"{"vocabulary":[]}"#).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn missing_source_term_reports_index() {
        let json = r#"{"vocabulary":[
            {"bg":"вода","level":"A1"},
            {"de":"Brot","level":"A1"}
        ]}"#;
        let err = VocabularyCollection::from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, VocabError::MissingField { index: 1, field: "bg" }));
    }

    #[test]
    fn missing_level_is_rejected() {
        let err = VocabularyCollection::from_slice(r#"[{"bg":"вода"}]"#.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            VocabError::MissingField {
                index: 0,
                field: "level"
            }
        ));
    }

    #[test]
    fn unknown_level_names_the_term() {
        let err =
            VocabularyCollection::from_slice(r#"[{"bg":"вода","level":"X9"}]"#.as_bytes())
                .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("вода"), "{message}");
        assert!(message.contains("X9"), "{message}");
    }

    #[test]
    fn rejects_non_array_vocabulary() {
        let err = VocabularyCollection::from_slice(br#"{"vocabulary":{}}"#).unwrap_err();
        assert!(matches!(err, VocabError::InvalidDocument(_)));
    }

    #[test]
    fn repeated_tags_collapse_on_load() {
        let json = r#"[{"bg":"вода","level":"A1","tags":["drink","drink","noun"]}]"#;
        let collection = VocabularyCollection::from_slice(json.as_bytes()).unwrap();
        assert_eq!(
            collection.records()[0].tags,
            vec!["drink".to_string(), "noun".to_string()]
        );
    }

    #[test]
    fn group_by_level_keeps_input_order() {
        let collection = VocabularyCollection::new(vec![
            VocabularyRecord::new("a", "", CefrLevel::A2),
            VocabularyRecord::new("b", "", CefrLevel::A1),
            VocabularyRecord::new("c", "", CefrLevel::A2),
        ]);
        let buckets = group_by_level(collection.records());
        let a2: Vec<&str> = buckets[&CefrLevel::A2].iter().map(|r| r.bg.as_str()).collect();
        assert_eq!(a2, vec!["a", "c"]);
        assert_eq!(buckets[&CefrLevel::A1].len(), 1);
    }
}
