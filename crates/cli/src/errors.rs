use serde_json::json;
use std::fmt;
use vocab_graph::GraphError;
use vocab_model::VocabError;
use vocab_progression::{ProgressionError, ProgressionProfile};
use vocab_protocol::ErrorEnvelope;

/// Context marker attached to profile resolution failures
#[derive(Debug, Clone)]
pub struct InvalidProfile(pub String);

impl fmt::Display for InvalidProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid profile '{}'", self.0)
    }
}

/// Map an error chain onto a stable code, optional details and a hint
pub fn classify_error(err: &anyhow::Error) -> ErrorEnvelope {
    let message = format!("{err:#}");

    if let Some(profile) = err.downcast_ref::<InvalidProfile>() {
        return ErrorEnvelope {
            code: "invalid_profile".to_string(),
            message,
            details: Some(json!({ "profile": profile.0 })),
            hint: Some(format!(
                "Use a builtin profile ({}) or fix the fields named in the message.",
                ProgressionProfile::BUILTIN_NAMES.join(", ")
            )),
        };
    }

    if let Some(progression) = err.downcast_ref::<ProgressionError>() {
        return match progression {
            ProgressionError::CyclicDependency { cycle } => ErrorEnvelope {
                code: "cyclic_dependency".to_string(),
                message,
                details: Some(json!({
                    "units": progression.cycle_units(),
                    "cycle": cycle,
                })),
                hint: Some(
                    "These units need each other's terms; break a related_forms or semantic_field link between them."
                        .to_string(),
                ),
            },
            ProgressionError::Graph(graph) => graph_envelope(graph, message),
        };
    }

    if let Some(graph) = err.downcast_ref::<GraphError>() {
        return graph_envelope(graph, message);
    }

    if let Some(vocab) = err.downcast_ref::<VocabError>() {
        let (code, details) = match vocab {
            VocabError::IoError(_) => ("io_error", None),
            VocabError::JsonError(_) | VocabError::InvalidDocument(_) => ("invalid_input", None),
            VocabError::MissingField { index, field } => (
                "invalid_input",
                Some(json!({ "record": index, "field": field })),
            ),
            VocabError::InvalidField { index, field, .. } => (
                "invalid_input",
                Some(json!({ "record": index, "field": field })),
            ),
            VocabError::UnknownLevel { index, term, level } => (
                "invalid_input",
                Some(json!({ "record": index, "term": term, "level": level })),
            ),
        };
        let hint = if code == "io_error" {
            "Check that the input file exists and is readable."
        } else {
            "Each record needs a non-empty 'bg' and a CEFR 'level' (A1-C2)."
        };
        return ErrorEnvelope {
            code: code.to_string(),
            message,
            details,
            hint: Some(hint.to_string()),
        };
    }

    if err.downcast_ref::<std::io::Error>().is_some() {
        return ErrorEnvelope {
            code: "io_error".to_string(),
            message,
            details: None,
            hint: Some("Check that the output location is writable.".to_string()),
        };
    }

    ErrorEnvelope {
        code: "internal".to_string(),
        message,
        details: None,
        hint: None,
    }
}

fn graph_envelope(err: &GraphError, message: String) -> ErrorEnvelope {
    match err {
        GraphError::TermNotFound(term) => ErrorEnvelope {
            code: "invalid_input".to_string(),
            message,
            details: Some(json!({ "term": term })),
            hint: Some("The term is not part of the vocabulary collection.".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use pretty_assertions::assert_eq;

    #[test]
    fn cycle_reports_member_units() {
        let err = anyhow::Error::from(ProgressionError::CyclicDependency {
            cycle: vec!["A1:x".into(), "A1:y".into(), "A1:x".into()],
        })
        .context("Failed to plan input.json");

        let envelope = classify_error(&err);
        assert_eq!(envelope.code, "cyclic_dependency");
        assert_eq!(
            envelope.details,
            Some(json!({
                "units": ["A1:x", "A1:y"],
                "cycle": ["A1:x", "A1:y", "A1:x"],
            }))
        );
        assert!(envelope.message.contains("A1:x -> A1:y -> A1:x"));
    }

    #[test]
    fn missing_field_is_invalid_input() {
        let result: Result<(), VocabError> = Err(VocabError::MissingField {
            index: 2,
            field: "level",
        });
        let err = result.context("Failed to load vocabulary").unwrap_err();

        let envelope = classify_error(&err);
        assert_eq!(envelope.code, "invalid_input");
        assert_eq!(envelope.details, Some(json!({ "record": 2, "field": "level" })));
    }

    #[test]
    fn profile_marker_wins_over_inner_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = anyhow::Error::from(io)
            .context("Failed to read profile file nope.json")
            .context(InvalidProfile("nope.json".into()));

        let envelope = classify_error(&err);
        assert_eq!(envelope.code, "invalid_profile");
        assert!(envelope.message.starts_with("Invalid profile 'nope.json'"));
        assert_eq!(
            envelope.hint.as_deref(),
            Some("Use a builtin profile (default, full) or fix the fields named in the message.")
        );
    }

    #[test]
    fn unknown_errors_are_internal() {
        let envelope = classify_error(&anyhow::anyhow!("boom"));
        assert_eq!(envelope.code, "internal");
        assert_eq!(envelope.hint, None);
    }
}
