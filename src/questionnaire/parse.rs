use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use super::types::{ContactInfo, QuestionnaireResponse};
use crate::error::ScoringError;

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    /// Single-choice answer
    Choice,
    /// Multi-select list of tags
    Tags,
    /// Number or numeric string
    Years,
    Count,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            FieldKind::Choice => "a single option string",
            FieldKind::Tags => "a list of strings",
            FieldKind::Years => "a number or numeric string",
            FieldKind::Count => "a whole number from 0 to 255",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (FieldKind::Choice, Value::String(_) | Value::Number(_) | Value::Bool(_)) => true,
            (FieldKind::Tags, Value::Array(items)) => items.iter().all(Value::is_string),
            (FieldKind::Years, Value::String(_) | Value::Number(_)) => true,
            (FieldKind::Count, Value::Number(n)) => n.as_u64().is_some_and(|n| n <= u8::MAX as u64),
            _ => false,
        }
    }
}

const SCORED_FIELDS: &[(&str, FieldKind)] = &[
    ("companySize", FieldKind::Choice),
    ("experience", FieldKind::Years),
    ("headquarters", FieldKind::Choice),
    ("latamExp", FieldKind::Choice),
    ("productTypes", FieldKind::Tags),
    ("deviceClass", FieldKind::Choice),
    ("healthData", FieldKind::Choice),
    ("certifications", FieldKind::Tags),
    ("clv", FieldKind::Choice),
    ("spanish", FieldKind::Choice),
    ("vigilance", FieldKind::Choice),
    ("standards", FieldKind::Tags),
    ("dataResidency", FieldKind::Choice),
    ("support", FieldKind::Choice),
    ("budget", FieldKind::Choice),
    ("entity", FieldKind::Choice),
    ("segments", FieldKind::Tags),
    ("procurement", FieldKind::Choice),
    ("selectedMarkets", FieldKind::Tags),
    ("timeline", FieldKind::Choice),
    ("multiCountry", FieldKind::Count),
];

/// Check the shape of a raw questionnaire document and deserialize it.
///
/// Fails only for structurally invalid input: a root that is not an object,
/// or a field holding the wrong kind of value (e.g. `certifications: "fda"`).
/// Missing fields and unknown option values are accepted.
pub fn parse_questionnaire(document: &Value) -> Result<QuestionnaireResponse, ScoringError> {
    let fields = document
        .as_object()
        .ok_or_else(|| ScoringError::invalid("responses", "an object"))?;

    let normalized = normalize_fields(fields)?;

    serde_json::from_value(Value::Object(normalized))
        .map_err(|_| ScoringError::invalid("responses", "a questionnaire object"))
}

/// Extract the contact block carried alongside the answers
pub fn parse_contact(document: &Value) -> Result<ContactInfo, ScoringError> {
    if !document.is_object() {
        return Err(ScoringError::invalid("contact", "an object"));
    }
    serde_json::from_value(document.clone())
        .map_err(|_| ScoringError::invalid("contact", "string contact fields"))
}

fn normalize_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, ScoringError> {
    let mut normalized = fields.clone();

    for (name, kind) in SCORED_FIELDS {
        let Some(value) = normalized.get_mut(*name) else {
            continue;
        };
        if !kind.accepts(value) {
            return Err(ScoringError::invalid(*name, kind.expected()));
        }

        // YAML writes `deviceClass: 2` and `clv: yes` without quotes
        if let FieldKind::Choice = kind {
            let replacement = match value {
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(true) => Some("yes".to_string()),
                Value::Bool(false) => Some("no".to_string()),
                _ => None,
            };
            if let Some(text) = replacement {
                *value = Value::String(text);
            }
        }
    }

    Ok(normalized)
}

/// Read a questionnaire document from disk.
///
/// YAML is a superset of JSON, so one parser covers both formats.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read questionnaire at {}", path.display()))?;

    let document: Value = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse questionnaire: invalid YAML in {}", path.display()))?;

    Ok(document)
}
