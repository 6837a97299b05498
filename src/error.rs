use thiserror::Error;

/// Errors raised by the scoring engine.
///
/// Only structurally invalid questionnaire documents are errors. Absent
/// answers and unrecognized option values score zero instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Invalid input: field '{field}' must be {expected}")]
    InvalidInput {
        field: String,
        expected: &'static str,
    },
}

impl ScoringError {
    pub fn invalid(field: impl Into<String>, expected: &'static str) -> Self {
        ScoringError::InvalidInput {
            field: field.into(),
            expected,
        }
    }

    /// Name of the offending questionnaire field
    pub fn field(&self) -> &str {
        match self {
            ScoringError::InvalidInput { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = ScoringError::invalid("certifications", "a list of strings");
        assert_eq!(
            err.to_string(),
            "Invalid input: field 'certifications' must be a list of strings"
        );
        assert_eq!(err.field(), "certifications");
    }
}
