//! Compilation errors.
//!
//! Every error here aborts compilation before a model is built; no
//! partial model is ever returned. Infeasible or unbounded models are not
//! errors: they are solver statuses ([`crate::mip::SolveStatus`]) and are
//! reported through the outcome types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while turning scheduling input into a model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// A worker references a rule that is not defined.
    #[error("worker '{worker_id}' references undefined rule '{rule_id}'")]
    UndefinedRule {
        /// The referencing worker.
        worker_id: String,
        /// The missing rule.
        rule_id: String,
    },

    /// A worker references a rule id that is defined more than once.
    #[error("worker '{worker_id}' references rule '{rule_id}', which is defined more than once")]
    DuplicateRule {
        /// The referencing worker.
        worker_id: String,
        /// The ambiguous rule.
        rule_id: String,
    },

    /// Neither the time slot nor its template define a cost.
    #[error("shift '{template_id}' time '{slot_id}' has no cost")]
    MissingCost {
        /// Template without a cost.
        template_id: String,
        /// Slot without a cost override.
        slot_id: String,
    },

    /// Structural problems found by input validation.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A timestamp could not be parsed.
    #[error("invalid timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The offending text.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The requested solver backend is not supported.
    #[error("unsupported solver backend '{requested}', supported backends: {supported}")]
    UnsupportedBackend {
        /// The requested identifier.
        requested: String,
        /// Comma-separated list of supported identifiers.
        supported: String,
    },
}

impl CompileError {
    /// Whether this error stems from the problem configuration
    /// (as opposed to the choice of solver backend).
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::UnsupportedBackend { .. })
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_messages() {
        let e = CompileError::UndefinedRule {
            worker_id: "w1".into(),
            rule_id: "r9".into(),
        };
        assert_eq!(e.to_string(), "worker 'w1' references undefined rule 'r9'");

        let e = CompileError::MissingCost {
            template_id: "early".into(),
            slot_id: "mon".into(),
        };
        assert_eq!(e.to_string(), "shift 'early' time 'mon' has no cost");
    }

    #[test]
    fn test_invalid_input_summary() {
        let e = CompileError::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate shift ID: s1"),
            ValidationError::new(ValidationErrorKind::InvalidWindow, "Shift 's2' has an empty window"),
        ]);
        assert_eq!(
            e.to_string(),
            "invalid input: Duplicate shift ID: s1; Shift 's2' has an empty window"
        );
    }

    #[test]
    fn test_is_configuration() {
        let backend = CompileError::UnsupportedBackend {
            requested: "cplex".into(),
            supported: "cbc".into(),
        };
        assert!(!backend.is_configuration());
        let config = CompileError::DuplicateRule {
            worker_id: "w".into(),
            rule_id: "r".into(),
        };
        assert!(config.is_configuration());
    }
}
