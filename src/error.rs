//! Crate error type.
//!
//! Only caller contract violations are errors. Bad data (unknown codes,
//! mismatched lengths, unknown worker IDs) is repaired in place and, where
//! it matters to a user, reported as a warning in the output.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by rostering operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    /// Month, year, streak limits, or roster IDs violate the call contract.
    #[error("invalid configuration: {}", join_messages(.0))]
    InvalidConfiguration(Vec<ValidationError>),

    /// A state operation referenced a worker that is not on the roster.
    #[error("unknown worker: {0}")]
    UnknownWorker(String),
}

impl RosterError {
    /// Wraps a single validation error.
    pub fn invalid(error: ValidationError) -> Self {
        RosterError::InvalidConfiguration(vec![error])
    }

    /// Validation errors carried by this error (empty for other kinds).
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            RosterError::InvalidConfiguration(errors) => errors,
            RosterError::UnknownWorker(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for RosterError {
    fn from(errors: Vec<ValidationError>) -> Self {
        RosterError::InvalidConfiguration(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_joins_messages() {
        let err = RosterError::from(vec![
            ValidationError::new(ValidationErrorKind::InvalidMonth, "bad month"),
            ValidationError::new(ValidationErrorKind::InvalidYear, "bad year"),
        ]);
        assert_eq!(err.to_string(), "invalid configuration: bad month; bad year");
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_unknown_worker() {
        let err = RosterError::UnknownWorker("w9".into());
        assert_eq!(err.to_string(), "unknown worker: w9");
        assert!(err.validation_errors().is_empty());
    }
}
