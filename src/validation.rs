//! Configuration validation for roster requests.
//!
//! Checks the call contract before building. Detects:
//! - Month outside 1..=12
//! - Year outside 1..=9999
//! - Streak limits below 1
//! - Duplicate worker IDs
//!
//! Everything else (bad slot codes, ragged rows, unknown IDs in prior rows)
//! is data quality, not configuration, and is repaired by the callers.

use crate::models::{Settings, Worker};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Month is not a calendar month.
    InvalidMonth,
    /// Year is zero, negative, or out of range.
    InvalidYear,
    /// A `maxStreak` limit is below 1.
    InvalidStreakLimit,
    /// Two workers share the same ID.
    DuplicateId,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Highest accepted year.
pub const MAX_YEAR: i32 = 9999;

/// Validates the inputs of a build request.
///
/// Checks:
/// 1. Month within 1..=12
/// 2. Year within 1..=`MAX_YEAR`
/// 3. Every streak limit at least 1
/// 4. No duplicate worker IDs
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(
    month: u32,
    year: i32,
    settings: &Settings,
    workers: &[Worker],
) -> ValidationResult {
    let mut errors = validate_period(month, year).err().unwrap_or_default();

    if let Err(streak_errors) = settings.validate() {
        errors.extend(streak_errors);
    }

    let mut ids = HashSet::new();
    for w in workers {
        if !ids.insert(w.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate worker ID: {}", w.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a (month, year) pair on its own.
pub fn validate_period(month: u32, year: i32) -> ValidationResult {
    let mut errors = Vec::new();

    if !(1..=12).contains(&month) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidMonth,
            format!("Month must be within 1..=12, got {month}"),
        ));
    }
    if !(1..=MAX_YEAR).contains(&year) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidYear,
            format!("Year must be within 1..={MAX_YEAR}, got {year}"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
