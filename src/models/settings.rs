//! Roster-wide settings.

use serde::{Deserialize, Serialize};

use crate::models::ShiftType;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Maximum consecutive days for day shifts, night shifts, and any work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxStreak {
    #[serde(rename = "D")]
    pub day: u32,
    #[serde(rename = "N")]
    pub night: u32,
    #[serde(rename = "ANY")]
    pub any: u32,
}

impl Default for MaxStreak {
    fn default() -> Self {
        Self {
            day: 3,
            night: 2,
            any: 3,
        }
    }
}

impl MaxStreak {
    /// Creates streak limits.
    pub fn new(day: u32, night: u32, any: u32) -> Self {
        Self { day, night, any }
    }

    /// Limit for consecutive shifts of one type.
    pub fn for_shift(&self, shift: ShiftType) -> u32 {
        match shift {
            ShiftType::Day => self.day,
            ShiftType::Night => self.night,
        }
    }
}

/// Builder settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub max_streak: MaxStreak,
}

impl Settings {
    /// Creates settings with the given streak limits.
    pub fn new(max_streak: MaxStreak) -> Self {
        Self { max_streak }
    }

    /// Checks that every streak limit is at least 1.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let limits = [
            ("D", self.max_streak.day),
            ("N", self.max_streak.night),
            ("ANY", self.max_streak.any),
        ];
        let errors: Vec<ValidationError> = limits
            .iter()
            .filter(|(_, value)| *value < 1)
            .map(|(key, value)| {
                ValidationError::new(
                    ValidationErrorKind::InvalidStreakLimit,
                    format!("maxStreak.{key} must be at least 1, got {value}"),
                )
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
