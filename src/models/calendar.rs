//! Month calendar model.
//!
//! Produces the canonical ordered day list for a month: day number,
//! weekday index, and weekend flags. Every row of a schedule has exactly
//! one slot per entry of this list.
//!
//! # Weekday Convention
//! Weekday indexes run from 0 = Sunday to 6 = Saturday. The same index is
//! used for `Worker::blocked_shifts` keys, so the builder, the insight
//! analyzer, and the weekend flags agree on which day is which.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::validation::{validate_period, ValidationError, ValidationErrorKind};

/// Short weekday labels, indexed by weekday (0 = Sunday).
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Weekday index of Saturday.
pub const SATURDAY: u8 = 6;
/// Weekday index of Sunday.
pub const SUNDAY: u8 = 0;

/// One calendar day of a scheduled month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Day of month (1-based).
    pub day: u32,
    /// Weekday index (0 = Sunday .. 6 = Saturday).
    pub weekday: u8,
    /// Short weekday label.
    pub weekday_label: String,
    pub is_saturday: bool,
    pub is_sunday: bool,
    /// Calendar date.
    pub date: NaiveDate,
}

impl Day {
    /// Builds the day record for a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        let weekday = date.weekday().num_days_from_sunday() as u8;
        Self {
            day: date.day(),
            weekday,
            weekday_label: WEEKDAY_LABELS[weekday as usize].to_string(),
            is_saturday: weekday == SATURDAY,
            is_sunday: weekday == SUNDAY,
            date,
        }
    }

    /// Whether the day falls on a weekend.
    #[inline]
    pub fn is_weekend(&self) -> bool {
        self.is_saturday || self.is_sunday
    }
}

/// Computes the ordered day list for a month.
///
/// Returns `InvalidConfiguration` if `month` is outside 1..=12 or the
/// year cannot be represented.
///
/// # Example
/// ```
/// use u_roster::models::compute_days;
///
/// let days = compute_days(2, 2024).unwrap();
/// assert_eq!(days.len(), 29); // leap year
/// assert_eq!(days[0].weekday, 4); // 2024-02-01 is a Thursday
/// ```
pub fn compute_days(month: u32, year: i32) -> Result<Vec<Day>, RosterError> {
    let first = first_of_month(month, year)?;
    let count = days_in_month(month, year)?;
    Ok(first
        .iter_days()
        .take(count as usize)
        .map(Day::from_date)
        .collect())
}

/// Number of days in a month (leap years handled).
pub fn days_in_month(month: u32, year: i32) -> Result<u32, RosterError> {
    let first = first_of_month(month, year)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    Ok(next.map_or(31, |next| (next - first).num_days() as u32))
}

/// Weekday index (0 = Sunday) of a specific date, if the date exists.
pub fn weekday_index(year: i32, month: u32, day: u32) -> Option<u8> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.weekday().num_days_from_sunday() as u8)
}

fn first_of_month(month: u32, year: i32) -> Result<NaiveDate, RosterError> {
    validate_period(month, year)?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        RosterError::invalid(ValidationError::new(
            ValidationErrorKind::InvalidYear,
            format!("Year {year} is out of range"),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_counts() {
        assert_eq!(compute_days(1, 2025).unwrap().len(), 31);
        assert_eq!(compute_days(2, 2025).unwrap().len(), 28);
        assert_eq!(compute_days(2, 2024).unwrap().len(), 29);
        assert_eq!(compute_days(2, 1900).unwrap().len(), 28); // century, not leap
        assert_eq!(compute_days(2, 2000).unwrap().len(), 29);
        assert_eq!(compute_days(4, 2025).unwrap().len(), 30);
        assert_eq!(compute_days(12, 2025).unwrap().len(), 31);
    }

    #[test]
    fn test_weekday_convention() {
        // 2025-01-05 is a Sunday, 2025-01-06 a Monday, 2025-01-11 a Saturday.
        let days = compute_days(1, 2025).unwrap();
        assert_eq!(days[4].weekday, 0);
        assert!(days[4].is_sunday);
        assert_eq!(days[4].weekday_label, "Sun");
        assert_eq!(days[5].weekday, 1);
        assert!(!days[5].is_weekend());
        assert_eq!(days[10].weekday, 6);
        assert!(days[10].is_saturday);
    }

    #[test]
    fn test_days_are_ordered() {
        let days = compute_days(3, 2025).unwrap();
        for (i, d) in days.iter().enumerate() {
            assert_eq!(d.day, i as u32 + 1);
            assert_eq!(d.date, NaiveDate::from_ymd_opt(2025, 3, d.day).unwrap());
        }
    }

    #[test]
    fn test_invalid_month() {
        assert!(compute_days(0, 2025).is_err());
        assert!(compute_days(13, 2025).is_err());
        assert!(compute_days(1, 0).is_err());
    }

    #[test]
    fn test_weekday_index() {
        assert_eq!(weekday_index(2025, 1, 6), Some(1));
        assert_eq!(weekday_index(2025, 2, 30), None);
    }
}
