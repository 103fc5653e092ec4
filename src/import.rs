//! Defensive normalization of externally supplied schedules.
//!
//! Import documents are hand-edited or produced by other tools, so nothing
//! in them is trusted: days are recomputed from the requested month, rows
//! are reshaped to the canonical length, and unknown values are replaced
//! rather than rejected.
//!
//! # Coercion Rules
//!
//! | Field | Accepted | Otherwise |
//! |-------|----------|-----------|
//! | `days` | ignored | recomputed from (month, year) |
//! | `rows` | array | no rows |
//! | row | object | skipped |
//! | `id`, `name` | string, number, bool | empty string |
//! | `slots[i]` | `"D"`, `"N"`, `"U"` | unassigned |
//! | `locks[i]` | `true`, `false` | `false` |
//!
//! Worker IDs are not checked against any roster.

use serde_json::Value;
use tracing::info;

use crate::error::RosterError;
use crate::models::{compute_days, Schedule, ScheduleRow, Slot};

/// Normalizes a raw schedule document for `month`/`year`.
///
/// Fails only if `month`/`year` themselves are invalid.
///
/// # Example
/// ```
/// use serde_json::json;
/// use u_roster::import::normalize;
/// use u_roster::models::Slot;
///
/// let raw = json!({
///     "days": [{ "day": 1 }, { "day": 2 }],
///     "rows": [{ "id": "w1", "name": "A", "slots": ["D", "X"], "locks": [true, ""] }]
/// });
/// let schedule = normalize(&raw, 1, 2025).unwrap();
/// assert_eq!(schedule.days.len(), 31);
/// assert_eq!(schedule.rows[0].slots[0], Slot::DayShift);
/// assert_eq!(schedule.rows[0].slots[1], Slot::Unassigned);
/// assert!(!schedule.rows[0].locks[1]);
/// ```
pub fn normalize(raw: &Value, month: u32, year: i32) -> Result<Schedule, RosterError> {
    let days = compute_days(month, year)?;
    let len = days.len();

    let rows: Vec<ScheduleRow> = raw
        .get("rows")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter(|row| row.is_object())
                .map(|row| normalize_row(row, len))
                .collect()
        })
        .unwrap_or_default();

    info!(month, year, rows = rows.len(), "normalized imported schedule");

    let mut schedule = Schedule::new(month, year, days);
    schedule.rows = rows;
    Ok(schedule)
}

fn normalize_row(raw: &Value, len: usize) -> ScheduleRow {
    let slots = (0..len)
        .map(|i| {
            raw.get("slots")
                .and_then(|slots| slots.get(i))
                .and_then(Value::as_str)
                .and_then(Slot::from_code)
                .unwrap_or(Slot::Unassigned)
        })
        .collect();
    let locks = (0..len)
        .map(|i| {
            raw.get("locks")
                .and_then(|locks| locks.get(i))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        })
        .collect();

    ScheduleRow {
        id: coerce_string(raw.get("id")),
        name: coerce_string(raw.get("name")),
        slots,
        locks,
    }
}

fn coerce_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
