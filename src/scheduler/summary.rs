//! Per-worker hour summary.
//!
//! Computes shift counts, total hours, and overtime for each row of a
//! completed schedule.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total hours | (D + N) × shift hours |
//! | Overtime | max(0, total − max hours) |
//! | Holidays | Count of `U` cells (0 hours) |
//!
//! Warnings are independent and may combine: no shifts at all, more than
//! [`HOURS_CEILING`] hours, and more than the worker's own limit.

use std::collections::HashMap;

use crate::models::{
    Schedule, Slot, SummaryEntry, Worker, DEFAULT_MAX_HOURS, DEFAULT_SHIFT_HOURS,
};

/// Absolute monthly hour ceiling, independent of worker settings.
pub const HOURS_CEILING: u32 = 168;

/// Computes one summary entry per schedule row, in row order.
///
/// Rows whose worker is missing from `workers` (e.g., deleted after the
/// schedule was built) use the default shift length and hour limit.
///
/// # Example
/// ```
/// use u_roster::models::{Schedule, ScheduleRow, Slot, Worker};
/// use u_roster::scheduler::summarize;
///
/// let mut schedule = Schedule::default();
/// schedule.rows.push(ScheduleRow {
///     id: "w1".into(),
///     name: "Alex".into(),
///     slots: vec![Slot::DayShift, Slot::NightShift, Slot::Holiday],
///     locks: vec![false; 3],
/// });
/// let workers = vec![Worker::new("w1", "Alex").with_max_hours(18)];
///
/// let summary = summarize(&schedule, &workers);
/// assert_eq!(summary[0].total_hours, 24);
/// assert_eq!(summary[0].overtime_hours, 6);
/// ```
pub fn summarize(schedule: &Schedule, workers: &[Worker]) -> Vec<SummaryEntry> {
    let by_id: HashMap<&str, &Worker> = workers.iter().map(|w| (w.id.as_str(), w)).collect();

    schedule
        .rows
        .iter()
        .map(|row| {
            let worker = by_id.get(row.id.as_str());
            let shift_hours = worker.map_or(DEFAULT_SHIFT_HOURS, |w| w.shift_hours);
            let max_hours = worker.map_or(DEFAULT_MAX_HOURS, |w| w.max_hours);

            let day_count = row.count(Slot::DayShift) as u32;
            let night_count = row.count(Slot::NightShift) as u32;
            let holiday_count = row.count(Slot::Holiday) as u32;
            let total_hours = (day_count + night_count).saturating_mul(shift_hours);
            let overtime_hours = total_hours.saturating_sub(max_hours);

            let mut warnings = Vec::new();
            if total_hours == 0 {
                warnings.push(format!("{} has no assigned shifts.", row.name));
            }
            if total_hours > HOURS_CEILING {
                warnings.push(format!(
                    "{} exceeds {HOURS_CEILING}h by {}h.",
                    row.name,
                    total_hours - HOURS_CEILING
                ));
            }
            if total_hours > max_hours {
                warnings.push(format!(
                    "{} is scheduled for {total_hours}h against a limit of {max_hours}h.",
                    row.name
                ));
            }

            SummaryEntry {
                name: row.name.clone(),
                total_hours,
                day_count,
                night_count,
                holiday_count,
                overtime_hours,
                warnings,
            }
        })
        .collect()
}
