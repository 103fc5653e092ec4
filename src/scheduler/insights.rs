//! Fatigue and policy insights for a completed schedule.
//!
//! Three scans, each in row order with days ascending:
//!
//! 1. **Night → day**: a night shift directly followed by a day shift.
//! 2. **Blocked shifts**: a shift placed on a weekday the worker blocked
//!    (possible through locks or manual edits).
//! 3. **Streak overruns**: runs of D, N, or any work longer than the
//!    configured limits.
//!
//! Hour totals and overtime are reported by [`summarize`](super::summarize)
//! and are not repeated here.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{weekday_index, Schedule, ScheduleRow, Settings, ShiftType, Slot, Worker};

/// A grid cell reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRef {
    pub row_index: usize,
    pub day_index: usize,
}

/// Cells where a day shift follows a night shift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightToDay {
    /// The day-shift cell of each N→D pair.
    pub cells: Vec<CellRef>,
}

/// Which streak limit a run exceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreakKind {
    #[serde(rename = "D")]
    Day,
    #[serde(rename = "N")]
    Night,
    #[serde(rename = "ANY")]
    Any,
}

impl StreakKind {
    fn matches(self, slot: Slot) -> bool {
        match self {
            StreakKind::Day => slot == Slot::DayShift,
            StreakKind::Night => slot == Slot::NightShift,
            StreakKind::Any => slot.is_worked(),
        }
    }

    fn limit(self, settings: &Settings) -> u32 {
        match self {
            StreakKind::Day => settings.max_streak.for_shift(ShiftType::Day),
            StreakKind::Night => settings.max_streak.for_shift(ShiftType::Night),
            StreakKind::Any => settings.max_streak.any,
        }
    }

    fn label(self) -> &'static str {
        match self {
            StreakKind::Day => "D",
            StreakKind::Night => "N",
            StreakKind::Any => "worked",
        }
    }
}

/// A maximal run longer than its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRun {
    pub row_index: usize,
    pub kind: StreakKind,
    /// First day index of the run.
    pub start: usize,
    /// Last day index of the run (inclusive).
    pub end: usize,
    pub limit: u32,
}

impl StreakRun {
    /// Number of days in the run.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always `false`; runs span at least one day.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Streak overruns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRuns {
    pub runs: Vec<StreakRun>,
}

/// Derived diagnostics for a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub night_to_day: NightToDay,
    pub streaks: StreakRuns,
    /// Human-readable warnings, in scan order.
    pub warnings: Vec<String>,
}

/// Scans a schedule for fatigue and policy patterns.
///
/// Weekdays are recomputed from `month`/`year` and each day's number, so
/// the scan does not depend on the weekday fields stored in the document.
///
/// # Example
/// ```
/// use u_roster::models::{Schedule, ScheduleRow, Settings, Slot, Worker};
/// use u_roster::scheduler::derive_insights;
///
/// let mut schedule = Schedule::default();
/// schedule.rows.push(ScheduleRow {
///     id: "w1".into(),
///     name: "Alex".into(),
///     slots: vec![Slot::NightShift, Slot::DayShift],
///     locks: vec![false; 2],
/// });
/// let workers = vec![Worker::new("w1", "Alex")];
///
/// let insights = derive_insights(&schedule, 1, 2025, &workers, &Settings::default());
/// assert_eq!(insights.night_to_day.cells[0].day_index, 1);
/// assert!(insights.warnings[0].contains("N→D"));
/// ```
pub fn derive_insights(
    schedule: &Schedule,
    month: u32,
    year: i32,
    workers: &[Worker],
    settings: &Settings,
) -> Insights {
    let by_id: HashMap<&str, &Worker> = workers.iter().map(|w| (w.id.as_str(), w)).collect();
    let day_number = |day_index: usize| -> u32 {
        schedule
            .days
            .get(day_index)
            .map_or(day_index as u32 + 1, |d| d.day)
    };

    let mut insights = Insights::default();

    // Night → day transitions.
    for (row_index, row) in schedule.rows.iter().enumerate() {
        for (i, pair) in row.slots.windows(2).enumerate() {
            if pair[0] == Slot::NightShift && pair[1] == Slot::DayShift {
                let day_index = i + 1;
                insights.night_to_day.cells.push(CellRef {
                    row_index,
                    day_index,
                });
                insights.warnings.push(format!(
                    "{}: N→D transition on day {} (day shift right after a night shift).",
                    row.name,
                    day_number(day_index)
                ));
            }
        }
    }

    // Blocked weekday/shift combinations.
    for row in &schedule.rows {
        let Some(worker) = by_id.get(row.id.as_str()) else {
            continue;
        };
        for (day_index, slot) in row.slots.iter().enumerate() {
            let Some(shift) = slot.shift() else {
                continue;
            };
            let day = day_number(day_index);
            let weekday = weekday_index(year, month, day)
                .or_else(|| schedule.days.get(day_index).map(|d| d.weekday));
            if weekday.is_some_and(|wd| worker.is_blocked(wd, shift)) {
                insights.warnings.push(format!(
                    "{} is assigned shift {} on day {} despite a block on {}.",
                    row.name, shift, day, shift
                ));
            }
        }
    }

    // Streak overruns.
    for (row_index, row) in schedule.rows.iter().enumerate() {
        for run in streak_overruns(row_index, row, settings) {
            let range = format_date_range(
                date_of(year, month, day_number(run.start)),
                date_of(year, month, day_number(run.end)),
            );
            insights.warnings.push(format!(
                "{}: {} consecutive {} days ({}) exceed the limit of {}.",
                row.name,
                run.len(),
                run.kind.label(),
                range,
                run.limit
            ));
            insights.streaks.runs.push(run);
        }
    }

    insights
}

/// Maximal runs in a row that exceed their limit, ordered by start day.
fn streak_overruns(row_index: usize, row: &ScheduleRow, settings: &Settings) -> Vec<StreakRun> {
    let mut runs = Vec::new();
    for kind in [StreakKind::Day, StreakKind::Night, StreakKind::Any] {
        let limit = kind.limit(settings);
        let mut start: Option<usize> = None;
        // Sentinel pass one past the end closes a trailing run.
        for i in 0..=row.slots.len() {
            let hit = row.slots.get(i).is_some_and(|&s| kind.matches(s));
            match (hit, start) {
                (true, None) => start = Some(i),
                (false, Some(s)) => {
                    if (i - s) as u32 > limit {
                        runs.push(StreakRun {
                            row_index,
                            kind,
                            start: s,
                            end: i - 1,
                            limit,
                        });
                    }
                    start = None;
                }
                _ => {}
            }
        }
    }
    runs.sort_by_key(|r| r.start);
    runs
}

fn date_of(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Formats a date range as `YYYY-MM-DD - YYYY-MM-DD`, or a single date
/// when both ends agree.
fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(s), Some(e)) if s == e => s.format("%Y-%m-%d").to_string(),
        (Some(s), Some(e)) => format!("{} - {}", s.format("%Y-%m-%d"), e.format("%Y-%m-%d")),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{compute_days, MaxStreak};

    fn schedule(rows: Vec<ScheduleRow>) -> Schedule {
        let mut s = Schedule::new(1, 2025, compute_days(1, 2025).unwrap());
        for mut row in rows {
            row.resize(s.day_count());
            s.rows.push(row);
        }
        s
    }

    fn row(id: &str, name: &str, slots: Vec<Slot>) -> ScheduleRow {
        let len = slots.len();
        ScheduleRow {
            id: id.into(),
            name: name.into(),
            slots,
            locks: vec![false; len],
        }
    }

    #[test]
    fn test_night_to_day() {
        let s = schedule(vec![row(
            "w1",
            "Alex",
            vec![Slot::NightShift, Slot::DayShift],
        )]);
        let insights = derive_insights(&s, 1, 2025, &[Worker::new("w1", "Alex")], &Settings::default());

        assert_eq!(
            insights.night_to_day.cells,
            vec![CellRef {
                row_index: 0,
                day_index: 1
            }]
        );
        assert_eq!(insights.warnings.len(), 1);
        assert!(insights.warnings[0].contains("Alex"));
        assert!(insights.warnings[0].contains("N→D"));
    }

    #[test]
    fn test_day_to_night_is_fine() {
        let s = schedule(vec![row(
            "w1",
            "Alex",
            vec![Slot::DayShift, Slot::NightShift, Slot::Holiday, Slot::DayShift],
        )]);
        let insights = derive_insights(&s, 1, 2025, &[], &Settings::default());
        assert!(insights.night_to_day.cells.is_empty());
        assert!(insights.warnings.is_empty());
    }

    #[test]
    fn test_blocked_shift_warning() {
        // 2025-01-06 is a Monday (weekday 1).
        let mut slots = vec![Slot::Unassigned; 6];
        slots[5] = Slot::NightShift;
        let s = schedule(vec![row("w1", "Alex", slots)]);
        let worker = Worker::new("w1", "Alex").with_blocked(1, ShiftType::Night);

        let insights = derive_insights(&s, 1, 2025, &[worker], &Settings::default());
        assert_eq!(insights.warnings.len(), 1);
        assert!(insights.warnings[0].contains("Alex"));
        assert!(insights.warnings[0].contains("shift N"));
    }

    #[test]
    fn test_blocked_uses_day_numbers() {
        // Days list with a gap: the second column is 6 January (Monday).
        let mut s = schedule(vec![]);
        s.days = vec![s.days[0].clone(), s.days[5].clone()];
        s.rows.push(row("w1", "Alex", vec![Slot::Unassigned, Slot::NightShift]));
        let worker = Worker::new("w1", "Alex").with_blocked(1, ShiftType::Night);

        let insights = derive_insights(&s, 1, 2025, &[worker], &Settings::default());
        assert_eq!(insights.warnings.len(), 1);
        assert!(insights.warnings[0].contains("day 6"));
    }

    #[test]
    fn test_missing_worker_skips_blocked_scan() {
        let s = schedule(vec![row("ghost", "Ghost", vec![Slot::NightShift, Slot::DayShift])]);
        let insights = derive_insights(&s, 1, 2025, &[], &Settings::default());
        assert_eq!(insights.night_to_day.cells.len(), 1);
        assert_eq!(insights.warnings.len(), 1);
    }

    #[test]
    fn test_streak_overrun() {
        let s = schedule(vec![row(
            "w1",
            "Alex",
            vec![Slot::NightShift, Slot::NightShift, Slot::NightShift],
        )]);
        let settings = Settings::new(MaxStreak::new(3, 2, 3));
        let insights = derive_insights(&s, 1, 2025, &[], &settings);

        assert_eq!(insights.streaks.runs.len(), 1);
        let run = insights.streaks.runs[0];
        assert_eq!(run.kind, StreakKind::Night);
        assert_eq!((run.start, run.end, run.len()), (0, 2, 3));
        assert!(insights.warnings[0].contains("2025-01-01 - 2025-01-03"));
    }

    #[test]
    fn test_worked_streak_overrun_ends_at_month_end() {
        let mut slots = vec![Slot::Unassigned; 27];
        slots.extend([Slot::DayShift, Slot::NightShift, Slot::DayShift, Slot::NightShift]);
        let s = schedule(vec![row("w1", "Alex", slots)]);
        let insights = derive_insights(&s, 1, 2025, &[], &Settings::default());

        let any: Vec<_> = insights
            .streaks
            .runs
            .iter()
            .filter(|r| r.kind == StreakKind::Any)
            .collect();
        assert_eq!(any.len(), 1);
        assert_eq!((any[0].start, any[0].end), (27, 30));
    }

    #[test]
    fn test_deterministic_order() {
        let s = schedule(vec![
            row("a", "A", vec![Slot::NightShift, Slot::DayShift, Slot::NightShift, Slot::DayShift]),
            row("b", "B", vec![Slot::Unassigned, Slot::NightShift, Slot::DayShift]),
        ]);
        let insights = derive_insights(&s, 1, 2025, &[], &Settings::default());
        let cells: Vec<(usize, usize)> = insights
            .night_to_day
            .cells
            .iter()
            .map(|c| (c.row_index, c.day_index))
            .collect();
        assert_eq!(cells, vec![(0, 1), (0, 3), (1, 2)]);
        assert_eq!(insights, derive_insights(&s, 1, 2025, &[], &Settings::default()));
    }
}
