//! Rostering domain models.
//!
//! Provides the data types shared by the builder, the analyzers, and the
//! import normalizer: the month calendar, workers and their constraints,
//! builder settings, and the schedule grid itself.
//!
//! # Grid Shape
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Day` | One column of the grid |
//! | `ScheduleRow` | One worker's line: slots + locks |
//! | `Slot` | One cell: `D`, `N`, `U`, or unassigned |
//! | `Schedule` | Days × rows, plus summary and warnings |

mod calendar;
mod schedule;
mod settings;
mod worker;

pub use calendar::{
    compute_days, days_in_month, weekday_index, Day, SATURDAY, SUNDAY, WEEKDAY_LABELS,
};
pub use schedule::{CellEdit, Schedule, ScheduleRow, Slot, SummaryEntry};
pub use settings::{MaxStreak, Settings};
pub use worker::{
    BlockedShifts, Preference, ShiftType, Worker, DEFAULT_MAX_HOURS, DEFAULT_SHIFT_HOURS,
    MAX_HOURS_RANGE, SHIFT_HOURS_RANGE,
};
