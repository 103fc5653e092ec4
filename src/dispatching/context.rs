//! Selection context and candidate state.

use crate::models::{MaxStreak, ScheduleRow, ShiftType, Slot, Worker};

/// The cell being filled: which day, which shift, under which limits.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext {
    /// Day index (0-based) within the month.
    pub day_index: usize,
    /// Weekday of that day (0 = Sunday).
    pub weekday: u8,
    /// Shift type being covered.
    pub shift: ShiftType,
    /// Streak limits in force.
    pub max_streak: MaxStreak,
}

impl SelectionContext {
    /// Creates a context for one (day, shift) cell.
    pub fn new(day_index: usize, weekday: u8, shift: ShiftType, max_streak: MaxStreak) -> Self {
        Self {
            day_index,
            weekday,
            shift,
            max_streak,
        }
    }
}

/// A worker eligible under the hard filters, with the state the soft
/// filters and ranking rules look at.
///
/// Streaks count backward from the day before `day_index` and the type
/// count covers days before it. Placed hours cover every shift already in
/// the row, including locked cells later in the month.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    /// Row index in the schedule being built.
    pub row_index: usize,
    pub worker: &'a Worker,
    /// Consecutive days of the same shift type immediately before this day.
    pub same_type_streak: u32,
    /// Consecutive worked days immediately before this day.
    pub worked_streak: u32,
    /// Hours already placed in the row.
    pub hours_placed: u32,
    /// Shifts of this type on earlier days of the month.
    pub type_count: u32,
}

impl<'a> Candidate<'a> {
    /// Derives candidate state from a worker's row.
    pub fn from_row(
        row_index: usize,
        worker: &'a Worker,
        row: &ScheduleRow,
        context: &SelectionContext,
    ) -> Self {
        let target = Slot::from(context.shift);
        let before = &row.slots[..context.day_index.min(row.slots.len())];

        let same_type_streak = before.iter().rev().take_while(|&&s| s == target).count() as u32;
        let worked_streak = before.iter().rev().take_while(|s| s.is_worked()).count() as u32;

        Self {
            row_index,
            worker,
            same_type_streak,
            worked_streak,
            hours_placed: (row.worked_count() as u32).saturating_mul(worker.shift_hours),
            type_count: before.iter().filter(|&&s| s == target).count() as u32,
        }
    }
}
