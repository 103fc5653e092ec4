//! Schedule (solution) model.
//!
//! A schedule is a month grid: one row per worker, one slot per day.
//! Each slot may be locked, which makes it immutable to the builder
//! and to slot edits.
//!
//! # Serialized Form
//! Slots serialize as `"D"`, `"N"`, `"U"` or `null`, which is the shape
//! grid views and import files use.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Day, ShiftType};

/// State of one schedule cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Day shift (`D`).
    DayShift,
    /// Night shift (`N`).
    NightShift,
    /// Holiday / leave (`U`).
    Holiday,
    /// Nothing assigned.
    #[default]
    Unassigned,
}

impl Slot {
    /// Parses a cell code. Anything other than `D`, `N`, `U` is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "D" => Some(Slot::DayShift),
            "N" => Some(Slot::NightShift),
            "U" => Some(Slot::Holiday),
            _ => None,
        }
    }

    /// Cell code, `None` for unassigned.
    pub fn code(self) -> Option<&'static str> {
        match self {
            Slot::DayShift => Some("D"),
            Slot::NightShift => Some("N"),
            Slot::Holiday => Some("U"),
            Slot::Unassigned => None,
        }
    }

    /// The shift worked in this cell, if any.
    pub fn shift(self) -> Option<ShiftType> {
        match self {
            Slot::DayShift => Some(ShiftType::Day),
            Slot::NightShift => Some(ShiftType::Night),
            Slot::Holiday | Slot::Unassigned => None,
        }
    }

    /// Whether this cell counts as a worked day.
    #[inline]
    pub fn is_worked(self) -> bool {
        self.shift().is_some()
    }
}

impl From<ShiftType> for Slot {
    fn from(shift: ShiftType) -> Self {
        match shift {
            ShiftType::Day => Slot::DayShift,
            ShiftType::Night => Slot::NightShift,
        }
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.code().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code: Option<String> = Option::deserialize(deserializer)?;
        Ok(code
            .as_deref()
            .and_then(Slot::from_code)
            .unwrap_or(Slot::Unassigned))
    }
}

/// One worker's row in the month grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleRow {
    /// Worker ID.
    pub id: String,
    /// Worker name at the time the row was produced.
    pub name: String,
    /// One slot per day.
    pub slots: Vec<Slot>,
    /// Lock flags, parallel to `slots`.
    pub locks: Vec<bool>,
}

impl ScheduleRow {
    /// Creates an unassigned, unlocked row of `len` days.
    pub fn blank(id: impl Into<String>, name: impl Into<String>, len: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slots: vec![Slot::Unassigned; len],
            locks: vec![false; len],
        }
    }

    /// Resizes slots and locks to `len` days.
    ///
    /// Missing days are padded unassigned and unlocked; extra days are dropped.
    pub fn resize(&mut self, len: usize) {
        self.slots.resize(len, Slot::Unassigned);
        self.locks.resize(len, false);
    }

    /// Whether the cell at `day_index` is locked.
    #[inline]
    pub fn is_locked(&self, day_index: usize) -> bool {
        self.locks.get(day_index).copied().unwrap_or(false)
    }

    /// Number of cells holding `slot`.
    pub fn count(&self, slot: Slot) -> usize {
        self.slots.iter().filter(|&&s| s == slot).count()
    }

    /// Number of worked cells (day and night shifts).
    pub fn worked_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_worked()).count()
    }
}

/// Per-worker totals for a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummaryEntry {
    pub name: String,
    pub total_hours: u32,
    pub day_count: u32,
    pub night_count: u32,
    pub holiday_count: u32,
    pub overtime_hours: u32,
    pub warnings: Vec<String>,
}

/// A single-cell edit issued by a grid view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellEdit {
    /// Flips the lock flag of a cell.
    ToggleLock { row_id: String, day_index: usize },
    /// Writes a slot value. Ignored on locked cells.
    SetSlot {
        row_id: String,
        day_index: usize,
        slot: Slot,
    },
}

/// A month schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub month: u32,
    pub year: i32,
    /// Canonical day list for (month, year).
    pub days: Vec<Day>,
    /// Rows, in roster order.
    pub rows: Vec<ScheduleRow>,
    /// Per-row totals, same order as `rows`.
    pub summary: Vec<SummaryEntry>,
    /// Coverage gaps and per-row summary warnings.
    pub warnings: Vec<String>,
}

impl Schedule {
    /// Creates a schedule with days and no rows.
    pub fn new(month: u32, year: i32, days: Vec<Day>) -> Self {
        Self {
            month,
            year,
            days,
            ..Default::default()
        }
    }

    /// Number of days in the grid.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Finds a row by worker ID.
    pub fn row(&self, row_id: &str) -> Option<&ScheduleRow> {
        self.rows.iter().find(|r| r.id == row_id)
    }

    /// Index of the row for a worker ID.
    pub fn row_index(&self, row_id: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.id == row_id)
    }

    /// Slot codes placed on a day across all rows.
    pub fn slots_on(&self, day_index: usize) -> impl Iterator<Item = Slot> + '_ {
        self.rows
            .iter()
            .filter_map(move |r| r.slots.get(day_index).copied())
    }

    /// Number of rows holding `shift` on a day.
    pub fn coverage(&self, day_index: usize, shift: ShiftType) -> usize {
        self.slots_on(day_index)
            .filter(|&s| s == Slot::from(shift))
            .count()
    }

    /// Applies a single-cell edit.
    ///
    /// Returns `true` if the schedule changed. Unknown rows, out-of-range
    /// days, and slot writes to locked cells leave the schedule untouched.
    pub fn apply_edit(&mut self, edit: &CellEdit) -> bool {
        match edit {
            CellEdit::ToggleLock { row_id, day_index } => {
                let Some(index) = self.row_index(row_id) else {
                    return false;
                };
                let row = &mut self.rows[index];
                if *day_index >= row.slots.len() {
                    return false;
                }
                if row.locks.len() != row.slots.len() {
                    row.locks.resize(row.slots.len(), false);
                }
                row.locks[*day_index] = !row.locks[*day_index];
                true
            }
            CellEdit::SetSlot {
                row_id,
                day_index,
                slot,
            } => {
                let Some(index) = self.row_index(row_id) else {
                    return false;
                };
                let row = &mut self.rows[index];
                if *day_index >= row.slots.len() || row.is_locked(*day_index) {
                    return false;
                }
                if row.slots[*day_index] == *slot {
                    return false;
                }
                row.slots[*day_index] = *slot;
                true
            }
        }
    }
}
