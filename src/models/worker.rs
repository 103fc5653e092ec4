//! Worker model.
//!
//! Workers are the people covering day and night shifts. Each worker has
//! an hour budget, a shift length, a shift preference, and a set of
//! weekday/shift combinations they cannot work.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;

/// Default monthly hour limit.
pub const DEFAULT_MAX_HOURS: u32 = 168;
/// Default length of a single shift (hours).
pub const DEFAULT_SHIFT_HOURS: u32 = 12;

/// Accepted shift lengths (hours).
pub const SHIFT_HOURS_RANGE: RangeInclusive<u32> = 4..=24;
/// Accepted monthly hour limits: 12h up to every hour of a 31-day month.
pub const MAX_HOURS_RANGE: RangeInclusive<u32> = 12..=744;

/// A schedulable shift type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    /// Day shift.
    #[serde(rename = "D")]
    Day,
    /// Night shift.
    #[serde(rename = "N")]
    Night,
}

impl ShiftType {
    /// Both shift types, in the order coverage is filled.
    pub const ALL: [ShiftType; 2] = [ShiftType::Day, ShiftType::Night];

    /// Single-letter code (`D` or `N`).
    pub fn code(self) -> &'static str {
        match self {
            ShiftType::Day => "D",
            ShiftType::Night => "N",
        }
    }

    /// The other shift type.
    pub fn opposite(self) -> Self {
        match self {
            ShiftType::Day => ShiftType::Night,
            ShiftType::Night => ShiftType::Day,
        }
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Shift preference.
///
/// `Prefer*` variants bias selection; `Only*` variants exclude the
/// opposite shift type entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preference {
    #[default]
    Balanced,
    PreferDays,
    PreferNights,
    OnlyDays,
    OnlyNights,
}

impl Preference {
    /// Whether this preference forbids the given shift type.
    pub fn excludes(self, shift: ShiftType) -> bool {
        matches!(self, Preference::OnlyDays | Preference::OnlyNights)
            && self.favored() == Some(shift.opposite())
    }

    /// The shift type this preference leans toward, if any.
    pub fn favored(self) -> Option<ShiftType> {
        match self {
            Preference::PreferDays | Preference::OnlyDays => Some(ShiftType::Day),
            Preference::PreferNights | Preference::OnlyNights => Some(ShiftType::Night),
            Preference::Balanced => None,
        }
    }
}

/// Forbidden shifts per weekday (0 = Sunday .. 6 = Saturday).
pub type BlockedShifts = BTreeMap<u8, BTreeSet<ShiftType>>;

/// A worker on the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Worker {
    /// Stable unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Tie-break priority (lower wins).
    pub order: u32,
    /// Monthly hour limit.
    pub max_hours: u32,
    /// Hours per shift.
    pub shift_hours: u32,
    pub preference: Preference,
    /// Whether the builder treats `max_hours` as a (soft) cap.
    pub enforce_hour_cap: bool,
    pub blocked_shifts: BlockedShifts,
}

impl Default for Worker {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            order: 0,
            max_hours: DEFAULT_MAX_HOURS,
            shift_hours: DEFAULT_SHIFT_HOURS,
            preference: Preference::Balanced,
            enforce_hour_cap: false,
            blocked_shifts: BlockedShifts::new(),
        }
    }
}

impl Worker {
    /// Creates a worker with default hours and no constraints.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the tie-break order.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Sets the monthly hour limit.
    pub fn with_max_hours(mut self, max_hours: u32) -> Self {
        self.max_hours = max_hours;
        self
    }

    /// Sets the shift length.
    pub fn with_shift_hours(mut self, shift_hours: u32) -> Self {
        self.shift_hours = shift_hours;
        self
    }

    /// Sets the shift preference.
    pub fn with_preference(mut self, preference: Preference) -> Self {
        self.preference = preference;
        self
    }

    /// Enables the hour cap.
    pub fn with_hour_cap(mut self, enforce: bool) -> Self {
        self.enforce_hour_cap = enforce;
        self
    }

    /// Blocks a shift type on a weekday. Weekdays outside 0..=6 are ignored.
    pub fn with_blocked(mut self, weekday: u8, shift: ShiftType) -> Self {
        if weekday <= 6 {
            self.blocked_shifts.entry(weekday).or_default().insert(shift);
        }
        self
    }

    /// Replaces out-of-range hour values with the defaults and drops
    /// blocks on weekdays outside 0..=6.
    ///
    /// # Example
    /// ```
    /// use u_roster::models::{Worker, DEFAULT_SHIFT_HOURS};
    ///
    /// let w = Worker::new("w1", "Alex").with_shift_hours(500_000_000).sanitized();
    /// assert_eq!(w.shift_hours, DEFAULT_SHIFT_HOURS);
    /// ```
    pub fn sanitized(mut self) -> Self {
        if !SHIFT_HOURS_RANGE.contains(&self.shift_hours) {
            self.shift_hours = DEFAULT_SHIFT_HOURS;
        }
        if !MAX_HOURS_RANGE.contains(&self.max_hours) {
            self.max_hours = DEFAULT_MAX_HOURS;
        }
        self.blocked_shifts.retain(|&weekday, _| weekday <= 6);
        self
    }

    /// Whether the worker cannot take `shift` on `weekday`.
    pub fn is_blocked(&self, weekday: u8, shift: ShiftType) -> bool {
        self.blocked_shifts
            .get(&weekday)
            .is_some_and(|shifts| shifts.contains(&shift))
    }

    /// Whether the worker may ever be placed on `shift` on `weekday`.
    ///
    /// Combines weekday blocks with `only-*` preferences.
    pub fn can_work(&self, weekday: u8, shift: ShiftType) -> bool {
        !self.is_blocked(weekday, shift) && !self.preference.excludes(shift)
    }
}
