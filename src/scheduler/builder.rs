//! Constraint-based month schedule builder.
//!
//! # Algorithm
//!
//! 1. Seed one row per worker from the matching prior row (by ID), resized
//!    to the month. Locked cells and unlocked holidays are kept; unlocked
//!    shifts are cleared.
//! 2. For each day, for each shift type (D, then N) not already covered by
//!    a locked cell, collect the workers passing the hard filters: cell
//!    unlocked and empty, weekday not blocked, no `only-*` exclusion.
//! 3. Hand the candidates to the [`SelectionEngine`] (soft filters with
//!    relaxation, then ranking and random tie-break).
//! 4. Cells no one can take stay unassigned and produce a coverage warning.
//!
//! # Complexity
//! O(d × w²) where d = days, w = workers (candidate state scans a row).

use rand::Rng;
use tracing::{debug, info, warn};

use super::summary::summarize;
use crate::dispatching::{Candidate, SelectionContext, SelectionEngine};
use crate::error::RosterError;
use crate::models::{compute_days, Day, Schedule, ScheduleRow, Settings, ShiftType, Slot, Worker};
use crate::validation::validate_request;

/// Input container for a build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Roster, in row order.
    pub workers: Vec<Worker>,
    pub month: u32,
    pub year: i32,
    /// Rows of an earlier schedule (locks and holidays are honored).
    pub prior_rows: Vec<ScheduleRow>,
    pub settings: Settings,
}

impl BuildRequest {
    /// Creates a request with default settings and no prior rows.
    pub fn new(workers: Vec<Worker>, month: u32, year: i32) -> Self {
        Self {
            workers,
            month,
            year,
            prior_rows: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// Sets the prior rows.
    pub fn with_prior_rows(mut self, prior_rows: Vec<ScheduleRow>) -> Self {
        self.prior_rows = prior_rows;
        self
    }

    /// Sets the builder settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}

/// Month schedule builder.
///
/// Stateless apart from its selection policy; every call works only on its
/// arguments and returns a new [`Schedule`].
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_roster::models::{Settings, Worker};
/// use u_roster::scheduler::ShiftBuilder;
///
/// let workers = vec![Worker::new("w1", "Alex"), Worker::new("w2", "Bea")];
/// let mut rng = SmallRng::seed_from_u64(42);
///
/// let schedule = ShiftBuilder::new()
///     .build(&workers, 2, 2025, None, &Settings::default(), &mut rng)
///     .unwrap();
/// assert_eq!(schedule.days.len(), 28);
/// assert_eq!(schedule.rows.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShiftBuilder {
    engine: SelectionEngine,
}

impl ShiftBuilder {
    /// Creates a builder with the default rostering policy.
    pub fn new() -> Self {
        Self {
            engine: SelectionEngine::roster_default(),
        }
    }

    /// Replaces the selection policy.
    pub fn with_engine(mut self, engine: SelectionEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Builds a schedule for `month`/`year`.
    ///
    /// Fails only on configuration errors (month, year, streak limits,
    /// duplicate worker IDs). Uncoverable cells are reported in
    /// `Schedule::warnings`, not as errors.
    pub fn build<R: Rng>(
        &self,
        workers: &[Worker],
        month: u32,
        year: i32,
        prior_rows: Option<&[ScheduleRow]>,
        settings: &Settings,
        rng: &mut R,
    ) -> Result<Schedule, RosterError> {
        if let Err(errors) = validate_request(month, year, settings, workers) {
            warn!(month, year, errors = errors.len(), "rejected build request");
            return Err(errors.into());
        }

        let days = compute_days(month, year)?;
        let prior_rows = prior_rows.unwrap_or(&[]);
        let mut rows: Vec<ScheduleRow> = workers
            .iter()
            .map(|w| seed_row(w, prior_rows, days.len()))
            .collect();

        for (day_index, day) in days.iter().enumerate() {
            for shift in ShiftType::ALL {
                if is_covered(&rows, day_index, shift) {
                    continue;
                }
                if !self.fill_cell(workers, &mut rows, day, day_index, shift, settings, rng) {
                    debug!(day = day.day, shift = %shift, "no eligible worker");
                }
            }
        }

        let mut schedule = Schedule::new(month, year, days);
        schedule.rows = rows;
        refresh_diagnostics(&mut schedule, workers);

        info!(
            month,
            year,
            rows = schedule.rows.len(),
            warnings = schedule.warnings.len(),
            "schedule built"
        );
        Ok(schedule)
    }

    /// Builds from a request.
    pub fn build_request<R: Rng>(
        &self,
        request: &BuildRequest,
        rng: &mut R,
    ) -> Result<Schedule, RosterError> {
        self.build(
            &request.workers,
            request.month,
            request.year,
            Some(request.prior_rows.as_slice()),
            &request.settings,
            rng,
        )
    }

    /// Picks a worker for one (day, shift) cell. Returns `false` if the
    /// candidate pool was empty.
    #[allow(clippy::too_many_arguments)]
    fn fill_cell<R: Rng>(
        &self,
        workers: &[Worker],
        rows: &mut [ScheduleRow],
        day: &Day,
        day_index: usize,
        shift: ShiftType,
        settings: &Settings,
        rng: &mut R,
    ) -> bool {
        let context = SelectionContext::new(day_index, day.weekday, shift, settings.max_streak);

        let candidates: Vec<Candidate<'_>> = workers
            .iter()
            .zip(rows.iter())
            .enumerate()
            .filter(|(_, (worker, row))| {
                !row.is_locked(day_index)
                    && row.slots[day_index] == Slot::Unassigned
                    && worker.can_work(day.weekday, shift)
            })
            .map(|(i, (worker, row))| Candidate::from_row(i, worker, row, &context))
            .collect();

        match self.engine.select(&candidates, &context, rng) {
            Some(selection) => {
                let row_index = candidates[selection.candidate].row_index;
                rows[row_index].slots[day_index] = Slot::from(shift);
                true
            }
            None => false,
        }
    }
}

/// Builds a schedule with the default rostering policy.
pub fn build_schedule<R: Rng>(
    workers: &[Worker],
    month: u32,
    year: i32,
    prior_rows: Option<&[ScheduleRow]>,
    settings: &Settings,
    rng: &mut R,
) -> Result<Schedule, RosterError> {
    ShiftBuilder::new().build(workers, month, year, prior_rows, settings, rng)
}

/// Recomputes `summary` and `warnings` from the current grid.
///
/// Warnings are the coverage gaps (day order, D before N) followed by the
/// per-row summary warnings. Call after any change to `rows`.
///
/// # Example
/// ```
/// use u_roster::models::{compute_days, Schedule, ScheduleRow, Slot, Worker};
/// use u_roster::scheduler::refresh_diagnostics;
///
/// let mut schedule = Schedule::new(2, 2025, compute_days(2, 2025).unwrap());
/// let mut row = ScheduleRow::blank("w1", "Alex", 28);
/// row.slots.fill(Slot::DayShift);
/// schedule.rows.push(row);
///
/// refresh_diagnostics(&mut schedule, &[Worker::new("w1", "Alex")]);
/// assert_eq!(schedule.summary[0].total_hours, 336);
/// assert_eq!(schedule.warnings.len(), 28 + 2);
/// ```
pub fn refresh_diagnostics(schedule: &mut Schedule, workers: &[Worker]) {
    schedule.summary = summarize(schedule, workers);
    let mut warnings = coverage_gaps(schedule);
    warnings.extend(
        schedule
            .summary
            .iter()
            .flat_map(|entry| entry.warnings.iter().cloned()),
    );
    schedule.warnings = warnings;
}

/// One warning per (day, shift) cell no row covers.
fn coverage_gaps(schedule: &Schedule) -> Vec<String> {
    let mut gaps = Vec::new();
    for (day_index, day) in schedule.days.iter().enumerate() {
        for shift in ShiftType::ALL {
            if !is_covered(&schedule.rows, day_index, shift) {
                gaps.push(format!(
                    "Day {} ({}): no worker available for shift {}.",
                    day.day, day.weekday_label, shift
                ));
            }
        }
    }
    gaps
}

/// Seeds a worker's row from the prior row with the same ID.
fn seed_row(worker: &Worker, prior_rows: &[ScheduleRow], len: usize) -> ScheduleRow {
    let Some(prior) = prior_rows.iter().find(|r| r.id == worker.id) else {
        return ScheduleRow::blank(&worker.id, &worker.name, len);
    };

    let mut row = prior.clone();
    row.name = worker.name.clone();
    row.resize(len);
    for (slot, &locked) in row.slots.iter_mut().zip(row.locks.iter()) {
        if !locked && slot.is_worked() {
            *slot = Slot::Unassigned;
        }
    }
    row
}

/// Whether some row already holds `shift` on the day.
fn is_covered(rows: &[ScheduleRow], day_index: usize, shift: ShiftType) -> bool {
    rows.iter()
        .any(|r| r.slots.get(day_index) == Some(&Slot::from(shift)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MaxStreak, Preference};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn roster(n: u32) -> Vec<Worker> {
        (0..n)
            .map(|i| Worker::new(format!("w{i}"), format!("Worker {i}")).with_order(i))
            .collect()
    }

    fn build(workers: &[Worker], prior: &[ScheduleRow]) -> Schedule {
        ShiftBuilder::new()
            .build(workers, 2, 2025, Some(prior), &Settings::default(), &mut rng())
            .unwrap()
    }

    #[test]
    fn test_rows_match_day_count() {
        let s = build(&roster(3), &[]);
        assert_eq!(s.days.len(), 28);
        for row in &s.rows {
            assert_eq!(row.slots.len(), 28);
            assert_eq!(row.locks.len(), 28);
        }
    }

    #[test]
    fn test_full_coverage() {
        let s = build(&roster(4), &[]);
        for d in 0..s.day_count() {
            assert_eq!(s.coverage(d, ShiftType::Day), 1, "day {d}");
            assert_eq!(s.coverage(d, ShiftType::Night), 1, "day {d}");
        }
        assert!(s.warnings.iter().all(|w| !w.contains("no worker available")));
    }

    #[test]
    fn test_respects_streak_limits_when_possible() {
        let s = build(&roster(4), &[]);
        for row in &s.rows {
            let mut run = 0;
            for slot in &row.slots {
                run = if *slot == Slot::NightShift { run + 1 } else { 0 };
                assert!(run <= 2, "night streak too long in {}", row.id);
            }
        }
    }

    #[test]
    fn test_locked_cells_preserved() {
        let workers = roster(1);
        let mut prior = ScheduleRow::blank("w0", "Old name", 2);
        prior.slots[0] = Slot::DayShift;
        prior.locks[0] = true;

        let s = build(&workers, &[prior]);
        assert_eq!(s.rows[0].slots[0], Slot::DayShift);
        assert!(s.rows[0].locks[0]);
        assert_eq!(s.rows[0].name, "Worker 0");
        assert_eq!(s.rows[0].slots.len(), 28);
    }

    #[test]
    fn test_locked_shift_not_double_assigned() {
        let workers = roster(2);
        let mut locked = ScheduleRow::blank("w0", "Worker 0", 2);
        locked.slots[1] = Slot::DayShift;
        locked.locks[1] = true;
        let open = ScheduleRow::blank("w1", "Worker 1", 2);

        let s = build(&workers, &[locked, open]);
        assert_eq!(s.coverage(1, ShiftType::Day), 1);
        assert_eq!(s.coverage(1, ShiftType::Night), 1);
        assert_eq!(s.rows[1].slots[1], Slot::NightShift);
    }

    #[test]
    fn test_locked_empty_cell_stays_empty() {
        let workers = roster(1);
        let mut prior = ScheduleRow::blank("w0", "Worker 0", 28);
        prior.locks[3] = true;

        let s = build(&workers, &[prior]);
        assert_eq!(s.rows[0].slots[3], Slot::Unassigned);
        assert!(s.warnings.iter().any(|w| w.starts_with("Day 4")));
    }

    #[test]
    fn test_unlocked_holiday_kept_and_unlocked_shift_redecided() {
        let workers = roster(3);
        let mut prior = ScheduleRow::blank("w0", "Worker 0", 28);
        prior.slots[0] = Slot::Holiday;
        prior.slots[1] = Slot::NightShift;

        let s = build(&workers, &[prior]);
        assert_eq!(s.rows[0].slots[0], Slot::Holiday);
        assert_eq!(s.coverage(1, ShiftType::Night), 1);
    }

    #[test]
    fn test_blocked_shift_never_assigned() {
        // Mondays in February 2025: 3, 10, 17, 24 → indices 2, 9, 16, 23.
        let workers = vec![
            Worker::new("a", "A").with_blocked(1, ShiftType::Night),
            Worker::new("b", "B").with_order(1),
            Worker::new("c", "C").with_order(2),
        ];
        let s = build(&workers, &[]);
        for d in [2, 9, 16, 23] {
            assert_ne!(s.rows[0].slots[d], Slot::NightShift);
        }
    }

    #[test]
    fn test_blocked_is_never_relaxed() {
        let workers = vec![Worker::new("a", "A")
            .with_blocked(1, ShiftType::Day)
            .with_blocked(1, ShiftType::Night)];
        let s = build(&workers, &[]);
        assert_eq!(s.rows[0].slots[2], Slot::Unassigned);
        assert!(s
            .warnings
            .iter()
            .any(|w| w.starts_with("Day 3") && w.ends_with("shift D.")));
    }

    #[test]
    fn test_only_preferences() {
        let workers = vec![
            Worker::new("d", "Days").with_preference(Preference::OnlyDays),
            Worker::new("n", "Nights")
                .with_order(1)
                .with_preference(Preference::OnlyNights),
        ];
        let s = build(&workers, &[]);
        assert!(s.rows[0].slots.iter().all(|&x| x != Slot::NightShift));
        assert!(s.rows[1].slots.iter().all(|&x| x != Slot::DayShift));
    }

    #[test]
    fn test_hour_cap_respected_while_others_available() {
        let workers = vec![
            Worker::new("a", "A")
                .with_max_hours(48)
                .with_shift_hours(12)
                .with_hour_cap(true),
            Worker::new("b", "B").with_order(1),
            Worker::new("c", "C").with_order(2),
            Worker::new("d", "D").with_order(3),
            Worker::new("e", "E").with_order(4),
        ];
        let s = build(&workers, &[]);
        assert!(s.summary[0].total_hours <= 48);
    }

    #[test]
    fn test_single_worker_relaxes_streaks() {
        // Only one worker: streak filters must give way rather than leave days empty.
        let workers = roster(1);
        let s = build(&workers, &[]);
        let days = s.rows[0].count(Slot::DayShift);
        assert_eq!(days, 28);
    }

    #[test]
    fn test_empty_roster() {
        let s = build(&[], &[]);
        assert_eq!(s.days.len(), 28);
        assert!(s.rows.is_empty());
        assert!(s.summary.is_empty());
        assert_eq!(s.warnings.len(), 56);
    }

    #[test]
    fn test_refresh_diagnostics_tracks_grid() {
        let workers = roster(3);
        let mut s = build(&workers, &[]);
        s.rows[0].slots.fill(Slot::Unassigned);
        refresh_diagnostics(&mut s, &workers);

        assert!(s
            .warnings
            .contains(&"Worker 0 has no assigned shifts.".to_string()));
        assert!(s.warnings.iter().all(|w| !w.starts_with("Worker 0 exceeds")));
        let gaps = s.warnings.iter().filter(|w| w.starts_with("Day ")).count();
        let open: usize = (0..s.day_count())
            .map(|d| {
                ShiftType::ALL
                    .iter()
                    .filter(|&&shift| s.coverage(d, shift) == 0)
                    .count()
            })
            .sum();
        assert_eq!(gaps, open);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let workers = roster(5);
        let a = build(&workers, &[]);
        let b = build(&workers, &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_rebuild_fully_locked_is_noop() {
        let workers = roster(4);
        let first = build(&workers, &[]);
        let mut locked = first.rows.clone();
        for row in &mut locked {
            row.locks.iter_mut().for_each(|l| *l = true);
        }

        let second = ShiftBuilder::new()
            .build(
                &workers,
                2,
                2025,
                Some(locked.as_slice()),
                &Settings::default(),
                &mut SmallRng::seed_from_u64(7),
            )
            .unwrap();
        for (a, b) in first.rows.iter().zip(second.rows.iter()) {
            assert_eq!(a.slots, b.slots);
        }
    }

    #[test]
    fn test_prior_rows_resized() {
        let workers = roster(1);
        let mut long = ScheduleRow::blank("w0", "Worker 0", 40);
        long.slots[35] = Slot::DayShift;
        long.locks = vec![true; 3];
        long.slots[0] = Slot::NightShift;

        let s = build(&workers, &[long]);
        assert_eq!(s.rows[0].slots.len(), 28);
        assert_eq!(s.rows[0].locks.len(), 28);
        assert_eq!(s.rows[0].slots[0], Slot::NightShift);
        assert!(!s.rows[0].locks[3]);
    }

    #[test]
    fn test_invalid_configuration() {
        let workers = roster(1);
        let zero = Settings::new(MaxStreak::new(0, 2, 3));
        let err = ShiftBuilder::new()
            .build(&workers, 2, 2025, None, &zero, &mut rng())
            .unwrap_err();
        assert!(matches!(err, RosterError::InvalidConfiguration(_)));

        let err = ShiftBuilder::new()
            .build(&workers, 13, 2025, None, &Settings::default(), &mut rng())
            .unwrap_err();
        assert!(matches!(err, RosterError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_build_request() {
        let request = BuildRequest::new(roster(2), 4, 2025)
            .with_settings(Settings::new(MaxStreak::new(2, 1, 2)));
        let s = ShiftBuilder::new().build_request(&request, &mut rng()).unwrap();
        assert_eq!(s.days.len(), 30);
        assert_eq!(s.rows.len(), 2);
    }
}
