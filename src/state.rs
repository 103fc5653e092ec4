//! Single-owner roster state.
//!
//! Holds the roster, the settings, and the schedule currently being
//! edited. One instance is owned by the host application and passed by
//! reference into edit operations; the builder and analyzers stay
//! stateless and only see what this object hands them.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::RosterError;
use crate::import::normalize;
use crate::models::{CellEdit, Schedule, Settings, Worker};
use crate::scheduler::{derive_insights, refresh_diagnostics, Insights, ShiftBuilder};

/// Roster, settings, and the current schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterState {
    /// Roster in display order.
    pub workers: Vec<Worker>,
    pub settings: Settings,
    /// Schedule being viewed/edited, if any.
    pub current: Option<Schedule>,
}

impl RosterState {
    /// Creates an empty state with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a worker with a fresh ID and the next tie-break order.
    /// Out-of-range hour values fall back to the defaults.
    ///
    /// Returns the generated ID.
    pub fn add_worker(&mut self, worker: Worker) -> String {
        let mut worker = worker.sanitized();
        worker.id = Uuid::new_v4().to_string();
        worker.order = self
            .workers
            .iter()
            .map(|w| w.order + 1)
            .max()
            .unwrap_or(0);
        let id = worker.id.clone();
        self.workers.push(worker);
        id
    }

    /// Replaces a worker's fields, keeping its ID and order. Out-of-range
    /// hour values fall back to the defaults.
    pub fn update_worker(&mut self, worker: Worker) -> Result<(), RosterError> {
        let slot = self
            .workers
            .iter_mut()
            .find(|w| w.id == worker.id)
            .ok_or_else(|| RosterError::UnknownWorker(worker.id.clone()))?;
        let order = slot.order;
        *slot = worker.sanitized();
        slot.order = order;
        self.refresh_diagnostics();
        Ok(())
    }

    /// Removes a worker. Rows already in the current schedule stay; their
    /// summaries fall back to default hours.
    pub fn remove_worker(&mut self, id: &str) -> Result<Worker, RosterError> {
        let index = self
            .workers
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| RosterError::UnknownWorker(id.to_string()))?;
        let removed = self.workers.remove(index);
        self.refresh_diagnostics();
        Ok(removed)
    }

    /// Replaces the settings after validating them.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), RosterError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Builds a schedule for `month`/`year` and makes it current.
    ///
    /// If the current schedule is for the same month, its rows (locks and
    /// holidays) seed the build.
    pub fn generate<R: Rng>(
        &mut self,
        month: u32,
        year: i32,
        rng: &mut R,
    ) -> Result<&Schedule, RosterError> {
        let prior = self
            .current
            .as_ref()
            .filter(|s| s.month == month && s.year == year)
            .map(|s| s.rows.as_slice());

        let schedule =
            ShiftBuilder::new().build(&self.workers, month, year, prior, &self.settings, rng)?;
        Ok(self.current.insert(schedule))
    }

    /// Normalizes an imported document, attaches its summary and warnings,
    /// and makes it current.
    pub fn import(&mut self, raw: &Value, month: u32, year: i32) -> Result<&Schedule, RosterError> {
        let mut schedule = normalize(raw, month, year)?;
        refresh_diagnostics(&mut schedule, &self.workers);
        Ok(self.current.insert(schedule))
    }

    /// Applies a single-cell edit to the current schedule.
    ///
    /// Returns `true` if a cell changed; summary and warnings are rebuilt
    /// then.
    pub fn apply_edit(&mut self, edit: &CellEdit) -> bool {
        let Some(schedule) = self.current.as_mut() else {
            return false;
        };
        let changed = schedule.apply_edit(edit);
        debug!(?edit, changed, "applied cell edit");
        if changed {
            self.refresh_diagnostics();
        }
        changed
    }

    /// Insights for the current schedule.
    pub fn insights(&self) -> Option<Insights> {
        self.current.as_ref().map(|s| {
            derive_insights(s, s.month, s.year, &self.workers, &self.settings)
        })
    }

    fn refresh_diagnostics(&mut self) {
        if let Some(schedule) = self.current.as_mut() {
            refresh_diagnostics(schedule, &self.workers);
        }
    }
}
