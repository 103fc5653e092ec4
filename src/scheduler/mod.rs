//! Schedule builder and schedule diagnostics.
//!
//! # Algorithm
//!
//! `ShiftBuilder` fills the month day by day with a greedy, constraint-aware
//! heuristic: hard filters first, soft filters relaxed on demand, then
//! ranking with a seeded random tie-break. It does not search or backtrack;
//! a cell no one can take is left open and reported.
//!
//! # Diagnostics
//!
//! - `summarize`: per-worker hours, overtime, and hour warnings.
//! - `refresh_diagnostics`: summary plus coverage-gap warnings, rebuilt
//!   after edits or imports.
//! - `derive_insights`: N→D transitions, blocked-shift placements, and
//!   streak overruns.

mod builder;
mod insights;
mod summary;

pub use builder::{build_schedule, refresh_diagnostics, BuildRequest, ShiftBuilder};
pub use insights::{
    derive_insights, CellRef, Insights, NightToDay, StreakKind, StreakRun, StreakRuns,
};
pub use summary::{summarize, HOURS_CEILING};
