//! Monthly day/night shift roster generation.
//!
//! Builds a calendar-month roster in which every day needs one Day (D) and
//! one Night (N) worker, honoring locked cells, holidays, per-weekday
//! blocks, consecutive-shift limits, and optional hour caps. Ties between
//! equally good candidates are broken by a caller-supplied RNG, so a seeded
//! generator reproduces the same roster.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Day`, `Worker`, `Settings`, `Slot`,
//!   `ScheduleRow`, `Schedule`, `SummaryEntry`
//! - **`dispatching`**: Candidate filters, ranking rules, and the
//!   relaxing `SelectionEngine`
//! - **`scheduler`**: `ShiftBuilder`, hour summaries, and schedule insights
//! - **`import`**: Normalization of externally supplied schedules
//! - **`state`**: `RosterState`, the single owner of roster, settings,
//!   and the current schedule
//! - **`validation`**: Month/year and settings checks
//! - **`error`**: `RosterError`
//!
//! # Example
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use u_roster::models::{ShiftType, Worker};
//! use u_roster::state::RosterState;
//!
//! let mut state = RosterState::new();
//! state.add_worker(Worker::new("", "Alice"));
//! state.add_worker(Worker::new("", "Bob"));
//! state.add_worker(Worker::new("", "Carol"));
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let schedule = state.generate(6, 2025, &mut rng).unwrap();
//! assert_eq!(schedule.days.len(), 30);
//! for day in 0..schedule.days.len() {
//!     assert_eq!(schedule.coverage(day, ShiftType::Day), 1);
//!     assert_eq!(schedule.coverage(day, ShiftType::Night), 1);
//! }
//! ```

pub mod dispatching;
pub mod error;
pub mod import;
pub mod models;
pub mod scheduler;
pub mod state;
pub mod validation;

pub use error::RosterError;
