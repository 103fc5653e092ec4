//! Candidate filters, ranking rules, and the selection engine.
//!
//! Filling one (day, shift) cell is a dispatching decision: from the
//! workers that pass the hard filters, soft filters narrow the pool
//! (relaxed from the last one backward when they would empty it), and
//! ranking rules order the survivors.
//!
//! # Usage
//!
//! ```
//! use u_roster::dispatching::{SelectionEngine, rules};
//!
//! let engine = SelectionEngine::new()
//!     .with_filter(rules::SameTypeStreak)
//!     .with_filter(rules::WorkedStreak)
//!     .with_rule(rules::FewestOfType);
//! assert_eq!(engine.filter_names(), vec!["same-type-streak", "worked-streak"]);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::{Candidate, SelectionContext};
pub use engine::{Selection, SelectionEngine};

use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = higher priority (selected first).
pub type RuleScore = f64;

/// A soft eligibility filter.
///
/// Soft filters may be relaxed by the engine when no candidate passes them;
/// hard constraints (locks, blocked weekdays, `only-*` preferences) never
/// reach this layer.
pub trait ShiftFilter: Send + Sync + Debug {
    /// Filter name (e.g., "hour-cap").
    fn name(&self) -> &'static str;

    /// Whether the candidate may take the cell described by `context`.
    fn admits(&self, candidate: &Candidate<'_>, context: &SelectionContext) -> bool;
}

/// A ranking rule over surviving candidates.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name.
    fn name(&self) -> &'static str;

    /// Evaluates a candidate for the cell described by `context`.
    fn evaluate(&self, candidate: &Candidate<'_>, context: &SelectionContext) -> RuleScore;
}
