//! Built-in filters and ranking rules.
//!
//! # Filters (relaxed last-to-first)
//!
//! - **SameTypeStreak**: consecutive D or N days stay within `maxStreak.D`/`.N`
//! - **WorkedStreak**: consecutive worked days stay within `maxStreak.ANY`
//! - **HourCap**: placed hours + one shift stay within `maxHours`, for
//!   workers with `enforceHourCap`
//!
//! # Ranking
//!
//! - **PreferenceBias**: `prefer-*` workers first for their shift type
//! - **FewestOfType**: fewest shifts of this type so far
//!
//! # Score Convention
//! All ranking rules return lower scores for candidates to select first.

use super::{Candidate, RankingRule, RuleScore, SelectionContext, ShiftFilter};

// ======================== Filters ========================

/// Same-type streak limit.
///
/// Admits a candidate only if one more shift of this type keeps the run of
/// identical shifts within the per-type limit.
#[derive(Debug, Clone, Copy)]
pub struct SameTypeStreak;

impl ShiftFilter for SameTypeStreak {
    fn name(&self) -> &'static str {
        "same-type-streak"
    }

    fn admits(&self, candidate: &Candidate<'_>, context: &SelectionContext) -> bool {
        candidate.same_type_streak < context.max_streak.for_shift(context.shift)
    }
}

/// Any-work streak limit.
#[derive(Debug, Clone, Copy)]
pub struct WorkedStreak;

impl ShiftFilter for WorkedStreak {
    fn name(&self) -> &'static str {
        "worked-streak"
    }

    fn admits(&self, candidate: &Candidate<'_>, context: &SelectionContext) -> bool {
        candidate.worked_streak < context.max_streak.any
    }
}

/// Monthly hour cap.
///
/// Workers without `enforce_hour_cap` always pass.
#[derive(Debug, Clone, Copy)]
pub struct HourCap;

impl ShiftFilter for HourCap {
    fn name(&self) -> &'static str {
        "hour-cap"
    }

    fn admits(&self, candidate: &Candidate<'_>, _context: &SelectionContext) -> bool {
        let worker = candidate.worker;
        !worker.enforce_hour_cap
            || candidate.hours_placed.saturating_add(worker.shift_hours) <= worker.max_hours
    }
}

// ======================== Ranking ========================

/// Shift preference bias.
///
/// 0 for a worker leaning toward this shift type, 1 for balanced,
/// 2 for a worker leaning toward the other type. Never excludes.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceBias;

impl RankingRule for PreferenceBias {
    fn name(&self) -> &'static str {
        "preference-bias"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, context: &SelectionContext) -> RuleScore {
        match candidate.worker.preference.favored() {
            Some(shift) if shift == context.shift => 0.0,
            Some(_) => 2.0,
            None => 1.0,
        }
    }
}

/// Fewest shifts of this type.
///
/// Spreads day and night shifts evenly across the roster.
#[derive(Debug, Clone, Copy)]
pub struct FewestOfType;

impl RankingRule for FewestOfType {
    fn name(&self) -> &'static str {
        "fewest-of-type"
    }

    fn evaluate(&self, candidate: &Candidate<'_>, _context: &SelectionContext) -> RuleScore {
        candidate.type_count as f64
    }
}
