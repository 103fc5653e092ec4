//! Selection engine: soft-filter relaxation and sequential ranking.
//!
//! # Algorithm
//! 1. Apply every soft filter. If no candidate survives, drop the last
//!    filter and retry, down to no filters at all.
//! 2. Order survivors by each ranking rule in sequence (next rule only on
//!    ties), then by a random key, then by worker `order`.
//!
//! Random keys are drawn once per survivor, in candidate order, so a
//! seeded generator yields the same pick for the same inputs.

use std::cmp::Ordering;
use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use super::rules::{FewestOfType, HourCap, PreferenceBias, SameTypeStreak, WorkedStreak};
use super::{Candidate, RankingRule, SelectionContext, ShiftFilter};

/// Outcome of one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Index into the candidate slice.
    pub candidate: usize,
    /// Number of soft filters that had to be dropped.
    pub relaxed: usize,
}

/// Composable engine choosing one worker per cell.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_roster::dispatching::{Candidate, SelectionContext, SelectionEngine};
/// use u_roster::models::{MaxStreak, ShiftType, Worker};
///
/// let alex = Worker::new("w1", "Alex");
/// let candidates = vec![Candidate {
///     row_index: 0,
///     worker: &alex,
///     same_type_streak: 0,
///     worked_streak: 0,
///     hours_placed: 0,
///     type_count: 0,
/// }];
/// let ctx = SelectionContext::new(0, 3, ShiftType::Day, MaxStreak::default());
/// let mut rng = SmallRng::seed_from_u64(7);
///
/// let pick = SelectionEngine::roster_default().select(&candidates, &ctx, &mut rng);
/// assert_eq!(pick.unwrap().candidate, 0);
/// ```
#[derive(Clone)]
pub struct SelectionEngine {
    filters: Vec<Arc<dyn ShiftFilter>>,
    rules: Vec<Arc<dyn RankingRule>>,
    epsilon: f64,
}

impl SelectionEngine {
    /// Creates an engine with no filters and no rules.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            rules: Vec::new(),
            epsilon: 1e-9,
        }
    }

    /// The rostering policy: streak, worked-streak, and hour-cap filters
    /// (the hour cap relaxed first), ranked by preference then by fewest
    /// shifts of the type.
    pub fn roster_default() -> Self {
        Self::new()
            .with_filter(SameTypeStreak)
            .with_filter(WorkedStreak)
            .with_filter(HourCap)
            .with_rule(PreferenceBias)
            .with_rule(FewestOfType)
    }

    /// Appends a soft filter. Later filters are relaxed first.
    pub fn with_filter<F: ShiftFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Appends a ranking rule, consulted only on ties of earlier rules.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the configured filters, in relaxation-reverse order.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Candidates passing the soft filters, relaxing as needed.
    ///
    /// Returns survivor indices and the number of filters dropped. Empty
    /// only if `candidates` is empty.
    pub fn survivors(
        &self,
        candidates: &[Candidate<'_>],
        context: &SelectionContext,
    ) -> (Vec<usize>, usize) {
        for active in (0..=self.filters.len()).rev() {
            let filters = &self.filters[..active];
            let pool: Vec<usize> = candidates
                .iter()
                .enumerate()
                .filter(|(_, c)| filters.iter().all(|f| f.admits(c, context)))
                .map(|(i, _)| i)
                .collect();

            if !pool.is_empty() {
                let relaxed = self.filters.len() - active;
                if relaxed > 0 {
                    debug!(
                        day = context.day_index + 1,
                        shift = %context.shift,
                        dropped = ?self.filter_names()[active..].to_vec(),
                        "relaxed soft filters"
                    );
                }
                return (pool, relaxed);
            }
        }
        (Vec::new(), 0)
    }

    /// Selects one candidate for the cell.
    ///
    /// Returns `None` if there are no candidates.
    pub fn select<R: Rng>(
        &self,
        candidates: &[Candidate<'_>],
        context: &SelectionContext,
        rng: &mut R,
    ) -> Option<Selection> {
        let (pool, relaxed) = self.survivors(candidates, context);
        if pool.is_empty() {
            return None;
        }

        let keyed: Vec<(usize, u64)> = pool.into_iter().map(|i| (i, rng.random::<u64>())).collect();

        keyed
            .into_iter()
            .min_by(|&(a, key_a), &(b, key_b)| {
                self.compare_sequential(&candidates[a], &candidates[b], context)
                    .then(key_a.cmp(&key_b))
                    .then(candidates[a].worker.order.cmp(&candidates[b].worker.order))
            })
            .map(|(candidate, _)| Selection { candidate, relaxed })
    }

    fn compare_sequential(
        &self,
        a: &Candidate<'_>,
        b: &Candidate<'_>,
        context: &SelectionContext,
    ) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::roster_default()
    }
}

impl std::fmt::Debug for SelectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("filters", &self.filter_names())
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
