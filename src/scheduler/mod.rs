//! Two-phase conflict-minimising scheduler.
//!
//! The scheduler turns a [`ConstraintStore`] into an [`Assignment`]:
//!
//! 1. **Phase 1 (restricted)**: search every slot except the chronologically
//!    last one. With the default catalog this leaves exactly as many slots as
//!    items.
//! 2. **Phase 2 (full)**: if the Phase-1 minimum reaches the fallback
//!    threshold (by default one High conflict), or Phase 1 has too few slots,
//!    search again with the overflow slot included. The Phase-2 result
//!    replaces the Phase-1 result only when strictly better.
//! 3. If neither phase can place every item, the result leaves every item
//!    unscheduled.
//!
//! Scheduling is a pure function of the store contents and the
//! configuration: it never fails and repeated calls return identical
//! assignments.

mod report;

pub use report::{Phase, PhaseReport, SearchReport};

use crate::algorithms::{AssignmentSearch, CostMatrix, ExhaustiveSearch, MatchingSearch, Solution};
use crate::catalog::{Catalog, Item};
use crate::config::{ConfigError, SchedulerConfig, SearchStrategy};
use crate::constraints::ConstraintStore;
use crate::schedule::{Assignment, Placement};

/// Result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutcome {
    /// Best assignment, or an all-unscheduled one if no phase was feasible.
    pub assignment: Assignment,
    /// Total conflict weight of `assignment`; `None` when nothing was placed
    /// because no phase was feasible.
    pub score: Option<u64>,
    pub report: SearchReport,
}

impl ScheduleOutcome {
    /// Every item with its slot or [`Placement::Unscheduled`], in catalog order.
    pub fn placements<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = (&'a Item, Placement<'a>)> + 'a {
        self.assignment.placements(catalog)
    }

    /// Returns true if the assignment puts an item in the overflow slot.
    pub fn uses_overflow(&self, catalog: &Catalog) -> bool {
        catalog
            .overflow_slot()
            .is_some_and(|slot| self.assignment.uses_slot(slot))
    }
}

/// Computes assignments from constraint stores.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use runthrough::catalog::Catalog;
/// use runthrough::constraints::{ConstraintStore, Severity, Submission};
/// use runthrough::scheduler::Scheduler;
///
/// let catalog = Arc::new(Catalog::from_labels(["A", "B", "C"], ["S1", "S2", "S3", "S4"]).unwrap());
/// let mut store = ConstraintStore::new(catalog.clone());
/// for slot in ["S1", "S2", "S3"] {
///     store
///         .add_constraint(Submission::new("A", "Rae").forbid(slot).with_severity(Severity::High))
///         .unwrap();
/// }
///
/// let outcome = Scheduler::default().schedule(&store);
/// assert!(outcome.report.fallback_engaged());
/// assert_eq!(outcome.score, Some(0));
///
/// let a = catalog.item_id("A").unwrap();
/// assert_eq!(outcome.assignment.slot_of(a), catalog.slot_id("S4"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    /// Creates a scheduler after validating `config`.
    pub fn new(config: SchedulerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Computes the best assignment for the current store contents using the
    /// configured strategy.
    pub fn schedule(&self, store: &ConstraintStore) -> ScheduleOutcome {
        match self.config.strategy {
            SearchStrategy::Exhaustive => {
                let search = match self.config.node_budget {
                    Some(budget) => ExhaustiveSearch::with_budget(budget),
                    None => ExhaustiveSearch::new(),
                };
                self.schedule_with(&search, store)
            }
            SearchStrategy::Matching => self.schedule_with(&MatchingSearch::new(), store),
        }
    }

    /// Runs both phases with an explicit search.
    pub fn schedule_with<S>(&self, search: &S, store: &ConstraintStore) -> ScheduleOutcome
    where
        S: AssignmentSearch + ?Sized,
    {
        let catalog = store.catalog();
        let costs = CostMatrix::build(store, &self.config.weights);
        let mut report = SearchReport::new(search.name());

        let restricted = catalog.restricted_universe();
        let first = search.search(&costs, &restricted);
        report
            .phases
            .push(PhaseReport::new(Phase::Restricted, restricted.len(), &first));
        let mut best: Option<(Phase, Solution)> =
            first.solution.map(|s| (Phase::Restricted, s));

        let needs_fallback = best
            .as_ref()
            .map_or(true, |(_, s)| s.score >= self.config.fallback_threshold);
        if needs_fallback {
            let full = catalog.full_universe();
            let second = search.search(&costs, &full);
            report
                .phases
                .push(PhaseReport::new(Phase::Full, full.len(), &second));

            if let Some(candidate) = second.solution {
                let improves = best
                    .as_ref()
                    .map_or(true, |(_, current)| candidate.score < current.score);
                if improves {
                    best = Some((Phase::Full, candidate));
                }
            }
        }

        match best {
            Some((phase, solution)) => {
                for p in report.phases.iter_mut() {
                    p.adopted = p.phase == phase;
                }
                ScheduleOutcome {
                    assignment: solution.assignment,
                    score: Some(solution.score),
                    report,
                }
            }
            None => ScheduleOutcome {
                assignment: Assignment::unscheduled(catalog.item_count()),
                score: None,
                report,
            },
        }
    }

    /// Total conflict weight of any assignment against `store`.
    pub fn score(&self, store: &ConstraintStore, assignment: &Assignment) -> u64 {
        CostMatrix::build(store, &self.config.weights).score(assignment)
    }
}
