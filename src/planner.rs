//! Caller-facing entry point tying a shared store to a scheduler.
//!
//! The planner recomputes a schedule only when the store has changed since
//! the last call, so a front end can ask for the schedule on every render.

use std::sync::{Arc, Mutex, PoisonError};

use crate::catalog::{Catalog, Slot};
use crate::config::{ConfigError, SchedulerConfig};
use crate::constraints::{
    ConstraintRecord, ConstraintStore, RecordId, SharedConstraintStore, Submission,
    SubmissionError,
};
use crate::scheduler::{ScheduleOutcome, Scheduler};

/// Accepts submissions and serves the current schedule.
///
/// # Examples
///
/// ```
/// use runthrough::constraints::{Severity, Submission};
/// use runthrough::planner::Planner;
///
/// let planner = Planner::default();
/// planner
///     .submit_constraint(
///         Submission::new("Take On Me", "Priya")
///             .forbid("6–7 PM")
///             .with_reason("Arriving late")
///             .with_severity(Severity::High),
///     )
///     .unwrap();
///
/// let outcome = planner.compute_schedule();
/// assert_eq!(outcome.score, Some(0));
/// assert_eq!(planner.selectable_slots().len(), 6);
/// ```
#[derive(Debug)]
pub struct Planner {
    catalog: Arc<Catalog>,
    store: SharedConstraintStore,
    scheduler: Scheduler,
    cache: Mutex<Option<(u64, ScheduleOutcome)>>,
}

impl Planner {
    /// Creates a planner with an empty store over `catalog`.
    pub fn new(catalog: Catalog, config: SchedulerConfig) -> Result<Self, ConfigError> {
        let scheduler = Scheduler::new(config)?;
        let store = ConstraintStore::new(Arc::new(catalog));
        Ok(Self::with_store(store.into(), scheduler))
    }

    /// Creates a planner over an existing store handle, which other threads
    /// may keep submitting to.
    pub fn with_store(store: SharedConstraintStore, scheduler: Scheduler) -> Self {
        let catalog = store.read(ConstraintStore::catalog_handle);
        Self {
            catalog,
            store,
            scheduler,
            cache: Mutex::new(None),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Handle to the underlying store.
    pub fn store(&self) -> &SharedConstraintStore {
        &self.store
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Validates and records a submission.
    pub fn submit_constraint(&self, submission: Submission) -> Result<RecordId, SubmissionError> {
        self.store.submit(submission)
    }

    /// Records for the item labelled `item`, in submission order.
    pub fn constraints_for(&self, item: &str) -> Result<Vec<ConstraintRecord>, SubmissionError> {
        let id = self
            .catalog
            .item_id(item)
            .ok_or_else(|| SubmissionError::UnknownItem(item.to_string()))?;
        Ok(self.store.read(|store| store.constraints_for(id).to_vec()))
    }

    /// The schedule for the current store contents.
    ///
    /// Reuses the previous result while the store revision is unchanged.
    pub fn compute_schedule(&self) -> ScheduleOutcome {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let revision = self.store.revision();
        if let Some((cached, outcome)) = cache.as_ref() {
            if *cached == revision {
                return outcome.clone();
            }
        }

        let (revision, outcome) = self
            .store
            .read(|store| (store.revision(), self.scheduler.schedule(store)));
        *cache = Some((revision, outcome.clone()));
        outcome
    }

    /// Slots a submitter may pick from: every restricted slot, plus the
    /// overflow slot once the current schedule has put something there.
    pub fn selectable_slots(&self) -> Vec<&Slot> {
        let mut ids = self.catalog.restricted_universe();
        if self.compute_schedule().uses_overflow(&self.catalog) {
            ids.extend(self.catalog.overflow_slot());
        }
        ids.into_iter()
            .filter_map(|id| self.catalog.slot(id))
            .collect()
    }

    /// Drops every record.
    pub fn clear(&self) {
        self.store.clear();
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::with_store(
            ConstraintStore::new(Arc::new(Catalog::run_through())).into(),
            Scheduler::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchStrategy;
    use crate::constraints::Severity;
    use crate::schedule::Placement;
    use std::thread;

    const FIRST_SIX: [&str; 6] = [
        "6–7 PM", "7–8 PM", "8–9 PM", "9–10 PM", "10–11 PM", "11–12 PM",
    ];

    fn slot_labels(planner: &Planner) -> Vec<String> {
        planner
            .selectable_slots()
            .iter()
            .map(|s| s.label().to_string())
            .collect()
    }

    fn block_first_six(planner: &Planner, song: &str) {
        planner
            .submit_constraint(
                Submission::new(song, "Jordan")
                    .forbid_all(FIRST_SIX)
                    .with_severity(Severity::High),
            )
            .unwrap();
    }

    #[test]
    fn default_catalog_slot_labels() {
        let planner = Planner::default();
        let labels: Vec<&str> = planner.catalog().slots().iter().map(|s| s.label()).collect();
        assert_eq!(&labels[..6], &FIRST_SIX);
        assert_eq!(labels[6], "12–1 AM");
    }

    #[test]
    fn overflow_hidden_until_used() {
        let planner = Planner::default();
        assert_eq!(slot_labels(&planner), FIRST_SIX);

        block_first_six(&planner, "Garaj Garaj");
        let labels = slot_labels(&planner);
        assert_eq!(labels.len(), 7);
        assert_eq!(labels.last().map(String::as_str), Some("12–1 AM"));

        let outcome = planner.compute_schedule();
        let garaj = planner.catalog().item_id("Garaj Garaj").unwrap();
        assert_eq!(outcome.assignment.slot_of(garaj), planner.catalog().overflow_slot());
    }

    #[test]
    fn cache_follows_store_revision() {
        let planner = Planner::default();
        let before = planner.compute_schedule();
        assert_eq!(planner.compute_schedule(), before);

        planner
            .submit_constraint(Submission::new("Rang Jo Lagyo", "Ana").forbid("6–7 PM"))
            .unwrap();
        let after = planner.compute_schedule();
        assert_ne!(after.assignment, before.assignment);
        assert_eq!(after.score, Some(0));
    }

    #[test]
    fn rejected_submission_leaves_schedule_unchanged() {
        let planner = Planner::default();
        let before = planner.compute_schedule();
        let revision = planner.store().revision();

        let err = planner
            .submit_constraint(Submission::new("Unknown Song", "Ana").forbid("6–7 PM"))
            .unwrap_err();
        assert!(matches!(err, SubmissionError::UnknownItem(_)));
        assert!(planner
            .submit_constraint(Submission::new("Take On Me", "  ").forbid("6–7 PM"))
            .is_err());
        assert!(planner
            .submit_constraint(Submission::new("Take On Me", "Ana"))
            .is_err());

        assert_eq!(planner.store().revision(), revision);
        assert_eq!(planner.compute_schedule(), before);
    }

    #[test]
    fn constraints_listed_in_submission_order() {
        let planner = Planner::default();
        planner
            .submit_constraint(Submission::new("Take On Me", "Ana").forbid("7–8 PM"))
            .unwrap();
        planner
            .submit_constraint(
                Submission::new("Take On Me", "Ben")
                    .forbid("8–9 PM")
                    .with_severity(Severity::Medium),
            )
            .unwrap();

        let records = planner.constraints_for("Take On Me").unwrap();
        let submitters: Vec<&str> = records.iter().map(|r| r.submitter()).collect();
        assert_eq!(submitters, ["Ana", "Ben"]);
        assert!(planner.constraints_for("Garaj Garaj").unwrap().is_empty());
        assert!(planner.constraints_for("Nope").is_err());
    }

    #[test]
    fn unscheduled_when_catalog_too_small() {
        let catalog = Catalog::from_labels(["A", "B", "C"], ["S1", "S2"]).unwrap();
        let planner = Planner::new(catalog, SchedulerConfig::default()).unwrap();
        let outcome = planner.compute_schedule();
        assert!(outcome
            .placements(planner.catalog())
            .all(|(_, p)| p == Placement::Unscheduled));
        assert_eq!(planner.selectable_slots().len(), 1);
    }

    #[test]
    fn matching_planner_agrees() {
        let config = SchedulerConfig::default().with_strategy(SearchStrategy::Matching);
        let matching = Planner::new(Catalog::run_through(), config).unwrap();
        let exhaustive = Planner::default();
        for planner in [&matching, &exhaustive] {
            block_first_six(planner, "Bring Me to Life");
            planner
                .submit_constraint(Submission::new("Take On Me", "Kai").forbid("6–7 PM"))
                .unwrap();
        }
        assert_eq!(
            matching.compute_schedule().assignment,
            exhaustive.compute_schedule().assignment
        );
    }

    #[test]
    fn sees_submissions_from_other_threads() {
        let planner = Planner::default();
        let handle = planner.store().clone();
        let before = planner.compute_schedule();

        thread::spawn(move || {
            handle
                .submit(
                    Submission::new("Rang Jo Lagyo", "Remote")
                        .forbid("6–7 PM")
                        .with_severity(Severity::High),
                )
                .unwrap();
        })
        .join()
        .unwrap();

        let after = planner.compute_schedule();
        assert_ne!(after, before);
        let rang = planner.catalog().item_id("Rang Jo Lagyo").unwrap();
        assert_ne!(after.assignment.slot_of(rang), planner.catalog().slot_id("6–7 PM"));
    }

    #[test]
    fn clear_resets_schedule() {
        let planner = Planner::default();
        let empty = planner.compute_schedule();
        block_first_six(&planner, "Garaj Garaj");
        assert_ne!(planner.compute_schedule().assignment, empty.assignment);

        planner.clear();
        assert_eq!(planner.compute_schedule().assignment, empty.assignment);
        assert_eq!(planner.selectable_slots().len(), 6);
    }
}
