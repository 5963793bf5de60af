//! runthrough - conflict-minimising slot assignment for rehearsal run sheets
//!
//! Stakeholders submit exclusion constraints ("this song must not play in
//! these slots, with this severity"); the scheduler places every song in a
//! distinct time slot so that the summed severity of violated constraints is
//! as small as possible, keeping the last slot in reserve unless using it
//! avoids a serious conflict.

pub mod algorithms;
pub mod catalog;
pub mod config;
pub mod constraints;
pub mod planner;
pub mod schedule;
pub mod scheduler;

pub use catalog::Catalog;
pub use config::SchedulerConfig;
pub use constraints::{ConstraintStore, Severity, Submission};
pub use planner::Planner;
pub use scheduler::{ScheduleOutcome, Scheduler};

/// Identifier type used for constraint records.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
