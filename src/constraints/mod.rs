//! Exclusion constraints submitted by stakeholders.
//!
//! A [`Submission`] names an item, the slots it must avoid, who asked and how
//! badly. The [`ConstraintStore`] validates it against the catalog and keeps
//! the resulting [`ConstraintRecord`]s per item, in submission order.
//! [`SharedConstraintStore`] wraps the store for use from several threads.

pub mod error;
mod record;
mod severity;
mod shared;
mod store;

pub use error::{ParseSeverityError, SubmissionError};
pub use record::{ConstraintRecord, RecordDisplay, RecordId, Submission};
pub use severity::Severity;
pub use shared::SharedConstraintStore;
pub use store::ConstraintStore;
