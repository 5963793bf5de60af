use thiserror::Error;

/// Reasons a submission is rejected by the [`ConstraintStore`](super::ConstraintStore).
///
/// A rejected submission leaves the store untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Submitter name cannot be empty")]
    EmptySubmitter,

    #[error("At least one forbidden slot is required")]
    NoForbiddenSlots,

    #[error("Unknown slot: {0}")]
    UnknownSlot(String),
}

/// A severity label outside `Low`, `Medium`, `High`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unrecognized severity: {0}")]
pub struct ParseSeverityError(pub String);
