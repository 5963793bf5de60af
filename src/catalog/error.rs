use thiserror::Error;

/// Errors raised while building a [`Catalog`](super::Catalog).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Catalog labels cannot be empty")]
    EmptyLabel,

    #[error("Item appears more than once in the catalog: {0}")]
    DuplicateItem(String),

    #[error("Slot appears more than once in the catalog: {0}")]
    DuplicateSlot(String),

    #[error("Slot window is empty: {0}")]
    EmptyWindow(String),

    #[error("Slot window does not follow the previous slot chronologically: {0}")]
    WindowOutOfOrder(String),
}
