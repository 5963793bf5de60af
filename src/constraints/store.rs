use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::error::SubmissionError;
use super::record::{ConstraintRecord, RecordId, Submission};
use crate::catalog::{Catalog, ItemId};

/// Per-item constraint records, in submission order.
///
/// The store owns a handle to the catalog it validates against. Items that
/// never received a submission simply have no records.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use runthrough::catalog::Catalog;
/// use runthrough::constraints::{ConstraintStore, Severity, Submission};
///
/// let catalog = Arc::new(Catalog::from_labels(["A", "B"], ["S1", "S2", "S3"]).unwrap());
/// let mut store = ConstraintStore::new(catalog.clone());
///
/// store
///     .add_constraint(Submission::new("A", "Dana").forbid("S1").with_severity(Severity::High))
///     .unwrap();
///
/// // Rejected submissions leave the store untouched.
/// assert!(store.add_constraint(Submission::new("A", "Dana")).is_err());
///
/// let a = catalog.item_id("A").unwrap();
/// assert_eq!(store.constraints_for(a).len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintStore {
    catalog: Arc<Catalog>,
    records: BTreeMap<ItemId, Vec<ConstraintRecord>>,
    revision: u64,
}

impl ConstraintStore {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            records: BTreeMap::new(),
            revision: 0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the catalog this store validates against.
    pub fn catalog_handle(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Validates `submission` and appends it to its item's records.
    ///
    /// Fails without storing anything when the item or a slot is not in the
    /// catalog, the submitter name is blank, or no slot is forbidden. Repeated
    /// submissions are never merged: each one counts on its own.
    pub fn add_constraint(&mut self, submission: Submission) -> Result<RecordId, SubmissionError> {
        let item = self
            .catalog
            .item_id(submission.item())
            .ok_or_else(|| SubmissionError::UnknownItem(submission.item().to_string()))?;

        let submitter = submission.submitter().trim();
        if submitter.is_empty() {
            return Err(SubmissionError::EmptySubmitter);
        }

        if submission.forbidden().is_empty() {
            return Err(SubmissionError::NoForbiddenSlots);
        }

        let forbidden = submission
            .forbidden()
            .iter()
            .map(|label| {
                self.catalog
                    .slot_id(label)
                    .ok_or_else(|| SubmissionError::UnknownSlot(label.clone()))
            })
            .collect::<Result<BTreeSet<_>, _>>()?;

        let reason = submission
            .reason()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);

        let record = ConstraintRecord::new(
            submitter.to_string(),
            forbidden,
            reason,
            submission.severity(),
        );
        let id = record.id().to_string();
        self.records.entry(item).or_default().push(record);
        self.revision += 1;
        Ok(id)
    }

    /// Records for `item` in submission order; empty if there are none.
    pub fn constraints_for(&self, item: ItemId) -> &[ConstraintRecord] {
        self.records.get(&item).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Items with at least one record, in catalog order.
    pub fn items_with_constraints(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.records
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(item, _)| *item)
    }

    /// Returns true once every catalog item has at least one submission.
    pub fn all_items_have_submitter(&self) -> bool {
        self.catalog
            .item_ids()
            .all(|item| !self.constraints_for(item).is_empty())
    }

    /// Total number of records across all items.
    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter bumped by every change to the store.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.revision += 1;
    }
}
