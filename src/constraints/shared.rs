use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::error::SubmissionError;
use super::record::{RecordId, Submission};
use super::store::ConstraintStore;

/// Cloneable handle that serialises writers to a [`ConstraintStore`].
///
/// Submissions take the write lock; scheduling only ever needs a read guard
/// or a snapshot, so any number of readers can compute schedules at once.
/// A panic while holding the lock cannot leave a half-written record (records
/// are pushed whole), so poisoning is recovered instead of propagated.
#[derive(Debug, Clone)]
pub struct SharedConstraintStore {
    inner: Arc<RwLock<ConstraintStore>>,
}

impl SharedConstraintStore {
    pub fn new(store: ConstraintStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, ConstraintStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, ConstraintStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validates and stores a submission under the write lock.
    pub fn submit(&self, submission: Submission) -> Result<RecordId, SubmissionError> {
        self.write_guard().add_constraint(submission)
    }

    /// Runs `f` against the store under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&ConstraintStore) -> R) -> R {
        let guard = self.read_guard();
        f(&*guard)
    }

    /// Owned copy of the current store contents.
    pub fn snapshot(&self) -> ConstraintStore {
        self.read_guard().clone()
    }

    pub fn revision(&self) -> u64 {
        self.read_guard().revision()
    }

    pub fn clear(&self) {
        self.write_guard().clear();
    }
}

impl From<ConstraintStore> for SharedConstraintStore {
    fn from(store: ConstraintStore) -> Self {
        Self::new(store)
    }
}
