//! Item × slot conflict costs.

use crate::catalog::{ItemId, SlotId};
use crate::config::SeverityWeights;
use crate::constraints::ConstraintStore;
use crate::schedule::Assignment;

/// Conflict weight incurred by placing each item in each slot.
///
/// `cost(i, s)` is the sum of the weights of every record of item `i` that
/// forbids slot `s`. Records are never merged, so two identical submissions
/// count twice. Sums saturate at `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    items: usize,
    slots: usize,
    cells: Vec<u64>,
}

impl CostMatrix {
    /// Folds every record in `store` into a matrix over its catalog.
    pub fn build(store: &ConstraintStore, weights: &SeverityWeights) -> Self {
        let catalog = store.catalog();
        let mut matrix = Self::zeros(catalog.item_count(), catalog.slot_count());
        for item in catalog.item_ids() {
            for record in store.constraints_for(item) {
                let weight = weights.weight(record.severity());
                for slot in record.forbidden_slots() {
                    let cell = matrix.index(item, slot);
                    matrix.cells[cell] = matrix.cells[cell].saturating_add(weight);
                }
            }
        }
        matrix
    }

    pub fn zeros(items: usize, slots: usize) -> Self {
        Self {
            items,
            slots,
            cells: vec![0; items * slots],
        }
    }

    /// Builds a matrix from explicit rows, one per item. Returns `None` if the
    /// rows differ in length.
    pub fn from_rows(rows: &[Vec<u64>]) -> Option<Self> {
        let slots = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != slots) {
            return None;
        }
        Some(Self {
            items: rows.len(),
            slots,
            cells: rows.concat(),
        })
    }

    fn index(&self, item: ItemId, slot: SlotId) -> usize {
        item.index() * self.slots + slot.index()
    }

    pub fn item_count(&self) -> usize {
        self.items
    }

    pub fn slot_count(&self) -> usize {
        self.slots
    }

    pub fn cost(&self, item: ItemId, slot: SlotId) -> u64 {
        self.cells[self.index(item, slot)]
    }

    /// Total conflict weight of `assignment`. Unscheduled items cost nothing.
    pub fn score(&self, assignment: &Assignment) -> u64 {
        assignment
            .assigned()
            .map(|(item, slot)| self.cost(item, slot))
            .fold(0, u64::saturating_add)
    }

    /// Upper bound on any assignment's score: every item in its worst slot.
    pub fn max_total(&self) -> u64 {
        if self.slots == 0 {
            return 0;
        }
        self.cells
            .chunks(self.slots)
            .map(|row| row.iter().copied().max().unwrap_or(0))
            .fold(0, u64::saturating_add)
    }
}
