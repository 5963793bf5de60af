//! Backtracking core of the exhaustive search.

use crate::algorithms::CostMatrix;
use crate::catalog::{ItemId, SlotId};

use super::combinations::Combinations;

/// Best complete placement seen so far.
#[derive(Debug, Clone)]
pub(crate) struct Incumbent {
    pub(crate) score: u64,
    /// `order[p]` is the item placed in `slots[p]`.
    pub(crate) order: Vec<ItemId>,
    pub(crate) slots: Vec<SlotId>,
}

/// State of one exhaustive search over a universe.
pub(crate) struct Engine<'a> {
    costs: &'a CostMatrix,
    budget: Option<u64>,
    pub(crate) nodes: u64,
    pub(crate) truncated: bool,
    pub(crate) best: Option<Incumbent>,
    combo: Vec<SlotId>,
    order: Vec<ItemId>,
    used: Vec<bool>,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(costs: &'a CostMatrix, budget: Option<u64>) -> Self {
        let n = costs.item_count();
        Self {
            costs,
            budget,
            nodes: 0,
            truncated: false,
            best: None,
            combo: Vec::with_capacity(n),
            order: Vec::with_capacity(n),
            used: vec![false; n],
        }
    }

    /// Walks every combination of `universe` in lexicographic order.
    pub(crate) fn run(&mut self, universe: &[SlotId]) {
        let n = self.costs.item_count();
        for indices in Combinations::new(universe.len(), n) {
            self.combo = indices.iter().map(|&i| universe[i]).collect();
            self.extend(0, 0);

            if self.truncated {
                break;
            }
            // Nothing can beat a conflict-free assignment.
            if self.best.as_ref().is_some_and(|b| b.score == 0) {
                break;
            }
        }
    }

    /// Fills slot position `pos` onwards, trying items in catalog order.
    ///
    /// Only strictly better leaves replace the incumbent, and a branch whose
    /// partial score already matches the incumbent cannot produce one, so
    /// pruning it leaves the first-found optimum unchanged.
    fn extend(&mut self, pos: usize, partial: u64) {
        if let Some(best) = &self.best {
            if partial >= best.score {
                return;
            }
        }

        let n = self.used.len();
        if pos == n {
            self.best = Some(Incumbent {
                score: partial,
                order: self.order.clone(),
                slots: self.combo.clone(),
            });
            return;
        }

        let slot = self.combo[pos];
        for i in 0..n {
            if self.used[i] {
                continue;
            }
            if self.budget.is_some_and(|b| self.nodes >= b) {
                self.truncated = true;
                return;
            }
            self.nodes += 1;

            let item = ItemId(i);
            self.used[i] = true;
            self.order.push(item);
            self.extend(pos + 1, partial.saturating_add(self.costs.cost(item, slot)));
            self.order.pop();
            self.used[i] = false;

            if self.truncated {
                return;
            }
        }
    }
}
