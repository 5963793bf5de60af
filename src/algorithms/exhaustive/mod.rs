//! Exhaustive combination × permutation search.
//!
//! The search enumerates assignments in a fixed order and keeps the first one
//! with the lowest score:
//!
//! 1. **Combinations**: every size-N subset of the universe, in lexicographic
//!    order of slot positions.
//! 2. **Permutations**: for each subset, items are laid onto its slots by
//!    backtracking; at each slot position items are tried in catalog order.
//!
//! Cost is O(C(M, N) × N!) per universe. Two pruning rules keep the common
//! case fast without changing the result: a branch is abandoned once its
//! partial score can no longer be strictly better than the incumbent, and the
//! search stops as soon as a conflict-free assignment is found.
//!
//! An optional node budget bounds the work for larger catalogs. A truncated
//! search returns its best-so-far placement and says so.
//!
//! # Module Structure
//!
//! - [`combinations`] - Lexicographic subset iterator
//! - [`engine`] - Backtracking with incumbent tracking and pruning

mod combinations;
mod engine;

pub use combinations::Combinations;

use super::{AssignmentSearch, CostMatrix, SearchOutcome, Solution};
use crate::catalog::SlotId;
use crate::schedule::Assignment;

use engine::Engine;

/// Brute-force reference search.
#[derive(Debug, Clone, Default)]
pub struct ExhaustiveSearch {
    node_budget: Option<u64>,
}

impl ExhaustiveSearch {
    /// Creates an unbounded exhaustive search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a search that gives up after visiting `budget` nodes.
    ///
    /// A node is one item tentatively placed in one slot position.
    pub fn with_budget(budget: u64) -> Self {
        Self {
            node_budget: Some(budget),
        }
    }

    pub fn node_budget(&self) -> Option<u64> {
        self.node_budget
    }
}

impl AssignmentSearch for ExhaustiveSearch {
    fn search(&self, costs: &CostMatrix, universe: &[SlotId]) -> SearchOutcome {
        let n = costs.item_count();
        if n > universe.len() {
            return SearchOutcome::infeasible();
        }

        let mut engine = Engine::new(costs, self.node_budget);
        engine.run(universe);

        let solution = engine.best.map(|best| Solution {
            assignment: Assignment::from_positions(n, &best.order, &best.slots),
            score: best.score,
        });

        SearchOutcome {
            solution,
            nodes_visited: engine.nodes,
            truncated: engine.truncated,
        }
    }

    fn name(&self) -> &str {
        "exhaustive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemId;

    fn slots(n: usize) -> Vec<SlotId> {
        (0..n).map(SlotId).collect()
    }

    /// Enumerates every (combination, permutation) pair without pruning and
    /// keeps the first strict minimum.
    fn reference(costs: &CostMatrix, universe: &[SlotId]) -> Option<(u64, Assignment)> {
        fn permute(
            costs: &CostMatrix,
            combo: &[SlotId],
            used: &mut Vec<bool>,
            order: &mut Vec<ItemId>,
            best: &mut Option<(u64, Assignment)>,
        ) {
            let n = used.len();
            if order.len() == n {
                let score = order
                    .iter()
                    .zip(combo)
                    .map(|(i, s)| costs.cost(*i, *s))
                    .fold(0, u64::saturating_add);
                if best.as_ref().map_or(true, |(b, _)| score < *b) {
                    *best = Some((score, Assignment::from_positions(n, order, combo)));
                }
                return;
            }
            for i in 0..n {
                if !used[i] {
                    used[i] = true;
                    order.push(ItemId(i));
                    permute(costs, combo, used, order, best);
                    order.pop();
                    used[i] = false;
                }
            }
        }

        let n = costs.item_count();
        let mut best = None;
        for idx in Combinations::new(universe.len(), n) {
            let combo: Vec<SlotId> = idx.iter().map(|&i| universe[i]).collect();
            permute(costs, &combo, &mut vec![false; n], &mut Vec::new(), &mut best);
        }
        best
    }

    #[test]
    fn zero_costs_pick_first_combination_in_catalog_order() {
        let costs = CostMatrix::zeros(3, 4);
        let outcome = ExhaustiveSearch::new().search(&costs, &slots(3));
        let solution = outcome.solution.unwrap();
        assert_eq!(solution.score, 0);
        for i in 0..3 {
            assert_eq!(solution.assignment.slot_of(ItemId(i)), Some(SlotId(i)));
        }
    }

    #[test]
    fn avoids_forbidden_slot() {
        // Item 0 pays 100 in slot 0.
        let costs =
            CostMatrix::from_rows(&[vec![100, 0, 0, 0], vec![0; 4], vec![0; 4]]).unwrap();
        let solution = ExhaustiveSearch::new()
            .search(&costs, &slots(3))
            .solution
            .unwrap();
        assert_eq!(solution.score, 0);
        // First conflict-free ordering: slot 0 ← item 1, slot 1 ← item 0.
        assert_eq!(solution.assignment.slot_of(ItemId(0)), Some(SlotId(1)));
        assert_eq!(solution.assignment.slot_of(ItemId(1)), Some(SlotId(0)));
        assert_eq!(solution.assignment.slot_of(ItemId(2)), Some(SlotId(2)));
    }

    #[test]
    fn too_many_items_is_infeasible() {
        let costs = CostMatrix::zeros(4, 3);
        let outcome = ExhaustiveSearch::new().search(&costs, &slots(3));
        assert_eq!(outcome, SearchOutcome::infeasible());
    }

    #[test]
    fn no_items_yields_empty_solution() {
        let costs = CostMatrix::zeros(0, 3);
        let solution = ExhaustiveSearch::new()
            .search(&costs, &slots(2))
            .solution
            .unwrap();
        assert_eq!(solution.score, 0);
        assert!(solution.assignment.is_empty());
    }

    #[test]
    fn ties_resolve_to_first_enumerated() {
        // Every complete assignment costs 1 + 1: the first enumerated wins.
        let costs = CostMatrix::from_rows(&[vec![1, 1, 1], vec![1, 1, 1]]).unwrap();
        let solution = ExhaustiveSearch::new()
            .search(&costs, &slots(3))
            .solution
            .unwrap();
        assert_eq!(solution.score, 2);
        assert_eq!(solution.assignment.slot_of(ItemId(0)), Some(SlotId(0)));
        assert_eq!(solution.assignment.slot_of(ItemId(1)), Some(SlotId(1)));
    }

    #[test]
    fn pruning_matches_unpruned_reference() {
        let rows = vec![
            vec![10, 1, 100, 0, 1],
            vec![0, 10, 10, 100, 1],
            vec![1, 0, 0, 10, 100],
            vec![100, 100, 1, 1, 0],
        ];
        let costs = CostMatrix::from_rows(&rows).unwrap();
        let universe = slots(5);
        let (score, assignment) = reference(&costs, &universe).unwrap();
        let solution = ExhaustiveSearch::new()
            .search(&costs, &universe)
            .solution
            .unwrap();
        assert_eq!(solution.score, score);
        assert_eq!(solution.assignment, assignment);
    }

    #[test]
    fn budget_truncates_and_reports() {
        let rows = vec![vec![1, 1, 1, 1, 1, 1, 1]; 6];
        let costs = CostMatrix::from_rows(&rows).unwrap();
        let outcome = ExhaustiveSearch::with_budget(10).search(&costs, &slots(7));
        assert!(outcome.truncated);
        assert_eq!(outcome.nodes_visited, 10);
        // Six nodes reach the first leaf, so a placement exists.
        assert_eq!(outcome.score(), Some(6));
    }

    #[test]
    fn saturated_costs_do_not_overflow() {
        let costs = CostMatrix::from_rows(&[vec![u64::MAX, 1], vec![u64::MAX, u64::MAX]]).unwrap();
        let solution = ExhaustiveSearch::new()
            .search(&costs, &slots(2))
            .solution
            .unwrap();
        assert_eq!(solution.score, u64::MAX);
        assert!(solution.assignment.is_complete());
    }

    #[test]
    fn tiny_budget_yields_no_solution() {
        let costs = CostMatrix::zeros(3, 3);
        let outcome = ExhaustiveSearch::with_budget(2).search(&costs, &slots(3));
        assert!(outcome.truncated);
        assert_eq!(outcome.solution, None);
    }
}
