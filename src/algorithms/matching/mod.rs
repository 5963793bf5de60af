//! Assignment-problem search with enumeration-order tie-breaking.
//!
//! The Hungarian algorithm finds the optimal score in polynomial time, but
//! many assignments can share it. To return exactly what
//! [`ExhaustiveSearch`](super::ExhaustiveSearch) returns, the first optimum in
//! enumeration order is rebuilt one decision at a time:
//!
//! 1. **Slot combination.** Position by position, take the earliest slot `c`
//!    such that some optimal assignment uses the slots chosen so far plus `c`
//!    as its smallest slots. The check solves the assignment problem over the
//!    chosen slots, `c`, and every later slot, with a large bonus on the
//!    chosen slots and `c` so that only covering assignments can reach
//!    `opt − forced × bonus`.
//! 2. **Item order.** With the combination fixed, walk its slots in order and
//!    give each the first remaining item whose placement still lets the rest
//!    reach the optimum.
//!
//! Each check is one O(n² m) solve, and there are at most O(n m + n²) of
//! them, so the whole search stays polynomial. No node budget applies.
//!
//! The bonus-biased costs must fit the solver's signed integer range. Cost
//! matrices too large for that are handed to the exhaustive search instead.

mod hungarian;

use super::{AssignmentSearch, CostMatrix, ExhaustiveSearch, SearchOutcome, Solution};
use crate::catalog::{ItemId, SlotId};
use crate::schedule::Assignment;

use hungarian::min_cost_assignment;

/// Largest biased sub-problem total accepted, with headroom below the
/// solver's sentinel for its dual potentials.
const SOLVER_LIMIT: i64 = i64::MAX / 64;

/// Polynomial-time search returning the same assignment as the exhaustive one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingSearch;

impl MatchingSearch {
    pub fn new() -> Self {
        Self
    }
}

/// Signed copy of a cost matrix, plus the forcing bonus and a call counter.
struct Solver {
    cells: Vec<Vec<i64>>,
    bonus: i64,
    calls: u64,
}

impl Solver {
    /// Returns `None` when the costs are too large to bias exactly.
    fn new(costs: &CostMatrix) -> Option<Self> {
        let bonus = i64::try_from(costs.max_total()).ok()?.checked_add(1)?;
        let rows = i64::try_from(costs.item_count()).ok()?.checked_add(1)?;
        if bonus.checked_mul(rows)? > SOLVER_LIMIT {
            return None;
        }

        let cells = (0..costs.item_count())
            .map(|i| {
                (0..costs.slot_count())
                    .map(|s| i64::try_from(costs.cost(ItemId(i), SlotId(s))).ok())
                    .collect::<Option<Vec<_>>>()
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            cells,
            bonus,
            calls: 0,
        })
    }

    /// Minimum total over `rows` × `columns`, with the bonus subtracted from
    /// the cost of each of the first `forced` columns.
    fn solve(&mut self, rows: &[ItemId], columns: &[SlotId], forced: usize) -> Option<i64> {
        self.calls += 1;
        let matrix: Vec<Vec<i64>> = rows
            .iter()
            .map(|&item| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(k, &slot)| {
                        let cost = self.cost(item, slot);
                        if k < forced {
                            cost - self.bonus
                        } else {
                            cost
                        }
                    })
                    .collect()
            })
            .collect();
        min_cost_assignment(&matrix).map(|(total, _)| total)
    }

    fn cost(&self, item: ItemId, slot: SlotId) -> i64 {
        self.cells[item.0][slot.0]
    }
}

impl AssignmentSearch for MatchingSearch {
    fn search(&self, costs: &CostMatrix, universe: &[SlotId]) -> SearchOutcome {
        let n = costs.item_count();
        if n > universe.len() {
            return SearchOutcome::infeasible();
        }

        let Some(mut solver) = Solver::new(costs) else {
            return ExhaustiveSearch::new().search(costs, universe);
        };
        let items: Vec<ItemId> = (0..n).map(ItemId).collect();
        let solution = reconstruct(&mut solver, &items, universe);

        SearchOutcome {
            solution,
            nodes_visited: solver.calls,
            truncated: false,
        }
    }

    fn name(&self) -> &str {
        "matching"
    }
}

fn reconstruct(solver: &mut Solver, items: &[ItemId], universe: &[SlotId]) -> Option<Solution> {
    let n = items.len();
    let opt = solver.solve(items, universe, 0)?;

    // Slot combination, smallest slot first.
    let mut combo: Vec<SlotId> = Vec::with_capacity(n);
    let mut start = 0;
    for pos in 0..n {
        let still_needed = n - pos - 1;
        let mut chosen = None;
        for idx in start..universe.len() - still_needed {
            let mut columns = combo.clone();
            columns.push(universe[idx]);
            let forced = columns.len();
            columns.extend_from_slice(&universe[idx + 1..]);

            let discount = i64::try_from(forced).ok()?.checked_mul(solver.bonus)?;
            let target = opt.checked_sub(discount)?;
            if solver.solve(items, &columns, forced) == Some(target) {
                chosen = Some(idx);
                break;
            }
        }
        let idx = chosen?;
        combo.push(universe[idx]);
        start = idx + 1;
    }

    // Item for each slot of the combination, in catalog order.
    let mut free: Vec<ItemId> = items.to_vec();
    let mut order: Vec<ItemId> = Vec::with_capacity(n);
    let mut fixed = 0i64;
    for (pos, &slot) in combo.iter().enumerate() {
        let rest_slots = &combo[pos + 1..];
        let mut chosen = None;
        for (k, &item) in free.iter().enumerate() {
            let here = fixed + solver.cost(item, slot);
            if here > opt {
                continue;
            }
            let rest: Vec<ItemId> = free.iter().copied().filter(|&i| i != item).collect();
            if solver.solve(&rest, rest_slots, 0).map(|r| here + r) == Some(opt) {
                chosen = Some(k);
                break;
            }
        }
        let item = free.remove(chosen?);
        fixed += solver.cost(item, slot);
        order.push(item);
    }

    Some(Solution {
        assignment: Assignment::from_positions(n, &order, &combo),
        score: u64::try_from(opt).ok()?,
    })
}
