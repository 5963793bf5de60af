pub mod cost;
pub mod exhaustive;
pub mod matching;

pub use cost::CostMatrix;
pub use exhaustive::ExhaustiveSearch;
pub use matching::MatchingSearch;

use crate::catalog::SlotId;
use crate::schedule::Assignment;

/// A complete placement of every item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub assignment: Assignment,
    /// Total conflict weight of `assignment`.
    pub score: u64,
}

/// Result of one search over a slot universe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best placement found, or `None` if the universe is too small (or the
    /// budget ran out before any placement was completed).
    pub solution: Option<Solution>,
    /// Work performed: search nodes for enumeration, solver calls for matching.
    pub nodes_visited: u64,
    /// True if the search stopped on its node budget before finishing.
    pub truncated: bool,
}

impl SearchOutcome {
    pub(crate) fn infeasible() -> Self {
        Self {
            solution: None,
            nodes_visited: 0,
            truncated: false,
        }
    }

    pub fn score(&self) -> Option<u64> {
        self.solution.as_ref().map(|s| s.score)
    }
}

/// Algorithm that places every item in a distinct slot of a universe at
/// minimum total cost.
///
/// Implementations must agree on *which* optimum they return: the first one
/// met when enumerating slot combinations of the universe in lexicographic
/// order and, within a combination, item orderings by backtracking that tries
/// items in catalog order at each slot position.
pub trait AssignmentSearch {
    /// Searches for the first minimum-cost assignment over `universe`.
    ///
    /// # Arguments
    ///
    /// * `costs` - Conflict weight per item and slot
    /// * `universe` - Candidate slots, in chronological order
    ///
    /// # Returns
    ///
    /// An outcome without a solution when the universe has fewer slots than
    /// there are items.
    fn search(&self, costs: &CostMatrix, universe: &[SlotId]) -> SearchOutcome;

    /// Returns a human-readable name for this search.
    fn name(&self) -> &str;
}
