//! Diagnostics for one scheduling run.
//!
//! The library does no logging of its own; callers that want to show how a
//! schedule was reached print or inspect the [`SearchReport`].

use std::fmt;

use crate::algorithms::SearchOutcome;

/// Which slot universe a phase searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Every slot but the overflow slot.
    Restricted,
    /// Every slot, overflow included.
    Full,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Restricted => f.write_str("restricted"),
            Phase::Full => f.write_str("full"),
        }
    }
}

/// What one phase found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: Phase,
    /// Number of slots in the searched universe.
    pub universe_size: usize,
    /// Best score, or `None` if the phase produced no assignment.
    pub best_score: Option<u64>,
    pub nodes_visited: u64,
    pub truncated: bool,
    /// True if this phase's assignment is the one returned.
    pub adopted: bool,
}

impl PhaseReport {
    pub(crate) fn new(phase: Phase, universe_size: usize, outcome: &SearchOutcome) -> Self {
        Self {
            phase,
            universe_size,
            best_score: outcome.score(),
            nodes_visited: outcome.nodes_visited,
            truncated: outcome.truncated,
            adopted: false,
        }
    }
}

/// Per-phase record of a scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// Name of the search that ran each phase.
    pub strategy: String,
    pub phases: Vec<PhaseReport>,
}

impl SearchReport {
    pub(crate) fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            phases: Vec::with_capacity(2),
        }
    }

    pub fn phase(&self, phase: Phase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    /// Returns true if the overflow slot was opened up.
    pub fn fallback_engaged(&self) -> bool {
        self.phase(Phase::Full).is_some()
    }

    /// Returns true if any phase hit its node budget.
    pub fn truncated(&self) -> bool {
        self.phases.iter().any(|p| p.truncated)
    }

    pub fn total_nodes(&self) -> u64 {
        self.phases.iter().map(|p| p.nodes_visited).sum()
    }
}

impl fmt::Display for SearchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Report ({})", self.strategy)?;
        for p in &self.phases {
            write!(f, "  {:<10} {} slots: ", p.phase, p.universe_size)?;
            match p.best_score {
                Some(score) => write!(f, "best {score}")?,
                None => f.write_str("no assignment")?,
            }
            write!(f, ", {} nodes", p.nodes_visited)?;
            if p.truncated {
                f.write_str(" (budget exhausted)")?;
            }
            if p.adopted {
                f.write_str(" [adopted]")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase(phase: Phase, best: Option<u64>, adopted: bool) -> PhaseReport {
        PhaseReport {
            phase,
            universe_size: 3,
            best_score: best,
            nodes_visited: 7,
            truncated: false,
            adopted,
        }
    }

    #[test]
    fn fallback_engaged_only_with_full_phase() {
        let mut report = SearchReport::new("exhaustive");
        report.phases.push(phase(Phase::Restricted, Some(0), true));
        assert!(!report.fallback_engaged());

        report.phases.push(phase(Phase::Full, Some(0), false));
        assert!(report.fallback_engaged());
        assert_eq!(report.total_nodes(), 14);
        assert!(!report.truncated());
    }

    #[test]
    fn display_lists_phases() {
        let mut report = SearchReport::new("exhaustive");
        report.phases.push(phase(Phase::Restricted, Some(100), false));
        report.phases.push(phase(Phase::Full, None, false));
        let text = report.to_string();
        assert!(text.starts_with("Search Report (exhaustive)"));
        assert!(text.contains("best 100"));
        assert!(text.contains("no assignment"));
    }
}
