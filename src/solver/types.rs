//! Solver outcome types.

use serde::{Deserialize, Serialize};

use crate::models::Timetable;

/// Terminal outcome of a search.
///
/// Only `Solved` carries a timetable. `Infeasible` and `Aborted` are
/// distinct, regular outcomes; neither is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A clash-free timetable covering every obligation.
    Solved {
        timetable: Timetable,
        stats: SearchStats,
    },
    /// The search space was exhausted: no clash-free timetable exists
    /// under the given enumeration.
    Infeasible {
        /// The obligation whose alternatives ran out last.
        last_obligation: Option<ObligationRef>,
        stats: SearchStats,
    },
    /// The search stopped before reaching a conclusion.
    Aborted {
        reason: AbortReason,
        stats: SearchStats,
    },
}

/// Why a search was stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbortReason {
    /// `max_steps` candidate evaluations were used up.
    StepLimit,
    /// `time_limit_ms` elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Identifies one course session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObligationRef {
    /// Course ID.
    pub course_id: String,
    /// Zero-based session index.
    pub session: u32,
}

/// Search effort counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Number of obligations (course sessions) to place.
    pub obligations: usize,
    /// Candidate (slot, room) evaluations performed.
    pub steps: u64,
    /// Tentative placements made.
    pub placements: u64,
    /// Choice points abandoned after running out of candidates.
    pub backtracks: u64,
    /// Wall-clock time spent searching (ms).
    pub elapsed_ms: u64,
}

impl SolveOutcome {
    /// Whether a timetable was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved { .. })
    }

    /// Whether the search proved that no timetable exists.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolveOutcome::Infeasible { .. })
    }

    /// Whether the search was stopped early.
    pub fn is_aborted(&self) -> bool {
        matches!(self, SolveOutcome::Aborted { .. })
    }

    /// The timetable, if solved.
    pub fn timetable(&self) -> Option<&Timetable> {
        match self {
            SolveOutcome::Solved { timetable, .. } => Some(timetable),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the timetable if solved.
    pub fn into_timetable(self) -> Option<Timetable> {
        match self {
            SolveOutcome::Solved { timetable, .. } => Some(timetable),
            _ => None,
        }
    }

    /// Search statistics.
    pub fn stats(&self) -> &SearchStats {
        match self {
            SolveOutcome::Solved { stats, .. }
            | SolveOutcome::Infeasible { stats, .. }
            | SolveOutcome::Aborted { stats, .. } => stats,
        }
    }

    /// Short outcome label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            SolveOutcome::Solved { .. } => "solved",
            SolveOutcome::Infeasible { .. } => "infeasible",
            SolveOutcome::Aborted {
                reason: AbortReason::StepLimit,
                ..
            } => "step_limit",
            SolveOutcome::Aborted {
                reason: AbortReason::TimeLimit,
                ..
            } => "time_limit",
            SolveOutcome::Aborted {
                reason: AbortReason::Cancelled,
                ..
            } => "cancelled",
        }
    }
}
