//! Backtracking timetable solver.
//!
//! Places every course session in a (time slot, room) pair such that no
//! teacher, room, or student group is booked twice in the same slot.
//!
//! # Algorithm
//!
//! 1. Validate the problem; a malformed problem is rejected before search.
//! 2. Expand courses into obligations, one per required session.
//! 3. Pick the next obligation (listing order, or most constrained first).
//! 4. Try its (slot, room) candidates in a fixed order; book the first one
//!    without a teacher, room, or group clash and descend.
//! 5. When an obligation runs out of candidates, undo the parent's booking
//!    and let the parent try its next candidate.
//! 6. The first complete assignment wins. An empty choice stack means the
//!    problem is infeasible.
//!
//! # Complexity
//! Worst case exponential in the number of obligations; each obligation
//! has at most `slots × rooms` candidates.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach",
//! Ch. 6.3 (Backtracking Search for CSPs)

mod compiled;
mod config;
mod runner;
mod types;

pub use config::{SolverConfig, ValueOrder, VariableOrdering};
pub use runner::BacktrackingSolver;
pub use types::{AbortReason, ObligationRef, SearchStats, SolveOutcome};

use crate::error::ScheduleError;
use crate::models::Problem;

/// Solves a problem with the default configuration.
///
/// # Example
/// ```
/// use u_timetable::models::{Course, Problem, Room, StudentGroup, Teacher, TimeSlot};
/// use u_timetable::solver::{solve, SolveOutcome};
///
/// // One teacher, three courses, two slots: impossible.
/// let problem = Problem::new()
///     .with_teacher(Teacher::new("T1"))
///     .with_room(Room::new("LT-1"))
///     .with_slots(TimeSlot::grid(&["Mon"], &["P1", "P2"]))
///     .with_group(StudentGroup::new("BCS-1A"))
///     .with_group(StudentGroup::new("BSE-1A"))
///     .with_course(Course::new("Math-A", "T1", "BCS-1A"))
///     .with_course(Course::new("Math-B", "T1", "BSE-1A"))
///     .with_course(Course::new("Stats", "T1", "BSE-1A"));
///
/// let outcome = solve(&problem).unwrap();
/// assert!(matches!(outcome, SolveOutcome::Infeasible { .. }));
/// ```
pub fn solve(problem: &Problem) -> Result<SolveOutcome, ScheduleError> {
    BacktrackingSolver::default().solve(problem)
}
