//! University course timetabling for the U-Engine ecosystem.
//!
//! Assigns every course session to a (time slot, room) pair so that no
//! teacher, room, or student group is double-booked, using a
//! constraint-satisfaction backtracking search.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Course`, `Teacher`, `Room`, `StudentGroup`,
//!   `TimeSlot`, `Problem`, `Timetable`, `Placement`, `Violation`
//! - **`validation`**: Input integrity checks (empty input, duplicate IDs,
//!   dangling references, zero session counts)
//! - **`solver`**: The backtracking engine — `solve`, `BacktrackingSolver`,
//!   `SolverConfig`, `SolveOutcome`
//! - **`report`**: Load statistics and placement filters for presentation layers
//! - **`logging`**: `tracing-subscriber` setup (feature `logging`)
//!
//! # Outcomes
//!
//! A solve ends in exactly one of:
//! - `Ok(SolveOutcome::Solved { .. })` — a clash-free timetable
//! - `Ok(SolveOutcome::Infeasible { .. })` — no timetable exists
//! - `Ok(SolveOutcome::Aborted { .. })` — a step/time budget ran out or the
//!   search was cancelled
//! - `Err(ScheduleError::MalformedProblem(..))` — rejected before search
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod solver;
pub mod validation;

pub use error::ScheduleError;
pub use solver::{solve, SolveOutcome};
