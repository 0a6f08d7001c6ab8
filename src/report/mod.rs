//! Presentation-neutral timetable summaries.
//!
//! Helpers for a presentation layer: load statistics and placement
//! filtering. Rendering (grids, tables, files) stays with the caller.

mod filter;
mod stats;

pub use filter::TimetableFilter;
pub use stats::TimetableStats;
