//! Timetabling domain models.
//!
//! Provides the data types describing a timetabling problem and its
//! solution. The solver reads a [`Problem`] and produces a [`Timetable`].
//!
//! # Domain Mappings
//!
//! | u-timetable | University | School | Training Center |
//! |-------------|------------|--------|-----------------|
//! | Course | Course | Subject | Workshop |
//! | Teacher | Lecturer | Teacher | Trainer |
//! | StudentGroup | Program Section | Class | Cohort |
//! | TimeSlot | Day × Period | Lesson Period | Session Block |
//! | Room | Lecture Theatre/Lab | Classroom | Training Room |

mod course;
mod problem;
mod resource;
mod time_slot;
mod timetable;

pub use course::Course;
pub use problem::{Obligation, Problem};
pub use resource::{Room, StudentGroup, Teacher};
pub use time_slot::TimeSlot;
pub use timetable::{Placement, Timetable, Violation, ViolationType};
