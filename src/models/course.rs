//! Course model.
//!
//! A course is the unit of teaching to be timetabled. It is taught by
//! exactly one teacher to exactly one student group, and needs a fixed
//! number of weekly sessions. Each session becomes one obligation for
//! the solver.

use serde::{Deserialize, Serialize};

/// A course to be timetabled.
///
/// Courses are immutable once loaded into a [`Problem`](super::Problem);
/// the solver only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Teacher reference (must match a `Teacher::id`).
    pub teacher_id: String,
    /// Student group reference (must match a `StudentGroup::id`).
    pub group_id: String,
    /// Number of sessions per timetable period. Must be at least 1.
    pub sessions: u32,
    /// Required room kind. `None` = any room.
    pub room_kind: Option<String>,
}

impl Course {
    /// Creates a single-session course.
    pub fn new(
        id: impl Into<String>,
        teacher_id: impl Into<String>,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            teacher_id: teacher_id.into(),
            group_id: group_id.into(),
            sessions: 1,
            room_kind: None,
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the required session count.
    pub fn with_sessions(mut self, sessions: u32) -> Self {
        self.sessions = sessions;
        self
    }

    /// Restricts the course to rooms of the given kind.
    pub fn with_room_kind(mut self, kind: impl Into<String>) -> Self {
        self.room_kind = Some(kind.into());
        self
    }

    /// Display label: the name if set, otherwise the id.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
