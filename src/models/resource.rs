//! Teaching resources: teachers, rooms, and student groups.
//!
//! All three are bookable entities. The solver guarantees that none of
//! them is used twice in the same time slot.

use serde::{Deserialize, Serialize};

/// A teacher. Always available unless already booked in a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

/// A room that can host one course session per time slot.
///
/// Rooms are interchangeable unless a course asks for a specific `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Room classification (e.g., "lecture", "lab"). `None` = generic.
    pub kind: Option<String>,
}

/// A student group (program section) attending a set of courses together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentGroup {
    /// Unique group identifier (e.g., "BCS-3A").
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

impl Teacher {
    /// Creates a teacher.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Sets the teacher name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Room {
    /// Creates a generic room.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: None,
        }
    }

    /// Creates a room of the given kind.
    pub fn of_kind(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new(id).with_kind(kind)
    }

    /// Sets the room kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Whether this room satisfies a course's room requirement.
    ///
    /// A course without a requirement accepts every room.
    pub fn accepts(&self, required: Option<&str>) -> bool {
        match required {
            None => true,
            Some(kind) => self.kind.as_deref() == Some(kind),
        }
    }
}

impl StudentGroup {
    /// Creates a student group.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Sets the group name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
