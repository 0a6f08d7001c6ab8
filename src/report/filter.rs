//! Placement filtering.

use crate::models::{Placement, Timetable};

/// Case-insensitive substring filter over placements.
///
/// Empty criteria match everything; all set criteria must match.
///
/// # Example
/// ```
/// use u_timetable::models::{Placement, Timetable};
/// use u_timetable::report::TimetableFilter;
///
/// let mut t = Timetable::new();
/// t.add_placement(Placement::new("AI", 0, "T1", "BCS-3A", "Mon P1", "LT-1"));
/// t.add_placement(Placement::new("OS", 0, "T2", "BSE-3A", "Tue P1", "LAB-1"));
///
/// let labs = TimetableFilter::new().with_room("lab").apply(&t);
/// assert_eq!(labs.len(), 1);
/// assert_eq!(labs[0].course_id, "OS");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableFilter {
    group: String,
    course: String,
    teacher: String,
    room: String,
    slot: String,
}

impl TimetableFilter {
    /// Creates a filter matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, needle: impl AsRef<str>) -> Self {
        self.group = needle.as_ref().to_lowercase();
        self
    }

    pub fn with_course(mut self, needle: impl AsRef<str>) -> Self {
        self.course = needle.as_ref().to_lowercase();
        self
    }

    pub fn with_teacher(mut self, needle: impl AsRef<str>) -> Self {
        self.teacher = needle.as_ref().to_lowercase();
        self
    }

    pub fn with_room(mut self, needle: impl AsRef<str>) -> Self {
        self.room = needle.as_ref().to_lowercase();
        self
    }

    /// Matches against the slot ID, e.g. `"mon"` or `"10:00"`.
    pub fn with_slot(mut self, needle: impl AsRef<str>) -> Self {
        self.slot = needle.as_ref().to_lowercase();
        self
    }

    /// Whether a placement satisfies every set criterion.
    pub fn matches(&self, p: &Placement) -> bool {
        contains(&p.group_id, &self.group)
            && contains(&p.course_id, &self.course)
            && contains(&p.teacher_id, &self.teacher)
            && contains(&p.room_id, &self.room)
            && contains(&p.slot_id, &self.slot)
    }

    /// Returns matching placements in timetable order.
    pub fn apply<'t>(&self, timetable: &'t Timetable) -> Vec<&'t Placement> {
        timetable
            .placements
            .iter()
            .filter(|p| self.matches(p))
            .collect()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}
