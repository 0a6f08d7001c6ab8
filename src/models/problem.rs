//! Problem definition.
//!
//! Bundles everything the solver needs: the ordered lists of teachers,
//! rooms, time slots, student groups, and courses. Listing order is
//! significant: it fixes the order in which obligations are processed
//! and candidates are tried.

use serde::{Deserialize, Serialize};

use super::{Course, Room, StudentGroup, Teacher, TimeSlot};

/// A timetabling problem instance.
///
/// Read-only for the solver. Build it with the `with_*` methods or
/// deserialize it from a collaborator's format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Teachers, in listing order.
    pub teachers: Vec<Teacher>,
    /// Rooms, in enumeration order.
    pub rooms: Vec<Room>,
    /// Time slots, in enumeration order.
    pub slots: Vec<TimeSlot>,
    /// Student groups, in listing order.
    pub groups: Vec<StudentGroup>,
    /// Courses, in processing order.
    pub courses: Vec<Course>,
}

/// One course session that must be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obligation<'a> {
    /// The course this session belongs to.
    pub course: &'a Course,
    /// Zero-based session index within the course.
    pub session: u32,
}

impl Problem {
    /// Creates an empty problem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a time slot.
    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Adds several time slots (e.g., from [`TimeSlot::grid`]).
    pub fn with_slots(mut self, slots: impl IntoIterator<Item = TimeSlot>) -> Self {
        self.slots.extend(slots);
        self
    }

    /// Adds a student group.
    pub fn with_group(mut self, group: StudentGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Finds a teacher by ID.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Finds a room by ID.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Finds a time slot by ID.
    pub fn slot(&self, id: &str) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Position of a slot in the enumeration order.
    pub fn slot_index(&self, id: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    /// Finds a student group by ID.
    pub fn group(&self, id: &str) -> Option<&StudentGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Finds a course by ID.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Expands courses into obligations: one per required session,
    /// courses in listed order, sessions ascending.
    pub fn obligations(&self) -> Vec<Obligation<'_>> {
        self.courses
            .iter()
            .flat_map(|course| {
                (0..course.sessions).map(move |session| Obligation { course, session })
            })
            .collect()
    }

    /// Total number of obligations.
    pub fn obligation_count(&self) -> usize {
        self.courses.iter().map(|c| c.sessions as usize).sum()
    }

    /// Number of (slot, room) pairs available in total.
    pub fn capacity(&self) -> usize {
        self.slots.len() * self.rooms.len()
    }

    /// Returns a copy restricted to the courses of the given groups.
    ///
    /// Teachers, rooms, and slots are kept as-is; groups not listed are
    /// dropped together with their courses. Listing order is preserved.
    ///
    /// Ids are matched exactly. To select whole programs, expand each
    /// program to its section ids first.
    ///
    /// # Example
    /// ```
    /// use u_timetable::models::{Course, Problem, StudentGroup, Teacher};
    ///
    /// let problem = Problem::new()
    ///     .with_teacher(Teacher::new("T1"))
    ///     .with_group(StudentGroup::new("BCS-1A"))
    ///     .with_group(StudentGroup::new("BCS-2A"))
    ///     .with_group(StudentGroup::new("BSE-1A"))
    ///     .with_course(Course::new("PF", "T1", "BCS-1A"))
    ///     .with_course(Course::new("DS", "T1", "BCS-2A"))
    ///     .with_course(Course::new("OOP", "T1", "BSE-1A"));
    ///
    /// // Program "BCS" = every "BCS-*" section
    /// let sections: Vec<&str> = problem
    ///     .groups
    ///     .iter()
    ///     .map(|g| g.id.as_str())
    ///     .filter(|id| id.starts_with("BCS-"))
    ///     .collect();
    /// let bcs = problem.restricted_to_groups(&sections);
    ///
    /// let courses: Vec<&str> = bcs.courses.iter().map(|c| c.id.as_str()).collect();
    /// assert_eq!(courses, vec!["PF", "DS"]);
    /// assert_eq!(bcs.groups.len(), 2);
    /// ```
    pub fn restricted_to_groups<S: AsRef<str>>(&self, group_ids: &[S]) -> Problem {
        let keep = |id: &str| group_ids.iter().any(|g| g.as_ref() == id);
        Problem {
            teachers: self.teachers.clone(),
            rooms: self.rooms.clone(),
            slots: self.slots.clone(),
            groups: self
                .groups
                .iter()
                .filter(|g| keep(&g.id))
                .cloned()
                .collect(),
            courses: self
                .courses
                .iter()
                .filter(|c| keep(&c.group_id))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_problem() -> Problem {
        Problem::new()
            .with_teacher(Teacher::new("T1"))
            .with_teacher(Teacher::new("T2"))
            .with_room(Room::new("R1"))
            .with_slots(TimeSlot::grid(&["Mon"], &["P1", "P2"]))
            .with_group(StudentGroup::new("G1"))
            .with_group(StudentGroup::new("G2"))
            .with_course(Course::new("C1", "T1", "G1").with_sessions(2))
            .with_course(Course::new("C2", "T2", "G2"))
    }

    #[test]
    fn test_obligations_order() {
        let p = sample_problem();
        let obs: Vec<(&str, u32)> = p
            .obligations()
            .iter()
            .map(|o| (o.course.id.as_str(), o.session))
            .collect();
        assert_eq!(obs, vec![("C1", 0), ("C1", 1), ("C2", 0)]);
        assert_eq!(p.obligation_count(), 3);
    }

    #[test]
    fn test_lookups() {
        let p = sample_problem();
        assert!(p.teacher("T2").is_some());
        assert!(p.teacher("T9").is_none());
        assert_eq!(p.slot_index("Mon P2"), Some(1));
        assert_eq!(p.course("C2").map(|c| c.teacher_id.as_str()), Some("T2"));
        assert_eq!(p.capacity(), 2);
    }

    #[test]
    fn test_restricted_to_groups() {
        let p = sample_problem();
        let r = p.restricted_to_groups(&["G2"]);
        assert_eq!(r.groups.len(), 1);
        assert_eq!(r.courses.len(), 1);
        assert_eq!(r.courses[0].id, "C2");
        assert_eq!(r.teachers.len(), 2);
        // Source problem untouched
        assert_eq!(p.courses.len(), 2);
    }

    #[test]
    fn test_serde_roundtrip() {
        let p = sample_problem();
        let json = serde_json::to_string(&p).unwrap();
        let back: Problem = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
