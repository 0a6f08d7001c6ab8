//! Timetable (solution) model.
//!
//! A timetable places every course session in a (time slot, room) pair.
//! It is the value returned by a successful solve, and can independently
//! verify that it is clash-free.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::Problem;

/// A complete timetable (solution to a timetabling problem).
///
/// Placements are stored in obligation order: courses as listed in the
/// problem, sessions ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Session placements (course session → slot × room).
    pub placements: Vec<Placement>,
}

/// A course session placed in a time slot and room.
///
/// Teacher and group are denormalized from the course for query convenience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Placed course ID.
    pub course_id: String,
    /// Zero-based session index within the course.
    pub session: u32,
    /// Teacher of the course.
    pub teacher_id: String,
    /// Student group of the course.
    pub group_id: String,
    /// Assigned time slot ID.
    pub slot_id: String,
    /// Assigned room ID.
    pub room_id: String,
}

/// A clash found in a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of clash.
    pub violation_type: ViolationType,
    /// The double-booked entity (teacher, room, or group ID).
    pub entity_id: String,
    /// The slot in which the clash occurs.
    pub slot_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of clashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// A teacher teaches two sessions in the same slot.
    TeacherClash,
    /// A room hosts two sessions in the same slot.
    RoomClash,
    /// A student group attends two sessions in the same slot.
    GroupClash,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(
        course_id: impl Into<String>,
        session: u32,
        teacher_id: impl Into<String>,
        group_id: impl Into<String>,
        slot_id: impl Into<String>,
        room_id: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            session,
            teacher_id: teacher_id.into(),
            group_id: group_id.into(),
            slot_id: slot_id.into(),
            room_id: room_id.into(),
        }
    }
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: &str,
        slot_id: &str,
        first: &Placement,
        second: &Placement,
    ) -> Self {
        let what = match violation_type {
            ViolationType::TeacherClash => "Teacher",
            ViolationType::RoomClash => "Room",
            ViolationType::GroupClash => "Group",
        };
        Self {
            violation_type,
            entity_id: entity_id.to_string(),
            slot_id: slot_id.to_string(),
            message: format!(
                "{what} '{entity_id}' is booked twice in '{slot_id}': {}#{} and {}#{}",
                first.course_id, first.session, second.course_id, second.session
            ),
        }
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placement.
    pub fn add_placement(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Number of placements.
    pub fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Finds the placement of a specific course session.
    pub fn placement_for(&self, course_id: &str, session: u32) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|p| p.course_id == course_id && p.session == session)
    }

    /// Returns all placements of a course.
    pub fn placements_for_course(&self, course_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.course_id == course_id)
            .collect()
    }

    /// Returns all placements taught by a teacher.
    pub fn placements_for_teacher(&self, teacher_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.teacher_id == teacher_id)
            .collect()
    }

    /// Returns all placements hosted in a room.
    pub fn placements_for_room(&self, room_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.room_id == room_id)
            .collect()
    }

    /// Returns all placements attended by a student group.
    pub fn placements_for_group(&self, group_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.group_id == group_id)
            .collect()
    }

    /// Returns all placements in a time slot.
    pub fn placements_for_slot(&self, slot_id: &str) -> Vec<&Placement> {
        self.placements
            .iter()
            .filter(|p| p.slot_id == slot_id)
            .collect()
    }

    /// Placements grouped per student group, groups in first-seen order.
    pub fn by_group(&self) -> Vec<(&str, Vec<&Placement>)> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&Placement>> = HashMap::new();
        for p in &self.placements {
            let entry = groups.entry(p.group_id.as_str()).or_default();
            if entry.is_empty() {
                order.push(p.group_id.as_str());
            }
            entry.push(p);
        }
        order
            .into_iter()
            .map(|g| (g, groups.remove(g).unwrap_or_default()))
            .collect()
    }

    /// Placements sorted by the problem's slot order, then room order.
    ///
    /// Slots or rooms unknown to `problem` sort last. The sort is stable,
    /// so ties keep obligation order.
    pub fn in_slot_order(&self, problem: &Problem) -> Vec<&Placement> {
        let slot_rank: HashMap<&str, usize> = problem
            .slots
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();
        let room_rank: HashMap<&str, usize> = problem
            .rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.as_str(), i))
            .collect();

        let mut sorted: Vec<&Placement> = self.placements.iter().collect();
        sorted.sort_by_key(|p| {
            (
                slot_rank.get(p.slot_id.as_str()).copied().unwrap_or(usize::MAX),
                room_rank.get(p.room_id.as_str()).copied().unwrap_or(usize::MAX),
            )
        });
        sorted
    }

    /// Checks the three no-overlap invariants over all placements.
    ///
    /// Returns one violation per offending pair. An empty result means
    /// no teacher, room, or group is double-booked.
    pub fn find_violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        // (type, entity, slot) → first placement seen
        let mut seen: HashMap<(ViolationType, &str, &str), &Placement> = HashMap::new();

        for p in &self.placements {
            let keys = [
                (ViolationType::TeacherClash, p.teacher_id.as_str()),
                (ViolationType::RoomClash, p.room_id.as_str()),
                (ViolationType::GroupClash, p.group_id.as_str()),
            ];
            for (kind, entity) in keys {
                match seen.get(&(kind, entity, p.slot_id.as_str())) {
                    Some(first) => {
                        violations.push(Violation::new(kind, entity, &p.slot_id, first, p));
                    }
                    None => {
                        seen.insert((kind, entity, p.slot_id.as_str()), p);
                    }
                }
            }
        }

        violations
    }

    /// Whether the timetable has no clashes.
    pub fn is_valid(&self) -> bool {
        self.find_violations().is_empty()
    }

    /// Whether every obligation of `problem` is placed exactly once,
    /// and nothing else is placed.
    pub fn is_complete_for(&self, problem: &Problem) -> bool {
        let mut counts: BTreeMap<(&str, u32), usize> = BTreeMap::new();
        for p in &self.placements {
            *counts.entry((p.course_id.as_str(), p.session)).or_insert(0) += 1;
        }
        let obligations = problem.obligations();
        obligations.len() == counts.len()
            && obligations.iter().all(|o| {
                counts.get(&(o.course.id.as_str(), o.session)).copied() == Some(1)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Room, StudentGroup, Teacher, TimeSlot};

    fn sample_timetable() -> Timetable {
        let mut t = Timetable::new();
        t.add_placement(Placement::new("C1", 0, "T1", "G1", "Mon P1", "R1"));
        t.add_placement(Placement::new("C2", 0, "T2", "G2", "Mon P1", "R2"));
        t.add_placement(Placement::new("C1", 1, "T1", "G1", "Mon P2", "R1"));
        t
    }

    fn sample_problem() -> Problem {
        Problem::new()
            .with_teacher(Teacher::new("T1"))
            .with_teacher(Teacher::new("T2"))
            .with_room(Room::new("R1"))
            .with_room(Room::new("R2"))
            .with_slots(TimeSlot::grid(&["Mon"], &["P1", "P2"]))
            .with_group(StudentGroup::new("G1"))
            .with_group(StudentGroup::new("G2"))
            .with_course(Course::new("C1", "T1", "G1").with_sessions(2))
            .with_course(Course::new("C2", "T2", "G2"))
    }

    #[test]
    fn test_queries() {
        let t = sample_timetable();
        assert_eq!(t.placement_count(), 3);
        assert_eq!(t.placements_for_course("C1").len(), 2);
        assert_eq!(t.placements_for_teacher("T2").len(), 1);
        assert_eq!(t.placements_for_room("R1").len(), 2);
        assert_eq!(t.placements_for_group("G1").len(), 2);
        assert_eq!(t.placements_for_slot("Mon P1").len(), 2);
        assert_eq!(t.placement_for("C1", 1).map(|p| p.slot_id.as_str()), Some("Mon P2"));
        assert!(t.placement_for("C1", 2).is_none());
    }

    #[test]
    fn test_valid_timetable() {
        let t = sample_timetable();
        assert!(t.is_valid());
        assert!(t.is_complete_for(&sample_problem()));
    }

    #[test]
    fn test_teacher_clash_detected() {
        let mut t = Timetable::new();
        t.add_placement(Placement::new("C1", 0, "T1", "G1", "S1", "R1"));
        t.add_placement(Placement::new("C2", 0, "T1", "G2", "S1", "R2"));

        let v = t.find_violations();
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::TeacherClash);
        assert_eq!(v[0].entity_id, "T1");
        assert_eq!(v[0].slot_id, "S1");
        assert!(v[0].message.contains("C1#0"));
    }

    #[test]
    fn test_room_and_group_clash_detected() {
        let mut t = Timetable::new();
        t.add_placement(Placement::new("C1", 0, "T1", "G1", "S1", "R1"));
        t.add_placement(Placement::new("C2", 0, "T2", "G1", "S1", "R1"));

        let kinds: Vec<ViolationType> =
            t.find_violations().iter().map(|v| v.violation_type).collect();
        assert_eq!(kinds, vec![ViolationType::RoomClash, ViolationType::GroupClash]);
    }

    #[test]
    fn test_same_entities_different_slots_ok() {
        let mut t = Timetable::new();
        t.add_placement(Placement::new("C1", 0, "T1", "G1", "S1", "R1"));
        t.add_placement(Placement::new("C1", 1, "T1", "G1", "S2", "R1"));
        assert!(t.is_valid());
    }

    #[test]
    fn test_incomplete_and_duplicate() {
        let p = sample_problem();

        let mut missing = sample_timetable();
        missing.placements.pop();
        assert!(!missing.is_complete_for(&p));

        let mut duplicated = sample_timetable();
        duplicated.add_placement(Placement::new("C2", 0, "T2", "G2", "Mon P2", "R2"));
        assert!(!duplicated.is_complete_for(&p));
    }

    #[test]
    fn test_in_slot_order() {
        let t = sample_timetable();
        let p = sample_problem();
        let ordered: Vec<(&str, &str)> = t
            .in_slot_order(&p)
            .iter()
            .map(|pl| (pl.slot_id.as_str(), pl.room_id.as_str()))
            .collect();
        assert_eq!(
            ordered,
            vec![("Mon P1", "R1"), ("Mon P1", "R2"), ("Mon P2", "R1")]
        );
    }

    #[test]
    fn test_by_group() {
        let t = sample_timetable();
        let groups = t.by_group();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "G1");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "G2");
    }

    #[test]
    fn test_empty_timetable() {
        let t = Timetable::new();
        assert_eq!(t.placement_count(), 0);
        assert!(t.is_valid());
        assert!(t.by_group().is_empty());
    }
}
