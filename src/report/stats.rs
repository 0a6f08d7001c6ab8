//! Timetable summary statistics.
//!
//! Computes load indicators from a solved timetable and its problem.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Sessions per day | Placements whose slot falls on each day |
//! | Sessions per group | Placements attended by each student group |
//! | Teacher workload | Sessions taught by each teacher |
//! | Room usage | Sessions hosted by each room |
//! | Room utilization | Used (slot, room) pairs / all pairs |

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Problem, Timetable};

/// Timetable summary statistics.
///
/// Maps are keyed by ID and sorted, so the output is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimetableStats {
    /// Number of placed sessions.
    pub total_sessions: usize,
    /// Distinct student groups with at least one session.
    pub distinct_groups: usize,
    /// Distinct courses with at least one session.
    pub distinct_courses: usize,
    /// Distinct teachers with at least one session.
    pub distinct_teachers: usize,
    /// Distinct rooms with at least one session.
    pub distinct_rooms: usize,
    /// Sessions per day label (slots without a day count under their ID).
    pub sessions_per_day: BTreeMap<String, usize>,
    /// Sessions per student group.
    pub sessions_per_group: BTreeMap<String, usize>,
    /// Sessions per teacher.
    pub teacher_workload: BTreeMap<String, usize>,
    /// Sessions per room.
    pub room_usage: BTreeMap<String, usize>,
    /// Fraction of (slot, room) pairs in use (0.0..1.0).
    pub room_utilization: f64,
}

impl TimetableStats {
    /// Computes statistics for a timetable.
    ///
    /// # Arguments
    /// * `timetable` - The solved timetable.
    /// * `problem` - The problem it solves (for day labels and capacity).
    pub fn calculate(timetable: &Timetable, problem: &Problem) -> Self {
        let mut stats = Self {
            total_sessions: timetable.placement_count(),
            ..Default::default()
        };

        let mut groups = BTreeSet::new();
        let mut courses = BTreeSet::new();
        let mut teachers = BTreeSet::new();
        let mut rooms = BTreeSet::new();

        for p in &timetable.placements {
            groups.insert(p.group_id.as_str());
            courses.insert(p.course_id.as_str());
            teachers.insert(p.teacher_id.as_str());
            rooms.insert(p.room_id.as_str());

            let day = problem
                .slot(&p.slot_id)
                .map(|s| s.day_label())
                .unwrap_or(p.slot_id.as_str());
            *stats.sessions_per_day.entry(day.to_string()).or_insert(0) += 1;
            *stats
                .sessions_per_group
                .entry(p.group_id.clone())
                .or_insert(0) += 1;
            *stats
                .teacher_workload
                .entry(p.teacher_id.clone())
                .or_insert(0) += 1;
            *stats.room_usage.entry(p.room_id.clone()).or_insert(0) += 1;
        }

        stats.distinct_groups = groups.len();
        stats.distinct_courses = courses.len();
        stats.distinct_teachers = teachers.len();
        stats.distinct_rooms = rooms.len();

        let capacity = problem.capacity();
        stats.room_utilization = if capacity == 0 {
            0.0
        } else {
            stats.total_sessions as f64 / capacity as f64
        };

        stats
    }

    /// Teachers sorted by workload, busiest first (ties by ID).
    pub fn busiest_teachers(&self) -> Vec<(&str, usize)> {
        let mut v: Vec<(&str, usize)> = self
            .teacher_workload
            .iter()
            .map(|(id, &n)| (id.as_str(), n))
            .collect();
        v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        v
    }
}
