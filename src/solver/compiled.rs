//! Index-based view of a validated problem, and the booking ledger.
//!
//! The search works on dense indices instead of string IDs: every
//! obligation knows its teacher, group, and candidate list up front, and
//! clash checks are three flat-array lookups.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

use super::config::{SolverConfig, ValueOrder};
use crate::models::Problem;
use crate::validation::{ValidationError, ValidationErrorKind};

/// A (slot, room) pair, by index into `Problem::slots` / `Problem::rooms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub slot: usize,
    pub room: usize,
}

/// One course session with resolved references.
#[derive(Debug, Clone)]
pub(crate) struct CompiledObligation {
    pub course: usize,
    pub session: u32,
    pub teacher: usize,
    pub group: usize,
    /// Candidates in the order they will be tried.
    pub candidates: Vec<Candidate>,
}

/// A problem resolved to indices.
#[derive(Debug, Clone)]
pub(crate) struct CompiledProblem {
    pub obligations: Vec<CompiledObligation>,
    pub teacher_count: usize,
    pub room_count: usize,
    pub group_count: usize,
    pub slot_count: usize,
}

impl CompiledProblem {
    /// Resolves references and enumerates candidates.
    ///
    /// Expects a problem that passed validation; an unresolved reference
    /// is still reported rather than panicking.
    pub fn compile(
        problem: &Problem,
        config: &SolverConfig,
    ) -> Result<Self, Vec<ValidationError>> {
        let teacher_index: HashMap<&str, usize> = problem
            .teachers
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();
        let group_index: HashMap<&str, usize> = problem
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id.as_str(), i))
            .collect();

        let mut rng = match config.value_order {
            ValueOrder::Fixed => None,
            ValueOrder::Shuffled { seed } => Some(StdRng::seed_from_u64(seed)),
        };

        let mut obligations = Vec::with_capacity(problem.obligation_count());
        let mut errors = Vec::new();

        for (course_idx, course) in problem.courses.iter().enumerate() {
            let teacher = teacher_index.get(course.teacher_id.as_str()).copied();
            let group = group_index.get(course.group_id.as_str()).copied();
            let (teacher, group) = match (teacher, group) {
                (Some(t), Some(g)) => (t, g),
                (None, _) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownTeacher,
                        &course.id,
                        format!("Course '{}' has an unresolved teacher", course.id),
                    ));
                    continue;
                }
                (_, None) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownGroup,
                        &course.id,
                        format!("Course '{}' has an unresolved group", course.id),
                    ));
                    continue;
                }
            };

            let rooms: Vec<usize> = problem
                .rooms
                .iter()
                .enumerate()
                .filter(|(_, r)| r.accepts(course.room_kind.as_deref()))
                .map(|(i, _)| i)
                .collect();

            for session in 0..course.sessions {
                let mut candidates: Vec<Candidate> = (0..problem.slots.len())
                    .flat_map(|slot| {
                        rooms.iter().map(move |&room| Candidate { slot, room })
                    })
                    .collect();
                if let Some(rng) = rng.as_mut() {
                    candidates.shuffle(rng);
                }

                obligations.push(CompiledObligation {
                    course: course_idx,
                    session,
                    teacher,
                    group,
                    candidates,
                });
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            obligations,
            teacher_count: problem.teachers.len(),
            room_count: problem.rooms.len(),
            group_count: problem.groups.len(),
            slot_count: problem.slots.len(),
        })
    }
}

/// Which (entity, slot) cells are taken by the partial assignment.
///
/// One flat bitmap per entity type, indexed `entity * slot_count + slot`.
#[derive(Debug, Clone)]
pub(crate) struct Bookings {
    slot_count: usize,
    teacher: Vec<bool>,
    room: Vec<bool>,
    group: Vec<bool>,
}

impl Bookings {
    pub fn new(problem: &CompiledProblem) -> Self {
        let slots = problem.slot_count;
        Self {
            slot_count: slots,
            teacher: vec![false; problem.teacher_count * slots],
            room: vec![false; problem.room_count * slots],
            group: vec![false; problem.group_count * slots],
        }
    }

    #[inline]
    fn cell(&self, entity: usize, slot: usize) -> usize {
        entity * self.slot_count + slot
    }

    /// Whether placing `ob` at `cand` causes no teacher, room, or group clash.
    #[inline]
    pub fn is_free(&self, ob: &CompiledObligation, cand: Candidate) -> bool {
        !self.teacher[self.cell(ob.teacher, cand.slot)]
            && !self.room[self.cell(cand.room, cand.slot)]
            && !self.group[self.cell(ob.group, cand.slot)]
    }

    pub fn book(&mut self, ob: &CompiledObligation, cand: Candidate) {
        self.set(ob, cand, true);
    }

    pub fn release(&mut self, ob: &CompiledObligation, cand: Candidate) {
        self.set(ob, cand, false);
    }

    fn set(&mut self, ob: &CompiledObligation, cand: Candidate, taken: bool) {
        let t = self.cell(ob.teacher, cand.slot);
        let r = self.cell(cand.room, cand.slot);
        let g = self.cell(ob.group, cand.slot);
        self.teacher[t] = taken;
        self.room[r] = taken;
        self.group[g] = taken;
    }

    /// Counts clash-free candidates of `ob`, stopping once `limit` is reached.
    pub fn count_free(&self, ob: &CompiledObligation, limit: usize) -> usize {
        let mut count = 0;
        for &cand in &ob.candidates {
            if self.is_free(ob, cand) {
                count += 1;
                if count >= limit {
                    break;
                }
            }
        }
        count
    }
}
