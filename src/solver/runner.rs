//! Backtracking search loop.
//!
//! Depth-first search over obligations with an explicit stack of choice
//! points instead of recursion. Each choice point holds one obligation,
//! a cursor into its candidate list, and the candidate currently booked.
//! Advancing a choice point first releases its current booking, so the
//! partial assignment always equals the bookings of the stack.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, trace};

use super::compiled::{Bookings, Candidate, CompiledObligation, CompiledProblem};
use super::config::{SolverConfig, VariableOrdering};
use super::types::{AbortReason, ObligationRef, SearchStats, SolveOutcome};
use crate::error::ScheduleError;
use crate::models::{Placement, Problem, Timetable};
use crate::validation::validate_problem;

/// The clock and cancellation flag are polled every this many steps, and
/// before each obligation is chosen.
const CHECK_INTERVAL: u64 = 256;

/// Backtracking timetable solver.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Course, Problem, Room, StudentGroup, Teacher, TimeSlot};
/// use u_timetable::solver::{BacktrackingSolver, SolverConfig};
///
/// let problem = Problem::new()
///     .with_teacher(Teacher::new("T1"))
///     .with_room(Room::new("LT-1"))
///     .with_slots(TimeSlot::grid(&["Mon"], &["8:30-10:00", "10:00-11:30"]))
///     .with_group(StudentGroup::new("BCS-1A"))
///     .with_course(Course::new("Mathematics", "T1", "BCS-1A"))
///     .with_course(Course::new("Physics", "T1", "BCS-1A"));
///
/// let solver = BacktrackingSolver::new(SolverConfig::default());
/// let outcome = solver.solve(&problem).unwrap();
/// let timetable = outcome.timetable().unwrap();
/// assert_eq!(timetable.placement_count(), 2);
/// assert!(timetable.is_valid());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    config: SolverConfig,
}

impl BacktrackingSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves a problem.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidConfig`] if the configuration is invalid.
    /// - [`ScheduleError::MalformedProblem`] if the problem fails validation.
    ///   No search is attempted in either case.
    pub fn solve(&self, problem: &Problem) -> Result<SolveOutcome, ScheduleError> {
        self.solve_with_cancel(problem, None)
    }

    /// Solves a problem with an optional cancellation flag.
    ///
    /// The flag is polled periodically; once it reads `true` the search
    /// stops with [`AbortReason::Cancelled`].
    pub fn solve_with_cancel(
        &self,
        problem: &Problem,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveOutcome, ScheduleError> {
        self.config.validate().map_err(ScheduleError::InvalidConfig)?;

        if let Err(errors) = validate_problem(problem) {
            debug!(errors = errors.len(), "rejecting malformed problem");
            return Err(ScheduleError::MalformedProblem(errors));
        }

        let compiled = CompiledProblem::compile(problem, &self.config)?;

        info!(
            obligations = compiled.obligations.len(),
            slots = compiled.slot_count,
            rooms = compiled.room_count,
            ordering = ?self.config.variable_ordering,
            "starting timetable search"
        );

        let mut search = Search::new(&compiled, &self.config, cancel);
        let end = search.run();
        let stats = search.stats();

        let outcome = match end {
            SearchEnd::Solved => SolveOutcome::Solved {
                timetable: search.timetable(problem),
                stats,
            },
            SearchEnd::Exhausted { last_failed } => SolveOutcome::Infeasible {
                last_obligation: last_failed.map(|i| obligation_ref(problem, &compiled, i)),
                stats,
            },
            SearchEnd::Aborted(reason) => {
                debug!(?reason, steps = stats.steps, "search aborted");
                SolveOutcome::Aborted { reason, stats }
            }
        };

        let stats = outcome.stats();
        info!(
            outcome = outcome.label(),
            steps = stats.steps,
            placements = stats.placements,
            backtracks = stats.backtracks,
            elapsed_ms = stats.elapsed_ms,
            "timetable search finished"
        );

        Ok(outcome)
    }
}

fn obligation_ref(problem: &Problem, compiled: &CompiledProblem, index: usize) -> ObligationRef {
    let ob = &compiled.obligations[index];
    ObligationRef {
        course_id: problem.courses[ob.course].id.clone(),
        session: ob.session,
    }
}

enum SearchEnd {
    Solved,
    Exhausted { last_failed: Option<usize> },
    Aborted(AbortReason),
}

struct ChoicePoint {
    obligation: usize,
    cursor: usize,
    current: Option<Candidate>,
}

struct Search<'a> {
    compiled: &'a CompiledProblem,
    config: &'a SolverConfig,
    cancel: Option<Arc<AtomicBool>>,
    bookings: Bookings,
    assigned: Vec<Option<Candidate>>,
    started: Instant,
    steps: u64,
    placements: u64,
    backtracks: u64,
}

impl<'a> Search<'a> {
    fn new(
        compiled: &'a CompiledProblem,
        config: &'a SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            compiled,
            config,
            cancel,
            bookings: Bookings::new(compiled),
            assigned: vec![None; compiled.obligations.len()],
            started: Instant::now(),
            steps: 0,
            placements: 0,
            backtracks: 0,
        }
    }

    fn run(&mut self) -> SearchEnd {
        let compiled = self.compiled;
        let total = compiled.obligations.len();
        let mut stack: Vec<ChoicePoint> = Vec::with_capacity(total);
        let mut last_failed = None;

        'descend: loop {
            if stack.len() == total {
                return SearchEnd::Solved;
            }

            // The most-constrained scan is not metered by steps.
            if let Err(reason) = self.poll() {
                return SearchEnd::Aborted(reason);
            }
            let Some(next) = self.select_obligation() else {
                return SearchEnd::Solved;
            };
            stack.push(ChoicePoint {
                obligation: next,
                cursor: 0,
                current: None,
            });

            loop {
                let Some(top) = stack.last_mut() else {
                    return SearchEnd::Exhausted { last_failed };
                };
                let ob = &compiled.obligations[top.obligation];

                if let Some(prev) = top.current.take() {
                    self.bookings.release(ob, prev);
                    self.assigned[top.obligation] = None;
                }

                match self.advance(ob, top) {
                    Ok(Some(cand)) => {
                        self.bookings.book(ob, cand);
                        self.assigned[top.obligation] = Some(cand);
                        top.current = Some(cand);
                        self.placements += 1;
                        continue 'descend;
                    }
                    Ok(None) => {
                        let failed = top.obligation;
                        stack.pop();
                        trace!(
                            obligation = failed,
                            depth = stack.len(),
                            "choice point exhausted, backtracking"
                        );
                        last_failed = Some(failed);
                        self.backtracks += 1;
                    }
                    Err(reason) => return SearchEnd::Aborted(reason),
                }
            }
        }
    }

    /// Moves the cursor to the next clash-free candidate.
    fn advance(
        &mut self,
        ob: &CompiledObligation,
        point: &mut ChoicePoint,
    ) -> Result<Option<Candidate>, AbortReason> {
        while let Some(&cand) = ob.candidates.get(point.cursor) {
            point.cursor += 1;
            self.tick()?;
            if self.bookings.is_free(ob, cand) {
                return Ok(Some(cand));
            }
        }
        Ok(None)
    }

    /// Counts one candidate evaluation and enforces the budgets.
    ///
    /// `steps` never exceeds `max_steps`: the evaluation that would go past
    /// it is refused, not counted.
    fn tick(&mut self) -> Result<(), AbortReason> {
        if let Some(max) = self.config.max_steps {
            if self.steps >= max {
                return Err(AbortReason::StepLimit);
            }
        }
        self.steps += 1;

        if (self.steps - 1) % CHECK_INTERVAL == 0 {
            self.poll()?;
        }
        Ok(())
    }

    /// Checks the cancellation flag and the wall-clock limit.
    fn poll(&self) -> Result<(), AbortReason> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(AbortReason::Cancelled);
            }
        }
        if let Some(limit) = self.config.time_limit_ms {
            if self.elapsed_ms() >= limit {
                return Err(AbortReason::TimeLimit);
            }
        }
        Ok(())
    }

    fn select_obligation(&self) -> Option<usize> {
        let mut unassigned = self
            .assigned
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_none())
            .map(|(i, _)| i);

        match self.config.variable_ordering {
            VariableOrdering::Listed => unassigned.next(),
            VariableOrdering::MostConstrained => {
                let mut best: Option<(usize, usize)> = None;
                for i in unassigned {
                    let limit = best.map_or(usize::MAX, |(_, count)| count);
                    let count = self.bookings.count_free(&self.compiled.obligations[i], limit);
                    if best.map_or(true, |(_, best_count)| count < best_count) {
                        best = Some((i, count));
                        if count == 0 {
                            break;
                        }
                    }
                }
                best.map(|(i, _)| i)
            }
        }
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn stats(&self) -> SearchStats {
        SearchStats {
            obligations: self.compiled.obligations.len(),
            steps: self.steps,
            placements: self.placements,
            backtracks: self.backtracks,
            elapsed_ms: self.elapsed_ms(),
        }
    }

    /// Converts the complete assignment into a timetable, in obligation order.
    fn timetable(&self, problem: &Problem) -> Timetable {
        let mut timetable = Timetable::new();
        for (ob, cand) in self.compiled.obligations.iter().zip(&self.assigned) {
            let Some(cand) = cand else { continue };
            let course = &problem.courses[ob.course];
            timetable.add_placement(Placement::new(
                &course.id,
                ob.session,
                &course.teacher_id,
                &course.group_id,
                &problem.slots[cand.slot].id,
                &problem.rooms[cand.room].id,
            ));
        }
        debug_assert_eq!(timetable.placement_count(), self.compiled.obligations.len());
        timetable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Room, StudentGroup, Teacher, TimeSlot};
    use crate::solver::ValueOrder;

    /// 1 teacher, `courses` single-session courses, `slots` slots, 1 room.
    fn one_teacher(courses: usize, slots: usize) -> Problem {
        let periods: Vec<String> = (1..=slots).map(|i| format!("P{i}")).collect();
        let mut p = Problem::new()
            .with_teacher(Teacher::new("T1"))
            .with_room(Room::new("R1"))
            .with_slots(TimeSlot::grid(&["Mon"], &periods));
        for i in 0..courses {
            let group = format!("G{i}");
            p = p
                .with_group(StudentGroup::new(&group))
                .with_course(Course::new(format!("C{i}"), "T1", group));
        }
        p
    }

    fn listed() -> SolverConfig {
        SolverConfig::default().with_variable_ordering(VariableOrdering::Listed)
    }

    #[test]
    fn test_first_fit_placement() {
        let p = one_teacher(2, 3);
        let outcome = BacktrackingSolver::new(listed()).solve(&p).unwrap();
        let t = outcome.timetable().unwrap();

        assert_eq!(t.placement_for("C0", 0).unwrap().slot_id, "Mon P1");
        assert_eq!(t.placement_for("C1", 0).unwrap().slot_id, "Mon P2");
        assert_eq!(outcome.stats().backtracks, 0);
    }

    #[test]
    fn test_infeasible_reports_last_obligation() {
        let p = one_teacher(3, 2);
        let outcome = BacktrackingSolver::new(listed()).solve(&p).unwrap();

        match outcome {
            SolveOutcome::Infeasible {
                last_obligation,
                stats,
            } => {
                // Top-level choice point is the first course
                assert_eq!(
                    last_obligation,
                    Some(ObligationRef {
                        course_id: "C0".into(),
                        session: 0
                    })
                );
                assert!(stats.backtracks > 0);
            }
            other => panic!("expected infeasible, got {other:?}"),
        }
    }

    #[test]
    fn test_backtracking_recovers_from_early_choice() {
        // C0 may use any room; C1 and C2 need the lab. First-fit puts C0 in
        // the lab at P1, leaving only one lab slot for two lab courses.
        let p = Problem::new()
            .with_teacher(Teacher::new("T1"))
            .with_teacher(Teacher::new("T2"))
            .with_room(Room::of_kind("LAB-1", "lab"))
            .with_room(Room::of_kind("LT-1", "lecture"))
            .with_slots(TimeSlot::grid(&["Mon"], &["P1", "P2"]))
            .with_group(StudentGroup::new("G1"))
            .with_group(StudentGroup::new("G2"))
            .with_course(Course::new("C0", "T1", "G1"))
            .with_course(Course::new("C1", "T2", "G2").with_room_kind("lab"))
            .with_course(Course::new("C2", "T2", "G2").with_room_kind("lab"));

        let outcome = BacktrackingSolver::new(listed()).solve(&p).unwrap();
        let t = outcome.timetable().expect("solvable");
        assert!(t.is_valid());
        assert!(t.is_complete_for(&p));
        // C1 and C2 occupy the lab in both slots, so C0 is in the lecture room
        assert_eq!(t.placement_for("C0", 0).unwrap().room_id, "LT-1");
        assert!(outcome.stats().backtracks > 0);
    }

    #[test]
    fn test_most_constrained_first() {
        // Same instance; MRV places the lab courses before C0 and never backtracks
        let p = Problem::new()
            .with_teacher(Teacher::new("T1"))
            .with_teacher(Teacher::new("T2"))
            .with_room(Room::of_kind("LAB-1", "lab"))
            .with_room(Room::of_kind("LT-1", "lecture"))
            .with_slots(TimeSlot::grid(&["Mon"], &["P1", "P2"]))
            .with_group(StudentGroup::new("G1"))
            .with_group(StudentGroup::new("G2"))
            .with_course(Course::new("C0", "T1", "G1"))
            .with_course(Course::new("C1", "T2", "G2").with_room_kind("lab"))
            .with_course(Course::new("C2", "T2", "G2").with_room_kind("lab"));

        let outcome = BacktrackingSolver::default().solve(&p).unwrap();
        let t = outcome.timetable().unwrap();
        assert!(t.is_valid());
        assert_eq!(outcome.stats().backtracks, 0);
        // Output stays in obligation order regardless of search order
        let ids: Vec<&str> = t.placements.iter().map(|p| p.course_id.as_str()).collect();
        assert_eq!(ids, vec!["C0", "C1", "C2"]);
    }

    #[test]
    fn test_step_limit() {
        // Pigeonhole: 6 courses, 5 slots, one teacher. Exhausting the search
        // takes far more than 10 steps.
        let p = one_teacher(6, 5);
        let config = listed().with_max_steps(10);
        let outcome = BacktrackingSolver::new(config).solve(&p).unwrap();

        assert!(matches!(
            outcome,
            SolveOutcome::Aborted {
                reason: AbortReason::StepLimit,
                ..
            }
        ));
        assert_eq!(outcome.stats().steps, 10);
    }

    #[test]
    fn test_time_limit() {
        // 12 courses for one teacher in 11 slots: exhausting the search takes
        // far longer than 20 ms.
        let p = one_teacher(12, 11);
        let config = listed().with_time_limit_ms(20);
        let outcome = BacktrackingSolver::new(config).solve(&p).unwrap();

        assert!(
            matches!(
                outcome,
                SolveOutcome::Aborted {
                    reason: AbortReason::TimeLimit,
                    ..
                }
            ),
            "{}",
            outcome.label()
        );
        assert!(outcome.stats().elapsed_ms >= 20);
    }

    #[test]
    fn test_cancelled_before_start() {
        let p = one_teacher(2, 2);
        for config in [SolverConfig::default(), listed()] {
            let flag = Arc::new(AtomicBool::new(true));
            let outcome = BacktrackingSolver::new(config)
                .solve_with_cancel(&p, Some(flag))
                .unwrap();

            assert!(matches!(
                outcome,
                SolveOutcome::Aborted {
                    reason: AbortReason::Cancelled,
                    ..
                }
            ));
            // Caught when choosing the first obligation, before any evaluation
            assert_eq!(outcome.stats().steps, 0);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let p = one_teacher(1, 1);
        let err = BacktrackingSolver::new(SolverConfig::default().with_max_steps(0))
            .solve(&p)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfig(_)));
    }

    #[test]
    fn test_shuffled_order_is_seed_stable() {
        let p = one_teacher(4, 6);
        let config = SolverConfig::default().with_value_order(ValueOrder::Shuffled { seed: 3 });
        let a = BacktrackingSolver::new(config.clone()).solve(&p).unwrap();
        let b = BacktrackingSolver::new(config).solve(&p).unwrap();

        let ta = a.timetable().unwrap();
        assert!(ta.is_valid());
        assert_eq!(Some(ta), b.timetable());
    }

    #[test]
    fn test_no_slots_is_infeasible() {
        let mut p = one_teacher(1, 1);
        p.slots.clear();
        let outcome = BacktrackingSolver::default().solve(&p).unwrap();
        assert!(outcome.is_infeasible());
        assert_eq!(outcome.stats().steps, 0);
    }
}
