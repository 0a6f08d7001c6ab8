//! Input validation for timetabling problems.
//!
//! Checks structural integrity of a [`Problem`] before the solver runs.
//! Detects:
//! - An empty course list
//! - Duplicate IDs
//! - Courses referencing unknown teachers or groups
//! - Courses with a zero session count
//! - Room-kind requirements no room can satisfy
//!
//! All issues are collected, not just the first one, so that a caller
//! can report every offending reference at once.

use crate::models::Problem;
use std::collections::HashSet;
use thiserror::Error;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// The offending entity ID (course, teacher, ...). Empty if not applicable.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The problem lists no courses.
    NoCourses,
    /// Two entities of the same type share an ID.
    DuplicateId,
    /// A course references a teacher that doesn't exist.
    UnknownTeacher,
    /// A course references a student group that doesn't exist.
    UnknownGroup,
    /// A course requires zero sessions.
    ZeroSessions,
    /// A course requires a room kind that no room provides.
    NoEligibleRoom,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

/// Validates a timetabling problem.
///
/// Checks:
/// 1. At least one course is listed
/// 2. No duplicate teacher, room, slot, group, or course IDs
/// 3. Every course references an existing teacher
/// 4. Every course references an existing student group
/// 5. Every course needs at least one session
/// 6. Every required room kind is offered by at least one room
///
/// An empty room or slot list is not malformed: such a problem is
/// simply infeasible.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();

    if problem.courses.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoCourses,
            "",
            "Problem lists no courses",
        ));
    }

    let teacher_ids = collect_ids(
        "teacher",
        problem.teachers.iter().map(|x| x.id.as_str()),
        &mut errors,
    );
    collect_ids(
        "room",
        problem.rooms.iter().map(|x| x.id.as_str()),
        &mut errors,
    );
    collect_ids(
        "time slot",
        problem.slots.iter().map(|x| x.id.as_str()),
        &mut errors,
    );
    let group_ids = collect_ids(
        "group",
        problem.groups.iter().map(|x| x.id.as_str()),
        &mut errors,
    );
    collect_ids(
        "course",
        problem.courses.iter().map(|x| x.id.as_str()),
        &mut errors,
    );

    for course in &problem.courses {
        if !teacher_ids.contains(course.teacher_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeacher,
                &course.id,
                format!(
                    "Course '{}' references unknown teacher '{}'",
                    course.id, course.teacher_id
                ),
            ));
        }

        if !group_ids.contains(course.group_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownGroup,
                &course.id,
                format!(
                    "Course '{}' references unknown group '{}'",
                    course.id, course.group_id
                ),
            ));
        }

        if course.sessions == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroSessions,
                &course.id,
                format!("Course '{}' requires zero sessions", course.id),
            ));
        }

        if let Some(kind) = course.room_kind.as_deref() {
            if !problem.rooms.iter().any(|r| r.accepts(Some(kind))) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NoEligibleRoom,
                    &course.id,
                    format!(
                        "Course '{}' requires a '{kind}' room, but none exists",
                        course.id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Collects IDs into a set, recording one error per duplicate.
fn collect_ids<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                id,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
    seen
}
