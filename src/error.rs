//! Error types for the timetable solver.
//!
//! Only conditions detected *before* the search starts are errors.
//! An exhausted search space is a regular outcome, see
//! [`SolveOutcome::Infeasible`](crate::solver::SolveOutcome::Infeasible).

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors returned by [`solve`](crate::solver::solve).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The problem failed structural validation.
    #[error("malformed problem: {}", join_messages(.0))]
    MalformedProblem(Vec<ValidationError>),

    /// The solver configuration is invalid.
    #[error("invalid solver config: {0}")]
    InvalidConfig(String),
}

impl ScheduleError {
    /// Returns true if this error reports a malformed problem.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ScheduleError::MalformedProblem(_))
    }

    /// Validation errors behind a `MalformedProblem`; empty otherwise.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ScheduleError::MalformedProblem(errors) => errors,
            ScheduleError::InvalidConfig(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ScheduleError::MalformedProblem(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Problem, StudentGroup};
    use crate::validation::validate_problem;

    #[test]
    fn test_malformed_display_lists_all_messages() {
        let p = Problem::new()
            .with_group(StudentGroup::new("G1"))
            .with_course(Course::new("C1", "T404", "G1"))
            .with_course(Course::new("C2", "T405", "G1"));

        let err: ScheduleError = validate_problem(&p).unwrap_err().into();
        assert!(err.is_malformed());
        assert_eq!(err.validation_errors().len(), 2);
        assert_eq!(
            err.to_string(),
            "malformed problem: Course 'C1' references unknown teacher 'T404'; \
             Course 'C2' references unknown teacher 'T405'"
        );
    }

    #[test]
    fn test_invalid_config_display() {
        let err = ScheduleError::InvalidConfig("max_steps must be positive".into());
        assert!(!err.is_malformed());
        assert!(err.validation_errors().is_empty());
        assert_eq!(err.to_string(), "invalid solver config: max_steps must be positive");
    }
}
