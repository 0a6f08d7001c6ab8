//! Solver configuration.

use serde::{Deserialize, Serialize};

/// How the next obligation to place is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableOrdering {
    /// First unplaced obligation in listing order.
    Listed,
    /// Unplaced obligation with the fewest clash-free candidates left
    /// (minimum remaining values). Ties go to the earlier-listed one.
    ///
    /// An obligation with no candidates left is picked immediately, which
    /// makes the search backtrack without exploring doomed branches.
    #[default]
    MostConstrained,
}

/// Order in which (slot, room) candidates are tried for an obligation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueOrder {
    /// Slot-major in listing order: every room of the first slot, then
    /// every room of the second slot, and so on.
    #[default]
    Fixed,
    /// The fixed order permuted per obligation by a seeded RNG.
    ///
    /// Spreads sessions across the week instead of packing the first
    /// slots, while staying reproducible for a given seed.
    Shuffled {
        /// RNG seed.
        seed: u64,
    },
}

/// Configuration for [`BacktrackingSolver`](super::BacktrackingSolver).
///
/// # Examples
///
/// ```
/// use u_timetable::solver::{SolverConfig, ValueOrder, VariableOrdering};
///
/// let config = SolverConfig::default()
///     .with_variable_ordering(VariableOrdering::Listed)
///     .with_value_order(ValueOrder::Shuffled { seed: 42 })
///     .with_max_steps(1_000_000)
///     .with_time_limit_ms(5_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Obligation selection strategy.
    pub variable_ordering: VariableOrdering,

    /// Candidate enumeration order.
    pub value_order: ValueOrder,

    /// Maximum number of candidate evaluations. `None` = no limit.
    pub max_steps: Option<u64>,

    /// Maximum wall-clock time in milliseconds. `None` = no limit.
    pub time_limit_ms: Option<u64>,
}

impl SolverConfig {
    pub fn with_variable_ordering(mut self, ordering: VariableOrdering) -> Self {
        self.variable_ordering = ordering;
        self
    }

    pub fn with_value_order(mut self, order: ValueOrder) -> Self {
        self.value_order = order;
        self
    }

    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_steps == Some(0) {
            return Err("max_steps must be positive".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.variable_ordering, VariableOrdering::MostConstrained);
        assert_eq!(config.value_order, ValueOrder::Fixed);
        assert!(config.max_steps.is_none());
        assert!(config.time_limit_ms.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_budgets_rejected() {
        assert!(SolverConfig::default().with_max_steps(0).validate().is_err());
        assert!(SolverConfig::default()
            .with_time_limit_ms(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "variable_ordering": "Listed",
            "value_order": { "Shuffled": { "seed": 7 } },
            "max_steps": 1000,
            "time_limit_ms": null
        }"#;
        let config: SolverConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.variable_ordering, VariableOrdering::Listed);
        assert_eq!(config.value_order, ValueOrder::Shuffled { seed: 7 });
        assert_eq!(config.max_steps, Some(1000));
    }
}
