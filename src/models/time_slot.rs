//! Time slot model.
//!
//! A timetable period is divided into a finite, ordered set of slots.
//! The order in which slots are listed in a [`Problem`](super::Problem)
//! is the order the solver tries them in.

use serde::{Deserialize, Serialize};

/// A single teaching slot, typically one period on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Day label (e.g., "Mon"). `None` if the slot is not day-based.
    pub day: Option<String>,
    /// Period label within the day (e.g., "8:30-10:00").
    pub period: Option<String>,
}

impl TimeSlot {
    /// Creates a slot with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            day: None,
            period: None,
        }
    }

    /// Creates a day × period slot with id `"<day> <period>"`.
    pub fn at(day: impl Into<String>, period: impl Into<String>) -> Self {
        let day = day.into();
        let period = period.into();
        Self {
            id: format!("{day} {period}"),
            day: Some(day),
            period: Some(period),
        }
    }

    /// Builds the full day × period grid in day-major order.
    ///
    /// # Example
    /// ```
    /// use u_timetable::models::TimeSlot;
    ///
    /// let slots = TimeSlot::grid(&["Mon", "Tue"], &["8:30-10:00", "10:00-11:30"]);
    /// assert_eq!(slots.len(), 4);
    /// assert_eq!(slots[1].id, "Mon 10:00-11:30");
    /// assert_eq!(slots[2].id, "Tue 8:30-10:00");
    /// ```
    pub fn grid<D, P>(days: &[D], periods: &[P]) -> Vec<TimeSlot>
    where
        D: AsRef<str>,
        P: AsRef<str>,
    {
        days.iter()
            .flat_map(|d| periods.iter().map(move |p| TimeSlot::at(d.as_ref(), p.as_ref())))
            .collect()
    }

    /// Day label, falling back to the slot id.
    pub fn day_label(&self) -> &str {
        self.day.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_order() {
        let slots = TimeSlot::grid(&["Mon", "Tue", "Wed"], &["P1", "P2"]);
        let ids: Vec<&str> = slots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["Mon P1", "Mon P2", "Tue P1", "Tue P2", "Wed P1", "Wed P2"]
        );
        assert_eq!(slots[3].day.as_deref(), Some("Tue"));
        assert_eq!(slots[3].period.as_deref(), Some("P2"));
    }

    #[test]
    fn test_day_label_fallback() {
        assert_eq!(TimeSlot::new("S1").day_label(), "S1");
        assert_eq!(TimeSlot::at("Fri", "P3").day_label(), "Fri");
    }

    #[test]
    fn test_empty_grid() {
        let days: [&str; 0] = [];
        assert!(TimeSlot::grid(&days, &["P1"]).is_empty());
    }
}
