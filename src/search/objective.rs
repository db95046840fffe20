//! Optimization objectives
//!
//! An [`Objective`] names one metric the search optimizes, the direction of
//! improvement, and an optional goal threshold a result must meet to count
//! as feasible. The order of the objective sequence handed to
//! [`SearchResults::new`](super::SearchResults::new) is canonical: internal
//! metric vectors and lexicographic sorting both follow it.

use serde::{Deserialize, Serialize};

/// A single optimization objective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Metric name, unique within a search run
    pub name: String,
    /// Direction of improvement
    pub higher_is_better: bool,
    /// Optional feasibility threshold in raw (un-adjusted) units
    pub goal: Option<f64>,
}

impl Objective {
    /// Create an objective where larger raw values are better
    #[must_use]
    pub fn maximize(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            higher_is_better: true,
            goal: None,
        }
    }

    /// Create an objective where smaller raw values are better
    #[must_use]
    pub fn minimize(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            higher_is_better: false,
            goal: None,
        }
    }

    /// Attach a goal threshold, in the same raw units as reported results
    #[must_use]
    pub fn with_goal(mut self, goal: f64) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Direction multiplier: adjusted value = `multiplier() * raw`
    ///
    /// After adjustment, larger is always better, so comparisons never need
    /// to consult the direction again.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        if self.higher_is_better {
            1.0
        } else {
            -1.0
        }
    }
}
