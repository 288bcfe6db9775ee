//! Chart eligibility: which columns may sit on which axis of which chart.

mod combinations;
mod rules;

pub use combinations::{axis_candidates, enumerate, AxisCandidates, AxisColumn, AxisCombination, AxisMode};
pub use rules::{Axis, AxisRule, Cardinality, ChartType, DEFAULT_CARDINALITY_THRESHOLD};

/// Configuration for building candidate lists.
#[derive(Debug, Clone)]
pub struct EligibilityConfig {
    /// Distinct-value count above which a categorical column is facet-only.
    pub cardinality_threshold: usize,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            cardinality_threshold: DEFAULT_CARDINALITY_THRESHOLD,
        }
    }
}

impl EligibilityConfig {
    pub fn with_cardinality_threshold(mut self, threshold: usize) -> Self {
        self.cardinality_threshold = threshold;
        self
    }
}
