//! Column semantic-type inference.

mod classifier;

pub use classifier::{categorize, classify, NOMINAL_DISTINCT_CUTOFF};
