//! Core type definitions for column classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage type of a column's values, as loaded or converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawType {
    /// 64-bit integers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Text/string values.
    Text,
    /// Calendar dates (with an optional time of day).
    Date,
    /// Time durations, such as a time of day without a date.
    Duration,
}

impl RawType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, RawType::Integer | RawType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, RawType::Date | RawType::Duration)
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RawType::Integer => "int64",
            RawType::Float => "float64",
            RawType::Text => "object",
            RawType::Date => "datetime",
            RawType::Duration => "timedelta",
        };
        f.write_str(label)
    }
}

/// Semantic category of a column, deciding which chart axes it may fill.
///
/// A column that matches no rule has no category at all, which is
/// represented as `Option<DataCategory>::None` on the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataCategory {
    /// Whole-number measurements.
    Discrete,
    /// Real-valued measurements.
    Continuous,
    /// Unordered labels, or labels with many distinct values.
    Nominal,
    /// Integer column holding exactly two distinct values.
    #[serde(rename = "Nominal-Binary")]
    NominalBinary,
    /// Text labels with few distinct values.
    Ordinal,
    /// Calendar dates.
    Date,
    /// Times of day / durations.
    Time,
}

impl DataCategory {
    /// Returns true for the label-like categories that may sit on a categorical axis.
    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            DataCategory::Nominal | DataCategory::NominalBinary | DataCategory::Ordinal
        )
    }

    /// Returns true for the quantitative categories.
    pub fn is_quantitative(&self) -> bool {
        matches!(self, DataCategory::Discrete | DataCategory::Continuous)
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DataCategory::Discrete => "Discrete",
            DataCategory::Continuous => "Continuous",
            DataCategory::Nominal => "Nominal",
            DataCategory::NominalBinary => "Nominal-Binary",
            DataCategory::Ordinal => "Ordinal",
            DataCategory::Date => "Date",
            DataCategory::Time => "Time",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
