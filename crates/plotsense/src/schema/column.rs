//! Column descriptor definition.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{DataCategory, RawType};

/// Stable synthetic identifier of a column within one dataset overview.
///
/// Names can collide after date/time splitting, so descriptors are keyed
/// by position-derived ids (`col_0`, `col_1`, ...) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(pub usize);

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col_{}", self.0)
    }
}

/// Classification result for a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Storage type of the values.
    pub raw_type: RawType,
    /// Number of distinct values (a null counts as one value).
    pub unique_count: usize,
    /// Number of null values.
    pub null_count: usize,
    /// Semantic category; `None` keeps the column out of every chart.
    pub category: Option<DataCategory>,
}

impl ColumnDescriptor {
    /// Check whether the column carries the given category.
    pub fn is(&self, category: DataCategory) -> bool {
        self.category == Some(category)
    }

    /// Check whether the column may sit on a categorical axis.
    pub fn is_categorical(&self) -> bool {
        self.category.is_some_and(|c| c.is_categorical())
    }

    /// Category label, or `"None"` for unclassified columns.
    pub fn category_label(&self) -> &'static str {
        self.category.map(|c| c.label()).unwrap_or("None")
    }
}
