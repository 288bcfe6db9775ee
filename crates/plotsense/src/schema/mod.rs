//! Schema types describing classified columns.

mod column;
mod types;

pub use column::{ColumnDescriptor, ColumnId};
pub use types::{DataCategory, RawType};
