//! Input parsing and data source handling.

mod parser;
mod source;
mod table;

pub use parser::{Parser, ParserConfig, SourceFormat};
pub use source::SourceMetadata;
pub use table::{Column, ColumnData, RawCell, Table};
