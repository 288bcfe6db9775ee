//! Typed, column-major table representation.

use std::collections::HashSet;

use chrono::{NaiveDateTime, TimeDelta};

use crate::datetime::convert_timedelta;
use crate::schema::RawType;

/// Rendering used when a date cell has to be stored as text.
const DATETIME_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single untyped cell as produced by a file reader.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl RawCell {
    /// Build a cell from delimited-text input, mapping null markers to `Empty`.
    pub fn from_text(value: &str) -> Self {
        if Table::is_null_value(value) {
            RawCell::Empty
        } else {
            RawCell::Text(value.to_string())
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            RawCell::Int(v) => Some(*v),
            RawCell::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            RawCell::Int(v) => Some(*v as f64),
            RawCell::Float(v) => Some(*v),
            RawCell::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Int(v) => Some(v.to_string()),
            RawCell::Float(v) => Some(v.to_string()),
            RawCell::Text(s) => Some(s),
            RawCell::DateTime(dt) => Some(dt.format(DATETIME_TEXT_FORMAT).to_string()),
        }
    }
}

/// Values of one column, tagged by storage type. `None` marks a null.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Date(Vec<Option<NaiveDateTime>>),
    Duration(Vec<Option<TimeDelta>>),
}

impl ColumnData {
    /// Type the cells of one column the way a dataframe reader would.
    ///
    /// Integers with gaps are widened to floats, since integer storage
    /// has no null representation.
    pub fn from_cells(cells: Vec<RawCell>) -> Self {
        let present: Vec<&RawCell> = cells.iter().filter(|c| **c != RawCell::Empty).collect();
        let has_gaps = present.len() < cells.len();

        if present.is_empty() {
            return ColumnData::Float(vec![None; cells.len()]);
        }

        if present.iter().all(|c| c.as_i64().is_some()) {
            if has_gaps {
                return ColumnData::Float(cells.iter().map(RawCell::as_f64).collect());
            }
            return ColumnData::Integer(cells.iter().map(RawCell::as_i64).collect());
        }

        if present.iter().all(|c| c.as_f64().is_some()) {
            return ColumnData::Float(cells.iter().map(RawCell::as_f64).collect());
        }

        if present.iter().all(|c| matches!(c, RawCell::DateTime(_))) {
            return ColumnData::Date(
                cells
                    .iter()
                    .map(|c| match c {
                        RawCell::DateTime(dt) => Some(*dt),
                        _ => None,
                    })
                    .collect(),
            );
        }

        ColumnData::Text(cells.into_iter().map(RawCell::into_text).collect())
    }

    /// Storage type tag.
    pub fn raw_type(&self) -> RawType {
        match self {
            ColumnData::Integer(_) => RawType::Integer,
            ColumnData::Float(_) => RawType::Float,
            ColumnData::Text(_) => RawType::Text,
            ColumnData::Date(_) => RawType::Date,
            ColumnData::Duration(_) => RawType::Duration,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::Duration(v) => v.len(),
        }
    }

    /// Check whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of null entries.
    pub fn null_count(&self) -> usize {
        match self {
            ColumnData::Integer(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Float(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Text(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Date(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Duration(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    /// Number of distinct values. A null counts as one value of its own.
    pub fn unique_count(&self) -> usize {
        match self {
            ColumnData::Integer(v) => distinct(v.iter()),
            ColumnData::Float(v) => distinct(v.iter().map(|x| x.map(f64::to_bits))),
            ColumnData::Text(v) => distinct(v.iter()),
            ColumnData::Date(v) => distinct(v.iter()),
            ColumnData::Duration(v) => distinct(v.iter()),
        }
    }

    /// Text values with nulls read as empty strings, or `None` for non-text columns.
    pub fn text_values(&self) -> Option<Vec<&str>> {
        match self {
            ColumnData::Text(v) => Some(v.iter().map(|s| s.as_deref().unwrap_or("")).collect()),
            _ => None,
        }
    }

    /// Numeric projection used on continuous axes.
    ///
    /// Durations are expressed in hours, dates in Unix seconds.
    /// Text columns have no numeric projection.
    pub fn continuous_values(&self) -> Option<Vec<Option<f64>>> {
        match self {
            ColumnData::Integer(v) => Some(v.iter().map(|x| x.map(|i| i as f64)).collect()),
            ColumnData::Float(v) => Some(v.clone()),
            ColumnData::Date(v) => Some(
                v.iter()
                    .map(|x| x.map(|dt| dt.and_utc().timestamp() as f64))
                    .collect(),
            ),
            ColumnData::Duration(v) => Some(
                v.iter()
                    .map(|x| x.map(|d| convert_timedelta(d.num_seconds() as f64)))
                    .collect(),
            ),
            ColumnData::Text(_) => None,
        }
    }

    /// Render one cell as text, `None` for nulls or out-of-range rows.
    pub fn display_value(&self, row: usize) -> Option<String> {
        match self {
            ColumnData::Integer(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::Float(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            ColumnData::Text(v) => v.get(row).cloned().flatten(),
            ColumnData::Date(v) => v
                .get(row)
                .copied()
                .flatten()
                .map(|dt| dt.format(DATETIME_TEXT_FORMAT).to_string()),
            ColumnData::Duration(v) => v.get(row).copied().flatten().map(format_duration),
        }
    }

    /// Copy the given rows, in the given order.
    pub fn take_rows(&self, rows: &[usize]) -> ColumnData {
        fn pick<T: Clone>(values: &[Option<T>], rows: &[usize]) -> Vec<Option<T>> {
            rows.iter()
                .map(|&r| values.get(r).cloned().flatten())
                .collect()
        }

        match self {
            ColumnData::Integer(v) => ColumnData::Integer(pick(v, rows)),
            ColumnData::Float(v) => ColumnData::Float(pick(v, rows)),
            ColumnData::Text(v) => ColumnData::Text(pick(v, rows)),
            ColumnData::Date(v) => ColumnData::Date(pick(v, rows)),
            ColumnData::Duration(v) => ColumnData::Duration(pick(v, rows)),
        }
    }
}

fn distinct<T, I>(values: I) -> usize
where
    T: Eq + std::hash::Hash,
    I: Iterator<Item = T>,
{
    values.collect::<HashSet<T>>().len()
}

fn format_duration(d: TimeDelta) -> String {
    let total = d.num_seconds();
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    /// Create a column from typed data.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Create a text column without nulls.
    pub fn text<S: Into<String>>(name: impl Into<String>, values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            name,
            ColumnData::Text(values.into_iter().map(|s| Some(s.into())).collect()),
        )
    }

    /// Create an integer column without nulls.
    pub fn integer(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            name,
            ColumnData::Integer(values.into_iter().map(Some).collect()),
        )
    }

    /// Create a float column without nulls.
    pub fn float(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(
            name,
            ColumnData::Float(values.into_iter().map(Some).collect()),
        )
    }

    /// Storage type tag.
    pub fn raw_type(&self) -> RawType {
        self.data.raw_type()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Represents loaded tabular data, stored column by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a table from columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Build a typed table from headers and row-major raw cells.
    ///
    /// Short rows are padded with empty cells; surplus cells are dropped.
    pub fn from_cells(headers: Vec<String>, rows: Vec<Vec<RawCell>>) -> Self {
        let mut by_column: Vec<Vec<RawCell>> = headers
            .iter()
            .map(|_| Vec::with_capacity(rows.len()))
            .collect();

        for row in rows {
            let mut cells = row.into_iter();
            for column in by_column.iter_mut() {
                column.push(cells.next().unwrap_or(RawCell::Empty));
            }
        }

        let columns = headers
            .into_iter()
            .zip(by_column)
            .map(|(name, cells)| Column::new(name, ColumnData::from_cells(cells)))
            .collect();

        Self { columns }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column by position.
    pub fn column_at(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Position of the first column with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Replace the data of a named column. Returns false if no such column exists.
    pub fn replace_data(&mut self, name: &str, data: ColumnData) -> bool {
        match self.position(name) {
            Some(index) => self.replace_data_at(index, data),
            None => false,
        }
    }

    /// Replace the data of the column at `index`. Returns false if out of range.
    pub fn replace_data_at(&mut self, index: usize, data: ColumnData) -> bool {
        match self.columns.get_mut(index) {
            Some(column) => {
                column.data = data;
                true
            }
            None => false,
        }
    }

    /// Append a column at the end.
    pub fn push_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Remove the first column with the given name.
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let index = self.position(name)?;
        self.remove_column_at(index)
    }

    /// Remove the column at `index`; later columns shift down by one.
    pub fn remove_column_at(&mut self, index: usize) -> Option<Column> {
        (index < self.columns.len()).then(|| self.columns.remove(index))
    }

    /// Mutable access to every column, for in-place normalization passes.
    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Build a new table holding the given rows of every column.
    pub fn select_rows(&self, rows: &[usize]) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.data.take_rows(rows)))
                .collect(),
        }
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || matches!(
                trimmed,
                "NA" | "N/A"
                    | "n/a"
                    | "NaN"
                    | "nan"
                    | "-NaN"
                    | "-nan"
                    | "NULL"
                    | "null"
                    | "None"
                    | "<NA>"
                    | "#N/A"
                    | "#N/A N/A"
                    | "#NA"
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<RawCell> {
        values.iter().map(|v| RawCell::from_text(v)).collect()
    }

    #[test]
    fn test_integer_column() {
        let data = ColumnData::from_cells(cells(&["1", "2", "30"]));
        assert_eq!(data, ColumnData::Integer(vec![Some(1), Some(2), Some(30)]));
    }

    #[test]
    fn test_integer_with_gap_widens_to_float() {
        let data = ColumnData::from_cells(cells(&["1", "", "3"]));
        assert_eq!(data, ColumnData::Float(vec![Some(1.0), None, Some(3.0)]));
    }

    #[test]
    fn test_mixed_numeric_is_float() {
        let data = ColumnData::from_cells(cells(&["1", "2.5"]));
        assert_eq!(data.raw_type(), RawType::Float);
    }

    #[test]
    fn test_text_column_keeps_nulls() {
        let data = ColumnData::from_cells(cells(&["a", "NA", "b"]));
        assert_eq!(
            data,
            ColumnData::Text(vec![Some("a".into()), None, Some("b".into())])
        );
        assert_eq!(data.null_count(), 1);
        assert_eq!(data.unique_count(), 3);
    }

    #[test]
    fn test_all_null_column_is_float() {
        let data = ColumnData::from_cells(cells(&["", "NaN"]));
        assert_eq!(data, ColumnData::Float(vec![None, None]));
    }

    #[test]
    fn test_from_cells_pads_short_rows() {
        let table = Table::from_cells(
            vec!["a".into(), "b".into()],
            vec![cells(&["1", "x"]), cells(&["2"])],
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("b").unwrap().data.null_count(), 1);
    }

    #[test]
    fn test_select_rows() {
        let table = Table::new(vec![Column::integer("n", [10, 20, 30, 40])]);
        let subset = table.select_rows(&[1, 3]);
        assert_eq!(
            subset.column("n").unwrap().data,
            ColumnData::Integer(vec![Some(20), Some(40)])
        );
    }

    #[test]
    fn test_duration_continuous_values_in_hours() {
        let data = ColumnData::Duration(vec![Some(TimeDelta::seconds(5400))]);
        assert_eq!(data.continuous_values(), Some(vec![Some(1.5)]));
        assert_eq!(data.display_value(0).as_deref(), Some("01:30:00"));
    }

    #[test]
    fn test_is_null_value() {
        assert!(Table::is_null_value(""));
        assert!(Table::is_null_value("NA"));
        assert!(Table::is_null_value("N/A"));
        assert!(Table::is_null_value("null"));
        assert!(Table::is_null_value("NaN"));
        assert!(!Table::is_null_value("value"));
        assert!(!Table::is_null_value("0"));
    }
}
