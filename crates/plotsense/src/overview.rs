//! Dataset overview: normalization plus per-column classification.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::datetime::{
    check_empty_time_data, main_converter, split_date_time_at, to_date_column, to_duration_column,
    ConversionDirective,
};
use crate::error::Result;
use crate::inference::classify;
use crate::input::{Column, ColumnData, Table};
use crate::schema::{ColumnDescriptor, ColumnId, DataCategory, RawType};

/// A date/time conversion attempted during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Column the directive was issued for.
    pub column: String,
    /// Conversion that was requested.
    pub directive: ConversionDirective,
    /// Whether the column was actually converted.
    pub applied: bool,
}

/// A combined date-time column that was split in two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitRecord {
    pub source: String,
    pub date_column: String,
    pub time_column: String,
    /// Every time component was midnight.
    pub time_is_empty: bool,
}

/// One row of the overview report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub id: String,
    pub name: String,
    pub raw_type: String,
    pub category: String,
    pub unique_count: usize,
    pub null_count: usize,
}

/// Serializable report of an overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnSummary>,
    pub conversions: Vec<ConversionRecord>,
    pub splits: Vec<SplitRecord>,
}

/// Normalized table plus one descriptor per column.
///
/// Built once per loaded table and read-only afterwards.
#[derive(Debug, Clone)]
pub struct DatasetOverview {
    table: Table,
    descriptors: IndexMap<ColumnId, ColumnDescriptor>,
    conversions: Vec<ConversionRecord>,
    splits: Vec<SplitRecord>,
}

impl DatasetOverview {
    /// Normalize a raw table and classify every resulting column.
    ///
    /// Nulls are filled first (empty text, zero numbers), then date/time
    /// text columns are converted or split, then column names are trimmed.
    pub fn new(table: Table) -> Self {
        let mut table = table;
        fill_null_values(&mut table);

        let (mut table, conversions, splits) = convert_date_time_columns(table);

        for column in table.columns_mut() {
            let trimmed = column.name.trim();
            if trimmed.len() != column.name.len() {
                column.name = trimmed.to_string();
            }
        }

        let descriptors: IndexMap<ColumnId, ColumnDescriptor> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| (ColumnId(i), classify(column)))
            .collect();

        debug!(
            columns = descriptors.len(),
            unclassified = descriptors.values().filter(|d| d.category.is_none()).count(),
            splits = splits.len(),
            "dataset overview built"
        );

        Self {
            table,
            descriptors,
            conversions,
            splits,
        }
    }

    /// The normalized table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Descriptors keyed by column id, in column order.
    pub fn descriptors(&self) -> &IndexMap<ColumnId, ColumnDescriptor> {
        &self.descriptors
    }

    /// Descriptor of one column.
    pub fn descriptor(&self, id: ColumnId) -> Option<&ColumnDescriptor> {
        self.descriptors.get(&id)
    }

    /// First column with the given name.
    pub fn find(&self, name: &str) -> Option<(ColumnId, &ColumnDescriptor)> {
        self.descriptors
            .iter()
            .find(|(_, d)| d.name == name)
            .map(|(id, d)| (*id, d))
    }

    /// Data of one column.
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.table.column_at(id.0)
    }

    /// Columns of the given category, in column order.
    pub fn columns_of(&self, category: DataCategory) -> Vec<ColumnId> {
        self.descriptors
            .iter()
            .filter(|(_, d)| d.is(category))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn conversions(&self) -> &[ConversionRecord] {
        &self.conversions
    }

    pub fn splits(&self) -> &[SplitRecord] {
        &self.splits
    }

    /// Build the per-column report.
    pub fn summary(&self) -> OverviewSummary {
        OverviewSummary {
            row_count: self.table.row_count(),
            column_count: self.table.column_count(),
            columns: self
                .descriptors
                .iter()
                .map(|(id, d)| ColumnSummary {
                    id: id.to_string(),
                    name: d.name.clone(),
                    raw_type: d.raw_type.to_string(),
                    category: d.category_label().to_string(),
                    unique_count: d.unique_count,
                    null_count: d.null_count,
                })
                .collect(),
            conversions: self.conversions.clone(),
            splits: self.splits.clone(),
        }
    }

    /// The report as pretty-printed JSON.
    pub fn summary_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.summary())?)
    }

    /// Give up the normalized table.
    pub fn into_table(self) -> Table {
        self.table
    }
}

/// Fill text nulls with empty strings and numeric nulls with zero.
fn fill_null_values(table: &mut Table) {
    for column in table.columns_mut() {
        match &mut column.data {
            ColumnData::Text(values) => {
                for v in values.iter_mut().filter(|v| v.is_none()) {
                    *v = Some(String::new());
                }
            }
            ColumnData::Integer(values) => {
                for v in values.iter_mut().filter(|v| v.is_none()) {
                    *v = Some(0);
                }
            }
            ColumnData::Float(values) => {
                for v in values.iter_mut().filter(|v| v.is_none()) {
                    *v = Some(0.0);
                }
            }
            ColumnData::Date(_) | ColumnData::Duration(_) => {}
        }
    }
}

/// Apply the date/time directive of every original text column.
///
/// Columns are addressed by position, so columns sharing a name are each
/// converted. A split drops its source and appends two columns; the columns
/// appended are not revisited. The split counter advances once per split
/// directive, whether or not the split succeeds.
fn convert_date_time_columns(mut table: Table) -> (Table, Vec<ConversionRecord>, Vec<SplitRecord>) {
    let original_count = table.column_count();
    let mut conversions = Vec::new();
    let mut splits = Vec::new();
    let mut counter = 0;
    let mut index = 0;

    for _ in 0..original_count {
        let Some(column) = table.column_at(index) else {
            break;
        };
        if column.raw_type() != RawType::Text {
            index += 1;
            continue;
        }
        let Some(directive) = main_converter(&column.data) else {
            index += 1;
            continue;
        };
        let name = column.name.clone();
        debug!(column = %name, index, directive = %directive, "date/time directive");

        let applied = match directive {
            ConversionDirective::ChangeToDate => match to_date_column(&column.data) {
                Some(data) => table.replace_data_at(index, data),
                None => false,
            },
            ConversionDirective::ChangeToTime => match to_duration_column(&column.data) {
                Some(data) => table.replace_data_at(index, data),
                None => false,
            },
            ConversionDirective::SplitDateTime => {
                let time_is_empty = column
                    .data
                    .text_values()
                    .is_some_and(|values| check_empty_time_data(&values));
                let split = match split_date_time_at(&table, index, counter) {
                    Some(split) => {
                        table = split;
                        true
                    }
                    None => false,
                };
                if split {
                    splits.push(SplitRecord {
                        source: name.clone(),
                        date_column: format!("Date_{counter}"),
                        time_column: format!("Time_{counter}"),
                        time_is_empty,
                    });
                }
                counter += 1;
                split
            }
        };

        // A completed split moved the next column into this position.
        if !(applied && directive == ConversionDirective::SplitDateTime) {
            index += 1;
        }
        conversions.push(ConversionRecord {
            column: name,
            directive,
            applied,
        });
    }

    (table, conversions, splits)
}
