//! Facet partitioning for high-cardinality categorical columns.
//!
//! A facet chart splits the table into consecutive groups of rows, one
//! subplot per group, laid out on a grid with a fixed number of columns.
//! Grid slots past the last group are spare and get removed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::{Column, Table};

/// Name of the label column added to each facet sub-table.
pub const FACET_GROUPS_COLUMN: &str = "Facet_Groups";

/// Subplot columns of a facet grid.
pub const DEFAULT_GRID_COLUMNS: usize = 4;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Configuration for facet layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetConfig {
    /// Subplots per grid row.
    pub columns: usize,
    /// Rows per facet when the chart does not set one.
    pub bars_per_facet: usize,
    pub figure_width: u32,
    pub figure_height: u32,
}

impl Default for FacetConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            bars_per_facet: 10,
            figure_width: 15,
            figure_height: 15,
        }
    }
}

impl FacetConfig {
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    pub fn with_bars_per_facet(mut self, bars: usize) -> Self {
        self.bars_per_facet = bars;
        self
    }

    pub fn with_figure_size(mut self, width: u32, height: u32) -> Self {
        self.figure_width = width;
        self.figure_height = height;
        self
    }
}

// =============================================================================
// PARTITIONING
// =============================================================================

/// Label of the facet at `index`.
pub fn facet_label(index: usize) -> String {
    format!("Facet_{index}")
}

/// Label every row of a column of `len` rows with its facet.
///
/// Consecutive runs of `n_bars_per_facet` rows share a label; the remainder
/// forms one final shorter facet. Zero bars per facet puts every row in
/// `Facet_0`.
pub fn facet_cardinal_series(len: usize, n_bars_per_facet: usize) -> Vec<String> {
    if n_bars_per_facet == 0 {
        return vec![facet_label(0); len];
    }

    (0..len).map(|row| facet_label(row / n_bars_per_facet)).collect()
}

/// Number of facets a column of `len` rows splits into.
pub fn facet_count(len: usize, n_bars_per_facet: usize) -> usize {
    match (len, n_bars_per_facet) {
        (0, _) => 0,
        (_, 0) => 1,
        (len, n) => len.div_ceil(n),
    }
}

/// Grid rows and columns needed to hold `n_facets` subplots.
pub fn calculate_nrows_ncols(n_facets: usize, n_columns: usize) -> (usize, usize) {
    let n_columns = n_columns.max(1);
    (n_facets.div_ceil(n_columns), n_columns)
}

/// One facet's rows, as a standalone table.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetFrame {
    pub label: String,
    /// Positions of the rows in the source table.
    pub source_rows: Vec<usize>,
    /// Rows of the facet, re-indexed from zero, with a trailing
    /// [`FACET_GROUPS_COLUMN`].
    pub table: Table,
}

/// Split a table into one sub-table per facet of `column`.
///
/// Returns `None` when the column does not exist.
pub fn create_faceted_dataframes(
    table: &Table,
    column: &str,
    n_bars_per_facet: usize,
) -> Option<Vec<FacetFrame>> {
    create_faceted_dataframes_at(table, table.position(column)?, n_bars_per_facet)
}

/// Split a table into one sub-table per facet of the column at `index`.
///
/// Returns `None` when the position is out of range.
pub fn create_faceted_dataframes_at(
    table: &Table,
    index: usize,
    n_bars_per_facet: usize,
) -> Option<Vec<FacetFrame>> {
    let column = table.column_at(index)?;
    let len = column.len();
    let labels = facet_cardinal_series(len, n_bars_per_facet);

    let mut frames: Vec<FacetFrame> = Vec::new();
    for (row, label) in labels.into_iter().enumerate() {
        match frames.last_mut() {
            Some(frame) if frame.label == label => frame.source_rows.push(row),
            _ => frames.push(FacetFrame {
                label,
                source_rows: vec![row],
                table: Table::default(),
            }),
        }
    }

    for frame in &mut frames {
        let mut sub_table = table.select_rows(&frame.source_rows);
        sub_table.push_column(Column::text(
            FACET_GROUPS_COLUMN,
            std::iter::repeat_n(frame.label.as_str(), frame.source_rows.len()),
        ));
        frame.table = sub_table;
    }

    debug!(column = %column.name, index, n_bars_per_facet, facets = frames.len(), "partitioned facets");
    Some(frames)
}

// =============================================================================
// GRID
// =============================================================================

/// Subplot grid of a facet chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetGrid {
    pub rows: usize,
    pub columns: usize,
    /// Slots still holding a subplot, row-major.
    slots: Vec<bool>,
}

impl FacetGrid {
    /// Grid sized for `n_facets` subplots.
    pub fn new(n_facets: usize, n_columns: usize) -> Self {
        let (rows, columns) = calculate_nrows_ncols(n_facets, n_columns);
        Self {
            rows,
            columns,
            slots: vec![true; rows * columns],
        }
    }

    /// Total number of slots, spare ones included.
    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }

    /// Slots that still hold a subplot.
    pub fn remaining(&self) -> usize {
        self.slots.iter().filter(|present| **present).count()
    }

    pub fn is_present(&self, row: usize, column: usize) -> bool {
        column < self.columns && self.slots.get(row * self.columns + column).copied().unwrap_or(false)
    }

    /// Remove the trailing spare slots, starting from the last one.
    ///
    /// Removes exactly `capacity - n_facets` slots, walking rows and
    /// columns in reverse, and returns their `(row, column)` positions in
    /// removal order.
    pub fn delete_spare_axes(&mut self, n_facets: usize) -> Vec<(usize, usize)> {
        let spare = self.capacity().saturating_sub(n_facets);
        let mut removed = Vec::with_capacity(spare);

        'rows: for row in (0..self.rows).rev() {
            for column in (0..self.columns).rev() {
                if removed.len() == spare {
                    break 'rows;
                }
                self.slots[row * self.columns + column] = false;
                removed.push((row, column));
            }
        }

        removed
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Renderer-facing description of a facet chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetLayout {
    /// High-cardinality column the facets are cut from.
    pub variable: String,
    pub bars_per_facet: usize,
    pub rows: usize,
    pub columns: usize,
    pub labels: Vec<String>,
    pub group_sizes: Vec<usize>,
    /// Grid slots removed as spare, in removal order.
    pub removed_slots: Vec<(usize, usize)>,
    pub figure_width: u32,
    pub figure_height: u32,
}

/// A facet layout together with its sub-tables.
#[derive(Debug, Clone)]
pub struct FacetPlan {
    pub layout: FacetLayout,
    pub frames: Vec<FacetFrame>,
}

/// Partition the column at `index` and lay its facets out on a grid.
///
/// Bars per facet and figure size come from `config`.
pub fn plan_facets(table: &Table, index: usize, config: &FacetConfig) -> Option<FacetPlan> {
    let column = table.column_at(index)?;
    let frames = create_faceted_dataframes_at(table, index, config.bars_per_facet)?;

    let mut grid = FacetGrid::new(frames.len(), config.columns);
    let removed_slots = grid.delete_spare_axes(frames.len());

    let layout = FacetLayout {
        variable: column.name.clone(),
        bars_per_facet: config.bars_per_facet,
        rows: grid.rows,
        columns: grid.columns,
        labels: frames.iter().map(|f| f.label.clone()).collect(),
        group_sizes: frames.iter().map(|f| f.source_rows.len()).collect(),
        removed_slots,
        figure_width: config.figure_width,
        figure_height: config.figure_height,
    };

    Some(FacetPlan { layout, frames })
}
