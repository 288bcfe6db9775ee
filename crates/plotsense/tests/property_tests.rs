//! Property-based tests for Plotsense.
//!
//! These tests use proptest to generate random inputs and check that
//! classification, facet partitioning and attribute validation keep their
//! invariants.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p plotsense --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p plotsense --test property_tests
//! ```

use proptest::prelude::*;

use plotsense::datetime::{main_converter, return_date_format};
use plotsense::facet::{
    calculate_nrows_ncols, create_faceted_dataframes, facet_cardinal_series, FacetGrid,
};
use plotsense::inference::categorize;
use plotsense::input::{Column, ColumnData};
use plotsense::validation::space_legend_out_check;
use plotsense::{DatasetOverview, ParamValue, Table};

// =============================================================================
// Test Strategies
// =============================================================================

/// Generate short text values drawn from a small alphabet, so repeats are common.
fn category_text() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

/// Generate strings that look like slash dates, valid or not.
fn slash_date_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-3][0-9]/[01][0-9]/[12][0-9]{3}",
        "[0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}",
        "[a-zA-Z0-9/:\\- ]{0,20}",
    ]
}

fn text_column() -> impl Strategy<Value = ColumnData> {
    prop::collection::vec(category_text(), 1..60)
        .prop_map(|values| ColumnData::Text(values.into_iter().map(Some).collect()))
}

fn integer_column() -> impl Strategy<Value = ColumnData> {
    prop::collection::vec(-5i64..5, 1..60)
        .prop_map(|values| ColumnData::Integer(values.into_iter().map(Some).collect()))
}

fn float_column() -> impl Strategy<Value = ColumnData> {
    prop::collection::vec(-1000.0f64..1000.0, 1..60)
        .prop_map(|values| ColumnData::Float(values.into_iter().map(Some).collect()))
}

// =============================================================================
// Classification Properties
// =============================================================================

mod classification_tests {
    use super::*;

    proptest! {
        /// A column never gets more than one category, and asking twice agrees.
        #[test]
        fn categorize_is_deterministic(
            data in prop_oneof![text_column(), integer_column(), float_column()]
        ) {
            prop_assert_eq!(categorize(&data), categorize(&data));
        }

        /// Rebuilding an overview from its own table keeps every category.
        #[test]
        fn classification_is_idempotent(
            text in text_column(),
            numbers in float_column(),
        ) {
            let rows = text.len().min(numbers.len());
            let picks: Vec<usize> = (0..rows).collect();
            let table = Table::new(vec![
                Column::new("label", text.take_rows(&picks)),
                Column::new("value", numbers.take_rows(&picks)),
            ]);

            let first = DatasetOverview::new(table);
            let second = DatasetOverview::new(first.table().clone());
            let a: Vec<_> = first.descriptors().values().map(|d| d.category).collect();
            let b: Vec<_> = second.descriptors().values().map(|d| d.category).collect();
            prop_assert_eq!(a, b);
        }

        /// Date detection never panics on date-like text.
        #[test]
        fn date_detection_never_panics(values in prop::collection::vec(slash_date_like(), 1..20)) {
            let refs: Vec<&str> = values.iter().map(String::as_str).collect();
            let _ = return_date_format(&refs);
            let data = ColumnData::Text(values.iter().cloned().map(Some).collect());
            let _ = main_converter(&data);
        }
    }
}

// =============================================================================
// Facet Properties
// =============================================================================

mod facet_tests {
    use super::*;

    proptest! {
        /// Group sizes sum to the row count and all but the last group are full.
        #[test]
        fn partition_is_complete(len in 0usize..500, bars in 1usize..50) {
            let labels = facet_cardinal_series(len, bars);
            prop_assert_eq!(labels.len(), len);

            let mut sizes: Vec<usize> = Vec::new();
            let mut last: Option<&String> = None;
            for label in &labels {
                if last == Some(label) {
                    if let Some(size) = sizes.last_mut() {
                        *size += 1;
                    }
                } else {
                    sizes.push(1);
                    last = Some(label);
                }
            }

            prop_assert_eq!(sizes.iter().sum::<usize>(), len);
            if let Some((final_size, full)) = sizes.split_last() {
                prop_assert!(full.iter().all(|s| *s == bars));
                prop_assert!(*final_size >= 1 && *final_size <= bars);
            }
        }

        /// The grid holds every facet and spare-slot deletion leaves exactly one slot per facet.
        #[test]
        fn grid_fits_facets(n_facets in 0usize..200, columns in 1usize..8) {
            let (rows, cols) = calculate_nrows_ncols(n_facets, columns);
            prop_assert!(rows * cols >= n_facets);
            prop_assert!(rows * cols < n_facets + cols);

            let mut grid = FacetGrid::new(n_facets, columns);
            let removed = grid.delete_spare_axes(n_facets);
            prop_assert_eq!(removed.len(), rows * cols - n_facets);
            prop_assert_eq!(grid.remaining(), n_facets);
        }

        /// Facet sub-tables cover every source row exactly once, in order.
        #[test]
        fn faceted_tables_cover_rows(len in 1usize..120, bars in 0usize..25) {
            let table = Table::new(vec![Column::integer("id", 0..len as i64)]);
            let frames = create_faceted_dataframes(&table, "id", bars).unwrap();

            let rows: Vec<usize> = frames.iter().flat_map(|f| f.source_rows.iter().copied()).collect();
            prop_assert_eq!(rows, (0..len).collect::<Vec<_>>());
            for frame in &frames {
                prop_assert_eq!(frame.table.row_count(), frame.source_rows.len());
            }
        }
    }
}

// =============================================================================
// Validation Properties
// =============================================================================

mod validation_tests {
    use super::*;

    proptest! {
        /// Legend offsets are accepted exactly on [0, 1].
        #[test]
        fn legend_offset_range(offset in -2.0f64..3.0) {
            let accepted = space_legend_out_check(Some(&ParamValue::Float(offset)));
            prop_assert_eq!(accepted, (0.0..=1.0).contains(&offset));
        }
    }

    #[test]
    fn legend_offset_boundaries() {
        for offset in [0.0, 1.0] {
            assert!(space_legend_out_check(Some(&ParamValue::Float(offset))));
        }
        for offset in [-0.01, 1.01] {
            assert!(!space_legend_out_check(Some(&ParamValue::Float(offset))));
        }
    }
}
