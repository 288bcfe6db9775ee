//! Semantic category assignment for a single column.

use crate::input::{Column, ColumnData};
use crate::schema::{ColumnDescriptor, DataCategory};

/// Above this many distinct values a non-unique text column is Nominal.
pub const NOMINAL_DISTINCT_CUTOFF: usize = 10;

/// Classify one column into a descriptor.
pub fn classify(column: &Column) -> ColumnDescriptor {
    ColumnDescriptor {
        name: column.name.clone(),
        raw_type: column.raw_type(),
        unique_count: column.data.unique_count(),
        null_count: column.data.null_count(),
        category: categorize(&column.data),
    }
}

/// Semantic category of a column's values.
///
/// Quantitative rules are tried before qualitative ones: integers with
/// more than two values are Discrete, whole-valued floats Discrete and other
/// floats Continuous. Integers with exactly two values are Nominal-Binary.
/// Text is Nominal when every value is unique or there are more than ten
/// distinct values, Ordinal otherwise. Typed dates and durations map to
/// Date and Time. Anything else stays unclassified.
pub fn categorize(data: &ColumnData) -> Option<DataCategory> {
    match data {
        ColumnData::Integer(_) => match data.unique_count() {
            n if n > 2 => Some(DataCategory::Discrete),
            2 => Some(DataCategory::NominalBinary),
            _ => None,
        },
        ColumnData::Float(values) => {
            let whole = values
                .iter()
                .all(|v| v.is_some_and(|x| x.is_finite() && x.fract() == 0.0));
            if whole {
                Some(DataCategory::Discrete)
            } else {
                Some(DataCategory::Continuous)
            }
        }
        ColumnData::Text(values) => {
            let distinct = data.unique_count();
            if values.len() == distinct || distinct > NOMINAL_DISTINCT_CUTOFF {
                Some(DataCategory::Nominal)
            } else {
                Some(DataCategory::Ordinal)
            }
        }
        ColumnData::Date(_) => Some(DataCategory::Date),
        ColumnData::Duration(_) => Some(DataCategory::Time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    fn labels(n: usize, repeat: usize) -> Vec<String> {
        (0..n)
            .flat_map(|i| std::iter::repeat_n(format!("L{i}"), repeat))
            .collect()
    }

    #[test]
    fn test_integer_categories() {
        assert_eq!(
            categorize(&Column::integer("a", [1, 2, 3]).data),
            Some(DataCategory::Discrete)
        );
        assert_eq!(
            categorize(&Column::integer("b", [0, 1, 1, 0]).data),
            Some(DataCategory::NominalBinary)
        );
        assert_eq!(categorize(&Column::integer("c", [7, 7, 7]).data), None);
    }

    #[test]
    fn test_float_categories() {
        assert_eq!(
            categorize(&Column::float("a", [1.0, 2.0, 3.0]).data),
            Some(DataCategory::Discrete)
        );
        assert_eq!(
            categorize(&Column::float("b", [1.0, 2.5]).data),
            Some(DataCategory::Continuous)
        );
        assert_eq!(
            categorize(&ColumnData::Float(vec![Some(1.0), None])),
            Some(DataCategory::Continuous)
        );
    }

    #[test]
    fn test_text_with_few_repeated_values_is_ordinal() {
        let column = Column::text("grade", ["A", "B", "A", "C", "A"]);
        assert_eq!(classify(&column).category, Some(DataCategory::Ordinal));
    }

    #[test]
    fn test_all_unique_small_text_is_nominal() {
        let column = Column::text("name", ["x", "y", "z"]);
        assert_eq!(classify(&column).category, Some(DataCategory::Nominal));
    }

    #[test]
    fn test_nominal_ordinal_boundary() {
        let ten = Column::text("ten", labels(10, 2));
        assert_eq!(classify(&ten).category, Some(DataCategory::Ordinal));

        let eleven = Column::text("eleven", labels(11, 2));
        assert_eq!(classify(&eleven).category, Some(DataCategory::Nominal));
    }

    #[test]
    fn test_temporal_categories() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            categorize(&ColumnData::Date(vec![Some(date)])),
            Some(DataCategory::Date)
        );
        assert_eq!(
            categorize(&ColumnData::Duration(vec![Some(TimeDelta::seconds(60))])),
            Some(DataCategory::Time)
        );
    }

    #[test]
    fn test_descriptor_counts() {
        let column = Column::new(
            "mixed",
            ColumnData::Text(vec![Some("a".into()), None, Some("a".into())]),
        );
        let descriptor = classify(&column);
        assert_eq!(descriptor.name, "mixed");
        assert_eq!(descriptor.unique_count, 2);
        assert_eq!(descriptor.null_count, 1);
    }
}
