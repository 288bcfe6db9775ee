//! Conversions of text columns into date and duration columns.
//!
//! Every public entry point here is a no-op boundary: a value that cannot be
//! converted leaves the input untouched and is reported through `tracing`.

use chrono::{NaiveDateTime, TimeDelta};
use thiserror::Error;
use tracing::{debug, warn};

use super::detect::{parse_datetime_permissive, return_date_format, split_date_time_text};
use crate::input::{Column, ColumnData, Table};

#[derive(Debug, Error)]
enum ConversionError {
    #[error("column '{0}' not found")]
    MissingColumn(String),

    #[error("column '{0}' does not hold text")]
    NotText(String),

    #[error("'{0}' is not a recognizable date")]
    InvalidDate(String),

    #[error("'{0}' is not a recognizable duration")]
    InvalidDuration(String),

    #[error("'{0}': expected hh:mm:ss format")]
    ExpectedHhMmSs(String),

    #[error("'{0}' does not hold both a date and a time")]
    MissingTime(String),
}

/// Express a duration given in seconds as hours, rounded to 2 decimals.
pub fn convert_timedelta(seconds: f64) -> f64 {
    (seconds / 60.0 / 60.0 * 100.0).round() / 100.0
}

/// Convert a text column to dates, using the inferred slash format when one
/// exists and permissive parsing otherwise.
///
/// Returns `None` when the column is not text or a value fails to parse.
pub fn to_date_column(data: &ColumnData) -> Option<ColumnData> {
    let ColumnData::Text(values) = data else {
        return None;
    };
    let values: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();

    match parse_dates(&values) {
        Ok(dates) => Some(ColumnData::Date(dates)),
        Err(e) => {
            warn!(error = %e, "date conversion skipped");
            None
        }
    }
}

/// Convert a text column of `hh:mm:ss` values to durations.
///
/// A column of `hh:mm` values is repaired by appending `:00` to every value.
/// Returns `None` when the column is not text or a value fails to parse.
pub fn to_duration_column(data: &ColumnData) -> Option<ColumnData> {
    let ColumnData::Text(values) = data else {
        return None;
    };
    let values: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();

    match parse_durations(&values) {
        Ok(durations) => Some(ColumnData::Duration(durations)),
        Err(e) => {
            warn!(error = %e, "time conversion skipped");
            None
        }
    }
}

/// Split a combined date-time column into `Date_<counter>` and
/// `Time_<counter>`, appended at the end, and drop the original.
///
/// Any failure returns the table unchanged.
pub fn split_date_time(table: Table, column: &str, counter: usize) -> Table {
    let Some(index) = table.position(column) else {
        let e = ConversionError::MissingColumn(column.to_string());
        warn!(column, error = %e, "date/time split skipped");
        return table;
    };
    split_date_time_at(&table, index, counter).unwrap_or(table)
}

/// Split the column at `index`, which may share its name with other columns.
///
/// Returns `None`, after logging why, when the split fails.
pub fn split_date_time_at(table: &Table, index: usize, counter: usize) -> Option<Table> {
    match try_split(table, index, counter) {
        Ok(split) => {
            debug!(index, counter, "split date/time column");
            Some(split)
        }
        Err(e) => {
            warn!(index, error = %e, "date/time split skipped");
            None
        }
    }
}

fn try_split(table: &Table, index: usize, counter: usize) -> Result<Table, ConversionError> {
    let source = table
        .column_at(index)
        .ok_or_else(|| ConversionError::MissingColumn(format!("#{index}")))?;
    let values = source
        .data
        .text_values()
        .ok_or_else(|| ConversionError::NotText(source.name.clone()))?;

    let mut dates = Vec::with_capacity(values.len());
    let mut times = Vec::with_capacity(values.len());
    for value in values {
        let (date, time) =
            split_date_time_text(value).ok_or_else(|| ConversionError::MissingTime(value.to_string()))?;
        dates.push(Some(date));
        times.push(Some(time));
    }

    let date_data = ColumnData::Date(parse_dates(&dates)?);
    let time_data = ColumnData::Duration(parse_durations(&times)?);

    let mut split = table.clone();
    split.push_column(Column::new(format!("Date_{counter}"), date_data));
    split.push_column(Column::new(format!("Time_{counter}"), time_data));
    split.remove_column_at(index);
    Ok(split)
}

fn parse_dates(values: &[Option<&str>]) -> Result<Vec<Option<NaiveDateTime>>, ConversionError> {
    let present: Vec<&str> = values.iter().flatten().copied().collect();
    let format = return_date_format(&present);

    values
        .iter()
        .map(|value| {
            let Some(value) = value else {
                return Ok(None);
            };
            let parsed = match &format {
                Some(format) => format.parse(value),
                None => parse_datetime_permissive(value),
            };
            parsed
                .map(Some)
                .ok_or_else(|| ConversionError::InvalidDate(value.to_string()))
        })
        .collect()
}

fn parse_durations(values: &[Option<&str>]) -> Result<Vec<Option<TimeDelta>>, ConversionError> {
    let parse_all = |values: &[Option<String>]| -> Result<Vec<Option<TimeDelta>>, ConversionError> {
        values
            .iter()
            .map(|v| v.as_deref().map(parse_duration).transpose())
            .collect()
    };

    let owned: Vec<Option<String>> = values.iter().map(|v| v.map(|s| s.trim().to_string())).collect();
    let first_pass = parse_all(&owned);
    match first_pass {
        Err(ConversionError::ExpectedHhMmSs(_)) => {
            let repaired: Vec<Option<String>> = owned
                .into_iter()
                .map(|v| v.map(|s| format!("{s}:00")))
                .collect();
            parse_all(&repaired)
        }
        other => other,
    }
}

/// Parse `[N days ]hh:mm:ss[.fff]`.
fn parse_duration(value: &str) -> Result<TimeDelta, ConversionError> {
    let invalid = || ConversionError::InvalidDuration(value.to_string());

    let (days, clock) = match value.split_once(" days ").or_else(|| value.split_once(" day ")) {
        Some((days, clock)) => (days.trim().parse::<i64>().map_err(|_| invalid())?, clock.trim()),
        None => (0, value.trim()),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    match parts.len() {
        3 => {}
        2 => return Err(ConversionError::ExpectedHhMmSs(value.to_string())),
        _ => return Err(invalid()),
    }

    let whole = |part: &str| -> Result<i64, ConversionError> {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        part.parse::<i64>().map_err(|_| invalid())
    };
    let hours = whole(parts[0])?;
    let minutes = whole(parts[1])?;
    let seconds: f64 = match parts[2].parse::<f64>() {
        Ok(s) if (0.0..1e15).contains(&s) && !parts[2].starts_with('+') => s,
        _ => return Err(invalid()),
    };

    let millis = days
        .checked_mul(24)
        .and_then(|h| h.checked_add(hours))
        .and_then(|h| h.checked_mul(60))
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60_000))
        .and_then(|ms| ms.checked_add((seconds * 1000.0).round() as i64))
        .ok_or_else(invalid)?;
    TimeDelta::try_milliseconds(millis).ok_or_else(invalid)
}
