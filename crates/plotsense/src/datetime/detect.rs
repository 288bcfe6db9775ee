//! Shape detection for date, time and combined date-time text columns.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::ColumnData;

/// Separator between date components.
pub const DATE_SEPARATOR: char = '/';

/// Separator between time components.
pub const TIME_SEPARATOR: char = ':';

/// Width of a fully padded `##/##/####` date.
const FIXED_DATE_WIDTH: usize = 10;

/// Trailing UTC offset or `Z` marker on a time component.
static TIME_OFFSET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(Z|[+-]\d{2}(:?\d{2})?)$").unwrap());

// =============================================================================
// PERMISSIVE PARSING
// =============================================================================
// Month-first layouts are tried before day-first ones, so ambiguous values
// such as 05/06/2023 read as May 6th.

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m/%d/%y",
    "%d/%m/%y",
    "%d-%m-%Y",
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Parse a date or date-time written in any of the common layouts.
///
/// Date-only values are placed at midnight.
pub fn parse_datetime_permissive(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Return whether the string can be interpreted as a date.
pub fn is_date(value: &str) -> bool {
    parse_datetime_permissive(value).is_some()
}

// =============================================================================
// SEPARATOR SHAPES
// =============================================================================

fn separator_counts(value: &str) -> (usize, usize) {
    value.chars().fold((0, 0), |(dates, times), c| match c {
        DATE_SEPARATOR => (dates + 1, times),
        TIME_SEPARATOR => (dates, times + 1),
        _ => (dates, times),
    })
}

fn all_shaped(values: &[&str], shape: impl Fn(usize, usize) -> bool) -> bool {
    !values.is_empty()
        && values.iter().all(|v| {
            let (dates, times) = separator_counts(v);
            shape(dates, times)
        })
}

/// Every value has exactly two date separators and no time separator.
pub fn acceptable_date_format(values: &[&str]) -> bool {
    all_shaped(values, |dates, times| dates == 2 && times == 0)
}

/// Every value has no date separator and at least one time separator.
pub fn acceptable_time_format(values: &[&str]) -> bool {
    all_shaped(values, |dates, times| dates == 0 && times >= 1)
}

/// Every value has at least one date separator and one time separator.
pub fn acceptable_date_time_format(values: &[&str]) -> bool {
    all_shaped(values, |dates, times| dates >= 1 && times >= 1)
}

/// Date-shaped values that all parse as dates.
pub fn determine_date(values: &[&str]) -> bool {
    acceptable_date_format(values) && values.iter().all(|v| is_date(v))
}

/// Time-shaped values whose `:`-separated parts are all digits.
pub fn determine_time(values: &[&str]) -> bool {
    acceptable_time_format(values)
        && values.iter().all(|v| {
            v.split(TIME_SEPARATOR)
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        })
}

/// Values that are neither date-only nor time-only but carry both.
pub fn determine_date_and_time(values: &[&str]) -> bool {
    !acceptable_time_format(values)
        && !acceptable_date_format(values)
        && acceptable_date_time_format(values)
}

// =============================================================================
// FORMAT INFERENCE
// =============================================================================

/// One component of a slash-separated date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePart {
    Day,
    Month,
    Year,
}

impl DatePart {
    fn directive(&self) -> &'static str {
        match self {
            DatePart::Day => "%d",
            DatePart::Month => "%m",
            DatePart::Year => "%Y",
        }
    }
}

/// Inferred component order of a `##/##/####`-style date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormat {
    pub order: [DatePart; 3],
}

impl DateFormat {
    /// The strftime pattern, e.g. `%d/%m/%Y`.
    pub fn pattern(&self) -> String {
        self.order
            .iter()
            .map(DatePart::directive)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Parse one value with this format, at midnight.
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        NaiveDate::parse_from_str(value.trim(), &self.pattern())
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern())
    }
}

/// Infer which token of a fixed-width slash date is day, month and year.
///
/// A position is the day if any row holds a value strictly between 12 and
/// 31 there; the month if every row is at most 12; the year if every row
/// has four digits. Earlier roles keep their position. Roles left over are
/// placed on the remaining positions in day, month, year order.
pub fn return_date_format(values: &[&str]) -> Option<DateFormat> {
    if values.is_empty() || values.iter().any(|v| v.chars().count() != FIXED_DATE_WIDTH) {
        return None;
    }

    let mut rows: Vec<[(u32, usize); 3]> = Vec::with_capacity(values.len());
    for value in values {
        let tokens: Vec<&str> = value.split(DATE_SEPARATOR).collect();
        if tokens.len() != 3 {
            return None;
        }
        let mut row = [(0, 0); 3];
        for (slot, token) in row.iter_mut().zip(&tokens) {
            if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            *slot = (token.parse().ok()?, token.len());
        }
        rows.push(row);
    }

    let mut order: [Option<DatePart>; 3] = [None; 3];

    if let Some(pos) = (0..3).find(|&p| rows.iter().any(|r| r[p].0 > 12 && r[p].0 < 31)) {
        order[pos] = Some(DatePart::Day);
    }
    if let Some(pos) = (0..3).find(|&p| order[p].is_none() && rows.iter().all(|r| r[p].0 <= 12)) {
        order[pos] = Some(DatePart::Month);
    }
    if let Some(pos) = (0..3).find(|&p| order[p].is_none() && rows.iter().all(|r| r[p].1 == 4)) {
        order[pos] = Some(DatePart::Year);
    }

    let unassigned: Vec<DatePart> = [DatePart::Day, DatePart::Month, DatePart::Year]
        .into_iter()
        .filter(|part| !order.contains(&Some(*part)))
        .collect();
    let mut leftover = unassigned.into_iter();
    for slot in order.iter_mut().filter(|s| s.is_none()) {
        *slot = leftover.next();
    }

    let format = DateFormat {
        order: [order[0]?, order[1]?, order[2]?],
    };
    debug!(format = %format, "inferred date format");
    Some(format)
}

// =============================================================================
// COMBINED VALUES
// =============================================================================

/// Split a combined value into its date and time text.
///
/// The date and time may be separated by whitespace or an ISO `T`; a
/// trailing UTC offset is removed from the time.
pub fn split_date_time_text(value: &str) -> Option<(&str, &str)> {
    let value = value.trim();
    let (date, time) = value
        .split_once(char::is_whitespace)
        .or_else(|| value.split_once('T'))?;
    let time = time.trim();
    let time = match TIME_OFFSET.find(time) {
        Some(m) if m.start() > 0 => &time[..m.start()],
        _ => time,
    };
    if date.is_empty() || time.is_empty() {
        return None;
    }
    Some((date.trim(), time.trim()))
}

/// Check whether the time half of combined values is midnight on every row.
///
/// Values without a time half are not considered empty time data.
pub fn check_empty_time_data(values: &[&str]) -> bool {
    !values.is_empty()
        && values.iter().all(|value| {
            let Some((_, time)) = split_date_time_text(value) else {
                return false;
            };
            let parts: Vec<&str> = time.split(TIME_SEPARATOR).collect();
            parts.len() >= 3
                && parts[0] == "00"
                && parts[1] == "00"
                && parts[2].starts_with("00")
                && parts[2][2..].chars().all(|c| c == '0' || c == '.')
        })
}

// =============================================================================
// DIRECTIVES
// =============================================================================

/// Conversion to apply to a text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionDirective {
    #[serde(rename = "Change_to_Date")]
    ChangeToDate,
    #[serde(rename = "Change_to_Time")]
    ChangeToTime,
    #[serde(rename = "Split_&_Change_Date&Time")]
    SplitDateTime,
}

impl ConversionDirective {
    /// Directive name.
    pub fn label(&self) -> &'static str {
        match self {
            ConversionDirective::ChangeToDate => "Change_to_Date",
            ConversionDirective::ChangeToTime => "Change_to_Time",
            ConversionDirective::SplitDateTime => "Split_&_Change_Date&Time",
        }
    }
}

impl fmt::Display for ConversionDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decide how a column should be converted. Only text columns qualify.
pub fn main_converter(data: &ColumnData) -> Option<ConversionDirective> {
    let values = data.text_values()?;

    if determine_date(&values) {
        Some(ConversionDirective::ChangeToDate)
    } else if determine_time(&values) {
        Some(ConversionDirective::ChangeToTime)
    } else if determine_date_and_time(&values) {
        Some(ConversionDirective::SplitDateTime)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ColumnData;

    fn text(values: &[&str]) -> ColumnData {
        ColumnData::Text(values.iter().map(|v| Some(v.to_string())).collect())
    }

    #[test]
    fn test_shape_predicates_are_exclusive() {
        let samples: &[&[&str]] = &[
            &["05/06/2023", "12/01/2020"],
            &["12:30", "08:15:00"],
            &["05/06/2023 12:30:00"],
            &["hello"],
            &["1/2", "3:4"],
        ];
        for values in samples {
            let matched = [
                acceptable_date_format(values),
                acceptable_time_format(values),
                acceptable_date_time_format(values),
            ]
            .iter()
            .filter(|b| **b)
            .count();
            assert!(matched <= 1, "{values:?} matched {matched} shapes");
        }
    }

    #[test]
    fn test_empty_column_fails_every_shape() {
        assert!(!acceptable_date_format(&[]));
        assert!(!acceptable_time_format(&[]));
        assert!(!acceptable_date_time_format(&[]));
    }

    #[test]
    fn test_is_date() {
        assert!(is_date("05/06/2023"));
        assert!(is_date("25/06/2023"));
        assert!(is_date("2023-06-05"));
        assert!(is_date("2023-06-05T10:00:00Z"));
        assert!(!is_date("99/99/9999"));
        assert!(!is_date("apple"));
    }

    #[test]
    fn test_determine_date_rejects_invalid_dates() {
        assert!(determine_date(&["05/06/2023", "25/12/2021"]));
        assert!(!determine_date(&["05/06/2023", "99/99/9999"]));
    }

    #[test]
    fn test_determine_time() {
        assert!(determine_time(&["12:30", "08:15:00"]));
        assert!(!determine_time(&["12:3a"]));
        assert!(!determine_time(&["12:30", "noon"]));
    }

    #[test]
    fn test_determine_date_and_time() {
        assert!(determine_date_and_time(&["05/06/2023 12:30:00", "06/06/2023 13:00:00"]));
        assert!(!determine_date_and_time(&["05/06/2023"]));
        assert!(!determine_date_and_time(&["12:30"]));
    }

    #[test]
    fn test_return_date_format_day_first() {
        let format = return_date_format(&["05/06/2023", "25/06/2023"]).unwrap();
        assert_eq!(format.pattern(), "%d/%m/%Y");
    }

    #[test]
    fn test_return_date_format_month_first() {
        let format = return_date_format(&["06/05/2023", "06/25/2023"]).unwrap();
        assert_eq!(format.pattern(), "%m/%d/%Y");
    }

    #[test]
    fn test_return_date_format_year_first() {
        let format = return_date_format(&["2023/06/25", "2023/01/02"]).unwrap();
        assert_eq!(format.pattern(), "%Y/%m/%d");
    }

    #[test]
    fn test_return_date_format_ambiguous_defaults() {
        let format = return_date_format(&["05/06/2023"]).unwrap();
        assert_eq!(format.to_string(), "%m/%d/%Y");
    }

    #[test]
    fn test_return_date_format_fills_unassigned_roles() {
        let format = return_date_format(&["01/02/2023", "03/04/2023"]).unwrap();
        assert_eq!(format.order, [DatePart::Month, DatePart::Day, DatePart::Year]);

        let format = return_date_format(&["2023/05/06", "2023/07/08"]).unwrap();
        assert_eq!(format.order, [DatePart::Year, DatePart::Month, DatePart::Day]);
    }

    #[test]
    fn test_return_date_format_rejects_irregular_values() {
        assert!(return_date_format(&["5/6/2023"]).is_none());
        assert!(return_date_format(&["2023-06-05"]).is_none());
        assert!(return_date_format(&["ab/cd/efgh"]).is_none());
        assert!(return_date_format(&[]).is_none());
    }

    #[test]
    fn test_date_format_parse() {
        let format = return_date_format(&["25/06/2023"]).unwrap();
        let parsed = format.parse("25/06/2023").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2023, 6, 25).unwrap());
    }

    #[test]
    fn test_split_date_time_text() {
        assert_eq!(
            split_date_time_text("05/06/2023 12:30:00"),
            Some(("05/06/2023", "12:30:00"))
        );
        assert_eq!(
            split_date_time_text("2023-06-05T12:30:00+00:00"),
            Some(("2023-06-05", "12:30:00"))
        );
        assert_eq!(split_date_time_text("05/06/2023"), None);
    }

    #[test]
    fn test_check_empty_time_data() {
        assert!(check_empty_time_data(&["05/06/2023 00:00:00", "06/06/2023 00:00:00+00"]));
        assert!(!check_empty_time_data(&["05/06/2023 00:00:00", "06/06/2023 12:00:00"]));
        assert!(!check_empty_time_data(&["05/06/2023"]));
    }

    #[test]
    fn test_main_converter_directives() {
        assert_eq!(
            main_converter(&text(&["05/06/2023", "25/06/2023"])),
            Some(ConversionDirective::ChangeToDate)
        );
        assert_eq!(
            main_converter(&text(&["12:30", "13:45"])),
            Some(ConversionDirective::ChangeToTime)
        );
        assert_eq!(
            main_converter(&text(&["05/06/2023 12:30:00"])),
            Some(ConversionDirective::SplitDateTime)
        );
        assert_eq!(main_converter(&text(&["red", "blue"])), None);
    }

    #[test]
    fn test_main_converter_ignores_non_text() {
        let data = ColumnData::Integer(vec![Some(1), Some(2)]);
        assert_eq!(main_converter(&data), None);
    }

    #[test]
    fn test_directive_serializes_to_legacy_names() {
        let json = serde_json::to_string(&ConversionDirective::SplitDateTime).unwrap();
        assert_eq!(json, "\"Split_&_Change_Date&Time\"");
    }
}
