//! Date and time detection and normalization for text columns.

mod convert;
mod detect;

pub use convert::{
    convert_timedelta, split_date_time, split_date_time_at, to_date_column, to_duration_column,
};
pub use detect::{
    acceptable_date_format, acceptable_date_time_format, acceptable_time_format,
    check_empty_time_data, determine_date, determine_date_and_time, determine_time, is_date,
    main_converter, parse_datetime_permissive, return_date_format, split_date_time_text,
    ConversionDirective, DateFormat, DatePart, DATE_SEPARATOR, TIME_SEPARATOR,
};
