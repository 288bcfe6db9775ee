//! Fuzz target for date/time detection and conversion.
//!
//! Checks that detection, format inference and the overview's date/time
//! normalization never panic on arbitrary text values.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plotsense::datetime::{main_converter, return_date_format};
use plotsense::input::{Column, ColumnData};
use plotsense::{DatasetOverview, Table};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        let values: Vec<&str> = content.split('\n').collect();
        let _ = return_date_format(&values);

        let column = ColumnData::Text(values.iter().map(|v| Some(v.to_string())).collect());
        let _ = main_converter(&column);

        let table = Table::new(vec![Column::new("value", column)]);
        let _ = DatasetOverview::new(table);
    }
});
