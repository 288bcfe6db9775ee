//! File loading for delimited text and spreadsheets.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::SourceMetadata;
use super::table::{RawCell, Table};
use crate::error::{PlotsenseError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Reader family selected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.csv`, `.tsv` and `.txt` files.
    Delimited,
    /// `.xlsx`, `.xls`, `.xlsm` and `.ods` workbooks (first sheet).
    Spreadsheet,
}

impl SourceFormat {
    /// Pick the reader from the extension alone; `None` for anything unsupported.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "tsv" | "txt" => Some(SourceFormat::Delimited),
            "xlsx" | "xls" | "xlsm" | "ods" => Some(SourceFormat::Spreadsheet),
            _ => None,
        }
    }
}

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

impl ParserConfig {
    /// Force a delimiter instead of detecting one.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Limit the number of data rows read.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Loads tabular data files into typed tables.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Load a file into a typed table.
    ///
    /// Missing paths and unsupported extensions yield `Ok(None)`; content
    /// that cannot be read is an error.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Option<(Table, SourceMetadata)>> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "no file at path");
            return Ok(None);
        }

        let Some(source_format) = SourceFormat::from_path(path) else {
            debug!(path = %path.display(), "unsupported file extension");
            return Ok(None);
        };

        let contents = fs::read(path).map_err(|e| PlotsenseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (table, format) = match source_format {
            SourceFormat::Delimited => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(&contents)?,
                };
                let format = match delimiter {
                    b'\t' => "tsv",
                    b',' => "csv",
                    b';' => "csv-semicolon",
                    b'|' => "psv",
                    _ => "delimited",
                };
                (self.parse_bytes(&contents, delimiter)?, format.to_string())
            }
            SourceFormat::Spreadsheet => {
                let format = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("spreadsheet")
                    .to_ascii_lowercase();
                (self.parse_workbook(path)?, format)
            }
        };

        debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            format = %format,
            "loaded table"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok(Some((table, metadata)))
    }

    /// Parse delimited bytes directly.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut rows: Vec<Vec<RawCell>> = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if self.config.max_rows.is_some_and(|max| row_idx >= max) {
                break;
            }
            let record = result?;
            rows.push(record.iter().map(RawCell::from_text).collect());
        }

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(PlotsenseError::EmptyData("No columns found".to_string()));
        }

        Ok(Table::from_cells(headers, rows))
    }

    /// Parse the first worksheet of a workbook.
    fn parse_workbook(&self, path: &Path) -> Result<Table> {
        let spreadsheet_error = |message: String| PlotsenseError::Spreadsheet {
            path: path.to_path_buf(),
            message,
        };

        let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| spreadsheet_error("workbook has no worksheets".to_string()))?
            .map_err(|e| spreadsheet_error(e.to_string()))?;

        let mut rows = range.rows();
        let headers: Vec<String> = if self.config.has_header {
            match rows.next() {
                Some(header_row) => header_row.iter().map(|c| c.to_string()).collect(),
                None => return Err(PlotsenseError::EmptyData("Worksheet is empty".to_string())),
            }
        } else {
            (0..range.width()).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(PlotsenseError::EmptyData("No columns found".to_string()));
        }

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let cells: Vec<Vec<RawCell>> = rows
            .take(limit)
            .map(|row| row.iter().map(spreadsheet_cell).collect())
            .collect();

        Ok(Table::from_cells(headers, cells))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a workbook cell onto a raw cell.
///
/// Whole floats are read back as integers, matching how workbook readers
/// surface integral numbers.
fn spreadsheet_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::Int(v) => RawCell::Int(*v),
        Data::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => RawCell::Int(*v as i64),
        Data::Float(v) => RawCell::Float(*v),
        Data::String(s) => RawCell::from_text(s),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(RawCell::DateTime)
            .unwrap_or_else(|| RawCell::Text(cell.to_string())),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(PlotsenseError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Tab gets a slight bonus as it rarely appears inside values
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
