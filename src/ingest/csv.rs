//! CSV decoding.
//!
//! Turns raw CSV text into a [`CsvTable`]: positionally-indexed records plus
//! a name-to-index header map, so the normalization layer can read cells by
//! column name regardless of column order.

use csv::{Position, StringRecord};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::{LifemapError, Result};

/// How malformed rows are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Keep rows best-effort: a row with too few or too many fields is
    /// warned about and kept, with missing cells reading as empty. Only
    /// rows that fail to decode at all are skipped, as [`RowError`]s.
    #[default]
    Lenient,
    /// Abort the dataset load on the first malformed row.
    Strict,
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMode::Lenient => write!(f, "lenient"),
            ParseMode::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ParseMode {
    type Err = LifemapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(ParseMode::Lenient),
            "strict" => Ok(ParseMode::Strict),
            _ => Err(LifemapError::Config(format!(
                "Invalid parse mode: {} (expected 'lenient' or 'strict')",
                s
            ))),
        }
    }
}

/// A row that could not be used, with its 1-based source line.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "line {} (id {}): {}", self.line, id, self.message),
            None => write!(f, "line {}: {}", self.line, self.message),
        }
    }
}

/// One data row with the 1-based source line it starts on.
#[derive(Debug, Clone)]
pub struct CsvRow {
    pub line: usize,
    pub record: StringRecord,
}

/// Decoded CSV: data rows plus a lowercase header map.
#[derive(Debug, Clone)]
pub struct CsvTable {
    header_map: HashMap<String, usize>,
    pub mode: ParseMode,
    pub rows: Vec<CsvRow>,
    /// Rows that failed to decode (always empty in strict mode).
    pub errors: Vec<RowError>,
}

impl CsvTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.header_map.contains_key(name)
    }

    /// Cell value by column name, trimmed. A missing column or missing cell
    /// reads as empty so callers apply defaults uniformly.
    pub fn field<'a>(&self, record: &'a StringRecord, name: &str) -> &'a str {
        self.header_map
            .get(name)
            .and_then(|idx| record.get(*idx))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// Decode CSV text into a [`CsvTable`].
///
/// A row is malformed when it does not decode or its field count differs
/// from the header row's. Lenient mode keeps rows with a mismatched field
/// count (missing cells read as empty, extra cells are ignored) and only
/// skips rows that do not decode; strict mode fails on the first problem
/// of either kind.
pub fn parse_table(text: &str, mode: ParseMode) -> Result<CsvTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LifemapError::Parse(format!("Failed to read CSV header row: {}", e)))?
        .clone();

    let header_map = build_header_map(&headers);
    let width = headers.len();

    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for result in reader.records() {
        match result {
            Ok(record) => {
                let line = record_line(record.position());
                if record.len() != width {
                    match mode {
                        ParseMode::Lenient => warn!(
                            line,
                            "row has {} fields where the header has {}; missing cells read as empty",
                            record.len(),
                            width
                        ),
                        ParseMode::Strict => {
                            return Err(LifemapError::Parse(format!(
                                "Malformed CSV row at line {}: expected {} fields, found {}",
                                line,
                                width,
                                record.len()
                            )));
                        }
                    }
                }
                rows.push(CsvRow { line, record });
            }
            Err(e) => {
                let line = record_line(e.position());
                match mode {
                    ParseMode::Lenient => errors.push(RowError {
                        line,
                        id: None,
                        message: format!("unreadable row: {}", e),
                    }),
                    ParseMode::Strict => {
                        return Err(LifemapError::Parse(format!(
                            "Malformed CSV row at line {}: {}",
                            line, e
                        )));
                    }
                }
            }
        }
    }

    Ok(CsvTable {
        header_map,
        mode,
        rows,
        errors,
    })
}

/// Line number from the reader's position; blank lines and quoted newlines
/// shift records, so counting rows is not enough.
fn record_line(position: Option<&Position>) -> usize {
    position.map(|p| p.line() as usize).unwrap_or(0)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header(name), idx))
        .collect()
}

fn normalize_header(name: &str) -> String {
    // Sheets exported from Excel may carry a UTF-8 BOM on the first header;
    // strip it or column lookups miss.
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}
