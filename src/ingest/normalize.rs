//! Row normalization.
//!
//! Maps decoded CSV rows onto [`Challenge`] and [`Book`] records under a
//! [`SchemaProfile`]. Every field is trimmed; missing cells become empty
//! strings and unparseable numbers become zero, so a loaded record never
//! carries surprises into the views. Rows without an `id` or `title` are
//! unusable and are dropped with a diagnostic.

use csv::StringRecord;
use std::fmt;
use std::str::FromStr;

use super::csv::{CsvTable, ParseMode, RowError};
use crate::error::{LifemapError, Result};
use crate::model::{Book, Challenge};

/// Which column layout the source sheets use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaProfile {
    /// Full project sheets: workflow columns (difficulty, priority, status,
    /// tags) and snake_case date columns.
    #[default]
    Standard,
    /// Trimmed starter sheets: camelCase date columns, no workflow columns.
    Compact,
}

impl fmt::Display for SchemaProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaProfile::Standard => write!(f, "standard"),
            SchemaProfile::Compact => write!(f, "compact"),
        }
    }
}

impl FromStr for SchemaProfile {
    type Err = LifemapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(SchemaProfile::Standard),
            "compact" => Ok(SchemaProfile::Compact),
            _ => Err(LifemapError::Config(format!(
                "Invalid schema profile: {} (expected 'standard' or 'compact')",
                s
            ))),
        }
    }
}

/// Columns every usable sheet must declare, in either profile.
const REQUIRED_COLUMNS: [&str; 2] = ["id", "title"];

/// Normalization output: the usable records plus what was left behind.
#[derive(Debug, Clone)]
pub struct Ingested<T> {
    pub records: Vec<T>,
    pub rows_read: usize,
    /// Malformed rows from decode plus rows dropped here, in line order.
    pub skipped: Vec<RowError>,
}

/// Normalize a decoded roadmap table into challenges.
pub fn challenges(table: CsvTable, profile: SchemaProfile) -> Result<Ingested<Challenge>> {
    normalize(table, |table, record| challenge_from_row(table, record, profile))
}

/// Normalize a decoded books table into book records.
pub fn books(table: CsvTable, profile: SchemaProfile) -> Result<Ingested<Book>> {
    normalize(table, |table, record| book_from_row(table, record, profile))
}

trait SheetRecord {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
}

impl SheetRecord for Challenge {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
}

impl SheetRecord for Book {
    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
}

fn normalize<T, F>(table: CsvTable, from_row: F) -> Result<Ingested<T>>
where
    T: SheetRecord,
    F: Fn(&CsvTable, &StringRecord) -> T,
{
    // A body with no data rows is a valid empty dataset; only check the
    // schema once there is something to normalize.
    if table.rows.is_empty() {
        let rows_read = table.errors.len();
        return Ok(Ingested {
            records: Vec::new(),
            rows_read,
            skipped: table.errors,
        });
    }

    // A header without the identity columns fails outright in strict mode.
    // Lenient mode falls through to the per-row id check instead, which
    // drops every row with its own diagnostic.
    if table.mode == ParseMode::Strict {
        ensure_columns(&table, &REQUIRED_COLUMNS)?;
    }

    let rows_read = table.rows.len() + table.errors.len();
    let mut records = Vec::new();
    let mut dropped = Vec::new();

    for row in &table.rows {
        let record = from_row(&table, &row.record);
        if record.id().is_empty() {
            dropped.push(RowError {
                line: row.line,
                id: None,
                message: "missing id".to_string(),
            });
            continue;
        }
        if record.title().is_empty() {
            dropped.push(RowError {
                line: row.line,
                id: Some(record.id().to_string()),
                message: "missing title".to_string(),
            });
            continue;
        }
        records.push(record);
    }

    let mut skipped = table.errors;
    skipped.append(&mut dropped);
    skipped.sort_by_key(|e| e.line);

    Ok(Ingested {
        records,
        rows_read,
        skipped,
    })
}

fn ensure_columns(table: &CsvTable, columns: &[&str]) -> Result<()> {
    for name in columns {
        if !table.has_column(name) {
            return Err(LifemapError::Parse(format!(
                "Missing required column: {}",
                name
            )));
        }
    }
    Ok(())
}

fn challenge_from_row(table: &CsvTable, record: &StringRecord, profile: SchemaProfile) -> Challenge {
    match profile {
        SchemaProfile::Standard => Challenge {
            id: table.field(record, "id").to_string(),
            title: table.field(record, "title").to_string(),
            category: table.field(record, "category").to_string(),
            difficulty: coerce_u8(table.field(record, "difficulty")),
            timeframe: table.field(record, "timeframe").to_string(),
            priority: table.field(record, "priority").to_string(),
            description: table.field(record, "description").to_string(),
            start_date: table.field(record, "start_date").to_string(),
            end_date: table.field(record, "end_date").to_string(),
            status: table.field(record, "status").to_string(),
            tags: table.field(record, "tags").to_string(),
        },
        SchemaProfile::Compact => Challenge {
            id: table.field(record, "id").to_string(),
            title: table.field(record, "title").to_string(),
            category: table.field(record, "category").to_string(),
            difficulty: 0,
            timeframe: String::new(),
            priority: String::new(),
            description: table.field(record, "description").to_string(),
            start_date: table.field(record, "startdate").to_string(),
            end_date: table.field(record, "enddate").to_string(),
            status: String::new(),
            tags: String::new(),
        },
    }
}

fn book_from_row(table: &CsvTable, record: &StringRecord, profile: SchemaProfile) -> Book {
    match profile {
        SchemaProfile::Standard => Book {
            id: table.field(record, "id").to_string(),
            title: table.field(record, "title").to_string(),
            author: table.field(record, "author").to_string(),
            category: table.field(record, "category").to_string(),
            difficulty: coerce_u8(table.field(record, "difficulty")),
            pages: coerce_u32(table.field(record, "pages")),
            estimated_reading_time: table.field(record, "estimated_reading_time").to_string(),
            priority: table.field(record, "priority").to_string(),
            description: table.field(record, "description").to_string(),
            status: table.field(record, "status").to_string(),
            start_date: table.field(record, "start_date").to_string(),
            end_date: table.field(record, "end_date").to_string(),
            tags: table.field(record, "tags").to_string(),
            url: None,
        },
        SchemaProfile::Compact => Book {
            id: table.field(record, "id").to_string(),
            title: table.field(record, "title").to_string(),
            author: table.field(record, "author").to_string(),
            category: table.field(record, "category").to_string(),
            difficulty: 0,
            pages: 0,
            estimated_reading_time: String::new(),
            priority: String::new(),
            description: String::new(),
            status: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            tags: String::new(),
            url: optional(table.field(record, "url")),
        },
    }
}

fn optional(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Parse-or-zero: unusable numeric cells coerce to 0, never an error.
fn coerce_u8(text: &str) -> u8 {
    text.parse().unwrap_or(0)
}

fn coerce_u32(text: &str) -> u32 {
    text.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::csv::{ParseMode, parse_table};

    const ROADMAP_STANDARD: &str = "\
id,title,category,difficulty,timeframe,priority,description,start_date,end_date,status,tags
1,Run a marathon,health,4,6 months,高,Train and finish,2024-01-15,2024-07-15,進行中,\"running, endurance\"
2,Read daily,learning,abc,,中,Thirty minutes,,,計画中,
";

    const ROADMAP_COMPACT: &str = "\
id,title,description,startDate,endDate,category
1,Run a marathon,Train and finish,2024-01-15,2024-07-15,health
";

    const BOOKS_STANDARD: &str = "\
id,title,author,category,difficulty,pages,estimated_reading_time,priority,description,status,start_date,end_date,tags
b1,Deep Work,Cal Newport,career,3,304,8 hours,高,Focused work,読書中,2024-02-01,,\"focus, habits\"
";

    const BOOKS_COMPACT: &str = "\
id,title,author,url,category
b1,Deep Work,Cal Newport,https://example.com/deep-work,career
";

    #[test]
    fn test_standard_roadmap_row_maps_all_fields() {
        let table = parse_table(ROADMAP_STANDARD, ParseMode::Lenient).unwrap();
        let ingested = challenges(table, SchemaProfile::Standard).unwrap();

        assert_eq!(ingested.records.len(), 2);
        let first = &ingested.records[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.title, "Run a marathon");
        assert_eq!(first.category, "health");
        assert_eq!(first.difficulty, 4);
        assert_eq!(first.priority, "高");
        assert_eq!(first.status, "進行中");
        assert_eq!(first.start_date, "2024-01-15");
        assert_eq!(first.tags, "running, endurance");
    }

    #[test]
    fn test_unparseable_numbers_coerce_to_zero() {
        let table = parse_table(ROADMAP_STANDARD, ParseMode::Lenient).unwrap();
        let ingested = challenges(table, SchemaProfile::Standard).unwrap();
        assert_eq!(ingested.records[1].difficulty, 0);
    }

    #[test]
    fn test_compact_roadmap_maps_camel_case_dates() {
        let table = parse_table(ROADMAP_COMPACT, ParseMode::Lenient).unwrap();
        let ingested = challenges(table, SchemaProfile::Compact).unwrap();

        let first = &ingested.records[0];
        assert_eq!(first.start_date, "2024-01-15");
        assert_eq!(first.end_date, "2024-07-15");
        assert_eq!(first.category, "health");
        assert_eq!(first.difficulty, 0);
        assert!(first.status.is_empty());
    }

    #[test]
    fn test_rows_without_id_or_title_are_dropped() {
        let text = "id,title\n,No id\n2,\n3,Kept\n";
        let table = parse_table(text, ParseMode::Lenient).unwrap();
        let ingested = challenges(table, SchemaProfile::Standard).unwrap();

        assert_eq!(ingested.records.len(), 1);
        assert_eq!(ingested.records[0].id, "3");
        assert_eq!(ingested.rows_read, 3);
        assert_eq!(ingested.skipped.len(), 2);
        assert_eq!(ingested.skipped[0].line, 2);
        assert_eq!(ingested.skipped[0].message, "missing id");
        assert_eq!(ingested.skipped[1].id.as_deref(), Some("2"));
        assert_eq!(ingested.skipped[1].message, "missing title");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let table = parse_table(ROADMAP_STANDARD, ParseMode::Lenient).unwrap();
        let first = challenges(table, SchemaProfile::Standard).unwrap().records;

        // Rebuild a CSV from the normalized records and run them through
        // again; nothing may change.
        let mut text = String::from(
            "id,title,category,difficulty,timeframe,priority,description,\
             start_date,end_date,status,tags\n",
        );
        for c in &first {
            text.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},\"{}\"\n",
                c.id,
                c.title,
                c.category,
                c.difficulty,
                c.timeframe,
                c.priority,
                c.description,
                c.start_date,
                c.end_date,
                c.status,
                c.tags
            ));
        }

        let table = parse_table(&text, ParseMode::Lenient).unwrap();
        let second = challenges(table, SchemaProfile::Standard).unwrap().records;
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_required_column_is_a_parse_error_in_strict_mode() {
        let table = parse_table("title,category\nRun,health\n", ParseMode::Strict).unwrap();
        let err = challenges(table, SchemaProfile::Standard).unwrap_err();
        assert!(matches!(err, LifemapError::Parse(_)));
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn test_missing_required_column_drops_rows_in_lenient_mode() {
        let table = parse_table("title,category\nRun,health\n", ParseMode::Lenient).unwrap();
        let ingested = challenges(table, SchemaProfile::Standard).unwrap();

        assert!(ingested.records.is_empty());
        assert_eq!(ingested.rows_read, 1);
        assert_eq!(ingested.skipped.len(), 1);
        assert_eq!(ingested.skipped[0].message, "missing id");
    }

    #[test]
    fn test_lenient_short_row_with_identity_survives() {
        let text = format!("{}c3,Short but identifiable\n", ROADMAP_STANDARD);
        let table = parse_table(&text, ParseMode::Lenient).unwrap();
        let ingested = challenges(table, SchemaProfile::Standard).unwrap();

        assert_eq!(ingested.records.len(), 3);
        let short = &ingested.records[2];
        assert_eq!(short.id, "c3");
        assert_eq!(short.title, "Short but identifiable");
        assert!(short.category.is_empty());
        assert_eq!(short.difficulty, 0);
        assert!(ingested.skipped.is_empty());
    }

    #[test]
    fn test_header_only_body_is_a_valid_empty_dataset() {
        let table = parse_table("id,title\n", ParseMode::Lenient).unwrap();
        let ingested = challenges(table, SchemaProfile::Standard).unwrap();
        assert!(ingested.records.is_empty());
        assert_eq!(ingested.rows_read, 0);
    }

    #[test]
    fn test_empty_body_skips_the_schema_check() {
        let table = parse_table("", ParseMode::Lenient).unwrap();
        let ingested = challenges(table, SchemaProfile::Standard).unwrap();
        assert!(ingested.records.is_empty());
    }

    #[test]
    fn test_standard_books_row_maps_numeric_fields() {
        let table = parse_table(BOOKS_STANDARD, ParseMode::Lenient).unwrap();
        let ingested = books(table, SchemaProfile::Standard).unwrap();

        let book = &ingested.records[0];
        assert_eq!(book.author, "Cal Newport");
        assert_eq!(book.pages, 304);
        assert_eq!(book.estimated_reading_time, "8 hours");
        assert_eq!(book.url, None);
    }

    #[test]
    fn test_compact_books_carry_a_url() {
        let table = parse_table(BOOKS_COMPACT, ParseMode::Lenient).unwrap();
        let ingested = books(table, SchemaProfile::Compact).unwrap();

        let book = &ingested.records[0];
        assert_eq!(
            book.url.as_deref(),
            Some("https://example.com/deep-work")
        );
        assert!(book.status.is_empty());
    }

    #[test]
    fn test_dropped_rows_carry_their_source_line() {
        let text = "id,title\n1,First,extra\n,NoId\n3,Third\n";
        let table = parse_table(text, ParseMode::Lenient).unwrap();
        let ingested = challenges(table, SchemaProfile::Standard).unwrap();

        // The long row keeps its usable cells; only the id-less row drops.
        assert_eq!(ingested.records.len(), 2);
        assert_eq!(ingested.records[0].id, "1");
        assert_eq!(ingested.skipped.len(), 1);
        assert_eq!(ingested.skipped[0].line, 3);
        assert_eq!(ingested.skipped[0].message, "missing id");
    }
}
