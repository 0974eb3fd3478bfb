//! Dataset ingestion: fetch, decode, normalize.
//!
//! Entry points for the views:
//!
//! - [`load_timeline`]: both datasets fetched concurrently, merged into one
//!   sorted timeline. Both source URLs must be configured; missing config
//!   fails before any network call.
//! - [`load_categories`]: the grouped-by-category view. A source with no
//!   configured URL degrades to empty data plus a banner note instead.
//! - [`load_roadmap`] / [`load_books`]: single-dataset pipelines.

pub mod csv;
pub mod fetch;
pub mod normalize;

use tracing::{info, warn};

use crate::config::IngestConfig;
use crate::error::Result;
use crate::model::{
    Book, CategoryGroup, Challenge, TimelineItem, group_by_category, merge_timeline,
};

use csv::parse_table;

pub use csv::{ParseMode, RowError};
pub use fetch::Fetcher;
pub use normalize::{Ingested, SchemaProfile};

/// Fetch and normalize the roadmap dataset.
pub async fn load_roadmap(fetcher: &Fetcher, config: &IngestConfig) -> Result<Ingested<Challenge>> {
    let url = config.require_roadmap()?;
    let text = fetcher.fetch_csv("roadmap", url).await?;
    let table = parse_table(&text, config.parse_mode)?;
    let ingested = normalize::challenges(table, config.profile)?;
    report("roadmap", &ingested);
    Ok(ingested)
}

/// Fetch and normalize the books dataset.
pub async fn load_books(fetcher: &Fetcher, config: &IngestConfig) -> Result<Ingested<Book>> {
    let url = config.require_books()?;
    let text = fetcher.fetch_csv("books", url).await?;
    let table = parse_table(&text, config.parse_mode)?;
    let ingested = normalize::books(table, config.profile)?;
    report("books", &ingested);
    Ok(ingested)
}

fn report<T>(source: &str, ingested: &Ingested<T>) {
    for row in &ingested.skipped {
        warn!(source, "skipped row: {}", row);
    }
    info!(
        source,
        rows_read = ingested.rows_read,
        records = ingested.records.len(),
        skipped = ingested.skipped.len(),
        "dataset loaded"
    );
}

/// The merged timeline plus load accounting for summary lines.
#[derive(Debug, Clone)]
pub struct TimelineData {
    pub items: Vec<TimelineItem>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// Load both datasets concurrently and merge them into the sorted timeline.
pub async fn load_timeline(config: &IngestConfig) -> Result<TimelineData> {
    // Validate both URLs up front: a missing one must fail before either
    // fetch starts, not race it.
    config.require_roadmap()?;
    config.require_books()?;

    let fetcher = Fetcher::new(config.timeout)?;
    let (roadmap, books) = tokio::try_join!(
        load_roadmap(&fetcher, config),
        load_books(&fetcher, config)
    )?;

    let rows_read = roadmap.rows_read + books.rows_read;
    let rows_skipped = roadmap.skipped.len() + books.skipped.len();
    let items = merge_timeline(roadmap.records, books.records);

    Ok(TimelineData {
        items,
        rows_read,
        rows_skipped,
    })
}

/// The grouped view plus which sources were skipped as unconfigured.
#[derive(Debug, Clone)]
pub struct CategoryData {
    pub groups: Vec<CategoryGroup>,
    pub missing_sources: Vec<String>,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

impl CategoryData {
    pub fn degraded(&self) -> bool {
        !self.missing_sources.is_empty()
    }
}

/// Load the grouped-by-category view.
///
/// A source with no configured URL contributes no records and its name lands
/// in `missing_sources` so the view can show a banner. Configured sources
/// that fail to fetch or parse still fail the load.
pub async fn load_categories(config: &IngestConfig) -> Result<CategoryData> {
    let fetcher = Fetcher::new(config.timeout)?;
    let (roadmap, books) = tokio::try_join!(
        load_roadmap_or_empty(&fetcher, config),
        load_books_or_empty(&fetcher, config)
    )?;

    let mut data = CategoryData {
        groups: Vec::new(),
        missing_sources: Vec::new(),
        rows_read: 0,
        rows_skipped: 0,
    };
    let challenges = unpack("roadmap", roadmap, &mut data);
    let books = unpack("books", books, &mut data);
    data.groups = group_by_category(challenges, books);
    Ok(data)
}

async fn load_roadmap_or_empty(
    fetcher: &Fetcher,
    config: &IngestConfig,
) -> Result<Option<Ingested<Challenge>>> {
    if config.roadmap_url.is_none() {
        warn!("roadmap source URL is not set; continuing with empty data");
        return Ok(None);
    }
    load_roadmap(fetcher, config).await.map(Some)
}

async fn load_books_or_empty(
    fetcher: &Fetcher,
    config: &IngestConfig,
) -> Result<Option<Ingested<Book>>> {
    if config.books_url.is_none() {
        warn!("books source URL is not set; continuing with empty data");
        return Ok(None);
    }
    load_books(fetcher, config).await.map(Some)
}

fn unpack<T>(source: &str, loaded: Option<Ingested<T>>, data: &mut CategoryData) -> Vec<T> {
    match loaded {
        Some(ingested) => {
            data.rows_read += ingested.rows_read;
            data.rows_skipped += ingested.skipped.len();
            ingested.records
        }
        None => {
            data.missing_sources.push(source.to_string());
            Vec::new()
        }
    }
}
