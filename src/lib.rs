//! # lifemap — a CSV-fed timeline for life challenges and reading plans
//!
//! Lifemap pulls two CSV datasets over HTTP — a roadmap of life challenges
//! and a list of recommended books — normalizes them, and merges them into
//! one sorted timeline. All data is refetched on every invocation; nothing
//! is stored locally except the config file.
//!
//! ## Features
//!
//! - **Merged timeline**: challenges and books ordered by status, priority,
//!   and start date, filterable by category and status
//! - **Category view**: challenges grouped by category with their
//!   recommended books
//! - **Web view**: a single-page axum server rendering the timeline
//! - **Lenient by default**: malformed rows are skipped and reported, not
//!   fatal; `--strict-parse` makes them fatal
//!
//! ## Quick Start
//!
//! ```bash
//! # Record the CSV source URLs in .lifemap.toml
//! lifemap init --roadmap-url https://example.com/roadmap.csv \
//!              --books-url https://example.com/books.csv
//!
//! # Show the merged timeline
//! lifemap timeline
//!
//! # Only in-progress health items
//! lifemap timeline --category health --status in-progress
//!
//! # Challenges grouped by category, with book recommendations
//! lifemap categories
//!
//! # Serve the timeline as a web page
//! lifemap serve --port 4000
//!
//! # Check configuration and source reachability
//! lifemap doctor
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration loading and resolution
//! - [`error`]: Error types and result aliases
//! - [`ingest`]: The fetch → parse → normalize pipeline
//! - [`model`]: Data models (Challenge, Book, TimelineItem, etc.)
//! - [`web`]: The axum web view

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and resolution.
///
/// Handles `.lifemap.toml` files, environment variables, and CLI overrides.
pub mod config;

/// Error types and result aliases.
///
/// Defines the `LifemapError` enum and `Result<T>` type alias.
pub mod error;

/// The ingestion pipeline: HTTP fetch, CSV decode, row normalization.
pub mod ingest;

/// Data models: records, the merged timeline, label domains.
pub mod model;

/// The axum web view of the timeline.
pub mod web;

pub mod logging;
