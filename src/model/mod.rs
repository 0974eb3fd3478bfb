//! Data models for lifemap.
//!
//! This module defines the core data structures:
//!
//! - [`Challenge`]: A life challenge from the roadmap sheet
//! - [`Book`]: A recommended book from the books sheet
//! - [`TimelineItem`]: The merged, kind-discriminated view of either
//! - [`CategoryGroup`]: Challenges and books bucketed by category
//! - [`Priority`] / [`Status`]: Label classification and sort weights

mod book;
mod challenge;
mod timeline;
mod types;

pub use book::Book;
pub use challenge::Challenge;
pub use timeline::{
    CategoryGroup, TimelineFilter, TimelineItem, categories, group_by_category, merge_timeline,
    parse_date, parse_tags, statuses,
};
pub use types::{ItemKind, Priority, Status};
