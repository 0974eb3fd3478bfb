use serde::{Deserialize, Serialize};

/// One reading recommendation.
///
/// Same normalization contract as [`Challenge`](super::Challenge): strings
/// trimmed and defaulted, numbers coerced with a zero fallback, dates and
/// tags kept raw. `url` is only present in the compact sheet profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub difficulty: u8,
    pub pages: u32,
    pub estimated_reading_time: String,
    pub priority: String,
    pub description: String,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    pub tags: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
