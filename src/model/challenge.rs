use serde::{Deserialize, Serialize};

/// One roadmap entry: a planned life goal or task with a time window.
///
/// Fields arrive already normalized (trimmed, defaulted). Dates and tags keep
/// their raw string form so the record serializes unchanged; calendar parsing
/// and tag splitting happen when the record is mapped into a
/// [`TimelineItem`](super::TimelineItem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub category: String,
    pub difficulty: u8,
    pub timeframe: String,
    pub priority: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub tags: String,
}
