use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::book::Book;
use super::challenge::Challenge;
use super::types::{ItemKind, Priority, Status};

/// Accepted calendar formats. The source sheets use ISO dates; the slash
/// form shows up in hand-edited exports.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date string, or `None` when it is empty or not a valid calendar
/// date. Never produces an invalid-but-present date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Split a comma-delimited tag string into trimmed, non-empty tags.
pub fn parse_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// The merged, kind-discriminated view of a challenge or book.
///
/// `author`, `pages`, and `url` are populated only for books, `timeframe`
/// only for challenges; empty source values become `None` so rendering can
/// skip them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: String,
    pub title: String,
    pub kind: ItemKind,
    pub category: String,
    pub difficulty: u8,
    pub priority: String,
    pub description: String,
    pub status: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl TimelineItem {
    pub fn priority_weight(&self) -> u8 {
        Priority::from_label(&self.priority).weight()
    }

    pub fn status_weight(&self) -> u8 {
        Status::from_label(&self.status).weight()
    }
}

impl From<Challenge> for TimelineItem {
    fn from(challenge: Challenge) -> Self {
        Self {
            id: challenge.id,
            title: challenge.title,
            kind: ItemKind::Challenge,
            category: challenge.category,
            difficulty: challenge.difficulty,
            priority: challenge.priority,
            description: challenge.description,
            status: challenge.status,
            start_date: parse_date(&challenge.start_date),
            end_date: parse_date(&challenge.end_date),
            tags: parse_tags(&challenge.tags),
            author: None,
            pages: None,
            timeframe: non_empty(challenge.timeframe),
            url: None,
        }
    }
}

impl From<Book> for TimelineItem {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            kind: ItemKind::Book,
            category: book.category,
            difficulty: book.difficulty,
            priority: book.priority,
            description: book.description,
            status: book.status,
            start_date: parse_date(&book.start_date),
            end_date: parse_date(&book.end_date),
            tags: parse_tags(&book.tags),
            author: non_empty(book.author),
            pages: if book.pages > 0 { Some(book.pages) } else { None },
            timeframe: None,
            url: book.url.and_then(non_empty),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Merge challenges and books into one ordered timeline.
///
/// Order: ascending status weight, then priority weight, then start date,
/// where a known start date sorts before an unknown one. Remaining ties keep
/// input order (challenges before books, each in source order) — the
/// comparator returns `Equal` for them and `sort_by` is stable.
pub fn merge_timeline(challenges: Vec<Challenge>, books: Vec<Book>) -> Vec<TimelineItem> {
    let mut items: Vec<TimelineItem> = challenges
        .into_iter()
        .map(TimelineItem::from)
        .chain(books.into_iter().map(TimelineItem::from))
        .collect();
    items.sort_by(compare_items);
    items
}

fn compare_items(a: &TimelineItem, b: &TimelineItem) -> Ordering {
    a.status_weight()
        .cmp(&b.status_weight())
        .then_with(|| a.priority_weight().cmp(&b.priority_weight()))
        .then_with(|| compare_start_dates(a.start_date, b.start_date))
}

fn compare_start_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Unique categories in first-seen order, for filter menus.
pub fn categories(items: &[TimelineItem]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item.category) {
            out.push(item.category.clone());
        }
    }
    out
}

/// Unique status labels in first-seen order, for filter menus.
pub fn statuses(items: &[TimelineItem]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.contains(&item.status) {
            out.push(item.status.clone());
        }
    }
    out
}

/// Independent, optional filters for the timeline view. An absent or blank
/// value means "all" (web forms submit blank for the default option).
#[derive(Debug, Clone, Default)]
pub struct TimelineFilter {
    pub category: Option<String>,
    pub status: Option<String>,
}

impl TimelineFilter {
    pub fn matches(&self, item: &TimelineItem) -> bool {
        let category_ok = self.category.as_deref().map(str::trim).is_none_or(|c| {
            c.is_empty() || item.category.eq_ignore_ascii_case(c)
        });
        let status_ok = self.status.as_deref().map(str::trim).is_none_or(|s| {
            s.is_empty() || status_matches(&item.status, s)
        });
        category_ok && status_ok
    }

    pub fn apply(&self, items: &mut Vec<TimelineItem>) {
        items.retain(|item| self.matches(item));
    }
}

/// A status filter matches on the raw label, or on the canonical status when
/// the requested label parses to one ("done" also matches "完了").
fn status_matches(label: &str, wanted: &str) -> bool {
    let wanted = wanted.trim();
    if label.eq_ignore_ascii_case(wanted) {
        return true;
    }
    let parsed = Status::from_label(wanted);
    parsed != Status::Other && parsed == Status::from_label(label)
}

/// One bucket of the grouped-by-category view: the category's challenges
/// plus its recommended books.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub challenges: Vec<Challenge>,
    pub books: Vec<Book>,
}

/// Group records by category, categories in first-seen order (challenges
/// scanned first), records in source order within each group.
pub fn group_by_category(challenges: Vec<Challenge>, books: Vec<Book>) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for challenge in challenges {
        find_or_insert(&mut groups, &challenge.category)
            .challenges
            .push(challenge);
    }
    for book in books {
        find_or_insert(&mut groups, &book.category).books.push(book);
    }

    groups
}

fn find_or_insert<'a>(groups: &'a mut Vec<CategoryGroup>, category: &str) -> &'a mut CategoryGroup {
    let pos = match groups.iter().position(|g| g.category == category) {
        Some(pos) => pos,
        None => {
            groups.push(CategoryGroup {
                category: category.to_string(),
                challenges: Vec::new(),
                books: Vec::new(),
            });
            groups.len() - 1
        }
    };
    &mut groups[pos]
}
