use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminates the two record kinds in the merged timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Challenge,
    Book,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Challenge => write!(f, "challenge"),
            ItemKind::Book => write!(f, "book"),
        }
    }
}

/// Priority label domain. Source sheets use the Japanese labels; the English
/// aliases are accepted for hand-edited data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
    #[default]
    Other,
}

impl Priority {
    /// Total mapping: any unrecognized label is `Other`, never an error.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "高" | "high" => Priority::High,
            "中" | "medium" => Priority::Medium,
            "低" | "low" => Priority::Low,
            _ => Priority::Other,
        }
    }

    /// Sort weight; smaller sorts earlier.
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
            Priority::Other => 4,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
            Priority::Other => write!(f, "other"),
        }
    }
}

/// Status label domain. "Reading" is the book-flavored in-progress label and
/// shares its weight; "読了" (finished reading) counts as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[serde(rename = "in-progress")]
    InProgress,
    Planned,
    Done,
    #[default]
    Other,
}

impl Status {
    /// Total mapping: any unrecognized label is `Other`, never an error.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "進行中" | "読書中" | "in-progress" | "inprogress" | "in_progress" | "reading" => {
                Status::InProgress
            }
            "計画中" | "planned" => Status::Planned,
            "完了" | "読了" | "done" | "completed" => Status::Done,
            _ => Status::Other,
        }
    }

    /// Sort weight; smaller sorts earlier.
    pub fn weight(self) -> u8 {
        match self {
            Status::InProgress => 1,
            Status::Planned => 2,
            Status::Done => 3,
            Status::Other => 4,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InProgress => write!(f, "in-progress"),
            Status::Planned => write!(f, "planned"),
            Status::Done => write!(f, "done"),
            Status::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_weights_ordered() {
        assert_eq!(Priority::from_label("高").weight(), 1);
        assert_eq!(Priority::from_label("中").weight(), 2);
        assert_eq!(Priority::from_label("低").weight(), 3);
        assert_eq!(Priority::from_label("unknown").weight(), 4);

        assert!(Priority::from_label("高").weight() < Priority::from_label("中").weight());
        assert!(Priority::from_label("中").weight() < Priority::from_label("低").weight());
        assert!(Priority::from_label("低").weight() < Priority::from_label("unknown").weight());
    }

    #[test]
    fn test_priority_english_aliases() {
        assert_eq!(Priority::from_label("High"), Priority::High);
        assert_eq!(Priority::from_label(" medium "), Priority::Medium);
        assert_eq!(Priority::from_label("LOW"), Priority::Low);
    }

    #[test]
    fn test_status_weights() {
        assert_eq!(Status::from_label("進行中").weight(), 1);
        assert_eq!(Status::from_label("読書中").weight(), 1);
        assert_eq!(Status::from_label("計画中").weight(), 2);
        assert_eq!(Status::from_label("完了").weight(), 3);
        assert_eq!(Status::from_label("読了").weight(), 3);
        assert_eq!(Status::from_label("何か別の").weight(), 4);
    }

    #[test]
    fn test_status_english_aliases() {
        assert_eq!(Status::from_label("in-progress"), Status::InProgress);
        assert_eq!(Status::from_label("reading"), Status::InProgress);
        assert_eq!(Status::from_label("planned"), Status::Planned);
        assert_eq!(Status::from_label("done"), Status::Done);
        assert_eq!(Status::from_label("completed"), Status::Done);
    }

    #[test]
    fn test_empty_label_is_other() {
        assert_eq!(Priority::from_label(""), Priority::Other);
        assert_eq!(Status::from_label(""), Status::Other);
    }
}
