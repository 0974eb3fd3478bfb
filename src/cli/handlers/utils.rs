use colored::{ColoredString, Colorize};

use crate::model::{Book, CategoryGroup, Challenge, ItemKind, Priority, Status, TimelineItem};

/// Color a status label by its canonical status, keeping the sheet's text.
pub fn format_status(label: &str) -> ColoredString {
    let shown = if label.is_empty() { "-" } else { label };
    match Status::from_label(label) {
        Status::InProgress => shown.yellow(),
        Status::Planned => shown.white(),
        Status::Done => shown.green(),
        Status::Other => shown.dimmed(),
    }
}

pub fn format_priority(label: &str) -> ColoredString {
    let shown = if label.is_empty() { "-" } else { label };
    match Priority::from_label(label) {
        Priority::High => shown.red(),
        Priority::Medium => shown.white(),
        Priority::Low => shown.dimmed(),
        Priority::Other => shown.dimmed(),
    }
}

pub fn format_kind(kind: ItemKind) -> ColoredString {
    match kind {
        ItemKind::Challenge => "challenge".blue(),
        ItemKind::Book => "book".magenta(),
    }
}

pub fn print_timeline(items: &[TimelineItem]) {
    if items.is_empty() {
        println!("No timeline items found.");
        return;
    }

    for item in items {
        println!(
            "{} {} [{}] {} ({})",
            item.id.cyan(),
            format_status(&item.status),
            format_kind(item.kind),
            item.title,
            format_priority(&item.priority)
        );

        if let Some(detail) = item_detail(item) {
            println!("    {}", detail.dimmed());
        }
        if !item.tags.is_empty() {
            println!("    {}", item.tags.join(", ").magenta());
        }
    }
}

/// Second line of a timeline entry: dates, plus author/pages for books and
/// the timeframe for challenges. Empty when nothing is known.
fn item_detail(item: &TimelineItem) -> Option<String> {
    let mut parts = Vec::new();

    match (item.start_date, item.end_date) {
        (Some(start), Some(end)) => parts.push(format!("{} → {}", start, end)),
        (Some(start), None) => parts.push(format!("{} →", start)),
        (None, Some(end)) => parts.push(format!("→ {}", end)),
        (None, None) => {}
    }
    if let Some(ref timeframe) = item.timeframe {
        parts.push(timeframe.clone());
    }
    if let Some(ref author) = item.author {
        parts.push(format!("by {}", author));
    }
    if let Some(pages) = item.pages {
        parts.push(format!("{} pages", pages));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

pub fn print_categories(groups: &[CategoryGroup]) {
    if groups.is_empty() {
        println!("No data found.");
        return;
    }

    for group in groups {
        let name = if group.category.is_empty() {
            "(uncategorized)"
        } else {
            &group.category
        };
        println!("{}", name.bold());

        for challenge in &group.challenges {
            print_challenge_line(challenge);
        }
        if !group.books.is_empty() {
            println!("  {}", "Recommended books:".dimmed());
            for book in &group.books {
                print_book_line(book);
            }
        }
        println!();
    }
}

fn print_challenge_line(challenge: &Challenge) {
    println!(
        "  - {} {} {}",
        challenge.id.cyan(),
        format_status(&challenge.status),
        challenge.title
    );
}

fn print_book_line(book: &Book) {
    if book.author.is_empty() {
        println!("    - {} {}", book.id.cyan(), book.title);
    } else {
        println!(
            "    - {} {} {}",
            book.id.cyan(),
            book.title,
            format!("by {}", book.author).dimmed()
        );
    }
}
