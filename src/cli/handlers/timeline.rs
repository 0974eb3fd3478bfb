use anyhow::Result;
use colored::Colorize;

use crate::cli::commands::KindArg;
use crate::ingest::load_timeline;
use crate::model::TimelineFilter;

use super::CommandContext;
use super::utils::print_timeline;

/// Parameters for the timeline view
pub struct TimelineParams {
    pub category: Option<String>,
    pub status: Option<String>,
    pub kind: Option<KindArg>,
    pub json: bool,
}

pub fn handle_timeline(ctx: &CommandContext, params: TimelineParams) -> Result<()> {
    let data = tokio::runtime::Runtime::new()?.block_on(load_timeline(&ctx.ingest))?;

    let mut items = data.items;
    TimelineFilter {
        category: params.category,
        status: params.status,
    }
    .apply(&mut items);
    if let Some(kind) = params.kind {
        let kind: crate::model::ItemKind = kind.into();
        items.retain(|item| item.kind == kind);
    }

    if params.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    print_timeline(&items);
    if data.rows_skipped > 0 {
        println!(
            "\n{} {} of {} rows skipped (rerun with --verbose for details)",
            "!".yellow(),
            data.rows_skipped,
            data.rows_read
        );
    }
    Ok(())
}
