use anyhow::Result;
use colored::Colorize;

use crate::ingest::load_categories;

use super::CommandContext;
use super::utils::print_categories;

pub fn handle_categories(ctx: &CommandContext, json: bool) -> Result<()> {
    let data = tokio::runtime::Runtime::new()?.block_on(load_categories(&ctx.ingest))?;

    if json {
        let payload = serde_json::json!({
            "groups": data.groups,
            "missing_sources": data.missing_sources,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if data.degraded() {
        for source in &data.missing_sources {
            println!(
                "{} {} source is not configured; showing what is available",
                "!".yellow(),
                source
            );
        }
        println!();
    }

    print_categories(&data.groups);
    if data.rows_skipped > 0 {
        println!(
            "{} {} of {} rows skipped (rerun with --verbose for details)",
            "!".yellow(),
            data.rows_skipped,
            data.rows_read
        );
    }
    Ok(())
}
