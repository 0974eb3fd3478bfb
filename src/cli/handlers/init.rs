use anyhow::Result;
use colored::Colorize;

use crate::config::{CONFIG_FILE, ConfigOverrides, LifemapConfig, SourceSettings};

pub fn handle_init(overrides: ConfigOverrides) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE);

    if config_path.exists() {
        anyhow::bail!("Already initialized at {}", config_path.display());
    }

    // Source URLs given on the command line (or via LIFEMAP_*_URL) are
    // recorded in the new file.
    let config = LifemapConfig {
        sources: SourceSettings {
            roadmap_url: overrides.roadmap_url,
            books_url: overrides.books_url,
        },
        ..Default::default()
    };
    config.save(&config_path)?;

    println!(
        "{} lifemap project in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config: {}", config_path.display());
    if config.sources.roadmap_url.is_none() || config.sources.books_url.is_none() {
        println!(
            "  Next:   set sources.roadmap_url and sources.books_url, or export \
             LIFEMAP_ROADMAP_URL / LIFEMAP_BOOKS_URL"
        );
    }
    Ok(())
}
