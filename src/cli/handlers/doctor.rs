use anyhow::Result;
use colored::Colorize;
use url::Url;

use crate::config::{CONFIG_FILE, ConfigOverrides, IngestConfig, LifemapConfig};
use crate::ingest::{Fetcher, load_books, load_roadmap};

#[derive(Default)]
struct DiagnosticResults {
    passed: usize,
    warnings: usize,
    errors: usize,
}

impl DiagnosticResults {
    fn pass(&mut self, message: &str) {
        self.passed += 1;
        println!("  {} {}", "✓".green(), message);
    }

    fn warn(&mut self, message: &str) {
        self.warnings += 1;
        println!("  {} {}", "!".yellow(), message);
    }

    fn error(&mut self, message: &str) {
        self.errors += 1;
        println!("  {} {}", "✗".red(), message);
    }

    fn suggestion(&self, message: &str) {
        println!("    {} {}", "→".cyan(), message);
    }
}

pub fn handle_doctor(overrides: ConfigOverrides) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut results = DiagnosticResults::default();

    println!("{}", "lifemap doctor".bold());
    println!("{}", "═".repeat(60));
    println!();

    // Check 1: Config file
    println!("{}", "Configuration".bold());
    match LifemapConfig::find_config_file(&cwd) {
        Some(path) => results.pass(&format!("Config file: {}", path.display())),
        None => {
            results.warn(&format!("No {} found", CONFIG_FILE));
            results.suggestion("Run `lifemap init`, or rely on flags and LIFEMAP_* env vars");
        }
    }

    let config = match LifemapConfig::load(&cwd) {
        Ok(config) => config,
        Err(e) => {
            results.error(&format!("Config file does not load: {}", e));
            finish(&results);
            return Ok(());
        }
    };

    // Check 2: Resolution (flags > env > file > defaults)
    let ingest = match IngestConfig::resolve(overrides, &config) {
        Ok(ingest) => {
            results.pass(&format!(
                "Settings resolve: profile {}, {} parsing, {}s timeout",
                ingest.profile,
                ingest.parse_mode,
                ingest.timeout.as_secs()
            ));
            ingest
        }
        Err(e) => {
            results.error(&format!("{}", e));
            finish(&results);
            return Ok(());
        }
    };

    // Check 3: Sources
    println!();
    println!("{}", "Sources".bold());
    check_source_set(&mut results, "roadmap", ingest.roadmap_url.as_ref());
    check_source_set(&mut results, "books", ingest.books_url.as_ref());

    // Check 4: Reachability, only for configured sources
    if ingest.roadmap_url.is_some() || ingest.books_url.is_some() {
        println!();
        println!("{}", "Reachability".bold());
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(check_reachability(&mut results, &ingest));
    }

    finish(&results);
    Ok(())
}

fn check_source_set(results: &mut DiagnosticResults, name: &str, url: Option<&Url>) {
    match url {
        Some(url) => results.pass(&format!("{} URL set: {}", name, url)),
        None => {
            results.warn(&format!("{} URL is not set", name));
            results.suggestion(&format!(
                "timeline needs it; categories degrades to a banner without the {} data",
                name
            ));
        }
    }
}

async fn check_reachability(results: &mut DiagnosticResults, ingest: &IngestConfig) {
    let fetcher = match Fetcher::new(ingest.timeout) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            results.error(&format!("{}", e));
            return;
        }
    };

    if ingest.roadmap_url.is_some() {
        match load_roadmap(&fetcher, ingest).await {
            Ok(ingested) => results.pass(&format!(
                "roadmap: {} records ({} rows skipped)",
                ingested.records.len(),
                ingested.skipped.len()
            )),
            Err(e) => results.error(&format!("roadmap: {}", e)),
        }
    }
    if ingest.books_url.is_some() {
        match load_books(&fetcher, ingest).await {
            Ok(ingested) => results.pass(&format!(
                "books: {} records ({} rows skipped)",
                ingested.records.len(),
                ingested.skipped.len()
            )),
            Err(e) => results.error(&format!("books: {}", e)),
        }
    }
}

fn finish(results: &DiagnosticResults) {
    println!();
    println!("{}", "═".repeat(60));

    let summary = format!(
        "{} passed, {} warnings, {} errors",
        results.passed, results.warnings, results.errors
    );
    if results.errors > 0 {
        println!("{}", summary.red());
    } else if results.warnings > 0 {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary.green());
    }
}
