use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::ingest::SchemaProfile;
use crate::model::ItemKind;

#[derive(Parser)]
#[command(name = "lifemap")]
#[command(
    author,
    version,
    about = "A CLI timeline for life challenges and reading plans, fed by CSV over HTTP"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Roadmap CSV source URL (overrides .lifemap.toml)
    #[arg(long, global = true, env = "LIFEMAP_ROADMAP_URL")]
    pub roadmap_url: Option<String>,

    /// Books CSV source URL (overrides .lifemap.toml)
    #[arg(long, global = true, env = "LIFEMAP_BOOKS_URL")]
    pub books_url: Option<String>,

    /// Sheet column layout
    #[arg(long, global = true, value_enum, env = "LIFEMAP_PROFILE")]
    pub profile: Option<ProfileArg>,

    /// Fail the whole load on the first malformed CSV row
    #[arg(long, global = true)]
    pub strict_parse: bool,

    /// HTTP timeout in seconds
    #[arg(long, global = true, env = "LIFEMAP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (daily rotation)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            roadmap_url: self.roadmap_url.clone(),
            books_url: self.books_url.clone(),
            profile: self.profile.map(Into::into),
            strict_parse: self.strict_parse,
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter .lifemap.toml in the current directory
    Init,

    /// Show the merged challenge and book timeline
    #[command(visible_alias = "tl")]
    Timeline {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by status label ("done" also matches 完了/読了)
        #[arg(short, long)]
        status: Option<String>,

        /// Filter by item kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Group challenges by category with their recommended books
    #[command(visible_alias = "cat")]
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the timeline as a web page
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 4000)]
        port: u16,
    },

    /// Check configuration and source reachability
    Doctor,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    Standard,
    Compact,
}

impl From<ProfileArg> for SchemaProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Standard => SchemaProfile::Standard,
            ProfileArg::Compact => SchemaProfile::Compact,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Challenge,
    Book,
}

impl From<KindArg> for ItemKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Challenge => ItemKind::Challenge,
            KindArg::Book => ItemKind::Book,
        }
    }
}
