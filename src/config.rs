use crate::error::{LifemapError, Result};
use crate::ingest::csv::ParseMode;
use crate::ingest::normalize::SchemaProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Config file name, searched upward from the working directory.
pub const CONFIG_FILE: &str = ".lifemap.toml";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifemapConfig {
    #[serde(default)]
    pub sources: SourceSettings,

    #[serde(default)]
    pub ingest: IngestSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceSettings {
    /// CSV source for the challenge roadmap dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roadmap_url: Option<String>,

    /// CSV source for the book recommendation dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSettings {
    #[serde(default = "default_profile")]
    pub profile: String,

    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_profile() -> String {
    "standard".to_string()
}

fn default_parse_mode() -> String {
    "lenient".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            parse_mode: default_parse_mode(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LifemapConfig {
    /// Load the nearest config file, or defaults when none exists.
    ///
    /// A missing file is not an error: sources may be supplied entirely via
    /// flags or environment variables. A file that exists but fails to parse
    /// is an error.
    pub fn load(start_path: &Path) -> Result<Self> {
        match Self::find_config_file(start_path) {
            Some(config_path) => {
                let content = std::fs::read_to_string(&config_path)?;
                let config: LifemapConfig = toml::from_str(&content)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Values supplied on the command line (clap also fills these from the
/// `LIFEMAP_*` environment variables).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub roadmap_url: Option<String>,
    pub books_url: Option<String>,
    pub profile: Option<SchemaProfile>,
    pub strict_parse: bool,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved ingestion settings.
///
/// Precedence: flags > environment > config file > defaults. Resolution
/// validates eagerly: a source URL that is present but malformed is a
/// configuration error here, before any network call. A missing URL is not —
/// whether that is fatal depends on the view (see `require_roadmap`).
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub roadmap_url: Option<Url>,
    pub books_url: Option<Url>,
    pub profile: SchemaProfile,
    pub parse_mode: ParseMode,
    pub timeout: Duration,
}

impl IngestConfig {
    pub fn resolve(overrides: ConfigOverrides, file: &LifemapConfig) -> Result<Self> {
        let profile = match overrides.profile {
            Some(p) => p,
            None => file.ingest.profile.parse()?,
        };

        let parse_mode = if overrides.strict_parse {
            ParseMode::Strict
        } else {
            file.ingest.parse_mode.parse()?
        };

        let timeout_secs = overrides
            .timeout_secs
            .unwrap_or(file.ingest.timeout_secs);

        let roadmap_url = resolve_url(
            "roadmap",
            overrides
                .roadmap_url
                .or_else(|| file.sources.roadmap_url.clone()),
        )?;
        let books_url = resolve_url(
            "books",
            overrides
                .books_url
                .or_else(|| file.sources.books_url.clone()),
        )?;

        Ok(Self {
            roadmap_url,
            books_url,
            profile,
            parse_mode,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn require_roadmap(&self) -> Result<&Url> {
        self.roadmap_url.as_ref().ok_or_else(|| {
            LifemapError::Config(
                "roadmap source URL is not set (use --roadmap-url, LIFEMAP_ROADMAP_URL, \
                 or sources.roadmap_url in .lifemap.toml)"
                    .to_string(),
            )
        })
    }

    pub fn require_books(&self) -> Result<&Url> {
        self.books_url.as_ref().ok_or_else(|| {
            LifemapError::Config(
                "books source URL is not set (use --books-url, LIFEMAP_BOOKS_URL, \
                 or sources.books_url in .lifemap.toml)"
                    .to_string(),
            )
        })
    }
}

/// Empty and blank values count as unset; set values must be http(s) URLs.
fn resolve_url(name: &str, raw: Option<String>) -> Result<Option<Url>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(raw)
        .map_err(|e| LifemapError::Config(format!("Invalid {} source URL '{}': {}", name, raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(Some(url)),
        other => Err(LifemapError::Config(format!(
            "Unsupported scheme '{}' in {} source URL (expected http or https)",
            other, name
        ))),
    }
}
