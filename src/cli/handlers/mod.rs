mod categories;
mod doctor;
mod init;
mod serve;
mod timeline;
mod utils;

pub use categories::handle_categories;
pub use doctor::handle_doctor;
pub use init::handle_init;
pub use serve::handle_serve;
pub use timeline::{TimelineParams, handle_timeline};

use crate::config::{ConfigOverrides, IngestConfig, LifemapConfig};
use crate::error::Result;

/// Common context passed to the data-loading command handlers
pub struct CommandContext {
    pub config: LifemapConfig,
    pub ingest: IngestConfig,
}

impl CommandContext {
    /// Load the nearest config file and resolve it with the CLI overrides.
    pub fn new(overrides: ConfigOverrides) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let config = LifemapConfig::load(&cwd)?;
        let ingest = IngestConfig::resolve(overrides, &config)?;
        Ok(Self { config, ingest })
    }
}
