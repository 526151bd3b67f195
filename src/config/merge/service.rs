//! MergeService: orchestrates sources, applies merge policy, deserializes to JsonTreeConfig.

use super::policy;
use crate::config::sources::{environment, global_file};
use crate::config::JsonTreeConfig;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<JsonTreeConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder);
        let builder = environment::add_to_builder(builder);

        let config: JsonTreeConfig = builder.build()?.try_deserialize()?;
        debug!(algorithm = %config.tree.algorithm, "Loaded configuration");
        Ok(config)
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<JsonTreeConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path));
        let builder = environment::add_to_builder(builder);

        let config: JsonTreeConfig = builder.build()?.try_deserialize()?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }
}
