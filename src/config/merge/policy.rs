//! Built-in defaults every merge starts from.

use crate::tree::{DigestAlgorithm, ROOT_LABEL};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Config builder seeded with the default tree settings.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("tree.root_label", ROOT_LABEL)?
        .set_default("tree.algorithm", DigestAlgorithm::default().as_str())
}
