//! Environment variable source: JSONTREE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Environment variable prefix for configuration keys
pub const ENV_PREFIX: &str = "JSONTREE";

/// Add environment variable overlay to builder.
/// Uses JSONTREE prefix and __ as separator, e.g. `JSONTREE__TREE__MAX_DEPTH=64`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    )
}
