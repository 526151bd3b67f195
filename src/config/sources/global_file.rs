//! Global config file source (`$XDG_CONFIG_HOME/jsontree/config.toml`), optional.

use crate::config::paths::xdg_root;
use config::builder::DefaultState;
use config::{ConfigBuilder, File};

/// Add the global config file to builder if its location can be determined.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    match xdg_root::global_config_path() {
        Some(path) => builder.add_source(File::from(path).required(false)),
        None => builder,
    }
}
