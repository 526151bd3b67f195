//! Configuration
//!
//! Layered configuration for tree construction and logging: built-in defaults,
//! then the global config file, then `JSONTREE__*` environment variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::tree::{DigestAlgorithm, ROOT_LABEL};
use serde::{Deserialize, Serialize};

fn default_root_label() -> String {
    ROOT_LABEL.to_string()
}

/// Tree construction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Label given to the root node
    #[serde(default = "default_root_label")]
    pub root_label: String,

    /// Digest applied to each node's hash input
    #[serde(default)]
    pub algorithm: DigestAlgorithm,

    /// Maximum container nesting accepted by `TreeBuilder::build`; None is unbounded
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root_label: default_root_label(),
            algorithm: DigestAlgorithm::default(),
            max_depth: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonTreeConfig {
    #[serde(default)]
    pub tree: TreeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
