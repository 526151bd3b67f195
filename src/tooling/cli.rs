//! CLI Tooling
//!
//! Command definitions and execution. Every command reads one or two JSON
//! documents, builds their trees and renders the result as text or JSON.

use crate::config::{ConfigLoader, JsonTreeConfig};
use crate::error::ApiError;
use crate::format::{
    format_compare_text, format_hash_text, format_tree_text, CompareReport, HashSummary,
};
use crate::logging::LoggingConfig;
use crate::tree::{shared_subtrees, DigestAlgorithm, Node, TreeBuilder};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// jsontree - canonical, content-addressed trees for JSON documents
#[derive(Parser, Debug)]
#[command(name = "jsontree")]
#[command(about = "Build fingerprinted trees from JSON documents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Digest algorithm (blake3, sha256)
    #[arg(long)]
    pub algorithm: Option<DigestAlgorithm>,

    /// Label given to the root node
    #[arg(long)]
    pub root_label: Option<String>,

    /// Reject documents nested deeper than this many levels
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold the tree flags into a loaded configuration.
    pub fn apply_overrides(&self, config: &mut JsonTreeConfig) {
        if let Some(algorithm) = self.algorithm {
            config.tree.algorithm = algorithm;
        }
        if let Some(label) = &self.root_label {
            config.tree.root_label = label.clone();
        }
        if let Some(depth) = self.max_depth {
            config.tree.max_depth = Some(depth);
        }
    }

    /// Logging configuration with CLI flags applied over `base`.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the root hash of a document
    Hash {
        /// JSON file, or - for stdin
        file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the tree of a document
    Show {
        /// JSON file, or - for stdin
        file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Only print this many levels (text format)
        #[arg(long)]
        depth: Option<usize>,
    },
    /// Compare two documents and list their unchanged subtrees
    Compare {
        /// Original JSON file
        left: PathBuf,
        /// Changed JSON file
        right: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Hash { .. } => "hash",
        Commands::Show { .. } => "show",
        Commands::Compare { .. } => "compare",
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_output_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::InvalidArgument(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

/// CLI context: resolved configuration plus the tree builder it implies.
pub struct CliContext {
    config: JsonTreeConfig,
    builder: TreeBuilder,
}

impl CliContext {
    /// Create a CLI context, loading configuration from `config_path` if given
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: JsonTreeConfig) -> Self {
        let builder = TreeBuilder::from_config(&config.tree);
        Self { config, builder }
    }

    pub fn config(&self) -> &JsonTreeConfig {
        &self.config
    }

    pub fn builder(&self) -> &TreeBuilder {
        &self.builder
    }

    /// Execute a command and return its rendered output
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        debug!(
            command = command_name(command),
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Hash { file, format } => {
                let format = parse_output_format(format)?;
                let root = self.load(file)?;
                let summary = HashSummary::from_tree(
                    &display_source(file),
                    &root,
                    self.builder.algorithm().as_str(),
                );
                match format {
                    OutputFormat::Text => Ok(format_hash_text(&summary)),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary)?),
                }
            }
            Commands::Show {
                file,
                format,
                depth,
            } => {
                let format = parse_output_format(format)?;
                let root = self.load(file)?;
                match format {
                    OutputFormat::Text => Ok(format_tree_text(&root, *depth)),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&root)?),
                }
            }
            Commands::Compare {
                left,
                right,
                format,
            } => {
                let format = parse_output_format(format)?;
                if is_stdin(left) && is_stdin(right) {
                    return Err(ApiError::InvalidArgument(
                        "stdin (-) can only be given for one side of compare".to_string(),
                    ));
                }
                let left_root = self.load(left)?;
                let right_root = self.load(right)?;
                let shared = shared_subtrees(&left_root, &right_root);
                let report = CompareReport::new(&left_root, &right_root, shared);
                info!(
                    identical = report.identical,
                    shared = report.shared.len(),
                    "Compared documents"
                );
                match format {
                    OutputFormat::Text => Ok(format_compare_text(&report)),
                    OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
                }
            }
        }
    }

    /// Read and build the document at `path`; `-` reads stdin
    fn load(&self, path: &Path) -> Result<Node, ApiError> {
        info!(source = %display_source(path), "Building tree");
        if is_stdin(path) {
            let mut data = Vec::new();
            std::io::stdin().read_to_end(&mut data).map_err(|source| {
                crate::error::TreeError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            return Ok(self.builder.parse(&data)?);
        }
        Ok(self.builder.parse_file(path)?)
    }
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

fn display_source(path: &Path) -> String {
    if is_stdin(path) {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}
