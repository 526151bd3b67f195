//! Tooling
//!
//! Command-line surface over the tree builder: hashing, inspecting and
//! comparing JSON documents.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
