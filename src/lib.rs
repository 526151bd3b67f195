//! jsontree: Canonical JSON Merkle Trees
//!
//! Converts parsed JSON documents into trees whose nodes carry deterministic,
//! content-addressed hashes. Object members are sorted by key and array
//! elements keep their position, so two structurally equal documents produce
//! equal root hashes regardless of key order, and unchanged subtrees can be
//! matched across documents in O(1) per node.
//!
//! ```
//! use serde_json::json;
//!
//! let a = jsontree::build(&json!({"x": 1, "y": [true, null]}));
//! let b = jsontree::build(&json!({"y": [true, null], "x": 1}));
//! assert_eq!(a.hash(), b.hash());
//! assert_eq!(a.weight(), 5);
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::{ApiError, TreeError};
pub use tree::{build, parse, Node, NodeKind, TreeBuilder};
