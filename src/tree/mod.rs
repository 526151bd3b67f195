//! JSON Merkle Tree
//!
//! Represents a JSON document as a tree in which every node carries a
//! deterministic hash of its whole subtree. Object members are ordered by key
//! and array elements by position, so two documents that differ only in key
//! order produce identical trees.

pub mod builder;
pub mod hasher;
pub mod index;
pub mod kind;
pub mod node;

pub use builder::{build, parse, TreeBuilder, ROOT_LABEL};
pub use hasher::{
    canonical_number, key_slot, DigestAlgorithm, NodeHasher, NULL_SENTINEL, SEPARATOR,
};
pub use index::{shared_subtrees, HashIndex, SharedSubtree};
pub use kind::{classify, NodeKind};
pub use node::{Label, Node, PathSegment, Scalar};
