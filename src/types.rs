//! Core types shared across the tree, index and CLI layers.

/// NodeHash: lowercase hex fingerprint of a subtree
pub type NodeHash = String;

/// Digest: raw 256-bit output of the configured digest function
pub type Digest = [u8; 32];

/// Pointer: RFC 6901 JSON pointer locating a node from the root ("" is the root)
pub type Pointer = String;
