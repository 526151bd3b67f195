//! Subtree Hash Index
//!
//! Maps subtree hashes to the places they occur, giving O(1) "does this subtree
//! exist over there" checks for matching two trees.

use super::kind::NodeKind;
use super::node::Node;
use crate::types::{NodeHash, Pointer};
use serde::Serialize;
use std::collections::HashMap;

/// Escape a key for use as a JSON pointer token (RFC 6901)
pub fn escape_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// Pointer of the `position`-th child of the node at `parent`
fn child_pointer(parent: &str, child: &Node, position: usize) -> Pointer {
    match child.key() {
        Some(key) => format!("{}/{}", parent, escape_token(key)),
        None => format!("{}/{}", parent, position),
    }
}

/// Index: subtree hash -> pointers of every node with that hash
#[derive(Debug, Default)]
pub struct HashIndex {
    entries: HashMap<NodeHash, Vec<Pointer>>,
}

impl HashIndex {
    pub fn from_tree(root: &Node) -> Self {
        let mut entries: HashMap<NodeHash, Vec<Pointer>> = HashMap::new();
        let mut stack: Vec<(&Node, Pointer)> = vec![(root, String::new())];
        while let Some((node, pointer)) = stack.pop() {
            for (i, child) in node.children().iter().enumerate().rev() {
                stack.push((child, child_pointer(&pointer, child, i)));
            }
            entries
                .entry(node.hash().to_string())
                .or_default()
                .push(pointer);
        }
        HashIndex { entries }
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.entries.contains_key(hash)
    }

    /// Pointers of all nodes with `hash`, in document order
    pub fn paths(&self, hash: &str) -> &[Pointer] {
        self.entries.get(hash).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct subtree hashes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A subtree of one tree that also occurs, unchanged, in another
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedSubtree {
    pub pointer: Pointer,
    pub kind: NodeKind,
    pub hash: NodeHash,
    pub weight: usize,
}

/// Maximal subtrees of `target` whose hash also occurs somewhere in `source`.
///
/// Descends into a node of `target` only when its hash is unknown to `source`,
/// so each reported subtree is the largest unchanged one on its path.
pub fn shared_subtrees(source: &Node, target: &Node) -> Vec<SharedSubtree> {
    let index = HashIndex::from_tree(source);
    let mut shared = Vec::new();
    let mut stack: Vec<(&Node, Pointer)> = vec![(target, String::new())];
    while let Some((node, pointer)) = stack.pop() {
        if index.contains(node.hash()) {
            shared.push(SharedSubtree {
                pointer,
                kind: node.kind(),
                hash: node.hash().to_string(),
                weight: node.weight(),
            });
            continue;
        }
        for (i, child) in node.children().iter().enumerate().rev() {
            stack.push((child, child_pointer(&pointer, child, i)));
        }
    }
    shared
}
