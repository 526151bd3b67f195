//! Tree Builder
//!
//! Turns a decoded JSON value into a fingerprinted `Node` tree. Construction is
//! post-order over an explicit stack of open containers: a container is hashed
//! only once its last child has been attached, and no native recursion is used,
//! so nesting depth is bounded by memory rather than the call stack.

use super::hasher::{DigestAlgorithm, NodeHasher};
use super::kind::{classify, NodeKind};
use super::node::{Label, Node, Scalar};
use crate::config::TreeConfig;
use crate::error::TreeError;
use serde_json::Value;
use std::convert::Infallible;
use std::path::Path;
use tracing::debug;

/// Default label of the root node
pub const ROOT_LABEL: &str = "$";

/// Remaining children of an open container
enum Pending<'v> {
    Object(std::vec::IntoIter<(&'v String, &'v Value)>),
    Array(std::slice::Iter<'v, Value>),
}

/// A container whose children are still being built
struct Frame<'v> {
    kind: NodeKind,
    label: Label,
    key: Option<String>,
    depth: usize,
    weight: usize,
    children: Vec<Node>,
    pending: Pending<'v>,
}

impl<'v> Frame<'v> {
    fn next_child(&mut self) -> Option<(Option<String>, &'v Value)> {
        match &mut self.pending {
            Pending::Object(entries) => entries.next().map(|(k, v)| (Some(k.clone()), v)),
            Pending::Array(items) => items.next().map(|v| (None, v)),
        }
    }

    fn attach(&mut self, child: Node) {
        self.weight += child.weight();
        self.children.push(child);
    }
}

enum Entered<'v> {
    Leaf(Node),
    Open(Frame<'v>),
}

/// Builds fingerprinted trees from JSON values
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    root_label: String,
    hasher: NodeHasher,
    max_depth: Option<usize>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            root_label: ROOT_LABEL.to_string(),
            hasher: NodeHasher::default(),
            max_depth: None,
        }
    }

    pub fn from_config(config: &TreeConfig) -> Self {
        Self {
            root_label: config.root_label.clone(),
            hasher: NodeHasher::new(config.algorithm),
            max_depth: config.max_depth,
        }
    }

    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.hasher = NodeHasher::new(algorithm);
        self
    }

    /// Reject documents nested deeper than `limit` levels (the root is level 1)
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.hasher.algorithm()
    }

    /// Build the tree for a decoded value.
    ///
    /// Fails only when a depth limit is configured and the value exceeds it.
    pub fn build(&self, value: &Value) -> Result<Node, TreeError> {
        let max_depth = self.max_depth;
        self.construct(value, |depth| match max_depth {
            Some(limit) if depth > limit => Err(TreeError::DepthLimitExceeded { limit }),
            _ => Ok(()),
        })
    }

    /// Build the tree ignoring any configured depth limit
    pub fn build_unbounded(&self, value: &Value) -> Node {
        match self.construct(value, |_| Ok::<(), Infallible>(())) {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }

    /// Decode JSON bytes and build their tree
    pub fn parse(&self, data: &[u8]) -> Result<Node, TreeError> {
        let value: Value = serde_json::from_slice(data)?;
        self.build(&value)
    }

    pub fn parse_str(&self, data: &str) -> Result<Node, TreeError> {
        self.parse(data.as_bytes())
    }

    pub fn parse_file(&self, path: &Path) -> Result<Node, TreeError> {
        let data = std::fs::read(path).map_err(|source| TreeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&data)
    }

    fn construct<E>(
        &self,
        value: &Value,
        admit: impl Fn(usize) -> Result<(), E>,
    ) -> Result<Node, E> {
        let root = Label::Root(self.root_label.clone());
        let mut current = match self.enter(value, None, root, 1, &admit)? {
            Entered::Leaf(node) => return Ok(self.finished(node)),
            Entered::Open(frame) => frame,
        };
        let mut open: Vec<Frame<'_>> = Vec::new();

        loop {
            match current.next_child() {
                Some((key, child)) => {
                    let slot = match &key {
                        Some(k) => Label::Key(k.clone()),
                        None => Label::Element,
                    };
                    match self.enter(child, key, slot, current.depth + 1, &admit)? {
                        Entered::Leaf(node) => current.attach(node),
                        Entered::Open(frame) => open.push(std::mem::replace(&mut current, frame)),
                    }
                }
                None => {
                    let node = self.close(current);
                    match open.pop() {
                        Some(mut parent) => {
                            parent.attach(node);
                            current = parent;
                        }
                        None => return Ok(self.finished(node)),
                    }
                }
            }
        }
    }

    /// Classify `value`; primitives come back finished, containers come back open.
    fn enter<'v, E>(
        &self,
        value: &'v Value,
        key: Option<String>,
        slot: Label,
        depth: usize,
        admit: &impl Fn(usize) -> Result<(), E>,
    ) -> Result<Entered<'v>, E> {
        let kind = classify(value);
        let pending = match value {
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
                Pending::Object(entries.into_iter())
            }
            Value::Array(items) => Pending::Array(items.iter()),
            _ => {
                let label = Label::Value(Scalar::from_value(value).unwrap_or(Scalar::Null));
                let hash = self.hasher.hash_node(kind, key.as_deref(), &label, &[]);
                return Ok(Entered::Leaf(Node::assemble(
                    kind,
                    label,
                    key,
                    1,
                    Vec::new(),
                    hash,
                )));
            }
        };
        admit(depth)?;
        let capacity = match &pending {
            Pending::Object(entries) => entries.len(),
            Pending::Array(items) => items.len(),
        };
        Ok(Entered::Open(Frame {
            kind,
            label: slot,
            key,
            depth,
            weight: 1,
            children: Vec::with_capacity(capacity),
            pending,
        }))
    }

    fn close(&self, frame: Frame<'_>) -> Node {
        let hash = self
            .hasher
            .hash_node(frame.kind, frame.key.as_deref(), &frame.label, &frame.children);
        Node::assemble(
            frame.kind,
            frame.label,
            frame.key,
            frame.weight,
            frame.children,
            hash,
        )
    }

    fn finished(&self, root: Node) -> Node {
        let prefix = root.hash().get(..12).unwrap_or_default();
        debug!(
            root_hash = %prefix,
            weight = root.weight(),
            algorithm = %self.hasher.algorithm(),
            "Built JSON tree"
        );
        root
    }
}

/// Build a tree with default settings
pub fn build(value: &Value) -> Node {
    TreeBuilder::new().build_unbounded(value)
}

/// Decode JSON bytes and build their tree with default settings
pub fn parse(data: &[u8]) -> Result<Node, TreeError> {
    TreeBuilder::new().parse(data)
}
