//! Tree node types
//!
//! A `Node` owns its children outright; there are no back-references and no
//! sharing. Every field is finalized by the builder when the node's last child
//! is attached, so the public surface is read-only.

use super::hasher;
use super::kind::NodeKind;
use crate::types::NodeHash;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// Primitive payload of a leaf node
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl Scalar {
    /// Extract the primitive payload; `None` for objects and arrays
    pub fn from_value(value: &Value) -> Option<Scalar> {
        match value {
            Value::String(s) => Some(Scalar::String(s.clone())),
            Value::Number(n) => Some(Scalar::Number(n.clone())),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Null => Some(Scalar::Null),
            Value::Object(_) | Value::Array(_) => None,
        }
    }
}

/// Identity of a node within its parent
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// Root sentinel, `$` unless configured otherwise
    Root(String),
    /// Object property name
    Key(String),
    /// Array slot; renders as the empty string
    Element,
    /// A primitive's own value
    Value(Scalar),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hasher::label_text(self))
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Label::Root(s) | Label::Key(s) => serializer.serialize_str(s),
            Label::Element => serializer.serialize_str(""),
            Label::Value(Scalar::String(s)) => serializer.serialize_str(s),
            Label::Value(Scalar::Number(n)) => n.serialize(serializer),
            Label::Value(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            Label::Value(Scalar::Null) => serializer.serialize_unit(),
        }
    }
}

/// One step of a path from a node to one of its descendants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Fingerprinted JSON tree node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    kind: NodeKind,
    label: Label,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    weight: usize,
    hash: NodeHash,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    /// Assemble a finished node. `weight` must already include every child.
    pub(crate) fn assemble(
        kind: NodeKind,
        label: Label,
        key: Option<String>,
        weight: usize,
        children: Vec<Node>,
        hash: NodeHash,
    ) -> Self {
        debug_assert_eq!(
            weight,
            1 + children.iter().map(Node::weight).sum::<usize>()
        );
        Node {
            kind,
            label,
            key,
            weight,
            hash,
            children,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Property name this node occupies in its parent object
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Subtree size, this node included
    pub fn weight(&self) -> usize {
        self.weight
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_primitive(&self) -> bool {
        self.kind.is_primitive()
    }

    /// True for primitives and empty containers
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Primitive payload, if this is a leaf carrying a value
    pub fn value(&self) -> Option<&Scalar> {
        match &self.label {
            Label::Value(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Pre-order traversal of the subtree rooted here
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Height of the subtree: 1 for a leaf
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Look up a single child by property name (objects) or position (arrays)
    pub fn child(&self, segment: &PathSegment) -> Option<&Node> {
        match (self.kind, segment) {
            (NodeKind::Object, PathSegment::Key(key)) => self
                .children
                .binary_search_by(|c| c.key().unwrap_or_default().cmp(key.as_str()))
                .ok()
                .map(|i| &self.children[i]),
            (NodeKind::Array, PathSegment::Index(i)) => self.children.get(*i),
            _ => None,
        }
    }

    /// Follow a sequence of segments from this node
    pub fn get(&self, path: &[PathSegment]) -> Option<&Node> {
        path.iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Resolve an RFC 6901 JSON pointer ("" is this node)
    pub fn pointer(&self, pointer: &str) -> Option<&Node> {
        if pointer.is_empty() {
            return Some(self);
        }
        let rest = pointer.strip_prefix('/')?;
        let mut node = self;
        for token in rest.split('/') {
            let token = token.replace("~1", "/").replace("~0", "~");
            let segment = match node.kind {
                NodeKind::Array => PathSegment::Index(parse_index(&token)?),
                _ => PathSegment::Key(token),
            };
            node = node.child(&segment)?;
        }
        Some(node)
    }
}

fn parse_index(token: &str) -> Option<usize> {
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}

impl Drop for Node {
    fn drop(&mut self) {
        // Flatten the subtree so deep documents do not recurse on teardown.
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Pre-order iterator over a subtree
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
