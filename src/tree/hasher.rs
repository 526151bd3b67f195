//! Hash computation for tree nodes
//!
//! A node's hash is the digest of its kind, label and the hashes of its
//! children in final order, so equal subtrees collapse to equal hashes
//! wherever they appear.

use super::kind::NodeKind;
use super::node::{Label, Node, Scalar};
use crate::types::{Digest, NodeHash};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use sha2::Sha256;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Joins the members of the hash input and prefixes each child hash
pub const SEPARATOR: char = ':';

/// Rendering of a null label
pub const NULL_SENTINEL: &str = "null";

/// Digest function applied to the joined hash input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Blake3,
    Sha256,
}

impl DigestAlgorithm {
    pub fn digest(&self, input: &[u8]) -> Digest {
        match self {
            DigestAlgorithm::Blake3 => *blake3::hash(input).as_bytes(),
            DigestAlgorithm::Sha256 => {
                use sha2::Digest as _;
                let mut out = [0u8; 32];
                out.copy_from_slice(&Sha256::digest(input));
                out
            }
        }
    }

    /// Digest rendered as lowercase hex
    pub fn digest_hex(&self, input: &[u8]) -> NodeHash {
        hex::encode(self.digest(input))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Blake3 => "blake3",
            DigestAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(DigestAlgorithm::Blake3),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            other => Err(format!(
                "unknown digest algorithm '{}' (expected 'blake3' or 'sha256')",
                other
            )),
        }
    }
}

/// Canonical decimal rendering of a JSON number.
///
/// Integers print in plain decimal. Floats print with the shortest digits that
/// round-trip, without exponent and without a trailing `.0`, so `42` and
/// `42.0` both render `42`. Negative zero renders as `0`.
pub fn canonical_number(number: &Number) -> String {
    if let Some(n) = number.as_u64() {
        return n.to_string();
    }
    if let Some(n) = number.as_i64() {
        return n.to_string();
    }
    match number.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) => f.to_string(),
        None => number.to_string(),
    }
}

/// Canonical text of a label as it enters the hash input
pub fn label_text(label: &Label) -> Cow<'_, str> {
    match label {
        Label::Root(sentinel) => Cow::Borrowed(sentinel),
        Label::Key(key) => Cow::Borrowed(key),
        Label::Element => Cow::Borrowed(""),
        Label::Value(Scalar::String(s)) => Cow::Borrowed(s),
        Label::Value(Scalar::Number(n)) => Cow::Owned(canonical_number(n)),
        Label::Value(Scalar::Bool(true)) => Cow::Borrowed("true"),
        Label::Value(Scalar::Bool(false)) => Cow::Borrowed("false"),
        Label::Value(Scalar::Null) => Cow::Borrowed(NULL_SENTINEL),
    }
}

/// Separator-prefixed concatenation of child hashes; empty without children
pub fn children_fragment(children: &[Node]) -> String {
    let mut fragment = String::with_capacity(children.len() * 65);
    for child in children {
        fragment.push(SEPARATOR);
        fragment.push_str(child.hash());
    }
    fragment
}

/// Property name of a primitive as it enters the hash input.
///
/// Rendered as a quoted JSON string: never empty, and its closing quote marks
/// where the key ends and the value text begins.
pub fn key_slot(key: &str) -> String {
    Value::String(key.to_owned()).to_string()
}

/// Join the non-empty parts with the separator; empty parts leave no trace
pub fn join_non_empty<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = String::new();
    for part in parts.into_iter().filter(|p| !p.is_empty()) {
        if !joined.is_empty() {
            joined.push(SEPARATOR);
        }
        joined.push_str(part);
    }
    joined
}

/// Computes node hashes with a fixed digest function
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeHasher {
    algorithm: DigestAlgorithm,
}

impl NodeHasher {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Hash input for a node.
    ///
    /// Members are `kind`, the property name for primitives that sit under an
    /// object key, the label text and the children fragment. Containers carry
    /// their property name as label already.
    pub fn hash_input(
        &self,
        kind: NodeKind,
        key: Option<&str>,
        label: &Label,
        children: &[Node],
    ) -> String {
        let slot = match key {
            Some(key) if kind.is_primitive() => key_slot(key),
            _ => String::new(),
        };
        let label = label_text(label);
        let fragment = children_fragment(children);
        join_non_empty([kind.as_str(), slot.as_str(), label.as_ref(), fragment.as_str()])
    }

    pub fn hash_node(
        &self,
        kind: NodeKind,
        key: Option<&str>,
        label: &Label,
        children: &[Node],
    ) -> NodeHash {
        let input = self.hash_input(kind, key, label, children);
        self.algorithm.digest_hex(input.as_bytes())
    }
}
