//! Value classification
//!
//! Maps a decoded JSON value onto the closed set of node kinds.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Node kind enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl NodeKind {
    /// Kinds whose nodes carry their own value as label and never have children
    pub const PRIMITIVES: [NodeKind; 4] = [
        NodeKind::String,
        NodeKind::Number,
        NodeKind::Boolean,
        NodeKind::Null,
    ];

    /// Kind text as it enters the hash input
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Null => "null",
        }
    }

    pub fn is_primitive(&self) -> bool {
        Self::PRIMITIVES.contains(self)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a decoded value.
///
/// `serde_json::Value` is a closed tagged union, so every shape the decoder can
/// produce has exactly one kind; absence of a value is `Value::Null`.
pub fn classify(value: &Value) -> NodeKind {
    match value {
        Value::Object(_) => NodeKind::Object,
        Value::Array(_) => NodeKind::Array,
        Value::String(_) => NodeKind::String,
        Value::Number(_) => NodeKind::Number,
        Value::Bool(_) => NodeKind::Boolean,
        Value::Null => NodeKind::Null,
    }
}
