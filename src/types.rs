//! Core types for the lazy-loaded tree store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// NodeId: opaque unique identifier for a node, stable across its lifetime.
/// Uniqueness is forest-wide, not per-sibling-group, because all lookups are
/// by id alone regardless of depth.
pub type NodeId = String;

/// A domain record behind a node.
///
/// The store inspects only `id`; every other attribute passes through
/// untouched for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: NodeId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Builder-style attribute assignment, mainly for tests and fixtures.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Display-only parent id, if the payload carries one. Never used for
    /// structural placement; placement follows the expand target.
    pub fn parent_id(&self) -> Option<&str> {
        self.attributes.get("parentId").and_then(Value::as_str)
    }
}
