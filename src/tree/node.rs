//! Tree node model and the per-node child-state machine.

use crate::types::{NodeId, Record};

/// The ordered top-level sequence of nodes and everything beneath them.
pub type Forest = Vec<TreeNode>;

/// Load state of a node's children.
///
/// Transitions: `Unknown -> KnownEmpty | KnownNonEmpty -> Loaded`, or
/// directly `Unknown -> Loaded` when the fetch doubles as the existence
/// check. `Loaded` may be reset to `Unknown` only by an explicit refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildState {
    /// Existence of children has not been determined.
    Unknown,
    /// Determined there are no children; no expand affordance.
    KnownEmpty,
    /// Children exist but have not been fetched yet.
    KnownNonEmpty,
    /// Children fetched and merged. Never an empty sequence; an empty merge
    /// collapses to `KnownEmpty` (see `TreeNode::set_child_state`).
    Loaded(Vec<TreeNode>),
}

impl ChildState {
    /// Terminal states admit no further expand fetch.
    pub fn is_settled(&self) -> bool {
        matches!(self, ChildState::KnownEmpty | ChildState::Loaded(_))
    }
}

/// One entry in the hierarchical tree, representing one domain record.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub record: Record,
    pub child_state: ChildState,
    /// True while a fetch for this node's children is outstanding.
    pub is_loading_children: bool,
}

impl TreeNode {
    /// Normalize a raw record into a node.
    ///
    /// Pure: the same record always yields an identical node, wherever in the
    /// tree that node lands.
    pub fn from_record(record: Record) -> Self {
        Self {
            id: record.id.clone(),
            record,
            child_state: ChildState::Unknown,
            is_loading_children: false,
        }
    }

    /// Assign a child state, collapsing `Loaded([])` to `KnownEmpty` so an
    /// empty loaded sequence is never an observable state.
    pub fn set_child_state(&mut self, state: ChildState) {
        self.child_state = match state {
            ChildState::Loaded(children) if children.is_empty() => ChildState::KnownEmpty,
            other => other,
        };
    }

    /// Whether the UI should render an expand affordance for this node.
    pub fn has_expand_affordance(&self) -> bool {
        match &self.child_state {
            ChildState::KnownNonEmpty => true,
            ChildState::Loaded(children) => !children.is_empty(),
            ChildState::Unknown | ChildState::KnownEmpty => false,
        }
    }

    /// Loaded children; empty when none have been merged.
    pub fn children(&self) -> &[TreeNode] {
        match &self.child_state {
            ChildState::Loaded(children) => children,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_is_pure() {
        let record = Record::new("C1").with_attribute("Name", "West Region");
        let a = TreeNode::from_record(record.clone());
        let b = TreeNode::from_record(record);
        assert_eq!(a, b);
        assert_eq!(a.child_state, ChildState::Unknown);
        assert!(!a.is_loading_children);
    }

    #[test]
    fn empty_loaded_collapses_to_known_empty() {
        let mut node = TreeNode::from_record(Record::new("C1"));
        node.set_child_state(ChildState::Loaded(vec![]));
        assert_eq!(node.child_state, ChildState::KnownEmpty);
    }

    #[test]
    fn affordance_follows_child_state() {
        let mut node = TreeNode::from_record(Record::new("C1"));
        assert!(!node.has_expand_affordance());

        node.set_child_state(ChildState::KnownNonEmpty);
        assert!(node.has_expand_affordance());

        node.set_child_state(ChildState::KnownEmpty);
        assert!(!node.has_expand_affordance());

        let child = TreeNode::from_record(Record::new("C3"));
        node.set_child_state(ChildState::Loaded(vec![child]));
        assert!(node.has_expand_affordance());
        assert_eq!(node.children().len(), 1);
    }
}
