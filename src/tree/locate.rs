//! Locate-and-replace: find a node by id anywhere in the forest and produce
//! an updated forest in which only that node and its ancestors change.
//!
//! Search is depth-first in source order, so results are deterministic. An
//! absent id is a no-op, not an error: the target may have been dropped by a
//! concurrent operation between dispatch and completion of an async fetch.

use super::node::{ChildState, Forest, TreeNode};

/// Find a node by id anywhere in the forest.
pub fn find<'a>(forest: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    for node in forest {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// Whether `id` exists anywhere in the forest.
pub fn contains_id(forest: &[TreeNode], id: &str) -> bool {
    find(forest, id).is_some()
}

/// Apply `update` to the node at `id`, mutating the forest in place.
///
/// Returns whether a node was updated; `false` means the id is absent and
/// the forest is untouched. Node ids are forest-wide unique, so the first
/// match is the only match.
pub fn locate_and_update(
    forest: &mut Forest,
    id: &str,
    update: &mut dyn FnMut(&mut TreeNode),
) -> bool {
    for node in forest.iter_mut() {
        if node.id == id {
            update(node);
            return true;
        }
        if let ChildState::Loaded(children) = &mut node.child_state {
            if locate_and_update(children, id, update) {
                return true;
            }
        }
    }
    false
}

/// Pure form: produce a new forest in which the node at `id` carries `state`
/// (with `Loaded([])` collapsed to `KnownEmpty`). Every node on the
/// root-to-target path is a new value; subtrees off the path are equal to
/// their counterparts in the input. An absent id yields a value-identical
/// snapshot.
pub fn replace_child_state(forest: &[TreeNode], id: &str, state: ChildState) -> Forest {
    let mut next: Forest = forest.to_vec();
    let mut state = Some(state);
    locate_and_update(&mut next, id, &mut |node| {
        if let Some(state) = state.take() {
            node.set_child_state(state);
        }
    });
    next
}
