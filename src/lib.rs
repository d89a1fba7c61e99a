//! Lazytree: Lazy-Loaded Tree Store
//!
//! An in-memory store for a partially-known tree of records. Children are
//! fetched on demand through an async collaborator, merged into the forest at
//! whatever depth the target node lives, and tracked with an explicit per-node
//! child state so a caller can tell "no children" from "not yet probed" from
//! "fetch in flight".

pub mod error;
pub mod fetch;
pub mod logging;
pub mod store;
pub mod tree;
pub mod types;
