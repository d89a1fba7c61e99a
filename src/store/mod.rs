//! TreeStore
//!
//! Owns the ordered forest of nodes, de-duplicates concurrent expansions per
//! node id, and merges fetched children at whatever depth the target node
//! lives. The forest is exposed only as read snapshots; every mutating
//! operation re-reads the latest state after its fetch resolves, so
//! completions arriving in any order always target fresh data.
//!
//! Locks are held only across synchronous sections, never across an await.

use crate::error::TreeError;
use crate::fetch::RecordFetcher;
use crate::tree::locate::{contains_id, find, locate_and_update, replace_child_state};
use crate::tree::node::{ChildState, Forest, TreeNode};
use crate::types::{NodeId, Record};
use futures::future::join_all;
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Store configuration.
///
/// Both probe modes default to off, matching a data source without an
/// existence-check endpoint; nodes then stay `Unknown` until expanded.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Probe each root's child existence during `load_roots`.
    pub eager_probe_roots: bool,
    /// Probe each newly merged child's own child existence after a merge.
    pub eager_probe_children: bool,
}

/// Result of an expand call: the new forest snapshot plus whether the fetch
/// found any children. On no-op paths (fetch already in flight, or state
/// already settled) `found_children` reflects whether children are currently
/// materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandOutcome {
    pub forest: Forest,
    pub found_children: bool,
}

/// The lazy-loaded tree store engine.
pub struct TreeStore<F: RecordFetcher> {
    fetcher: F,
    config: StoreConfig,
    forest: RwLock<Forest>,
    /// Node ids with an outstanding child fetch. Check-and-insert happens
    /// under one lock acquisition, which is what enforces at-most-one
    /// outstanding fetch per id.
    pending: Mutex<HashSet<NodeId>>,
}

impl<F: RecordFetcher> TreeStore<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_config(fetcher, StoreConfig::default())
    }

    pub fn with_config(fetcher: F, config: StoreConfig) -> Self {
        Self {
            fetcher,
            config,
            forest: RwLock::new(Vec::new()),
            pending: Mutex::new(HashSet::new()),
        }
    }

    /// Read-only snapshot of the current forest.
    pub fn forest(&self) -> Forest {
        self.forest.read().clone()
    }

    /// Fetch the top-level records and (re)build the forest.
    ///
    /// In eager-probe mode every root's child existence is probed
    /// concurrently before the forest is published; a failed probe leaves
    /// that root `Unknown` and does not fail the load. A failed root listing
    /// propagates without partial mutation: an initial load's forest stays
    /// empty, a re-load keeps the prior forest.
    pub async fn load_roots(&self) -> Result<Forest, TreeError> {
        let records = self.fetcher.list_roots().await?;
        let mut roots: Forest = records.into_iter().map(TreeNode::from_record).collect();
        debug!(count = roots.len(), "loaded root records");

        if self.config.eager_probe_roots {
            let ids: Vec<NodeId> = roots.iter().map(|n| n.id.clone()).collect();
            for (id, state) in self.probe_existence(ids).await {
                if let Some(root) = roots.iter_mut().find(|n| n.id == id) {
                    root.set_child_state(state);
                }
            }
        }

        *self.forest.write() = roots.clone();
        Ok(roots)
    }

    /// Determine and, if present, fetch the children of the node at `id`.
    ///
    /// No-op when a fetch for `id` is already in flight or the node's state
    /// is already settled. An id absent from the forest is a caller error.
    /// On fetch failure the node's prior state is left untouched so the
    /// affordance and a retry remain available. The pending marker and the
    /// node's loading flag are cleared exactly once on every exit path.
    pub async fn expand_node(&self, id: &str) -> Result<ExpandOutcome, TreeError> {
        {
            let forest = self.forest.read();
            let node = find(&forest, id).ok_or_else(|| TreeError::NotFound(id.to_string()))?;
            // The settled check and the pending insert share one pending
            // acquisition while the snapshot is held: a merge cannot land
            // between them, since it needs the forest write lock and clears
            // its pending entry only after it lands. Nothing else locks both.
            let mut pending = self.pending.lock();
            if node.child_state.is_settled() {
                debug!(id, "expand skipped: children already determined");
                return Ok(ExpandOutcome {
                    found_children: node.has_expand_affordance(),
                    forest: forest.clone(),
                });
            }
            if !pending.insert(id.to_string()) {
                debug!(id, "expand skipped: fetch already in flight");
                return Ok(ExpandOutcome {
                    forest: forest.clone(),
                    found_children: false,
                });
            }
        }
        locate_and_update(&mut self.forest.write(), id, &mut |node| {
            node.is_loading_children = true;
        });

        debug!(id, "fetching children");
        let fetched = self.fetcher.list_children(id).await;

        let records = match fetched {
            Ok(records) => records,
            Err(err) => {
                self.finish_fetch(id);
                return Err(err);
            }
        };

        let (found_children, child_ids) = self.merge_children(id, records);
        self.finish_fetch(id);

        if self.config.eager_probe_children && !child_ids.is_empty() {
            self.refine_children(child_ids).await;
        }

        Ok(ExpandOutcome {
            forest: self.forest(),
            found_children,
        })
    }

    /// Reset a node's child state to `Unknown`, dropping any loaded subtree.
    ///
    /// Re-enters the load cycle; doubles as collapse, since a late fetch
    /// completion targeting a dropped descendant becomes a silent no-op.
    pub fn refresh_node(&self, id: &str) -> Result<Forest, TreeError> {
        let mut forest = self.forest.write();
        if !contains_id(&forest, id) {
            return Err(TreeError::NotFound(id.to_string()));
        }
        *forest = replace_child_state(&forest, id, ChildState::Unknown);
        debug!(id, "child state reset");
        Ok(forest.clone())
    }

    /// Merge fetched child records under the node at `id`, against the
    /// latest snapshot. A record whose id already exists anywhere in the
    /// forest, or repeats within the page, is a data-integrity problem: it
    /// is dropped from the merge and reported, and the rest of the page
    /// still merges. A target that vanished while the fetch was in flight
    /// makes the whole merge a silent no-op, including the found signal.
    /// Returns whether any children were merged, and their ids.
    fn merge_children(&self, id: &str, records: Vec<Record>) -> (bool, Vec<NodeId>) {
        let mut forest = self.forest.write();

        let mut children: Vec<TreeNode> = Vec::with_capacity(records.len());
        for record in records {
            let duplicate = contains_id(&forest, &record.id)
                || children.iter().any(|c| c.id == record.id);
            if duplicate {
                warn!(
                    child_id = %record.id,
                    parent_id = id,
                    "dropping fetched child with duplicate id"
                );
                continue;
            }
            children.push(TreeNode::from_record(record));
        }

        let found = !children.is_empty();
        let child_ids: Vec<NodeId> = children.iter().map(|c| c.id.clone()).collect();
        debug!(id, count = child_ids.len(), "merging children");

        let mut state = Some(ChildState::Loaded(children));
        let applied = locate_and_update(&mut forest, id, &mut |node| {
            if let Some(state) = state.take() {
                // Loaded([]) collapses to KnownEmpty here.
                node.set_child_state(state);
            }
        });
        if !applied {
            debug!(id, "merge target no longer in forest; dropping fetched children");
            return (false, Vec::new());
        }

        (found, child_ids)
    }

    /// Clear the pending marker and the node's loading flag. Called exactly
    /// once per issued fetch, on success and on failure alike.
    fn finish_fetch(&self, id: &str) {
        self.pending.lock().remove(id);
        locate_and_update(&mut self.forest.write(), id, &mut |node| {
            node.is_loading_children = false;
        });
    }

    /// Refine freshly merged children with concurrent existence probes so
    /// the UI can decide affordances without loading grandchild data. A
    /// concurrent expand may have settled a child in the meantime; such
    /// children are left alone.
    async fn refine_children(&self, ids: Vec<NodeId>) {
        for (id, state) in self.probe_existence(ids).await {
            locate_and_update(&mut self.forest.write(), &id, &mut |node| {
                if node.child_state == ChildState::Unknown {
                    node.set_child_state(state.clone());
                }
            });
        }
    }

    /// Probe child existence for each id concurrently. A failed probe is
    /// recoverable: the id is dropped from the result, leaving its node
    /// `Unknown`, and the failure is reported.
    async fn probe_existence(&self, ids: Vec<NodeId>) -> Vec<(NodeId, ChildState)> {
        let probes = ids.into_iter().map(|id| async move {
            let result = self.fetcher.has_children(&id).await;
            (id, result)
        });

        join_all(probes)
            .await
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(true) => Some((id, ChildState::KnownNonEmpty)),
                Ok(false) => Some((id, ChildState::KnownEmpty)),
                Err(err) => {
                    warn!(id = %id, error = %err, "child existence probe failed; state stays unknown");
                    None
                }
            })
            .collect()
    }
}
