//! External record source contract.
//!
//! The store consumes the remote data source through this trait only; the
//! concrete transport (RPC, HTTP, ...) is out of scope. Implementations map
//! their own failures to `TreeError::Fetch`.

use crate::error::TreeError;
use crate::types::Record;
use async_trait::async_trait;

/// Remote record source consumed by `TreeStore`.
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// List the top-level records.
    async fn list_roots(&self) -> Result<Vec<Record>, TreeError>;

    /// List the children of `parent_id`.
    ///
    /// An empty result means the parent has no children; it is not an error.
    async fn list_children(&self, parent_id: &str) -> Result<Vec<Record>, TreeError>;

    /// Existence-only child check, used in eager-probe mode to decide
    /// whether to show an expand affordance without fetching child data.
    async fn has_children(&self, id: &str) -> Result<bool, TreeError>;
}
