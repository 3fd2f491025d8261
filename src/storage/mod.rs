//! # Node Store Trait
//!
//! This is the contract between the bonding engine and any document
//! backend. A backend only has to fetch, replace and delete whole node
//! documents addressed by [`StorageKey`](crate::model::StorageKey).
//!
//! ## Implementations
//!
//! | Backend | Module | Description |
//! |---------|--------|-------------|
//! | `MemoryNodeStore` | `memory` | In-memory JSON documents for testing/embedding |
//!
//! ## Conditional writes
//!
//! Every document carries a version. `upsert` and `delete` are conditional
//! on the version the caller read: a mismatch fails with
//! [`Error::VersionConflict`](crate::Error::VersionConflict) instead of
//! silently replacing a concurrent writer's document. The engine turns
//! conflicts into whole-operation retries.
//!
//! Versions are never reused for an endpoint: a document that is deleted
//! and recreated gets a version no earlier reader can hold.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use crate::model::{EndPoint, Node};
use crate::Result;

pub use memory::MemoryNodeStore;

// ============================================================================
// Store Configuration
// ============================================================================

/// Which node store backend to open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreConfig {
    /// In-memory (no persistence)
    #[default]
    Memory,
}

// ============================================================================
// NodeStore Trait
// ============================================================================

/// Key-value access to node documents.
///
/// Implementations must be safe to share between concurrent operations;
/// the engine adds no synchronization of its own around the store.
#[async_trait]
pub trait NodeStore: Send + Sync + 'static {
    /// Fetch the node for `endpoint`. Absent is `Ok(None)`, not an error.
    ///
    /// The returned node's `version` is the stored document version.
    async fn get(&self, endpoint: &EndPoint) -> Result<Option<Node>>;

    /// Replace the whole document for `node.endpoint`.
    ///
    /// Succeeds only if the stored version equals `node.version`. Version 0
    /// succeeds only when no document exists. Returns the new stored
    /// version, which no earlier document for this endpoint carried.
    async fn upsert(&self, node: &Node) -> Result<u64>;

    /// Remove the document for `node.endpoint`.
    ///
    /// Deleting an absent document is not an error. A present document is
    /// only removed if its version equals `node.version`.
    async fn delete(&self, node: &Node) -> Result<()>;
}

#[async_trait]
impl<S: NodeStore> NodeStore for Arc<S> {
    async fn get(&self, endpoint: &EndPoint) -> Result<Option<Node>> {
        (**self).get(endpoint).await
    }

    async fn upsert(&self, node: &Node) -> Result<u64> {
        (**self).upsert(node).await
    }

    async fn delete(&self, node: &Node) -> Result<()> {
        (**self).delete(node).await
    }
}
