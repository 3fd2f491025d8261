//! # linkbonding — owner-scoped link bonding graph
//!
//! A directed graph of "bonds" between named endpoints, persisted as
//! adjacency lists on one document per endpoint. Every edge carries labels
//! partitioned by owner, so independent callers can share a physical edge
//! without overwriting or deleting each other's metadata.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `NodeStore` is the contract between engine and document backend
//! 2. **Mirror invariant**: every `A → B` in `A.nexts` has an `A` entry in `B.pres`
//! 3. **No orphans**: a node without edges has no document
//! 4. **Conditional writes**: versioned documents, conflicts retried by the engine
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linkbonding::{Bonding, DeleteEdgeReq, InsertEdgeReq};
//!
//! # async fn example() -> linkbonding::Result<()> {
//! let bonding = Bonding::open_memory();
//!
//! bonding.insert_edge(
//!     &InsertEdgeReq::new("svc-a", "db-1", "order-42").with_label("role", "primary"),
//! ).await?;
//!
//! let a = bonding.get_node(&"svc-a".into()).await?;
//! assert!(a.is_some());
//!
//! bonding.delete_edge(&DeleteEdgeReq::new("svc-a", "db-1", "order-42")).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | Memory | (default) | In-memory JSON documents for testing/embedding |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod storage;
pub mod bonding;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    EndPoint, StorageKey, Node, Edge,
    EdgeLabels, LabelSet, OwnerKey, key_of,
};

// ============================================================================
// Re-exports: Storage
// ============================================================================

pub use storage::{NodeStore, MemoryNodeStore, StoreConfig};

// ============================================================================
// Re-exports: Engine
// ============================================================================

pub use bonding::{Bonding, InsertEdgeReq, DeleteEdgeReq, Selection};
pub use config::BondingConfig;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend could not be reached or failed at the transport level.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A stored document does not decode into a node.
    #[error("Malformed document {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A conditional write found a different document version than was read.
    #[error("Version conflict on {endpoint}: expected {expected}, found {found}")]
    VersionConflict {
        endpoint: EndPoint,
        expected: u64,
        found: u64,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, Error>;
