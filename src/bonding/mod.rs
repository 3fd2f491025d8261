//! # Edge Mutation Engine
//!
//! Maintains the bonding graph on top of a [`NodeStore`]: every edge
//! `A → B` lives in `A.nexts` with a mirror back-edge in `B.pres`, labels
//! are partitioned per owner, and nodes left without any edge are deleted.
//!
//! ```text
//! insert_edge: get A, get B → ensure A.nexts[B], B.pres[A] → merge labels → upsert A, upsert B
//! delete_edge: get A → drop owner labels → (edge empty) get B, unlink, gc B → gc A
//! ```
//!
//! Each operation reads, mutates in memory and writes whole documents back.
//! Writes are conditional on the version read, and an operation that loses
//! a race is re-run from fresh reads up to `max_retries` times. There is no
//! rollback: a hard failure between the two writes leaves whatever was
//! already written, and the next successful operation on the pair repairs
//! the mirror.

pub mod request;

use std::future::Future;

use tracing::{debug, warn};

use crate::config::BondingConfig;
use crate::model::{EndPoint, Node, OwnerKey};
use crate::storage::{MemoryNodeStore, NodeStore, StoreConfig};
use crate::{Error, Result};

pub use request::{DeleteEdgeReq, InsertEdgeReq, Selection};

/// The bonding engine. Cheap to share behind an `Arc`; holds no per-call state.
pub struct Bonding<S: NodeStore> {
    store: S,
    config: BondingConfig,
}

impl<S: NodeStore> Bonding<S> {
    /// Engine over `store` with default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, BondingConfig::default())
    }

    pub fn with_config(store: S, config: BondingConfig) -> Self {
        Self { store, config }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BondingConfig {
        &self.config
    }

    /// Owner key under which `uid`'s labels are kept.
    pub fn owner_key(&self, uid: &str) -> OwnerKey {
        OwnerKey::new(&self.config.label_prefix, uid)
    }

    // ========================================================================
    // Public operations
    // ========================================================================

    /// Add the edge `start → end` (creating either node on demand) and merge
    /// `labels` into the caller's label set on it.
    #[tracing::instrument(skip(self, req), fields(start = %req.start, end = %req.end, uid = %req.uid))]
    pub async fn insert_edge(&self, req: &InsertEdgeReq) -> Result<()> {
        req.validate()?;
        self.retrying(|| self.try_insert_edge(req)).await
    }

    /// Remove the caller's labels from the selected edges leaving `start`,
    /// dropping edges left without labels and nodes left without edges.
    ///
    /// Deleting from an absent node or an absent edge succeeds as a no-op.
    #[tracing::instrument(skip(self, req), fields(start = %req.start, end = ?req.end, uid = %req.uid))]
    pub async fn delete_edge(&self, req: &DeleteEdgeReq) -> Result<()> {
        req.validate()?;
        self.retrying(|| self.try_delete_edge(req)).await
    }

    /// Current stored state of a node.
    pub async fn get_node(&self, endpoint: &EndPoint) -> Result<Option<Node>> {
        self.store.get(endpoint).await
    }

    /// Stored node for `endpoint`, or a fresh unpersisted one. Never writes.
    pub async fn get_or_create_node(&self, endpoint: &EndPoint) -> Result<Node> {
        Ok(self
            .store
            .get(endpoint)
            .await?
            .unwrap_or_else(|| Node::new(endpoint.clone())))
    }

    /// Persist `node` if it still has an edge, otherwise delete its document.
    pub async fn garbage_collect(&self, node: Option<&Node>) -> Result<()> {
        let Some(node) = node else {
            return Ok(());
        };
        if node.is_orphan() {
            debug!(endpoint = %node.endpoint, "orphan node, deleting");
            self.store.delete(node).await
        } else {
            self.store.upsert(node).await.map(|_| ())
        }
    }

    // ========================================================================
    // Single attempts
    // ========================================================================

    async fn try_insert_edge(&self, req: &InsertEdgeReq) -> Result<()> {
        let owner = self.owner_key(&req.uid);
        let mut start = self.get_or_create_node(&req.start).await?;

        // Self-loop: both adjacency lists live on the same document.
        if req.start == req.end {
            start.ensure_next(&req.end).labels.merge(&owner, &req.labels);
            start.ensure_pre(&req.start);
            self.store.upsert(&start).await?;
            return Ok(());
        }

        let mut end = self.get_or_create_node(&req.end).await?;

        // Both sides are asserted independently so that a retry after a
        // half-written attempt restores the back-edge.
        start.ensure_next(&req.end).labels.merge(&owner, &req.labels);
        end.ensure_pre(&req.start);

        self.store.upsert(&start).await?;
        self.store.upsert(&end).await?;
        Ok(())
    }

    async fn try_delete_edge(&self, req: &DeleteEdgeReq) -> Result<()> {
        let selection = req.selection();
        if selection == Selection::Nothing {
            debug!("no target and no label filter, nothing to delete");
            return Ok(());
        }

        let Some(mut start) = self.store.get(&req.start).await? else {
            debug!("start node absent, nothing to delete");
            return Ok(());
        };

        let owner = self.owner_key(&req.uid);
        let targets: Vec<EndPoint> = match selection {
            Selection::Target(end) => start
                .get_next(end)
                .filter(|edge| edge.labels.contains_owner(&owner))
                .map(|edge| vec![edge.endpoint.clone()])
                .unwrap_or_default(),
            Selection::Matching(filter) => start
                .nexts
                .iter()
                .filter(|edge| edge.labels.owner_matches(&owner, filter))
                .map(|edge| edge.endpoint.clone())
                .collect(),
            Selection::Nothing => Vec::new(),
        };
        if targets.is_empty() {
            debug!("no edge carries the caller's labels, nothing to delete");
            return Ok(());
        }

        // End nodes are written before the start node: if the start write
        // loses a race, the retry still finds the edge and finishes the job.
        for target in &targets {
            let edge_emptied = match start.get_next_mut(target) {
                Some(edge) => {
                    edge.labels.remove_owner(&owner);
                    edge.labels.is_empty()
                }
                None => false,
            };
            if !edge_emptied {
                continue;
            }

            start.remove_next(target);
            if target == &start.endpoint {
                start.remove_pre(&req.start);
                continue;
            }

            match self.store.get(target).await? {
                Some(mut end) => {
                    let unlinked = end.remove_pre(&req.start);
                    if unlinked || end.is_orphan() {
                        self.garbage_collect(Some(&end)).await?;
                    }
                }
                None => debug!(end = %target, "end node absent, no back-edge to remove"),
            }
        }

        self.garbage_collect(Some(&start)).await
    }

    // ========================================================================
    // Conflict retry
    // ========================================================================

    async fn retrying<F, Fut>(&self, mut attempt: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let mut retries = 0;
        loop {
            match attempt().await {
                Err(Error::VersionConflict { endpoint, expected, found })
                    if retries < self.config.max_retries =>
                {
                    retries += 1;
                    warn!(%endpoint, expected, found, retries, "conditional write lost a race, retrying");
                }
                result => return result,
            }
        }
    }
}

/// In-memory engine for testing and embedding.
impl Bonding<MemoryNodeStore> {
    pub fn open_memory() -> Self {
        Self::new(MemoryNodeStore::new())
    }

    /// Build an engine over the backend named by `store`.
    pub fn open(store: &StoreConfig, config: BondingConfig) -> Result<Self> {
        match store {
            StoreConfig::Memory => Ok(Self::with_config(MemoryNodeStore::new(), config)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
