//! In-memory node store.
//!
//! This is the reference implementation of `NodeStore`. Documents are kept
//! JSON-encoded in a HashMap keyed by the hashed endpoint, so decoding
//! failures surface the same way they would against a real document
//! backend.
//!
//! ## Limitations
//!
//! - **No persistence**: everything is lost on drop.
//! - **Full scan only**: there are no secondary indexes.
//!
//! Versions come from one store-wide counter and are never reused, so a
//! document that was deleted and recreated never matches a version read
//! from its previous incarnation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;
use async_trait::async_trait;

use crate::model::{EndPoint, Node, StorageKey};
use crate::{Error, Result};
use super::NodeStore;

// ============================================================================
// MemoryNodeStore
// ============================================================================

/// In-memory document storage for nodes.
#[derive(Clone)]
pub struct MemoryNodeStore {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    documents: RwLock<HashMap<StorageKey, Document>>,
    next_version: AtomicU64,
    /// Fault injection: when set, every call fails with `StoreUnavailable`.
    unavailable: AtomicBool,
}

struct Document {
    version: u64,
    body: Vec<u8>,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                documents: RwLock::new(HashMap::new()),
                next_version: AtomicU64::new(1),
                unavailable: AtomicBool::new(false),
            }),
        }
    }

}

impl Default for MemoryNodeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryNodeStore {
    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.inner.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if a document exists for `endpoint`.
    pub fn contains(&self, endpoint: &EndPoint) -> bool {
        self.inner.documents.read().contains_key(&endpoint.key())
    }

    /// Decode every stored document.
    pub fn all_nodes(&self) -> Result<Vec<Node>> {
        self.inner
            .documents
            .read()
            .iter()
            .map(|(key, doc)| -> Result<Node> {
                let mut node: Node = serde_json::from_slice(&doc.body)
                    .map_err(|source| Error::Malformed { key: key.to_string(), source })?;
                node.version = doc.version;
                Ok(node)
            })
            .collect()
    }

    /// Store a raw document body for `endpoint`, bypassing encoding and
    /// version checks. Returns the new version.
    pub fn put_raw(&self, endpoint: &EndPoint, body: impl Into<Vec<u8>>) -> u64 {
        let mut docs = self.inner.documents.write();
        let version = self.next_version();
        docs.insert(endpoint.key(), Document { version, body: body.into() });
        version
    }

    /// Make every subsequent call fail (or succeed again) as if the
    /// backend were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn next_version(&self) -> u64 {
        self.inner.next_version.fetch_add(1, Ordering::Relaxed)
    }

    fn check_available(&self) -> Result<()> {
        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable("memory store marked unavailable".into()));
        }
        Ok(())
    }
}

// ============================================================================
// NodeStore impl
// ============================================================================

#[async_trait]
impl NodeStore for MemoryNodeStore {
    async fn get(&self, endpoint: &EndPoint) -> Result<Option<Node>> {
        self.check_available()?;
        let key = endpoint.key();
        let docs = self.inner.documents.read();
        let Some(doc) = docs.get(&key) else {
            return Ok(None);
        };
        let mut node: Node = serde_json::from_slice(&doc.body)
            .map_err(|source| Error::Malformed { key: key.to_string(), source })?;
        node.version = doc.version;
        Ok(Some(node))
    }

    async fn upsert(&self, node: &Node) -> Result<u64> {
        self.check_available()?;
        let key = node.endpoint.key();
        let mut docs = self.inner.documents.write();

        // Version 0 only creates; any other version must match exactly.
        let found = docs.get(&key).map_or(0, |d| d.version);
        if found != node.version {
            return Err(Error::VersionConflict {
                endpoint: node.endpoint.clone(),
                expected: node.version,
                found,
            });
        }

        let version = self.next_version();
        let mut stored = node.clone();
        stored.version = version;
        let body = serde_json::to_vec(&stored)
            .map_err(|source| Error::Malformed { key: key.to_string(), source })?;
        docs.insert(key, Document { version, body });

        tracing::debug!(endpoint = %node.endpoint, version, "upserted node document");
        Ok(version)
    }

    async fn delete(&self, node: &Node) -> Result<()> {
        self.check_available()?;
        let key = node.endpoint.key();
        let mut docs = self.inner.documents.write();

        match docs.get(&key).map(|d| d.version) {
            None => Ok(()),
            Some(found) if found != node.version => Err(Error::VersionConflict {
                endpoint: node.endpoint.clone(),
                expected: node.version,
                found,
            }),
            Some(_) => {
                docs.remove(&key);
                tracing::debug!(endpoint = %node.endpoint, "deleted node document");
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
