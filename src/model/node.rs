//! Node document: one endpoint with its outgoing and incoming adjacency lists.

use serde::{Deserialize, Serialize};
use super::{EdgeLabels, EndPoint};

/// One entry of an adjacency list.
///
/// In `nexts` the endpoint is the edge target and `labels` carry the
/// owner-scoped metadata. In `pres` the endpoint is the edge source and
/// `labels` stay empty: labels live on the forward edge only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "endPoint")]
    pub endpoint: EndPoint,
    #[serde(default, skip_serializing_if = "EdgeLabels::is_empty")]
    pub labels: EdgeLabels,
}

impl Edge {
    pub fn new(endpoint: EndPoint) -> Self {
        Self { endpoint, labels: EdgeLabels::new() }
    }
}

/// A graph node as persisted in the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "endPoint")]
    pub endpoint: EndPoint,
    /// Edges where this node is the source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nexts: Vec<Edge>,
    /// Back-references to edges where this node is the target.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pres: Vec<Edge>,
    /// Document version observed at read time. 0 means not persisted when read.
    #[serde(default)]
    pub version: u64,
}

impl Node {
    /// A fresh, unpersisted node with no edges.
    pub fn new(endpoint: EndPoint) -> Self {
        Self {
            endpoint,
            nexts: Vec::new(),
            pres: Vec::new(),
            version: 0,
        }
    }

    pub fn get_next(&self, endpoint: &EndPoint) -> Option<&Edge> {
        self.nexts.iter().find(|e| &e.endpoint == endpoint)
    }

    pub fn get_next_mut(&mut self, endpoint: &EndPoint) -> Option<&mut Edge> {
        self.nexts.iter_mut().find(|e| &e.endpoint == endpoint)
    }

    pub fn get_pre(&self, endpoint: &EndPoint) -> Option<&Edge> {
        self.pres.iter().find(|e| &e.endpoint == endpoint)
    }

    /// Forward edge to `endpoint`, appended if missing.
    pub fn ensure_next(&mut self, endpoint: &EndPoint) -> &mut Edge {
        let idx = match self.nexts.iter().position(|e| &e.endpoint == endpoint) {
            Some(idx) => idx,
            None => {
                self.nexts.push(Edge::new(endpoint.clone()));
                self.nexts.len() - 1
            }
        };
        &mut self.nexts[idx]
    }

    /// Append a back-edge from `endpoint` unless one exists. Returns true if added.
    pub fn ensure_pre(&mut self, endpoint: &EndPoint) -> bool {
        if self.get_pre(endpoint).is_some() {
            return false;
        }
        self.pres.push(Edge::new(endpoint.clone()));
        true
    }

    pub fn remove_next(&mut self, endpoint: &EndPoint) -> Option<Edge> {
        let idx = self.nexts.iter().position(|e| &e.endpoint == endpoint)?;
        Some(self.nexts.remove(idx))
    }

    pub fn remove_pre(&mut self, endpoint: &EndPoint) -> bool {
        let before = self.pres.len();
        self.pres.retain(|e| &e.endpoint != endpoint);
        self.pres.len() != before
    }

    /// No outgoing and no incoming edges.
    pub fn is_orphan(&self) -> bool {
        self.nexts.is_empty() && self.pres.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LabelSet, OwnerKey};

    #[test]
    fn test_ensure_next_does_not_duplicate() {
        let mut node = Node::new("A".into());
        node.ensure_next(&"B".into());
        node.ensure_next(&"B".into());
        node.ensure_next(&"C".into());
        assert_eq!(node.nexts.len(), 2);
        assert!(node.get_next(&"B".into()).is_some());
    }

    #[test]
    fn test_ensure_pre_reports_insertion() {
        let mut node = Node::new("B".into());
        assert!(node.ensure_pre(&"A".into()));
        assert!(!node.ensure_pre(&"A".into()));
        assert_eq!(node.pres.len(), 1);
    }

    #[test]
    fn test_remove_and_orphan() {
        let mut node = Node::new("A".into());
        assert!(node.is_orphan());
        node.ensure_next(&"B".into());
        node.ensure_pre(&"C".into());
        assert!(!node.is_orphan());

        assert!(node.remove_next(&"B".into()).is_some());
        assert!(node.remove_next(&"B".into()).is_none());
        assert!(node.remove_pre(&"C".into()));
        assert!(!node.remove_pre(&"C".into()));
        assert!(node.is_orphan());
    }

    #[test]
    fn test_document_shape() {
        let mut node = Node::new("A".into());
        let mut labels = LabelSet::new();
        labels.insert("k".into(), "v".into());
        node.ensure_next(&"B".into()).labels.merge(&OwnerKey::new("resource.id", "1"), &labels);
        node.version = 3;

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({
            "endPoint": "A",
            "nexts": [{"endPoint": "B", "labels": {"resource.id/1": {"k": "v"}}}],
            "version": 3,
        }));
    }

    #[test]
    fn test_decodes_document_without_version() {
        let node: Node = serde_json::from_str(r#"{"endPoint":"A","pres":[{"endPoint":"B"}]}"#).unwrap();
        assert_eq!(node.version, 0);
        assert!(node.nexts.is_empty());
        assert!(node.get_pre(&"B".into()).is_some());
    }
}
