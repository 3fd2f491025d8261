//! Request DTOs accepted by the engine.
//!
//! Field names (`start`, `end`, `uid`, `labels`) are the JSON wire shape a
//! transport layer in front of the engine is expected to carry.

use serde::{Deserialize, Serialize};

use crate::model::{EndPoint, LabelSet};
use crate::{Error, Result};

/// Add (or re-label) the edge `start → end` on behalf of owner `uid`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InsertEdgeReq {
    pub start: EndPoint,
    pub end: EndPoint,
    /// Caller identity. The caller must keep it globally unique and traceable.
    pub uid: String,
    #[serde(default, skip_serializing_if = "LabelSet::is_empty")]
    pub labels: LabelSet,
}

impl InsertEdgeReq {
    pub fn new(start: impl Into<EndPoint>, end: impl Into<EndPoint>, uid: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            uid: uid.into(),
            labels: LabelSet::new(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.start.is_empty() {
            return Err(Error::InvalidRequest("start endpoint is empty".into()));
        }
        if self.end.is_empty() {
            return Err(Error::InvalidRequest("end endpoint is empty".into()));
        }
        if self.uid.is_empty() {
            return Err(Error::InvalidRequest("uid is empty".into()));
        }
        Ok(())
    }
}

/// Remove owner `uid`'s labels from edges leaving `start`.
///
/// The edges are selected by `end` if given, otherwise by `labels`;
/// with neither the request is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteEdgeReq {
    pub start: EndPoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EndPoint>,
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelSet>,
}

/// How a delete picks its edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Exactly the edge to this endpoint.
    Target(&'a EndPoint),
    /// Every edge whose caller-owned label set contains all these pairs.
    Matching(&'a LabelSet),
    Nothing,
}

impl DeleteEdgeReq {
    pub fn new(start: impl Into<EndPoint>, end: impl Into<EndPoint>, uid: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
            uid: uid.into(),
            labels: None,
        }
    }

    /// Delete selected by label filter instead of target endpoint.
    pub fn matching(start: impl Into<EndPoint>, uid: impl Into<String>, labels: LabelSet) -> Self {
        Self {
            start: start.into(),
            end: None,
            uid: uid.into(),
            labels: Some(labels),
        }
    }

    pub fn selection(&self) -> Selection<'_> {
        match (&self.end, &self.labels) {
            (Some(end), _) if !end.is_empty() => Selection::Target(end),
            (_, Some(labels)) if !labels.is_empty() => Selection::Matching(labels),
            _ => Selection::Nothing,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.start.is_empty() {
            return Err(Error::InvalidRequest("start endpoint is empty".into()));
        }
        if self.uid.is_empty() {
            return Err(Error::InvalidRequest("uid is empty".into()));
        }
        Ok(())
    }
}
