//! Owner-scoped edge labels.
//!
//! An edge's labels are partitioned by owner key (`prefix/uid`), so two
//! unrelated callers can annotate the same physical edge without touching
//! each other's metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default namespace prefix for owner keys.
pub const DEFAULT_LABEL_PREFIX: &str = "resource.id";

/// Flat key → value metadata owned by one caller.
pub type LabelSet = BTreeMap<String, String>;

/// Namespaced key identifying one owner's label set on an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerKey(String);

impl OwnerKey {
    pub fn new(prefix: &str, uid: &str) -> Self {
        Self(format!("{prefix}/{uid}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// All owners' label sets on one edge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeLabels(BTreeMap<String, LabelSet>);

impl EdgeLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, owner: &OwnerKey) -> Option<&LabelSet> {
        self.0.get(owner.as_str())
    }

    pub fn contains_owner(&self, owner: &OwnerKey) -> bool {
        self.0.contains_key(owner.as_str())
    }

    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelSet)> {
        self.0.iter().map(|(owner, set)| (owner.as_str(), set))
    }

    /// Merge `labels` into the owner's set, creating it if absent.
    /// Existing values for the same key are overwritten.
    pub fn merge<'a>(
        &mut self,
        owner: &OwnerKey,
        labels: impl IntoIterator<Item = (&'a String, &'a String)>,
    ) {
        let set = self.0.entry(owner.as_str().to_string()).or_default();
        for (k, v) in labels {
            set.insert(k.clone(), v.clone());
        }
    }

    /// Drop the owner's whole label set. Returns true if it was present.
    pub fn remove_owner(&mut self, owner: &OwnerKey) -> bool {
        self.0.remove(owner.as_str()).is_some()
    }

    /// True if the owner has a label set containing every pair in `filter`.
    ///
    /// An empty filter matches any present owner set.
    pub fn owner_matches(&self, owner: &OwnerKey, filter: &LabelSet) -> bool {
        self.get(owner)
            .is_some_and(|set| filter.iter().all(|(k, v)| set.get(k) == Some(v)))
    }
}
