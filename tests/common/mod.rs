//! Shared helpers for the end-to-end tests.

#![allow(dead_code)]

use std::collections::HashMap;

use linkbonding::{EndPoint, LabelSet, MemoryNodeStore, Node};

pub fn labels(pairs: &[(&str, &str)]) -> LabelSet {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// All stored nodes keyed by endpoint.
pub fn snapshot(store: &MemoryNodeStore) -> HashMap<EndPoint, Node> {
    store
        .all_nodes()
        .unwrap()
        .into_iter()
        .map(|n| (n.endpoint.clone(), n))
        .collect()
}

/// Check the mirror invariant, the orphan rule and the no-empty-edge rule
/// over every stored document. Returns a description of the first violation.
pub fn check_graph(store: &MemoryNodeStore) -> Result<(), String> {
    let nodes = snapshot(store);

    for (ep, node) in &nodes {
        if node.is_orphan() {
            return Err(format!("orphan node {ep} is persisted"));
        }
        for edge in &node.nexts {
            if edge.labels.is_empty() {
                return Err(format!("edge {ep} -> {} has no labels", edge.endpoint));
            }
            let mirrored = nodes
                .get(&edge.endpoint)
                .is_some_and(|target| target.get_pre(ep).is_some());
            if !mirrored {
                return Err(format!("edge {ep} -> {} has no back-edge", edge.endpoint));
            }
        }
        for back in &node.pres {
            let forward = nodes
                .get(&back.endpoint)
                .is_some_and(|source| source.get_next(ep).is_some());
            if !forward {
                return Err(format!("back-edge {} <- {ep} has no forward edge", back.endpoint));
            }
        }
    }
    Ok(())
}
