//! # Link Bonding Model
//!
//! Plain DTOs for the bonding graph: endpoints, node documents, edges and
//! their owner-scoped labels. These types cross every boundary:
//! caller ↔ engine ↔ node store.
//!
//! This module is pure data: no I/O, no state, no async.

pub mod endpoint;
pub mod labels;
pub mod node;

pub use endpoint::{EndPoint, StorageKey, key_of};
pub use labels::{EdgeLabels, LabelSet, OwnerKey, DEFAULT_LABEL_PREFIX};
pub use node::{Edge, Node};
