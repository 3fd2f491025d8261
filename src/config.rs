//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_LABEL_PREFIX;

/// Tunables for [`Bonding`](crate::Bonding).
///
/// Deserializes with defaults for missing fields, so it can be embedded
/// as a section of a host service's config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondingConfig {
    /// Namespace prefix of owner keys (`<prefix>/<uid>`).
    pub label_prefix: String,
    /// How many times one operation is re-run after losing a conditional write.
    pub max_retries: u32,
}

impl Default for BondingConfig {
    fn default() -> Self {
        Self {
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
            max_retries: 8,
        }
    }
}

impl BondingConfig {
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}
