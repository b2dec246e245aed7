use serde::{Deserialize, Serialize};

use crate::types::ExtraFields;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StacSchemaConfig {
    pub cache_config: CacheConfig,
    /// Policy for unknown top-level keys on Items and ItemCollections.
    pub item_extra_fields: ExtraFields,
}

/// How a requested extension list is turned into a composition order and cache key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionOrdering {
    /// The literal sequence is the key, and a later identifier wins a field-name
    /// collision. `["a", "b"]` and `["b", "a"]` are distinct entries.
    #[default]
    AsDeclared,
    /// Sorted and de-duplicated before folding and keying, so any permutation of
    /// the same set shares one entry and one precedence.
    Canonical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub extension_ordering: ExtensionOrdering,
    /// Entry count past which each new composition logs a warning. The cache itself
    /// never evicts.
    pub size_warning_threshold: usize,
}

impl Default for StacSchemaConfig {
    fn default() -> Self {
        Self {
            cache_config: CacheConfig::default(),
            item_extra_fields: ExtraFields::Allow,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            extension_ordering: ExtensionOrdering::AsDeclared,
            size_warning_threshold: 1024,
        }
    }
}

impl StacSchemaConfig {
    pub fn with_cache_config(mut self, cache_config: CacheConfig) -> Self {
        self.cache_config = cache_config;
        self
    }

    pub fn with_item_extra_fields(mut self, extra: ExtraFields) -> Self {
        self.item_extra_fields = extra;
        self
    }
}

impl CacheConfig {
    pub fn canonical() -> Self {
        Self {
            extension_ordering: ExtensionOrdering::Canonical,
            ..Self::default()
        }
    }

    pub fn with_size_warning_threshold(mut self, threshold: usize) -> Self {
        self.size_warning_threshold = threshold;
        self
    }
}

impl ExtensionOrdering {
    /// Normalize a requested identifier list into the sequence used for both
    /// folding and keying.
    pub fn apply(&self, identifiers: &[String]) -> Vec<String> {
        match self {
            ExtensionOrdering::AsDeclared => identifiers.to_vec(),
            ExtensionOrdering::Canonical => {
                let mut sorted = identifiers.to_vec();
                sorted.sort();
                sorted.dedup();
                sorted
            }
        }
    }
}
