use indexmap::IndexMap;
use papaya::HashMap as PapayaMap;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::decompose::decompose;
use crate::core::{CacheConfig, ExtensionOrdering};
use crate::error::Result;
use crate::registry::{ExtensionRegistry, short_name};
use crate::types::{FieldSpec, NOOP_EXTENSION, Schema};

/// Merged properties schema for one extension sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedSchema {
    key: Vec<String>,
    schema: Arc<Schema>,
}

impl ComposedSchema {
    /// The extension sequence this schema was composed for, after ordering rules.
    pub fn key(&self) -> &[String] {
        &self.key
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.schema.field(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub failures: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

/// Process-wide memo of composed properties schemas.
///
/// Reads pin the map and never block. Two callers composing the same new key may
/// both do the work; the first insert wins and both get that entry. Entries are
/// never evicted.
pub struct CompositionCache {
    base: Arc<Schema>,
    registry: Arc<dyn ExtensionRegistry>,
    entries: PapayaMap<Vec<String>, Arc<ComposedSchema>>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
}

impl CompositionCache {
    pub fn new(
        base: Arc<Schema>,
        registry: Arc<dyn ExtensionRegistry>,
        config: &CacheConfig,
    ) -> Self {
        Self {
            base,
            registry,
            entries: PapayaMap::new(),
            config: config.clone(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Merged properties schema for `identifiers`, computed on first request.
    pub fn compose(&self, identifiers: &[String]) -> Result<Arc<ComposedSchema>> {
        let key: Cow<'_, [String]> = match self.config.extension_ordering {
            ExtensionOrdering::AsDeclared => Cow::Borrowed(identifiers),
            ordering @ ExtensionOrdering::Canonical => Cow::Owned(ordering.apply(identifiers)),
        };

        if let Some(cached) = self.entries.pin().get(&*key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            record_event("hit");
            #[cfg(feature = "tracing")]
            tracing::trace!(extensions = ?key, "Composition cache hit");
            return Ok(Arc::clone(cached));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        record_event("miss");

        let fields = self.fold(&key).inspect_err(|_| {
            self.failures.fetch_add(1, Ordering::Relaxed);
            record_event("failure");
        })?;

        let key = key.into_owned();
        let schema = Schema::from_fields(composed_name(&key), fields, self.base.extra());
        let composed = Arc::new(ComposedSchema {
            key: key.clone(),
            schema: Arc::new(schema),
        });

        let entries = self.entries.pin();
        let winner = match entries.try_insert(key, composed) {
            Ok(inserted) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    extensions = ?inserted.key(),
                    fields = inserted.schema().len(),
                    "Composed properties schema"
                );
                Arc::clone(inserted)
            }
            Err(occupied) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    extensions = ?occupied.current.key(),
                    "Concurrent composition already cached; discarding duplicate"
                );
                Arc::clone(occupied.current)
            }
        };

        #[cfg(feature = "tracing")]
        {
            let len = self.entries.len();
            if len > self.config.size_warning_threshold {
                tracing::warn!(
                    entries = len,
                    threshold = self.config.size_warning_threshold,
                    "Composition cache keeps growing; consider canonical extension ordering"
                );
            }
        }

        Ok(winner)
    }

    /// Base properties fields with each extension folded in, last write winning.
    fn fold(&self, identifiers: &[String]) -> Result<IndexMap<String, FieldSpec>> {
        let mut fields = decompose(&self.base);

        for identifier in identifiers {
            if is_noop(identifier) {
                continue;
            }

            let definition = self.registry.lookup(identifier)?;
            for (name, field) in decompose(definition.schema()) {
                let _replaced = fields.insert(name, field);
                #[cfg(feature = "tracing")]
                if let Some(previous) = _replaced {
                    tracing::debug!(
                        field = previous.name(),
                        extension = %identifier,
                        "Extension overrides earlier field definition"
                    );
                }
            }
        }

        Ok(fields)
    }

    pub fn base(&self) -> &Arc<Schema> {
        &self.base
    }

    pub fn registry(&self) -> &Arc<dyn ExtensionRegistry> {
        &self.registry
    }

    pub fn contains(&self, identifiers: &[String]) -> bool {
        match self.config.extension_ordering {
            ExtensionOrdering::AsDeclared => self.entries.pin().contains_key(identifiers),
            ordering @ ExtensionOrdering::Canonical => {
                self.entries.pin().contains_key(&ordering.apply(identifiers))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.pin().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

/// Whether `identifier` names the reserved extension that contributes no fields.
pub(crate) fn is_noop(identifier: &str) -> bool {
    identifier == NOOP_EXTENSION || short_name(identifier) == NOOP_EXTENSION
}

fn composed_name(key: &[String]) -> String {
    format!("ItemProperties[{}]", key.join(","))
}

#[cfg(feature = "performance-metrics")]
fn record_event(event: &'static str) {
    metrics::counter!("stac_schema_composition_total", "event" => event).increment(1);
}

#[cfg(not(feature = "performance-metrics"))]
fn record_event(_event: &'static str) {}

impl fmt::Debug for CompositionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositionCache")
            .field("base", &self.base.name())
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
