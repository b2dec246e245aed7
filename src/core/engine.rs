use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;

use crate::composition::{
    CacheStats, ComposedSchema, CompositionCache, ItemSchema, ItemSchemaFactory,
};
use crate::core::StacSchemaConfig;
use crate::error::{Result, ValidationError};
use crate::item::{Item, ItemCollection};
use crate::registry::{ExtensionRegistry, InMemoryExtensionRegistry};
use crate::types::item_properties_schema;

static GLOBAL: Lazy<StacSchemaEngine> = Lazy::new(StacSchemaEngine::builtin);

/// Entry point tying the registry, composition cache and item factory together.
///
/// Cheap to share: every method takes `&self` and the engine is `Send + Sync`.
#[derive(Debug)]
pub struct StacSchemaEngine {
    factory: ItemSchemaFactory,
    config: StacSchemaConfig,
}

impl StacSchemaEngine {
    pub fn new(config: StacSchemaConfig, registry: Arc<dyn ExtensionRegistry>) -> Self {
        let cache = Arc::new(CompositionCache::new(
            item_properties_schema(),
            registry,
            &config.cache_config,
        ));
        let factory = ItemSchemaFactory::new(cache, config.item_extra_fields);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            ordering = ?config.cache_config.extension_ordering,
            extra_fields = ?config.item_extra_fields,
            "Initialized STAC schema engine"
        );

        Self { factory, config }
    }

    /// Engine with default configuration and the built-in extension registry.
    pub fn builtin() -> Self {
        Self::new(
            StacSchemaConfig::default(),
            Arc::new(InMemoryExtensionRegistry::builtin()),
        )
    }

    /// Process-wide engine over the built-in registry, created on first use.
    pub fn global() -> &'static StacSchemaEngine {
        &GLOBAL
    }

    pub fn compose(&self, extensions: &[String]) -> Result<Arc<ComposedSchema>> {
        self.factory.cache().compose(extensions)
    }

    pub fn build_item_schema(&self, raw: &Value) -> Result<ItemSchema> {
        self.factory.build_item_schema(raw)
    }

    pub fn validate_item(&self, raw: &Value) -> Result<Item> {
        self.factory.build_item_schema(raw)?.validate(raw)
    }

    pub fn validate_item_collection(&self, raw: &Value) -> Result<ItemCollection> {
        ItemCollection::validate(&self.factory, raw)
    }

    /// Parse and validate an item from JSON text.
    pub fn parse_item(&self, json: &str) -> Result<Item> {
        self.validate_item(&parse(json)?)
    }

    pub fn parse_item_collection(&self, json: &str) -> Result<ItemCollection> {
        self.validate_item_collection(&parse(json)?)
    }

    pub fn factory(&self) -> &ItemSchemaFactory {
        &self.factory
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.factory.cache().stats()
    }

    pub fn config(&self) -> &StacSchemaConfig {
        &self.config
    }
}

fn parse(json: &str) -> Result<Value> {
    serde_json::from_str(json)
        .map_err(|err| ValidationError::single("", format!("invalid JSON: {err}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_global_engine_is_shared() {
        let first = StacSchemaEngine::global();
        let second = StacSchemaEngine::global();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_parse_item_reports_bad_json() {
        let engine = StacSchemaEngine::builtin();
        let err = engine.parse_item("{not json").unwrap_err();
        assert!(err.is_validation());
        assert!(err.issues()[0].message.starts_with("invalid JSON"));
    }

    #[test]
    fn test_validate_item_composes_once() {
        let engine = StacSchemaEngine::builtin();
        let raw = json!({
            "id": "a",
            "stac_version": "1.0.0",
            "stac_extensions": ["view"],
            "properties": {"datetime": "2020-01-01T00:00:00Z", "view:off_nadir": 3.5},
            "assets": {},
            "links": [],
            "bbox": [0, 0, 1, 1]
        });

        engine.validate_item(&raw).unwrap();
        engine.validate_item(&raw).unwrap();

        let stats = engine.cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);
    }
}
