use serde_json::{Value, json};
use stac_schema::*;
use std::sync::Arc;

#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// An item carrying only the required keys.
#[allow(dead_code)]
pub fn minimal_item() -> Value {
    json!({
        "id": "a",
        "stac_version": "1.0.0",
        "properties": {"datetime": "2020-01-01T00:00:00Z"},
        "assets": {},
        "links": [],
        "bbox": [0, 0, 1, 1]
    })
}

#[allow(dead_code)]
pub fn item_with_extensions(extensions: &[&str], properties: Value) -> Value {
    let mut item = minimal_item();
    item["stac_extensions"] = json!(extensions);
    item["properties"] = properties;
    item
}

/// Registry with two extensions that both define field `x`.
#[allow(dead_code)]
pub fn colliding_registry() -> InMemoryExtensionRegistry {
    InMemoryExtensionRegistry::builtin()
        .with_extension(ExtensionDefinition::from_fields(
            "ext-a",
            [FieldSpec::optional("x", FieldType::String).with_alias("a:x")],
        ))
        .with_extension(ExtensionDefinition::from_fields(
            "ext-b",
            [FieldSpec::required("x", FieldType::Number).with_alias("b:x")],
        ))
}

#[allow(dead_code)]
pub fn engine_with(
    registry: InMemoryExtensionRegistry,
    config: StacSchemaConfig,
) -> StacSchemaEngine {
    StacSchemaEngine::new(config, Arc::new(registry))
}

#[allow(dead_code)]
pub fn default_engine() -> StacSchemaEngine {
    engine_with(colliding_registry(), StacSchemaConfig::default())
}
