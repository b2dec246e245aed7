use serde_json::Value;
use std::sync::Arc;

use super::cache::{ComposedSchema, CompositionCache};
use super::decompose::decompose;
use crate::error::Result;
use crate::item::Item;
use crate::types::{ExtraFields, FieldSpec, FieldType, Schema, item_collection_schema, item_schema};
use crate::validation;

/// Assembles the schema for one concrete item shape.
///
/// The assembled item schema is rebuilt on every call; only the properties
/// sub-schema goes through the [`CompositionCache`]. Copying a dozen top-level
/// specs is cheap next to folding extension fields.
#[derive(Debug)]
pub struct ItemSchemaFactory {
    item: Arc<Schema>,
    collection: Arc<Schema>,
    cache: Arc<CompositionCache>,
}

/// A per-request item schema, with the composed properties it was built from.
#[derive(Debug, Clone)]
pub struct ItemSchema {
    schema: Arc<Schema>,
    properties: Option<Arc<ComposedSchema>>,
}

impl ItemSchemaFactory {
    pub fn new(cache: Arc<CompositionCache>, extra: ExtraFields) -> Self {
        Self {
            item: Arc::new(item_schema(extra)),
            collection: Arc::new(item_collection_schema(extra)),
            cache,
        }
    }

    /// Schema for `raw`, with `properties` composed from its `stac_extensions`.
    ///
    /// A missing, empty or malformed extension list leaves the base properties in
    /// place; a malformed list is then reported by validation itself.
    pub fn build_item_schema(&self, raw: &Value) -> Result<ItemSchema> {
        let mut fields = decompose(&self.item);

        let properties = match declared_extensions(raw) {
            Some(extensions) if !extensions.is_empty() => {
                let composed = self.cache.compose(&extensions)?;
                let field = FieldSpec::required(
                    "properties",
                    FieldType::object(Arc::clone(composed.schema())),
                );
                fields.insert("properties".to_string(), field);
                Some(composed)
            }
            _ => None,
        };

        let name = match &properties {
            Some(composed) => format!("Item[{}]", composed.key().join(",")),
            None => self.item.name().to_string(),
        };

        Ok(ItemSchema {
            schema: Arc::new(Schema::from_fields(name, fields, self.item.extra())),
            properties,
        })
    }

    pub fn item_schema(&self) -> &Arc<Schema> {
        &self.item
    }

    pub fn collection_schema(&self) -> &Arc<Schema> {
        &self.collection
    }

    pub fn cache(&self) -> &Arc<CompositionCache> {
        &self.cache
    }
}

impl ItemSchema {
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Composed properties, when the item declared extensions.
    pub fn properties(&self) -> Option<&Arc<ComposedSchema>> {
        self.properties.as_ref()
    }

    pub fn validate(&self, raw: &Value) -> Result<Item> {
        validation::validate(&self.schema, raw).map(Item::from_record)
    }
}

/// `stac_extensions` of a raw item, if it is a list of strings.
fn declared_extensions(raw: &Value) -> Option<Vec<String>> {
    raw.get("stac_extensions")?
        .as_array()?
        .iter()
        .map(|value| value.as_str().map(str::to_string))
        .collect()
}
