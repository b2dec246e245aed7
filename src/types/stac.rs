//! Base STAC shapes: item properties, assets, links, paging context and the
//! top-level Item / ItemCollection schemas that composition starts from.

use once_cell::sync::Lazy;
use serde_json::json;
use std::sync::Arc;

use super::{ExtraFields, FieldSpec, FieldType, Schema};

/// The only `stac_version` accepted on input.
pub const STAC_VERSION: &str = "1.0.0";

/// Extension identifier that contributes no fields and is never looked up.
pub const NOOP_EXTENSION: &str = "checksum";

pub const ITEM_TYPE: &str = "Feature";
pub const ITEM_COLLECTION_TYPE: &str = "FeatureCollection";

static ITEM_PROPERTIES: Lazy<Arc<Schema>> = Lazy::new(|| {
    // Common metadata; anything else a producer adds is kept as-is.
    Arc::new(
        Schema::new("ItemProperties")
            .with_field(FieldSpec::required("datetime", FieldType::DateTime))
            .with_field(FieldSpec::optional("title", FieldType::String))
            .with_field(FieldSpec::optional("description", FieldType::String))
            .with_field(FieldSpec::optional("start_datetime", FieldType::DateTime))
            .with_field(FieldSpec::optional("end_datetime", FieldType::DateTime))
            .with_field(FieldSpec::optional("platform", FieldType::String))
            .with_field(FieldSpec::optional("instruments", FieldType::array(FieldType::String)))
            .with_field(FieldSpec::optional("constellation", FieldType::String))
            .with_field(FieldSpec::optional("mission", FieldType::String))
            .with_extra(ExtraFields::Allow),
    )
});

static ASSET: Lazy<Arc<Schema>> = Lazy::new(|| {
    Arc::new(
        Schema::new("Asset")
            .with_field(FieldSpec::required("href", FieldType::String))
            .with_field(FieldSpec::optional("title", FieldType::String))
            .with_field(FieldSpec::optional("description", FieldType::String))
            .with_field(FieldSpec::optional("media_type", FieldType::String).with_alias("type"))
            .with_field(FieldSpec::optional("roles", FieldType::array(FieldType::String)))
            .with_extra(ExtraFields::Allow),
    )
});

static LINK: Lazy<Arc<Schema>> = Lazy::new(|| {
    Arc::new(
        Schema::new("Link")
            .with_field(FieldSpec::required("href", FieldType::String))
            .with_field(FieldSpec::required("rel", FieldType::String))
            .with_field(FieldSpec::optional("media_type", FieldType::String).with_alias("type"))
            .with_field(FieldSpec::optional("title", FieldType::String))
            .with_extra(ExtraFields::Allow),
    )
});

static PAGINATION_LINK: Lazy<Arc<Schema>> = Lazy::new(|| {
    Arc::new(
        Schema::new("PaginationLink")
            .with_field(FieldSpec::required("href", FieldType::String))
            .with_field(FieldSpec::required(
                "rel",
                FieldType::one_of_literals(["next", "previous"]),
            ))
            .with_field(FieldSpec::required("method", FieldType::one_of_literals(["GET", "POST"])))
            .with_field(FieldSpec::optional("body", FieldType::map(FieldType::Any)))
            .with_field(FieldSpec::optional("merge", FieldType::Boolean).with_default(false))
            .with_field(FieldSpec::optional("media_type", FieldType::String).with_alias("type"))
            .with_field(FieldSpec::optional("title", FieldType::String))
            .with_extra(ExtraFields::Allow),
    )
});

static CONTEXT: Lazy<Arc<Schema>> = Lazy::new(|| {
    Arc::new(
        Schema::new("Context")
            .with_field(FieldSpec::required("returned", FieldType::Integer))
            .with_field(FieldSpec::optional("limit", FieldType::nullable(FieldType::Integer)))
            .with_field(FieldSpec::optional("matched", FieldType::Integer))
            .with_extra(ExtraFields::Forbid),
    )
});

pub fn item_properties_schema() -> Arc<Schema> {
    Arc::clone(&ITEM_PROPERTIES)
}

pub fn asset_schema() -> Arc<Schema> {
    Arc::clone(&ASSET)
}

pub fn link_schema() -> Arc<Schema> {
    Arc::clone(&LINK)
}

pub fn pagination_link_schema() -> Arc<Schema> {
    Arc::clone(&PAGINATION_LINK)
}

pub fn context_schema() -> Arc<Schema> {
    Arc::clone(&CONTEXT)
}

fn bbox_type() -> FieldType {
    FieldType::tuple(FieldType::Number, [4, 6])
}

/// The static Item shape, before any extension is applied to `properties`.
pub fn item_schema(extra: ExtraFields) -> Schema {
    Schema::new("Item")
        .with_field(
            FieldSpec::optional("type", FieldType::literal(ITEM_TYPE)).with_default(ITEM_TYPE),
        )
        .with_field(FieldSpec::required("id", FieldType::String))
        .with_field(FieldSpec::constant("stac_version", STAC_VERSION))
        .with_field(FieldSpec::optional("geometry", FieldType::Geometry).with_default(json!(null)))
        .with_field(FieldSpec::required("properties", FieldType::object(item_properties_schema())))
        .with_field(FieldSpec::required(
            "assets",
            FieldType::map(FieldType::object(asset_schema())),
        ))
        .with_field(FieldSpec::required(
            "links",
            FieldType::array(FieldType::object(link_schema())),
        ))
        .with_field(FieldSpec::required("bbox", bbox_type()))
        .with_field(FieldSpec::optional("stac_extensions", FieldType::array(FieldType::String)))
        .with_field(FieldSpec::optional("collection", FieldType::String))
        .with_extra(extra)
}

/// The ItemCollection shape. `features` is only checked to be an array here;
/// each feature is validated as an Item on its own.
pub fn item_collection_schema(extra: ExtraFields) -> Schema {
    let link = FieldType::union([
        FieldType::object(pagination_link_schema()),
        FieldType::object(link_schema()),
    ]);

    Schema::new("ItemCollection")
        .with_field(
            FieldSpec::optional("type", FieldType::literal(ITEM_COLLECTION_TYPE))
                .with_default(ITEM_COLLECTION_TYPE),
        )
        .with_field(FieldSpec::constant("stac_version", STAC_VERSION))
        .with_field(FieldSpec::required("features", FieldType::array(FieldType::Any)))
        .with_field(FieldSpec::optional("stac_extensions", FieldType::array(FieldType::String)))
        .with_field(FieldSpec::required("links", FieldType::array(link)))
        .with_field(FieldSpec::optional("context", FieldType::object(context_schema())))
        .with_extra(extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_properties_is_open() {
        let props = item_properties_schema();
        assert_eq!(props.extra(), ExtraFields::Allow);
        let required: Vec<&str> = props.required_fields().map(|f| f.name()).collect();
        assert_eq!(required, vec!["datetime"]);
    }

    #[test]
    fn test_item_schema_fields() {
        let schema = item_schema(ExtraFields::Allow);
        let version = schema.field("stac_version").unwrap();
        assert!(version.is_constant());
        assert_eq!(version.default_value(), Some(&json!(STAC_VERSION)));
        assert!(schema.field("properties").unwrap().is_required());
        assert!(!schema.field("collection").unwrap().is_required());
    }

    #[test]
    fn test_asset_type_alias() {
        let asset = asset_schema();
        assert_eq!(asset.field("media_type").unwrap().alias(), "type");
        assert!(asset.field_by_alias("type").is_some());
    }
}
