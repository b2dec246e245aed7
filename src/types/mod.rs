pub mod field;
pub mod schema;
pub mod stac;

pub use field::{FieldSpec, FieldType};
pub use schema::{ExtraFields, Schema};
pub use stac::{
    ITEM_COLLECTION_TYPE, ITEM_TYPE, NOOP_EXTENSION, STAC_VERSION, asset_schema, context_schema,
    item_collection_schema, item_properties_schema, item_schema, link_schema,
    pagination_link_schema,
};
