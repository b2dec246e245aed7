use indexmap::IndexMap;

use crate::types::{FieldSpec, Schema};

/// Flat, ordered copy of a schema's field definitions.
///
/// Every spec is cloned, so folding into the result never touches `schema`.
/// Nested object schemas are shared behind `Arc` and are immutable.
pub fn decompose(schema: &Schema) -> IndexMap<String, FieldSpec> {
    schema
        .fields()
        .iter()
        .map(|(name, field)| (name.clone(), field.clone()))
        .collect()
}

/// Like [`decompose`], leaving out the named fields.
pub fn decompose_excluding(schema: &Schema, excluded: &[&str]) -> IndexMap<String, FieldSpec> {
    schema
        .fields()
        .iter()
        .filter(|(name, _)| !excluded.contains(&name.as_str()))
        .map(|(name, field)| (name.clone(), field.clone()))
        .collect()
}
