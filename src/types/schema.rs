use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::FieldSpec;

/// What to do with input keys that match no field alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraFields {
    /// Keep them on the record and emit them again on serialization.
    Allow,
    /// Accept and drop them.
    #[default]
    Ignore,
    /// Reject the document.
    Forbid,
}

/// A structural type described as data: an ordered mapping of field name to spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    name: String,
    fields: IndexMap<String, FieldSpec>,
    #[serde(default)]
    extra: ExtraFields,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            extra: ExtraFields::default(),
        }
    }

    /// Build a schema from an already-decomposed field mapping.
    pub fn from_fields(
        name: impl Into<String>,
        fields: IndexMap<String, FieldSpec>,
        extra: ExtraFields,
    ) -> Self {
        Self {
            name: name.into(),
            fields,
            extra,
        }
    }

    /// Add a field; a field with the same name is replaced in place.
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.insert(field.name().to_string(), field);
        self
    }

    pub fn with_extra(mut self, extra: ExtraFields) -> Self {
        self.extra = extra;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &IndexMap<String, FieldSpec> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn field_by_alias(&self, alias: &str) -> Option<&FieldSpec> {
        self.fields.values().find(|field| field.alias() == alias)
    }

    pub fn extra(&self) -> ExtraFields {
        self.extra
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values().filter(|field| field.is_required())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schema({}) [{} fields]", self.name, self.fields.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;

    #[test]
    fn test_with_field_replaces_in_place() {
        let schema = Schema::new("Props")
            .with_field(FieldSpec::required("a", FieldType::String))
            .with_field(FieldSpec::optional("b", FieldType::Number))
            .with_field(FieldSpec::optional("a", FieldType::Integer));

        let names: Vec<&str> = schema.fields().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(schema.field("a").unwrap().field_type(), &FieldType::Integer);
        assert!(!schema.field("a").unwrap().is_required());
    }

    #[test]
    fn test_field_by_alias() {
        let schema = Schema::new("Props").with_field(
            FieldSpec::optional("cloud_cover", FieldType::Number).with_alias("eo:cloud_cover"),
        );

        assert!(schema.field_by_alias("eo:cloud_cover").is_some());
        assert!(schema.field_by_alias("cloud_cover").is_none());
        assert_eq!(schema.to_string(), "Schema(Props) [1 fields]");
    }

    #[test]
    fn test_schema_serde() {
        let schema = Schema::new("Props")
            .with_field(FieldSpec::required("datetime", FieldType::DateTime))
            .with_extra(ExtraFields::Allow);

        let json = serde_json::to_string(&schema).unwrap();
        let deserialized: Schema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, deserialized);
    }
}
