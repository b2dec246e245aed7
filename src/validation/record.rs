//! Validated records and their serialization contract.
//!
//! A [`Record`] remembers which fields the caller actually supplied. Serialization
//! emits exactly those (under their wire alias), every constant field, and any
//! extra keys the schema allowed through. Defaults are visible through
//! [`Record::value`] but are never written back out.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{Result, StacSchemaError};
use crate::types::Schema;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Value(Value),
    Object(Record),
    List(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
}

impl FieldValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_f64)
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Object(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, FieldValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(match self {
            Self::Value(value) => value.clone(),
            Self::Object(record) => record.to_value()?,
            Self::List(items) => Value::Array(
                items
                    .iter()
                    .map(FieldValue::to_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Self::Map(entries) => {
                let mut out = Map::with_capacity(entries.len());
                for (key, value) in entries {
                    out.insert(key.clone(), value.to_json()?);
                }
                Value::Object(out)
            }
        })
    }
}

/// An object validated against a [`Schema`]. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<Schema>,
    values: IndexMap<String, FieldValue>,
    extra: IndexMap<String, Value>,
}

impl Record {
    pub(crate) fn new(
        schema: Arc<Schema>,
        values: IndexMap<String, FieldValue>,
        extra: IndexMap<String, Value>,
    ) -> Self {
        Self {
            schema,
            values,
            extra,
        }
    }

    /// Drop a supplied field, e.g. one whose validated form is held elsewhere.
    pub(crate) fn without(mut self, name: &str) -> Self {
        self.values.shift_remove(name);
        self
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn schema_name(&self) -> &str {
        self.schema.name()
    }

    /// A supplied field, by internal name. Defaults are not returned here.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Supplied value as JSON, falling back to the field default.
    pub fn value(&self, name: &str) -> Option<Value> {
        match self.values.get(name) {
            Some(value) => value.to_json().ok(),
            None => self
                .schema
                .field(name)
                .and_then(|field| field.default_value())
                .cloned(),
        }
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Keys accepted under an `Allow` extra-fields policy, in input order.
    pub fn extra(&self) -> &IndexMap<String, Value> {
        &self.extra
    }

    pub fn fields_set(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Wire form: aliases as keys, unset fields omitted, constants always present.
    pub fn to_value(&self) -> Result<Value> {
        let mut out = Map::with_capacity(self.values.len() + self.extra.len());

        for (name, value) in &self.values {
            let field = self.schema.field(name).ok_or_else(|| {
                StacSchemaError::serialization(format!(
                    "field '{name}' is not defined by {}",
                    self.schema.name()
                ))
            })?;
            out.insert(field.alias().to_string(), value.to_json()?);
        }

        for field in self.schema.fields().values() {
            if !field.is_constant() || self.values.contains_key(field.name()) {
                continue;
            }
            let value = field.default_value().ok_or_else(|| {
                StacSchemaError::serialization(format!(
                    "constant field '{}' has no value",
                    field.name()
                ))
            })?;
            out.insert(field.alias().to_string(), value.clone());
        }

        for (key, value) in &self.extra {
            if out.contains_key(key) {
                return Err(StacSchemaError::serialization(format!(
                    "extra key '{key}' collides with a field alias of {}",
                    self.schema.name()
                )));
            }
            out.insert(key.clone(), value.clone());
        }

        Ok(Value::Object(out))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_value()?)
            .map_err(|err| StacSchemaError::serialization(err.to_string()))
    }
}
