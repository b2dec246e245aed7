//! Typed views over validated Item and ItemCollection records.

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::composition::ItemSchemaFactory;
use crate::composition::cache::is_noop;
use crate::error::{Result, StacSchemaError, ValidationError, ValidationIssue};
use crate::registry::ExtensionRegistry;
use crate::validation::{self, FieldValue, Record};

/// A validated STAC item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    record: Record,
}

impl Item {
    pub(crate) fn from_record(record: Record) -> Self {
        Self { record }
    }

    pub fn id(&self) -> &str {
        self.record.str("id").unwrap_or_default()
    }

    pub fn stac_version(&self) -> &str {
        self.record.str("stac_version").unwrap_or_default()
    }

    pub fn properties(&self) -> Option<&Record> {
        self.record.get("properties").and_then(FieldValue::as_record)
    }

    /// A property by internal name (e.g. `off_nadir`), falling back to its default.
    pub fn property(&self, name: &str) -> Option<Value> {
        self.properties().and_then(|properties| properties.value(name))
    }

    /// `properties.datetime`, when it parses as RFC 3339.
    pub fn datetime(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.properties()?.str("datetime")?;
        DateTime::parse_from_rfc3339(raw).ok()
    }

    pub fn geometry(&self) -> Option<&Value> {
        self.record.get("geometry").and_then(FieldValue::as_value)
    }

    pub fn assets(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.record
            .get("assets")
            .and_then(FieldValue::as_map)
            .into_iter()
            .flatten()
            .filter_map(|(key, value)| value.as_record().map(|asset| (key.as_str(), asset)))
    }

    pub fn asset(&self, key: &str) -> Option<&Record> {
        self.record
            .get("assets")
            .and_then(FieldValue::as_map)
            .and_then(|assets| assets.get(key))
            .and_then(FieldValue::as_record)
    }

    pub fn links(&self) -> impl Iterator<Item = LinkRef<'_>> {
        links_of(&self.record)
    }

    pub fn bbox(&self) -> Vec<f64> {
        self.record
            .get("bbox")
            .and_then(FieldValue::as_list)
            .map(|values| values.iter().filter_map(FieldValue::as_f64).collect())
            .unwrap_or_default()
    }

    /// The declared extension list, verbatim.
    pub fn stac_extensions(&self) -> Option<Vec<&str>> {
        string_list(&self.record, "stac_extensions")
    }

    pub fn collection(&self) -> Option<&str> {
        self.record.str("collection")
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn to_value(&self) -> Result<Value> {
        self.record.to_value()
    }

    pub fn to_json(&self) -> Result<String> {
        self.record.to_json()
    }
}

/// A validated STAC item collection. Each feature was validated with its own
/// `stac_extensions`.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCollection {
    record: Record,
    features: Vec<Item>,
}

impl ItemCollection {
    pub fn validate(factory: &ItemSchemaFactory, raw: &Value) -> Result<Self> {
        let mut issues = Vec::new();
        let record = validation::validate_at(factory.collection_schema(), raw, "", &mut issues);
        check_declared_extensions(factory, raw, &mut issues);

        let mut features = Vec::new();
        if let Some(raw_features) = raw.get("features").and_then(Value::as_array) {
            for (index, feature) in raw_features.iter().enumerate() {
                let schema = factory.build_item_schema(feature)?;
                let path = format!("features[{index}]");
                let item = validation::validate_at(schema.schema(), feature, &path, &mut issues);
                if let Some(item) = item {
                    features.push(Item::from_record(item));
                }
            }
        }

        match record {
            // raw features live on only as validated items
            Some(record) if issues.is_empty() => Ok(Self {
                record: record.without("features"),
                features,
            }),
            _ => Err(ValidationError::new(issues).into()),
        }
    }

    pub fn stac_version(&self) -> &str {
        self.record.str("stac_version").unwrap_or_default()
    }

    pub fn features(&self) -> &[Item] {
        &self.features
    }

    pub fn links(&self) -> impl Iterator<Item = LinkRef<'_>> {
        links_of(&self.record)
    }

    pub fn stac_extensions(&self) -> Option<Vec<&str>> {
        string_list(&self.record, "stac_extensions")
    }

    pub fn context(&self) -> Option<&Record> {
        self.record.get("context").and_then(FieldValue::as_record)
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn to_value(&self) -> Result<Value> {
        let mut value = self.record.to_value()?;
        let features = self
            .features
            .iter()
            .map(Item::to_value)
            .collect::<Result<Vec<_>>>()?;

        let object: &mut Map<String, Value> = value.as_object_mut().ok_or_else(|| {
            StacSchemaError::serialization("collection did not serialize to an object")
        })?;
        object.insert("features".to_string(), Value::Array(features));
        Ok(value)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_value()?)
            .map_err(|err| StacSchemaError::serialization(err.to_string()))
    }
}

/// A link, classified by the shape it matched during validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkRef<'a> {
    Pagination(&'a Record),
    Link(&'a Record),
}

impl<'a> LinkRef<'a> {
    fn classify(record: &'a Record) -> Self {
        if record.schema_name() == "PaginationLink" {
            LinkRef::Pagination(record)
        } else {
            LinkRef::Link(record)
        }
    }

    pub fn record(&self) -> &'a Record {
        match self {
            LinkRef::Pagination(record) | LinkRef::Link(record) => record,
        }
    }

    pub fn href(&self) -> &'a str {
        self.record().str("href").unwrap_or_default()
    }

    pub fn rel(&self) -> &'a str {
        self.record().str("rel").unwrap_or_default()
    }

    pub fn is_pagination(&self) -> bool {
        matches!(self, LinkRef::Pagination(_))
    }
}

/// Collection-level `stac_extensions` must name registered extensions.
fn check_declared_extensions(
    factory: &ItemSchemaFactory,
    raw: &Value,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(declared) = raw.get("stac_extensions").and_then(Value::as_array) else {
        return;
    };
    let registry = factory.cache().registry();
    for (index, identifier) in declared.iter().enumerate() {
        let Some(identifier) = identifier.as_str() else {
            continue;
        };
        if !is_noop(identifier) && !registry.contains(identifier) {
            issues.push(ValidationIssue::new(
                format!("stac_extensions[{index}]"),
                format!("unknown extension '{identifier}'"),
            ));
        }
    }
}

fn links_of(record: &Record) -> impl Iterator<Item = LinkRef<'_>> {
    record
        .get("links")
        .and_then(FieldValue::as_list)
        .into_iter()
        .flatten()
        .filter_map(FieldValue::as_record)
        .map(LinkRef::classify)
}

fn string_list<'a>(record: &'a Record, name: &str) -> Option<Vec<&'a str>> {
    record
        .get(name)
        .and_then(FieldValue::as_list)
        .map(|values| values.iter().filter_map(FieldValue::as_str).collect())
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}

impl Serialize for ItemCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value()
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}
