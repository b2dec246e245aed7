use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

use super::record::{FieldValue, Record};
use crate::error::{Result, ValidationError, ValidationIssue};
use crate::types::{ExtraFields, FieldType, Schema};

/// Validate `value` against `schema`, returning the record or every issue found.
pub fn validate(schema: &Arc<Schema>, value: &Value) -> Result<Record> {
    let mut issues = Vec::new();
    match validate_object(schema, value, "", &mut issues) {
        Some(record) if issues.is_empty() => Ok(record),
        _ => Err(ValidationError::new(issues).into()),
    }
}

/// Collecting form of [`validate`]: issues are appended under `path`.
pub fn validate_at(
    schema: &Arc<Schema>,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Record> {
    validate_object(schema, value, path, issues)
}

fn validate_object(
    schema: &Arc<Schema>,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Record> {
    let Some(object) = value.as_object() else {
        issues.push(ValidationIssue::new(
            path,
            format!("expected an object ({})", schema.name()),
        ));
        return None;
    };

    let start = issues.len();
    let mut values = IndexMap::new();

    for field in schema.fields().values() {
        let field_path = join(path, field.alias());
        match object.get(field.alias()) {
            Some(Value::Null) if !field.is_required() && !field.is_constant() => {
                values.insert(field.name().to_string(), FieldValue::Value(Value::Null));
            }
            Some(raw) => {
                if let Some(validated) =
                    validate_value(field.field_type(), raw, &field_path, issues)
                {
                    values.insert(field.name().to_string(), validated);
                }
            }
            None if field.is_constant() => {
                if let Some(default) = field.default_value() {
                    values.insert(field.name().to_string(), FieldValue::Value(default.clone()));
                }
            }
            None if field.is_required() => {
                issues.push(ValidationIssue::new(field_path, "field required"));
            }
            None => {}
        }
    }

    let mut extra = IndexMap::new();
    for (key, raw) in object {
        if schema.field_by_alias(key).is_some() {
            continue;
        }
        match schema.extra() {
            ExtraFields::Allow => {
                extra.insert(key.clone(), raw.clone());
            }
            ExtraFields::Ignore => {}
            ExtraFields::Forbid => {
                issues.push(ValidationIssue::new(
                    join(path, key),
                    "extra fields not permitted",
                ));
            }
        }
    }

    (issues.len() == start).then(|| Record::new(Arc::clone(schema), values, extra))
}

fn validate_value(
    field_type: &FieldType,
    value: &Value,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<FieldValue> {
    let scalar = |ok: bool, expected: &str, issues: &mut Vec<ValidationIssue>| {
        if ok {
            Some(FieldValue::Value(value.clone()))
        } else {
            issues.push(ValidationIssue::new(path, format!("expected {expected}")));
            None
        }
    };

    match field_type {
        FieldType::Any => Some(FieldValue::Value(value.clone())),
        FieldType::String => scalar(value.is_string(), "a string", issues),
        FieldType::DateTime => scalar(value.is_string(), "a datetime string", issues),
        FieldType::Number => scalar(value.is_number(), "a number", issues),
        FieldType::Integer => scalar(value.is_i64() || value.is_u64(), "an integer", issues),
        FieldType::Boolean => scalar(value.is_boolean(), "a boolean", issues),
        FieldType::Literal { value: expected } => {
            if value == expected {
                Some(FieldValue::Value(value.clone()))
            } else {
                issues.push(ValidationIssue::new(
                    path,
                    format!("unexpected value; permitted: {expected}"),
                ));
                None
            }
        }
        FieldType::Geometry => {
            let ok = match value {
                Value::Null => true,
                Value::Object(object) => object.get("type").is_some_and(Value::is_string),
                _ => false,
            };
            scalar(ok, "a GeoJSON geometry object or null", issues)
        }
        FieldType::Array { items } => {
            let Some(array) = value.as_array() else {
                issues.push(ValidationIssue::new(path, "expected an array"));
                return None;
            };
            validate_items(items, array, path, issues).map(FieldValue::List)
        }
        FieldType::Tuple { items, lengths } => {
            let Some(array) = value.as_array() else {
                issues.push(ValidationIssue::new(path, "expected an array"));
                return None;
            };
            if !lengths.contains(&array.len()) {
                issues.push(ValidationIssue::new(
                    path,
                    format!("expected {lengths:?} items, got {}", array.len()),
                ));
                return None;
            }
            validate_items(items, array, path, issues).map(FieldValue::List)
        }
        FieldType::Map { values } => {
            let Some(object) = value.as_object() else {
                issues.push(ValidationIssue::new(path, "expected an object"));
                return None;
            };
            let start = issues.len();
            let mut entries = IndexMap::with_capacity(object.len());
            for (key, raw) in object {
                if let Some(validated) = validate_value(values, raw, &join(path, key), issues) {
                    entries.insert(key.clone(), validated);
                }
            }
            (issues.len() == start).then_some(FieldValue::Map(entries))
        }
        FieldType::Object { schema } => {
            validate_object(schema, value, path, issues).map(FieldValue::Object)
        }
        FieldType::Union { variants } => {
            let mut fallback = Vec::new();
            for variant in variants {
                let mut attempt = Vec::new();
                match validate_value(variant, value, path, &mut attempt) {
                    Some(validated) if attempt.is_empty() => return Some(validated),
                    _ => fallback = attempt,
                }
            }
            issues.push(ValidationIssue::new(
                path,
                format!("value does not match {field_type}"),
            ));
            // nested issues of the last variant; same-path ones are covered above
            issues.extend(fallback.into_iter().filter(|issue| issue.path != path));
            None
        }
        FieldType::Nullable { inner } => {
            if value.is_null() {
                Some(FieldValue::Value(Value::Null))
            } else {
                validate_value(inner, value, path, issues)
            }
        }
    }
}

fn validate_items(
    items: &FieldType,
    array: &[Value],
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Vec<FieldValue>> {
    let start = issues.len();
    let validated: Vec<FieldValue> = array
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| validate_value(items, raw, &format!("{path}[{index}]"), issues))
        .collect();
    (issues.len() == start).then_some(validated)
}

pub(crate) fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}
