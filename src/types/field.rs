// Field definitions: the unit every schema, extension fragment and composition is built from

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::{ExtraFields, Schema};

/// Type signature of a field, described as data so schemas can be assembled at run time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldType {
    Any,
    String,
    Number,
    Integer,
    Boolean,
    /// Any string; parsed on access rather than during validation.
    DateTime,
    Literal {
        value: Value,
    },
    /// GeoJSON geometry: `null` or an object carrying a string `type`.
    Geometry,
    Array {
        items: Box<FieldType>,
    },
    Map {
        values: Box<FieldType>,
    },
    Tuple {
        items: Box<FieldType>,
        lengths: Vec<usize>,
    },
    Object {
        schema: Arc<Schema>,
    },
    /// Variants are tried in order; the first that validates wins.
    Union {
        variants: Vec<FieldType>,
    },
    Nullable {
        inner: Box<FieldType>,
    },
}

impl FieldType {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal {
            value: value.into(),
        }
    }

    pub fn one_of_literals<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Union {
            variants: values.into_iter().map(Self::literal).collect(),
        }
    }

    pub fn array(items: FieldType) -> Self {
        Self::Array {
            items: Box::new(items),
        }
    }

    pub fn map(values: FieldType) -> Self {
        Self::Map {
            values: Box::new(values),
        }
    }

    pub fn tuple(items: FieldType, lengths: impl Into<Vec<usize>>) -> Self {
        Self::Tuple {
            items: Box::new(items),
            lengths: lengths.into(),
        }
    }

    pub fn object(schema: impl Into<Arc<Schema>>) -> Self {
        Self::Object {
            schema: schema.into(),
        }
    }

    pub fn union(variants: impl Into<Vec<FieldType>>) -> Self {
        Self::Union {
            variants: variants.into(),
        }
    }

    pub fn nullable(inner: FieldType) -> Self {
        Self::Nullable {
            inner: Box::new(inner),
        }
    }

    /// Extra-fields policy of the object this type describes, if it describes one.
    pub fn extra_fields(&self) -> Option<ExtraFields> {
        match self {
            Self::Object { schema } => Some(schema.extra()),
            Self::Nullable { inner } => inner.extra_fields(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Integer => write!(f, "integer"),
            Self::Boolean => write!(f, "boolean"),
            Self::DateTime => write!(f, "datetime"),
            Self::Literal { value } => write!(f, "{value}"),
            Self::Geometry => write!(f, "geometry"),
            Self::Array { items } => write!(f, "array<{items}>"),
            Self::Map { values } => write!(f, "map<{values}>"),
            Self::Tuple { items, lengths } => write!(f, "tuple<{items}; {lengths:?}>"),
            Self::Object { schema } => write!(f, "{}", schema.name()),
            Self::Union { variants } => {
                let rendered: Vec<String> = variants.iter().map(ToString::to_string).collect();
                write!(f, "{}", rendered.join(" | "))
            }
            Self::Nullable { inner } => write!(f, "{inner}?"),
        }
    }
}

/// One field's definition. Immutable once built; composition works on clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: String,
    alias: String,
    field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    required: bool,
    #[serde(default)]
    constant: bool,
}

impl FieldSpec {
    /// A field that must be present on input.
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            alias: name.clone(),
            name,
            field_type,
            default: None,
            required: true,
            constant: false,
        }
    }

    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// A field fixed to `value`: any other input value is rejected, and it is
    /// always treated as supplied.
    pub fn constant(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            default: Some(value.clone()),
            constant: true,
            required: false,
            ..Self::required(name, FieldType::Literal { value })
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_constant(&self) -> bool {
        self.constant
    }

    pub fn allows_extra_fields(&self) -> bool {
        matches!(self.field_type.extra_fields(), Some(ExtraFields::Allow))
    }
}
