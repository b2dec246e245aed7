//! Extension registry boundary: maps an extension identifier to the fields it
//! contributes to an item's `properties`.

pub mod builtin;
pub mod memory;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use url::Url;

use crate::error::Result;
use crate::types::{FieldSpec, Schema};

pub use memory::InMemoryExtensionRegistry;

/// Fields contributed by one named extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionDefinition {
    identifier: String,
    schema: Arc<Schema>,
}

impl ExtensionDefinition {
    pub fn new(identifier: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            identifier: identifier.into(),
            schema: schema.into(),
        }
    }

    /// Build a definition from a list of fields; the fragment schema is named after
    /// the identifier.
    pub fn from_fields(
        identifier: impl Into<String>,
        fields: impl IntoIterator<Item = FieldSpec>,
    ) -> Self {
        let identifier = identifier.into();
        let schema = fields
            .into_iter()
            .fold(Schema::new(format!("{identifier}Extension")), Schema::with_field);
        Self::new(identifier, schema)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }
}

/// Source of extension definitions consumed by the composition step.
pub trait ExtensionRegistry: Send + Sync {
    /// Resolve an identifier, failing with `UnknownExtension` when it is not registered.
    fn lookup(&self, identifier: &str) -> Result<Arc<ExtensionDefinition>>;

    /// Every registered identifier.
    fn identifiers(&self) -> Vec<String>;

    fn contains(&self, identifier: &str) -> bool {
        self.lookup(identifier).is_ok()
    }
}

const EXTENSIONS_HOST: &str = "stac-extensions.github.io";

/// Short name for an extension identifier.
///
/// Schema URLs hosted under `stac-extensions.github.io` resolve to their first path
/// segment (`https://stac-extensions.github.io/view/v1.0.0/schema.json` → `view`);
/// anything else is returned unchanged.
pub fn short_name(identifier: &str) -> Cow<'_, str> {
    let Ok(url) = Url::parse(identifier) else {
        return Cow::Borrowed(identifier);
    };
    if url.host_str() != Some(EXTENSIONS_HOST) {
        return Cow::Borrowed(identifier);
    }
    match url.path_segments().and_then(|mut segments| segments.next()) {
        Some(segment) if !segment.is_empty() => Cow::Owned(segment.to_string()),
        _ => Cow::Borrowed(identifier),
    }
}
