use papaya::HashMap as PapayaMap;
use std::fmt;
use std::sync::Arc;

use super::{ExtensionDefinition, ExtensionRegistry, short_name};
use crate::error::{Result, StacSchemaError};

/// Registry backed by a concurrent map; definitions may be registered while
/// lookups are in flight.
pub struct InMemoryExtensionRegistry {
    definitions: PapayaMap<String, Arc<ExtensionDefinition>>,
}

impl InMemoryExtensionRegistry {
    pub fn new() -> Self {
        Self {
            definitions: PapayaMap::new(),
        }
    }

    /// Registry preloaded with the built-in extension definitions.
    pub fn builtin() -> Self {
        super::builtin::definitions()
            .into_iter()
            .fold(Self::new(), Self::with_extension)
    }

    pub fn with_extension(self, definition: ExtensionDefinition) -> Self {
        self.register(definition);
        self
    }

    /// Register a definition, replacing any earlier one with the same identifier.
    ///
    /// Compositions already cached keep the definition they were built from.
    pub fn register(&self, definition: ExtensionDefinition) {
        let identifier = definition.identifier().to_string();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            extension = %identifier,
            fields = definition.schema().len(),
            "Registered extension"
        );
        self.definitions.pin().insert(identifier, Arc::new(definition));
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ExtensionRegistry for InMemoryExtensionRegistry {
    fn lookup(&self, identifier: &str) -> Result<Arc<ExtensionDefinition>> {
        let definitions = self.definitions.pin();
        if let Some(definition) = definitions.get(identifier) {
            return Ok(Arc::clone(definition));
        }

        let short = short_name(identifier);
        definitions
            .get(short.as_ref())
            .map(Arc::clone)
            .ok_or_else(|| StacSchemaError::unknown_extension(identifier))
    }

    fn identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.definitions.pin().keys().cloned().collect();
        identifiers.sort();
        identifiers
    }
}

impl Default for InMemoryExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryExtensionRegistry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}
