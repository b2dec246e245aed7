//! # STAC Schema
//!
//! Runtime schema composition and validation for STAC items whose `properties`
//! are extended by a per-item list of named extensions.
//!
//! ## Features
//!
//! - **Schemas as data**: field specs with aliases, defaults, constants and an
//!   explicit extra-fields policy
//! - **Composition cache**: the merged properties schema for an extension list is
//!   built once and shared by every later request, lock-free on the read path
//! - **Minimal serialization**: records emit only what the caller supplied, under
//!   wire aliases
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stac_schema::*;
//! use serde_json::json;
//!
//! # fn example() -> Result<()> {
//! let engine = StacSchemaEngine::global();
//! let item = engine.validate_item(&json!({
//!     "id": "scene-1",
//!     "stac_version": "1.0.0",
//!     "stac_extensions": ["view"],
//!     "properties": {"datetime": "2020-01-01T00:00:00Z", "view:off_nadir": 12.5},
//!     "assets": {},
//!     "links": [],
//!     "bbox": [0.0, 0.0, 1.0, 1.0]
//! }))?;
//!
//! assert_eq!(item.property("off_nadir"), Some(json!(12.5)));
//! let wire = item.to_value()?;
//! # Ok(())
//! # }
//! ```

pub mod composition;
pub mod core;
pub mod error;
pub mod item;
pub mod registry;
pub mod types;
pub mod validation;

pub use composition::{
    CacheStats, ComposedSchema, CompositionCache, ItemSchema, ItemSchemaFactory, decompose,
    decompose_excluding,
};
pub use self::core::{CacheConfig, ExtensionOrdering, StacSchemaConfig, StacSchemaEngine};
pub use error::Result;
pub use error::{StacSchemaError, ValidationError, ValidationIssue};
pub use item::{Item, ItemCollection, LinkRef};
pub use registry::{ExtensionDefinition, ExtensionRegistry, InMemoryExtensionRegistry};
pub use types::*;
pub use validation::{FieldValue, Record};
