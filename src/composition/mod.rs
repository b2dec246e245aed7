//! Runtime schema composition: decomposing schemas into field maps, folding
//! extension fragments into the base properties, and assembling per-request item
//! schemas.

pub mod cache;
pub mod decompose;
pub mod factory;

pub use cache::{CacheStats, ComposedSchema, CompositionCache};
pub use decompose::{decompose, decompose_excluding};
pub use factory::{ItemSchema, ItemSchemaFactory};
