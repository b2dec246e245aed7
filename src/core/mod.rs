pub mod config;
pub mod engine;

pub use config::{CacheConfig, ExtensionOrdering, StacSchemaConfig};
pub use engine::StacSchemaEngine;
