//! Data-driven validation: any [`Schema`](crate::types::Schema) value can validate
//! raw JSON into an immutable [`Record`].

pub mod engine;
pub mod record;

pub use engine::{validate, validate_at};
pub use record::{FieldValue, Record};
