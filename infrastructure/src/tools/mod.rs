//! Tool catalogue adapters

pub mod schema;

pub use schema::JsonSchemaToolConverter;
