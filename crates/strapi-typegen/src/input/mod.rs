//! Input parsing.
//!
//! Reads Strapi schema files into typed schema records and turns raw
//! attribute entries into [`FieldDescriptor`](crate::ir::FieldDescriptor)s.

mod strapi;

pub use strapi::{
    ComponentSchema, EntityInfo, EntitySchema, SchemaError, load_schema, parse_field,
};
