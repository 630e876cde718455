//! TypeScript declarations from Strapi content-type schemas.
//!
//! `strapi-typegen` reads every entity schema (`src/api/*/content-types/*/schema.json`)
//! and component schema (`src/components/<group>/*.json`) of a Strapi project
//! and renders one `export interface` per schema, followed by a handful of
//! built-in response envelope types.
//!
//! # Architecture
//!
//! ```text
//! Discovery        Walkers              Mapping                Output
//! ─────────     ────────────     ──────────────────     ──────────────────
//! api/*       ─> walk_entities ─┐  parse_field            render_declarations
//! components/ ─> walk_components┴> map_field_type ─> AttributeMap ─> types.ts
//!                                  case_name
//! ```
//!
//! Units that cannot be read or mapped are skipped and reported as
//! [`Diagnostic`]s; the rest of the batch is still emitted.
//!
//! # Example
//!
//! ```
//! use strapi_typegen::{collect_attributes, ir::Origin, output};
//!
//! let attributes = serde_json::json!({
//!     "title": { "type": "text" },
//!     "tags": { "type": "relation", "relation": "manyToMany", "target": "api::tag.tag" }
//! });
//!
//! let map = collect_attributes("APIArticle", Origin::Entity, attributes.as_object().unwrap())
//!     .unwrap();
//! let ts = output::render_declaration(&map, output::Layout::Compact);
//! assert_eq!(ts, "export interface APIArticle {id: number;title: string;tags: APITag[];}\n\n");
//! ```

pub mod collect;
pub mod collision;
pub mod generate;
pub mod input;
pub mod ir;
pub mod mapping;
pub mod naming;
pub mod output;
pub mod walk;

pub use collect::{
    CollectError, collect_attributes, component_declaration_name, entity_declaration_name,
};
pub use collision::{CollisionError, CollisionPolicy, UnknownPolicy, resolve_collisions};
pub use generate::{GenerateError, GenerateOptions, Generated, SchemaRoot, generate};
pub use ir::{AttributeMap, Diagnostic, FieldDescriptor, FieldKind, Origin};
pub use mapping::{MapError, map_field_type};
pub use naming::{NamingError, case_name};
pub use output::{Layout, TypeScriptOptions, render_declarations};
pub use walk::{Walk, walk_components, walk_entities};
