//! Output backends.
//!
//! Renders collected [`AttributeMap`](crate::ir::AttributeMap)s as source
//! text. TypeScript declarations are the only target.

pub mod typescript;

pub use typescript::{
    BUILTIN_TYPES, Layout, TypeScriptOptions, render_declaration, render_declarations,
};
