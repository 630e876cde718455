//! TypeScript declaration rendering.

use crate::ir::AttributeMap;
use serde::Deserialize;
use std::fmt::Write;

/// Supporting types every generated file ends with. Declarations refer to
/// `Media`; clients wrap responses in the envelopes.
pub const BUILTIN_TYPES: &str = "export interface Media {
  hash: string;
  ext: string;
  mime: string;
  size: number;
  url: string;
}

export interface APIResponseCollectionMetadata {
  pagination: {
    page: number;
    pageSize: number;
    pageCount: number;
    total: number;
  };
}

export interface APIResponse<T> {
  data: T;
}

export interface APIResponseCollection<T> {
  data: T[];
  meta: APIResponseCollectionMetadata;
}
";

/// How each declaration body is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `export interface X {id: number;title: string;}`
    Compact,
    /// One field per line, indented by two spaces.
    #[default]
    Pretty,
}

/// Options for TypeScript output.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptOptions {
    pub layout: Layout,
}

/// Render every declaration in order, followed by [`BUILTIN_TYPES`].
pub fn render_declarations(maps: &[AttributeMap], options: &TypeScriptOptions) -> String {
    let mut out = String::new();
    for map in maps {
        out.push_str(&render_declaration(map, options.layout));
    }
    out.push_str(BUILTIN_TYPES);
    out
}

/// Render one `export interface` block and its trailing blank line.
///
/// Single quotes are stripped from every type expression.
pub fn render_declaration(map: &AttributeMap, layout: Layout) -> String {
    let mut out = String::new();
    write!(out, "export interface {} {{", map.name).unwrap();
    for (name, ty) in &map.attributes {
        let ty = ty.replace('\'', "");
        match layout {
            Layout::Compact => write!(out, "{name}: {ty};").unwrap(),
            Layout::Pretty => write!(out, "\n  {name}: {ty};").unwrap(),
        }
    }
    if layout == Layout::Pretty {
        out.push('\n');
    }
    out.push_str("}\n\n");
    out
}
