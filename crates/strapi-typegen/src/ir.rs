//! Intermediate representation shared by the parser, mapper and renderer.
//!
//! Schema files are parsed into [`FieldDescriptor`]s, mapped to type
//! expressions, and collected into one [`AttributeMap`] per entity or
//! component before rendering.

use indexmap::IndexMap;
use std::fmt;

/// One attribute's type metadata, as read from a schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Set when the attribute is provided by a custom-field plugin.
    /// Custom fields always map to `string`, whatever their tag.
    pub custom_field: bool,
    pub kind: FieldKind,
}

/// The field's `type` tag together with the modifiers that tag uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Uid,
    Text,
    RichText,
    Email,
    Time,
    Date,
    DynamicZone,
    Enumeration {
        values: Vec<String>,
    },
    Json,
    Decimal,
    Float,
    Integer,
    BigInteger,
    Component {
        /// Dotted `group.name` reference.
        component: Option<String>,
        repeatable: bool,
    },
    Relation {
        /// Dotted reference such as `api::tag.tag`.
        target: Option<String>,
        relation: Option<Cardinality>,
    },
    Media {
        multiple: bool,
    },
    /// Any tag outside the known vocabulary; `None` when the tag is absent.
    Other(Option<String>),
}

/// Relation cardinality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
    Other(String),
}

impl Cardinality {
    pub fn parse(s: &str) -> Self {
        match s {
            "oneToOne" => Self::OneToOne,
            "oneToMany" => Self::OneToMany,
            "manyToOne" => Self::ManyToOne,
            "manyToMany" => Self::ManyToMany,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether the related side is a list.
    pub fn is_plural(&self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

/// Which walker produced a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Entity,
    Component,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Entity => f.write_str("entity"),
            Origin::Component => f.write_str("component"),
        }
    }
}

/// Resolved attributes of one declaration, in schema order.
///
/// `attributes` always starts with the synthetic `id: number` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMap {
    /// Declaration identifier (e.g. `APIArticle`).
    pub name: String,
    pub origin: Origin,
    /// Attribute name to TypeScript type expression.
    pub attributes: IndexMap<String, String>,
}

impl AttributeMap {
    pub fn new(name: impl Into<String>, origin: Origin) -> Self {
        let mut attributes = IndexMap::new();
        attributes.insert("id".to_string(), "number".to_string());
        Self {
            name: name.into(),
            origin,
            attributes,
        }
    }

    /// Insert an attribute. A repeated name keeps its original position and
    /// takes the new type.
    pub fn insert(&mut self, name: impl Into<String>, ty: impl Into<String>) {
        self.attributes.insert(name.into(), ty.into());
    }
}

/// A unit of input that was skipped, or a declaration that was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub origin: Origin,
    /// Path or name identifying the unit.
    pub unit: String,
    pub reason: String,
}

impl Diagnostic {
    pub fn new(origin: Origin, unit: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            origin,
            unit: unit.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.origin, self.unit, self.reason)
    }
}
