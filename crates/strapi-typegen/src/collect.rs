//! Attribute collection and declaration naming.

use crate::input::parse_field;
use crate::ir::{AttributeMap, Origin};
use crate::mapping::{API_PREFIX, MapError, map_field_type};
use crate::naming::{NamingError, case_name, pluralize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("attribute `{attribute}`: {source}")]
pub struct CollectError {
    pub attribute: String,
    #[source]
    pub source: MapError,
}

/// Map every attribute of one schema into a fresh [`AttributeMap`].
///
/// Attributes keep the schema file's key order, after the synthetic `id`.
pub fn collect_attributes(
    name: impl Into<String>,
    origin: Origin,
    attributes: &Map<String, Value>,
) -> Result<AttributeMap, CollectError> {
    let mut map = AttributeMap::new(name, origin);
    for (attribute, raw) in attributes {
        let ty = map_field_type(&parse_field(raw)).map_err(|source| CollectError {
            attribute: attribute.clone(),
            source,
        })?;
        map.insert(attribute.clone(), ty);
    }
    Ok(map)
}

/// `API` + the cased singular name, e.g. `blog-post` becomes `APIBlogPost`.
pub fn entity_declaration_name(singular_name: &str) -> Result<String, NamingError> {
    Ok(format!("{API_PREFIX}{}", case_name(singular_name)?))
}

/// Cased `components.<group>.<file>s`, e.g. `layout/hero.json` becomes
/// `ComponentsLayoutHeros`. Matches the name component fields refer to.
pub fn component_declaration_name(group: &str, file_stem: &str) -> Result<String, NamingError> {
    case_name(&format!("components.{group}.{}", pluralize(file_stem)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::COMPONENT_PREFIX;
    use serde_json::json;

    fn attributes(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn collect_seeds_id_then_schema_order() {
        let map = collect_attributes(
            "APIArticle",
            Origin::Entity,
            &attributes(json!({
                "title": { "type": "text" },
                "views": { "type": "integer" },
                "cover": { "type": "media" }
            })),
        )
        .unwrap();

        let fields: Vec<_> = map
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            fields,
            [
                ("id", "number"),
                ("title", "string"),
                ("views", "number"),
                ("cover", "Media")
            ]
        );
    }

    #[test]
    fn schema_id_overrides_synthetic_id() {
        let map = collect_attributes(
            "ComponentsSharedSeos",
            Origin::Component,
            &attributes(json!({ "id": { "type": "uid" } })),
        )
        .unwrap();
        assert_eq!(map.attributes.len(), 1);
        assert_eq!(map.attributes["id"], "string");
    }

    #[test]
    fn failing_attribute_is_named() {
        let err = collect_attributes(
            "APIArticle",
            Origin::Entity,
            &attributes(json!({
                "title": { "type": "text" },
                "author": { "type": "relation", "target": "admin" }
            })),
        )
        .unwrap_err();
        assert_eq!(err.attribute, "author");
        assert!(err.to_string().starts_with("attribute `author`"));
    }

    #[test]
    fn entity_names() {
        assert_eq!(entity_declaration_name("article").unwrap(), "APIArticle");
        assert_eq!(entity_declaration_name("blog-post").unwrap(), "APIBlogPost");
        assert!(entity_declaration_name("--").is_err());
    }

    #[test]
    fn component_names_match_field_references() {
        let declared = component_declaration_name("layout", "hero").unwrap();
        assert_eq!(declared, "ComponentsLayoutHeros");

        let referenced = map_field_type(&parse_field(&json!({
            "type": "component",
            "component": "layout.hero"
        })))
        .unwrap();
        assert_eq!(referenced, declared);
        assert!(declared.starts_with(COMPONENT_PREFIX));
    }

    #[test]
    fn component_names_never_double_the_s() {
        let name = component_declaration_name("shared", "links").unwrap();
        assert_eq!(name, "ComponentsSharedLinks");
        assert!(!name.ends_with("ss"));
    }
}
