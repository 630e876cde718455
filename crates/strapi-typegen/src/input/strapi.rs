//! Strapi content-type and component schema parser.

use crate::ir::{Cardinality, FieldDescriptor, FieldKind};
use serde::{Deserialize, Deserializer};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Failure to load a single schema file.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid schema in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// `content-types/<name>/schema.json`
#[derive(Debug, Clone, Deserialize)]
pub struct EntitySchema {
    pub info: EntityInfo,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfo {
    pub singular_name: String,
}

/// `components/<group>/<name>.json`
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentSchema {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attributes: Map<String, Value>,
}

/// `"attributes": null` reads the same as an absent key.
fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<Map<String, Value>, D::Error> {
    Ok(Option::<Map<String, Value>>::deserialize(de)?.unwrap_or_default())
}

/// Read and deserialize one schema file.
pub fn load_schema<T: DeserializeOwned>(path: &Path) -> Result<T, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SchemaError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse one attribute entry.
///
/// Parsing never fails: modifiers with an unexpected shape are read as
/// absent, and the mapper decides what that means.
pub fn parse_field(value: &Value) -> FieldDescriptor {
    let tag = value.get("type");
    let kind = match tag.and_then(Value::as_str) {
        Some("uid") => FieldKind::Uid,
        Some("text") => FieldKind::Text,
        Some("richtext") => FieldKind::RichText,
        Some("email") => FieldKind::Email,
        Some("time") => FieldKind::Time,
        Some("date") => FieldKind::Date,
        Some("dynamiczone") => FieldKind::DynamicZone,
        Some("enumeration") => FieldKind::Enumeration {
            values: enum_values(value),
        },
        Some("json") => FieldKind::Json,
        Some("decimal") => FieldKind::Decimal,
        Some("float") => FieldKind::Float,
        Some("integer") => FieldKind::Integer,
        Some("biginteger") => FieldKind::BigInteger,
        Some("component") => FieldKind::Component {
            component: string(value, "component"),
            repeatable: flag(value, "repeatable"),
        },
        Some("relation") => FieldKind::Relation {
            target: string(value, "target"),
            relation: value
                .get("relation")
                .and_then(Value::as_str)
                .map(Cardinality::parse),
        },
        Some("media") => FieldKind::Media {
            multiple: flag(value, "multiple"),
        },
        Some(other) => FieldKind::Other(Some(other.to_string())),
        // Non-string tags pass through as their JSON text.
        None => FieldKind::Other(tag.filter(|t| !t.is_null()).map(Value::to_string)),
    };

    FieldDescriptor {
        custom_field: flag(value, "customField"),
        kind,
    }
}

fn string(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(String::from)
}

fn flag(value: &Value, key: &str) -> bool {
    value.get(key).is_some_and(is_truthy)
}

fn enum_values(value: &Value) -> Vec<String> {
    value
        .get("enum")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// JavaScript truthiness, which is how schema flags have always been read.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_component_field() {
        let field = parse_field(&json!({
            "type": "component",
            "component": "layout.hero",
            "repeatable": true
        }));
        assert!(!field.custom_field);
        assert_eq!(
            field.kind,
            FieldKind::Component {
                component: Some("layout.hero".into()),
                repeatable: true
            }
        );
    }

    #[test]
    fn parse_relation_field() {
        let field = parse_field(&json!({
            "type": "relation",
            "relation": "oneToMany",
            "target": "api::tag.tag"
        }));
        assert_eq!(
            field.kind,
            FieldKind::Relation {
                target: Some("api::tag.tag".into()),
                relation: Some(Cardinality::OneToMany)
            }
        );
    }

    #[test]
    fn custom_field_is_truthy_string() {
        let field = parse_field(&json!({
            "type": "string",
            "customField": "plugin::color-picker.color"
        }));
        assert!(field.custom_field);

        let field = parse_field(&json!({ "type": "text", "customField": "" }));
        assert!(!field.custom_field);
    }

    #[test]
    fn flags_follow_truthiness() {
        let is_multiple = |v: Value| {
            match parse_field(&json!({ "type": "media", "multiple": v })).kind {
                FieldKind::Media { multiple } => multiple,
                other => panic!("expected media, got {other:?}"),
            }
        };
        assert!(is_multiple(json!(true)));
        assert!(is_multiple(json!(1)));
        assert!(is_multiple(json!("yes")));
        assert!(!is_multiple(json!(false)));
        assert!(!is_multiple(json!(0)));
        assert!(!is_multiple(json!(null)));
    }

    #[test]
    fn malformed_enum_reads_as_empty() {
        let field = parse_field(&json!({ "type": "enumeration", "enum": "draft" }));
        assert_eq!(field.kind, FieldKind::Enumeration { values: vec![] });
    }

    #[test]
    fn unknown_and_missing_tags() {
        assert_eq!(
            parse_field(&json!({ "type": "boolean" })).kind,
            FieldKind::Other(Some("boolean".into()))
        );
        assert_eq!(parse_field(&json!({})).kind, FieldKind::Other(None));
        assert_eq!(parse_field(&json!("text")).kind, FieldKind::Other(None));
    }

    #[test]
    fn entity_schema_requires_singular_name() {
        let ok: Result<EntitySchema, _> = serde_json::from_value(json!({
            "info": { "singularName": "article", "pluralName": "articles" },
            "attributes": { "title": { "type": "text" } }
        }));
        assert_eq!(ok.unwrap().info.singular_name, "article");

        let missing: Result<EntitySchema, _> =
            serde_json::from_value(json!({ "attributes": {} }));
        assert!(missing.is_err());
    }

    #[test]
    fn null_attributes_read_as_empty() {
        let entity: EntitySchema = serde_json::from_value(json!({
            "info": { "singularName": "placeholder" },
            "attributes": null
        }))
        .unwrap();
        assert!(entity.attributes.is_empty());

        let component: ComponentSchema =
            serde_json::from_value(json!({ "attributes": null })).unwrap();
        assert!(component.attributes.is_empty());

        let wrong: Result<ComponentSchema, _> =
            serde_json::from_value(json!({ "attributes": [] }));
        assert!(wrong.is_err());
    }

    #[test]
    fn attribute_order_is_preserved() {
        let schema: ComponentSchema = serde_json::from_str(
            r#"{"attributes": {"zeta": {"type": "text"}, "alpha": {"type": "text"}}}"#,
        )
        .unwrap();
        let keys: Vec<_> = schema.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }
}
