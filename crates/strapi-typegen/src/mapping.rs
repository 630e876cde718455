//! Field descriptor to TypeScript type expression.

use crate::ir::{FieldDescriptor, FieldKind};
use crate::naming::{NamingError, case_name, pluralize};

/// Prefix of every entity declaration.
pub const API_PREFIX: &str = "API";
/// Prefix of every component declaration.
pub const COMPONENT_PREFIX: &str = "Components";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("component field has no component reference")]
    MissingComponent,
    #[error("relation target {0:?} has no second segment")]
    MissingTargetSegment(String),
    #[error(transparent)]
    Naming(#[from] NamingError),
}

/// Map a field to the TypeScript type it is emitted as.
///
/// Tags outside the known vocabulary pass through unchanged, and a missing
/// tag becomes `undefined`. Errors only arise when a reference cannot be
/// turned into an identifier.
pub fn map_field_type(field: &FieldDescriptor) -> Result<String, MapError> {
    if field.custom_field {
        return Ok("string".to_string());
    }

    let ty = match &field.kind {
        FieldKind::Uid
        | FieldKind::Text
        | FieldKind::RichText
        | FieldKind::Email
        | FieldKind::Time => "string".to_string(),
        FieldKind::Date => "Date".to_string(),
        // TODO: emit a union of the zone's allowed components.
        FieldKind::DynamicZone => "any".to_string(),
        FieldKind::Enumeration { values } => values
            .iter()
            .map(|v| format!("\"{v}\""))
            .collect::<Vec<_>>()
            .join(" | "),
        FieldKind::Json => "JSON".to_string(),
        FieldKind::Decimal | FieldKind::Float | FieldKind::Integer | FieldKind::BigInteger => {
            "number".to_string()
        }
        FieldKind::Component {
            component,
            repeatable,
        } => {
            let component = component.as_deref().ok_or(MapError::MissingComponent)?;
            let name = pluralize(&case_name(component)?);
            format!("{COMPONENT_PREFIX}{name}{}", list_suffix(*repeatable))
        }
        FieldKind::Relation { target, relation } => {
            let target = target.as_deref().unwrap_or_default();
            let segment = target
                .split('.')
                .nth(1)
                .ok_or_else(|| MapError::MissingTargetSegment(target.to_string()))?;
            let plural = relation.as_ref().is_some_and(|r| r.is_plural());
            format!("{API_PREFIX}{}{}", case_name(segment)?, list_suffix(plural))
        }
        FieldKind::Media { multiple } => format!("Media{}", list_suffix(*multiple)),
        FieldKind::Other(tag) => tag.as_deref().unwrap_or("undefined").to_string(),
    };
    Ok(ty)
}

fn list_suffix(list: bool) -> &'static str {
    if list { "[]" } else { "" }
}
