//! Handling of declarations that normalize to the same name.

use crate::ir::{AttributeMap, Diagnostic};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

/// What to do when two schemas produce the same declaration name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Keep the first declaration and drop later ones.
    #[default]
    FirstWins,
    /// Keep the last declaration and drop earlier ones.
    LastWins,
    /// Emit every declaration, duplicates included.
    Keep,
    /// Refuse to generate.
    Error,
}

impl FromStr for CollisionPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-wins" => Ok(Self::FirstWins),
            "last-wins" => Ok(Self::LastWins),
            "keep" => Ok(Self::Keep),
            "error" => Ok(Self::Error),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown collision policy `{0}` (expected first-wins, last-wins, keep or error)")]
pub struct UnknownPolicy(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("declaration `{name}` is produced by more than one schema")]
pub struct CollisionError {
    pub name: String,
}

/// Apply `policy` to `maps`. Each dropped declaration yields one diagnostic.
pub fn resolve_collisions(
    maps: Vec<AttributeMap>,
    policy: CollisionPolicy,
) -> Result<(Vec<AttributeMap>, Vec<Diagnostic>), CollisionError> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for map in &maps {
        *counts.entry(map.name.as_str()).or_default() += 1;
    }
    let duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name.to_string())
        .collect();
    if duplicates.is_empty() {
        return Ok((maps, Vec::new()));
    }

    let kept = match policy {
        CollisionPolicy::Keep => {
            for name in &duplicates {
                tracing::warn!(declaration = %name, "emitting duplicate declaration");
            }
            return Ok((maps, Vec::new()));
        }
        CollisionPolicy::Error => {
            let name = maps
                .iter()
                .map(|m| &m.name)
                .find(|name| duplicates.contains(name))
                .cloned()
                .unwrap_or_default();
            return Err(CollisionError { name });
        }
        CollisionPolicy::FirstWins => keep_first(maps.len(), maps.iter().map(|m| &m.name)),
        CollisionPolicy::LastWins => {
            let mut keep = keep_first(maps.len(), maps.iter().rev().map(|m| &m.name));
            keep.reverse();
            keep
        }
    };

    let mut resolved = Vec::with_capacity(maps.len());
    let mut diagnostics = Vec::new();
    for (map, keep) in maps.into_iter().zip(kept) {
        if keep {
            resolved.push(map);
        } else {
            tracing::warn!(declaration = %map.name, origin = %map.origin, "dropping duplicate declaration");
            diagnostics.push(Diagnostic::new(
                map.origin,
                map.name.clone(),
                "duplicate declaration name",
            ));
        }
    }
    Ok((resolved, diagnostics))
}

/// For each name in iteration order, `true` on its first occurrence only.
fn keep_first<'a>(len: usize, names: impl Iterator<Item = &'a String>) -> Vec<bool> {
    let mut seen = HashSet::with_capacity(len);
    names.map(|name| seen.insert(name)).collect()
}
