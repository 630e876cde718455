//! Schema discovery and per-unit collection.
//!
//! Discovery lists the schema files under the entity and component
//! directories in name order. The walkers then load and collect every unit
//! in parallel. Results come back in discovery order, and failed units are
//! reported as [`Diagnostic`]s instead of aborting the batch.

use crate::collect::{collect_attributes, component_declaration_name, entity_declaration_name};
use crate::input::{ComponentSchema, EntitySchema, load_schema};
use crate::ir::{AttributeMap, Diagnostic, Origin};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// The root directory itself could not be listed.
#[derive(Debug, thiserror::Error)]
#[error("failed to list {}: {source}", path.display())]
pub struct DiscoverError {
    pub path: PathBuf,
    #[source]
    pub source: walkdir::Error,
}

/// One entity folder under the API directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityUnit {
    pub name: String,
    pub schema_path: PathBuf,
}

impl EntityUnit {
    /// Entity `name` with its schema at `<api_dir>/<name>/content-types/<name>/schema.json`.
    pub fn new(api_dir: &Path, name: impl Into<String>) -> Self {
        let name = name.into();
        let schema_path = api_dir
            .join(&name)
            .join("content-types")
            .join(&name)
            .join("schema.json");
        Self { name, schema_path }
    }
}

/// One component schema file inside a group folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentUnit {
    pub group: String,
    /// File name without the `.json` extension.
    pub stem: String,
    pub path: PathBuf,
}

impl ComponentUnit {
    fn label(&self) -> String {
        format!("{}/{}", self.group, self.stem)
    }
}

/// Units found by discovery, plus any sub-folders that could not be read.
#[derive(Debug)]
pub struct Discovered<T> {
    pub units: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Declarations collected by one walker.
#[derive(Debug, Default)]
pub struct Walk {
    pub declarations: Vec<AttributeMap>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FromIterator<Result<AttributeMap, Diagnostic>> for Walk {
    fn from_iter<I: IntoIterator<Item = Result<AttributeMap, Diagnostic>>>(iter: I) -> Self {
        let mut walk = Walk::default();
        for result in iter {
            match result {
                Ok(map) => walk.declarations.push(map),
                Err(diagnostic) => walk.diagnostics.push(diagnostic),
            }
        }
        walk
    }
}

/// List entity folders under `api_dir`, skipping hidden entries.
pub fn discover_entities(api_dir: &Path) -> Result<Discovered<EntityUnit>, DiscoverError> {
    let mut units = Vec::new();
    let mut diagnostics = Vec::new();

    for entry in listing(api_dir, 1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                nested_error(api_dir, Origin::Entity, err, &mut diagnostics)?;
                continue;
            }
        };
        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy();
            units.push(EntityUnit::new(api_dir, name));
        }
    }

    Ok(Discovered { units, diagnostics })
}

/// List `<group>/<name>.json` files under `components_dir`, skipping hidden
/// groups.
pub fn discover_components(
    components_dir: &Path,
) -> Result<Discovered<ComponentUnit>, DiscoverError> {
    let mut units = Vec::new();
    let mut diagnostics = Vec::new();

    for entry in listing(components_dir, 2) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                nested_error(components_dir, Origin::Component, err, &mut diagnostics)?;
                continue;
            }
        };
        if entry.depth() != 2 || !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();
        let Some(stem) = json_stem(&file_name) else {
            continue;
        };
        let Some(group) = path.parent().and_then(Path::file_name) else {
            continue;
        };
        units.push(ComponentUnit {
            group: group.to_string_lossy().into_owned(),
            stem: stem.to_string(),
            path: path.to_path_buf(),
        });
    }

    Ok(Discovered { units, diagnostics })
}

/// `hero.json` yields `hero`. Names with more than one dot, such as
/// `hero.backup.json`, are not component schemas.
fn json_stem(file_name: &str) -> Option<&str> {
    let mut parts = file_name.split('.');
    let stem = parts.next()?;
    (parts.next() == Some("json") && parts.next().is_none()).then_some(stem)
}

/// Load and collect every entity, in the order given.
pub fn walk_entities(units: &[EntityUnit]) -> Walk {
    units
        .par_iter()
        .map(collect_entity)
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

/// Load and collect every component, in the order given.
pub fn walk_components(units: &[ComponentUnit]) -> Walk {
    units
        .par_iter()
        .map(collect_component)
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

fn collect_entity(unit: &EntityUnit) -> Result<AttributeMap, Diagnostic> {
    let skip = |reason: &dyn std::fmt::Display| {
        tracing::warn!(entity = %unit.name, %reason, "skipping entity");
        Diagnostic::new(Origin::Entity, &unit.name, reason)
    };

    let schema: EntitySchema = load_schema(&unit.schema_path).map_err(|e| skip(&e))?;
    let name = entity_declaration_name(&schema.info.singular_name).map_err(|e| skip(&e))?;
    let map =
        collect_attributes(name, Origin::Entity, &schema.attributes).map_err(|e| skip(&e))?;

    tracing::debug!(entity = %unit.name, declaration = %map.name, "collected entity");
    Ok(map)
}

fn collect_component(unit: &ComponentUnit) -> Result<AttributeMap, Diagnostic> {
    let label = unit.label();
    let skip = |reason: &dyn std::fmt::Display| {
        tracing::warn!(component = %label, %reason, "skipping component");
        Diagnostic::new(Origin::Component, &label, reason)
    };

    let schema: ComponentSchema = load_schema(&unit.path).map_err(|e| skip(&e))?;
    let name = component_declaration_name(&unit.group, &unit.stem).map_err(|e| skip(&e))?;
    let map = collect_attributes(name, Origin::Component, &schema.attributes)
        .map_err(|e| skip(&e))?;

    tracing::debug!(component = %label, declaration = %map.name, "collected component");
    Ok(map)
}

fn listing(dir: &Path, max_depth: usize) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() != 1 || !is_hidden(entry))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Root failures abort discovery; anything deeper only skips that folder.
fn nested_error(
    root: &Path,
    origin: Origin,
    err: walkdir::Error,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), DiscoverError> {
    if err.depth() == 0 {
        return Err(DiscoverError {
            path: root.to_path_buf(),
            source: err,
        });
    }
    let unit = err
        .path()
        .unwrap_or(root)
        .display()
        .to_string();
    tracing::warn!(%unit, error = %err, "skipping unreadable folder");
    diagnostics.push(Diagnostic::new(origin, unit, &err));
    Ok(())
}
