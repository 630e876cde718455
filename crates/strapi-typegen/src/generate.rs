//! End-to-end generation: discover, walk, resolve, render.

use crate::collision::{CollisionError, CollisionPolicy, resolve_collisions};
use crate::ir::{AttributeMap, Diagnostic, Origin};
use crate::output::{TypeScriptOptions, render_declarations};
use crate::walk::{
    DiscoverError, Discovered, discover_components, discover_entities, walk_components,
    walk_entities,
};
use std::path::{Path, PathBuf};

/// Where entity and component schemas live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRoot {
    pub entities_dir: PathBuf,
    pub components_dir: PathBuf,
}

impl SchemaRoot {
    /// Standard Strapi layout: `<root>/src/api` and `<root>/src/components`.
    pub fn from_project(root: &Path) -> Self {
        let src = root.join("src");
        Self {
            entities_dir: src.join("api"),
            components_dir: src.join("components"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub collisions: CollisionPolicy,
    pub typescript: TypeScriptOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Collision(#[from] CollisionError),
}

/// Result of one generation run.
#[derive(Debug)]
pub struct Generated {
    /// Emitted declarations: entities first, then components.
    pub declarations: Vec<AttributeMap>,
    /// Everything that was skipped or dropped along the way.
    pub diagnostics: Vec<Diagnostic>,
    /// Final TypeScript source.
    pub text: String,
}

impl Generated {
    pub fn entity_count(&self) -> usize {
        self.count(Origin::Entity)
    }

    pub fn component_count(&self) -> usize {
        self.count(Origin::Component)
    }

    pub fn skipped(&self) -> usize {
        self.diagnostics.len()
    }

    fn count(&self, origin: Origin) -> usize {
        self.declarations
            .iter()
            .filter(|d| d.origin == origin)
            .count()
    }
}

/// Generate the declaration file for every schema under `root`.
///
/// A missing entity or component directory contributes no declarations. Any
/// other listing failure is reported as a diagnostic. The built-in types
/// are always emitted.
pub fn generate(root: &SchemaRoot, options: &GenerateOptions) -> Result<Generated, GenerateError> {
    let mut diagnostics = Vec::new();

    let entities = discovered(
        discover_entities(&root.entities_dir),
        Origin::Entity,
        &mut diagnostics,
    );
    let components = discovered(
        discover_components(&root.components_dir),
        Origin::Component,
        &mut diagnostics,
    );
    tracing::debug!(
        entities = entities.len(),
        components = components.len(),
        "discovered schemas"
    );

    let entity_walk = walk_entities(&entities);
    let component_walk = walk_components(&components);

    let mut declarations = entity_walk.declarations;
    declarations.extend(component_walk.declarations);
    diagnostics.extend(entity_walk.diagnostics);
    diagnostics.extend(component_walk.diagnostics);

    let (declarations, dropped) = resolve_collisions(declarations, options.collisions)?;
    diagnostics.extend(dropped);

    let text = render_declarations(&declarations, &options.typescript);
    Ok(Generated {
        declarations,
        diagnostics,
        text,
    })
}

fn discovered<T>(
    result: Result<Discovered<T>, DiscoverError>,
    origin: Origin,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<T> {
    match result {
        Ok(found) => {
            diagnostics.extend(found.diagnostics);
            found.units
        }
        Err(err) if is_not_found(&err) => {
            tracing::debug!(%origin, path = %err.path.display(), "no schema directory");
            Vec::new()
        }
        Err(err) => {
            tracing::warn!(%origin, error = %err, "schema directory unavailable");
            diagnostics.push(Diagnostic::new(origin, err.path.display().to_string(), &err));
            Vec::new()
        }
    }
}

fn is_not_found(err: &DiscoverError) -> bool {
    err.source
        .io_error()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}
