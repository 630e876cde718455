//! Configuration for strapi-types.
//!
//! Loads config from:
//! 1. Global: ~/.config/strapi-types/config.toml
//! 2. Per-project: <root>/strapi-types.toml, or the file given with `--config`
//!
//! Later sources override earlier ones field by field; command line flags
//! override both.
//!
//! Example strapi-types.toml:
//! ```toml
//! [paths]
//! backend_out = "src/types"
//! frontend_out = "../web/src/types"
//!
//! [output]
//! file_name = "types.ts"
//! layout = "compact"
//! frontend = true
//!
//! [generate]
//! on_collision = "last-wins"
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use strapi_typegen::{CollisionPolicy, GenerateOptions, Layout, SchemaRoot, TypeScriptOptions};

pub const PROJECT_CONFIG: &str = "strapi-types.toml";
pub const DEFAULT_FILE_NAME: &str = "types.ts";

/// Where schemas are read from and where `types.ts` goes.
///
/// Relative paths are resolved against the project root.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub entities: Option<PathBuf>,
    pub components: Option<PathBuf>,
    pub backend_out: Option<PathBuf>,
    pub frontend_out: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub file_name: Option<String>,
    pub layout: Option<Layout>,
    /// Also write a copy for the frontend project.
    pub frontend: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub on_collision: Option<CollisionPolicy>,
}

/// Root configuration structure. Unset fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub paths: PathsConfig,
    pub output: OutputConfig,
    pub generate: GenerateConfig,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub schemas: SchemaRoot,
    pub backend_out: PathBuf,
    pub frontend_out: PathBuf,
    pub file_name: String,
    pub frontend: bool,
    pub options: GenerateOptions,
}

impl Config {
    /// Load the global config, then the project config on top.
    ///
    /// `explicit` replaces `<root>/strapi-types.toml` and must exist.
    pub fn load(root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let project = match explicit {
            Some(path) => Some(
                Self::load_file(path)?
                    .with_context(|| format!("config file {} not found", path.display()))?,
            ),
            None => Self::load_file(&root.join(PROJECT_CONFIG))?,
        };
        let global = match Self::global_config_path() {
            Some(path) => Self::load_file(&path)?,
            None => None,
        };
        Ok(Self::layered(global, project))
    }

    fn layered(global: Option<Self>, project: Option<Self>) -> Self {
        [global, project]
            .into_iter()
            .flatten()
            .fold(Self::default(), Self::merge)
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("strapi-types").join("config.toml"))
    }

    /// `Ok(None)` when the file does not exist.
    fn load_file(path: &Path) -> anyhow::Result<Option<Self>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        let config = toml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Some(config))
    }

    /// Fields set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            paths: PathsConfig {
                entities: other.paths.entities.or(self.paths.entities),
                components: other.paths.components.or(self.paths.components),
                backend_out: other.paths.backend_out.or(self.paths.backend_out),
                frontend_out: other.paths.frontend_out.or(self.paths.frontend_out),
            },
            output: OutputConfig {
                file_name: other.output.file_name.or(self.output.file_name),
                layout: other.output.layout.or(self.output.layout),
                frontend: other.output.frontend.or(self.output.frontend),
            },
            generate: GenerateConfig {
                on_collision: other.generate.on_collision.or(self.generate.on_collision),
            },
        }
    }

    /// Apply defaults and resolve paths against `root`.
    pub fn settings(self, root: &Path) -> Settings {
        let defaults = SchemaRoot::from_project(root);
        let resolve = |path: Option<PathBuf>, default: PathBuf| match path {
            Some(path) => root.join(path),
            None => default,
        };

        Settings {
            schemas: SchemaRoot {
                entities_dir: resolve(self.paths.entities, defaults.entities_dir),
                components_dir: resolve(self.paths.components, defaults.components_dir),
            },
            backend_out: resolve(self.paths.backend_out, root.join("src").join("types")),
            frontend_out: resolve(
                self.paths.frontend_out,
                root.join("..").join("frontend").join("src").join("types"),
            ),
            file_name: self
                .output
                .file_name
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            frontend: self.output.frontend.unwrap_or(false),
            options: GenerateOptions {
                collisions: self.generate.on_collision.unwrap_or_default(),
                typescript: TypeScriptOptions {
                    layout: self.output.layout.unwrap_or_default(),
                },
            },
        }
    }
}
