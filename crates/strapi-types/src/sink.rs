//! Writing the generated file to its destinations.

use anyhow::Context;
use std::path::PathBuf;

/// One place `types.ts` is written to.
#[derive(Debug, Clone)]
pub struct Destination {
    /// `backend` or `frontend`, used in log lines.
    pub label: &'static str,
    pub dir: PathBuf,
}

impl Destination {
    pub fn new(label: &'static str, dir: impl Into<PathBuf>) -> Self {
        Self {
            label,
            dir: dir.into(),
        }
    }

    /// Create the directory if needed and write `text` to `<dir>/<file_name>`.
    pub fn write(&self, file_name: &str, text: &str) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, text)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("created types for {}: {}", self.label, path.display());
        Ok(path)
    }
}

/// Write to every destination. A failure at one does not stop the others.
///
/// Returns the number of failed writes.
pub fn write_all(destinations: &[Destination], file_name: &str, text: &str) -> usize {
    destinations
        .iter()
        .filter(|dest| match dest.write(file_name, text) {
            Ok(_) => false,
            Err(err) => {
                tracing::error!("{} output failed: {err:#}", dest.label);
                true
            }
        })
        .count()
}
