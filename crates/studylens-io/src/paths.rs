//! Path resolution and loading for user configuration

use std::path::{Path, PathBuf};
use studylens_core::{CatalogSet, ReconcilerConfig};

use crate::LoadError;

/// Resolves standard paths for studylens configuration files
#[derive(Debug, Clone)]
pub struct Paths {
    pub root: PathBuf,
}

impl Paths {
    /// Paths under `~/.studylens`
    pub fn new() -> Result<Self, LoadError> {
        let home = dirs::home_dir().ok_or(LoadError::NoHome)?;
        Ok(Self::with_root(home.join(".studylens")))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get config.json path
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    /// Get catalog.json path
    pub fn catalog_file(&self) -> PathBuf {
        self.root.join("catalog.json")
    }
}

/// Load `config.json`, or defaults when the file does not exist
pub fn load_config(paths: &Paths) -> Result<ReconcilerConfig, LoadError> {
    let path = paths.config_file();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ReconcilerConfig::default());
    }
    let text = std::fs::read_to_string(&path).map_err(|e| LoadError::io(&path, e))?;
    serde_json::from_str(&text).map_err(|e| LoadError::json(path.display().to_string(), e))
}

/// Load catalog overrides from `path`; a missing file means no overrides
pub fn load_catalogs(path: &Path) -> Result<CatalogSet, LoadError> {
    if !path.exists() {
        return Ok(CatalogSet::new());
    }
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let set = CatalogSet::from_json(&text)
        .map_err(|e| LoadError::json(path.display().to_string(), e))?;
    tracing::debug!(path = %path.display(), catalogs = set.len(), "loaded catalog overrides");
    Ok(set)
}
