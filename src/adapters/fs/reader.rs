use crate::domain::dependency_map::DependencyMap;
use crate::domain::ports::DependencyMapSource;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Reads a dependency map from a JSON object file.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DependencyMapSource for JsonFileSource {
    fn load(&self) -> Result<DependencyMap> {
        let json_content = std::fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read dependency map: {}", self.path.display())
        })?;
        serde_json::from_str(&json_content).with_context(|| {
            format!("Failed to parse dependency map JSON: {}", self.path.display())
        })
    }

    fn describe(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}
