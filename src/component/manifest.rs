//! Package manifest parsing
//!
//! Only the fields library expansion needs are read from `package.json`;
//! everything else in the manifest is ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::RawComponentSpec;
use crate::error::LoaderError;

/// File name of a library manifest
pub const MANIFEST_FILE: &str = "package.json";

/// Package manifest (`package.json` structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name
    #[serde(default)]
    pub name: Option<String>,
    /// Package version
    #[serde(default)]
    pub version: Option<String>,
    /// Nested component specs scoped to this package's directory
    #[serde(default)]
    pub components: Option<Vec<RawComponentSpec>>,
}

impl PackageManifest {
    /// Parse manifest text
    pub fn from_json(path: &Path, contents: &str) -> Result<Self, LoaderError> {
        serde_json::from_str(contents).map_err(|e| LoaderError::Manifest {
            path: path.to_path_buf(),
            reason: format!("Failed to parse manifest JSON: {}", e),
        })
    }

    /// Load manifest from file
    pub async fn from_file(path: &Path) -> Result<Self, LoaderError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| LoaderError::Manifest {
                path: path.to_path_buf(),
                reason: format!("Failed to read manifest file: {}", e),
            })?;
        Self::from_json(path, &contents)
    }

    /// Component specs declared by the package, if any
    pub fn component_specs(&self) -> &[RawComponentSpec] {
        self.components.as_deref().unwrap_or_default()
    }
}
