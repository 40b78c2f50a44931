//! The core-tree asset: a static JSON listing of each system and the
//! ROM files present on the shelf device.

use std::path::Path;

use serde::Deserialize;

use crate::error::ArtworkError;

/// A top-level system directory in the asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreSystem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub children: Vec<CoreNode>,
}

/// A file or directory entry under a system.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub children: Vec<CoreNode>,
}

impl CoreSystem {
    /// File names directly under this system, in asset order. Nested
    /// directories (multi-disc sets, unsorted subfolders) are not
    /// descended.
    pub fn file_names(&self) -> Vec<&str> {
        self.children
            .iter()
            .filter(|node| node.kind == "file")
            .map(|node| node.name.as_str())
            .collect()
    }
}

/// Load the core-tree asset. A missing file is fatal to the run.
pub fn load_cores(path: &Path) -> Result<Vec<CoreSystem>, ArtworkError> {
    if !path.exists() {
        return Err(ArtworkError::MissingAsset(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    let systems = serde_json::from_str(&text)?;
    Ok(systems)
}
