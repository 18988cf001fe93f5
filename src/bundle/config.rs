//! Bundler configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Side length of one atlas tile in pixels
pub const DEFAULT_TILE_SIDE: u32 = 256;

/// Output layout of a texture bundle.
///
/// Loadable from JSON; omitted fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Tiles are resized to `tile_side x tile_side` before packing
    pub tile_side: u32,
    /// File name of the tileset atlas
    pub tileset_name: String,
    /// File name of the layers map
    pub layers_map_name: String,
    /// File name of the alpha map
    pub alpha_map_name: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            tile_side: DEFAULT_TILE_SIDE,
            tileset_name: "tileset.png".to_string(),
            layers_map_name: "layers_map.png".to_string(),
            alpha_map_name: "alpha_map.png".to_string(),
        }
    }
}

impl BundleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file
    pub fn load_sync(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn tileset_path(&self, tile_dir: &Path) -> PathBuf {
        tile_dir.join(&self.tileset_name)
    }

    pub fn layers_map_path(&self, tile_dir: &Path) -> PathBuf {
        tile_dir.join(&self.layers_map_name)
    }

    pub fn alpha_map_path(&self, tile_dir: &Path) -> PathBuf {
        tile_dir.join(&self.alpha_map_name)
    }
}
