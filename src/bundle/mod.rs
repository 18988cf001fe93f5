//! Texture bundling
//!
//! Turns a decoded terrain plus its directory of `TEXTURE<N>.png` tiles into
//! three images that together reproduce the painted surface:
//! - tileset atlas: all tiles in one row, slot 0 empty
//! - layers map: per grid, which tiles are painted in each layer slot
//! - alpha map: per LOD 0 point, the blend weight of each layer slot
//!
//! Outputs are written next to the tiles and overwritten on every run.

pub mod alpha_map;
pub mod config;
pub mod layers_map;
pub mod tileset;

pub use alpha_map::{build_alpha_map, create_alpha_map};
pub use config::BundleConfig;
pub use layers_map::{build_layers_map, create_layers_map};
pub use tileset::{build_tileset, count_tiles, create_tileset};

use std::path::{Path, PathBuf};

use crate::core::error::{Error, Result};
use crate::terrain::Terrain;

/// Locations of a bundle's outputs and its tile count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleInfo {
    pub tileset_path: PathBuf,
    /// Atlas slots including the empty one, 0 if the directory holds no tiles
    pub num_tiles: u32,
    pub layers_map_path: PathBuf,
    pub alpha_map_path: PathBuf,
}

impl BundleInfo {
    /// Check the outputs exist and the tileset is usable.
    pub fn ensure_ready(&self) -> Result<()> {
        for path in [&self.tileset_path, &self.layers_map_path, &self.alpha_map_path] {
            if !path.is_file() {
                return Err(Error::MissingBundle(path.clone()));
            }
        }
        if self.num_tiles == 0 {
            return Err(Error::InvalidInput(
                "num_tiles is 0, is the tile directory valid?".to_string(),
            ));
        }
        Ok(())
    }
}

/// Describe the bundle for `tile_dir` with the default layout.
pub fn get_bundle_info(tile_dir: impl AsRef<Path>) -> BundleInfo {
    get_bundle_info_with_config(tile_dir.as_ref(), &BundleConfig::default())
}

pub fn get_bundle_info_with_config(tile_dir: &Path, config: &BundleConfig) -> BundleInfo {
    let tiles = count_tiles(tile_dir);
    BundleInfo {
        tileset_path: config.tileset_path(tile_dir),
        num_tiles: if tiles > 0 { tiles + 1 } else { 0 },
        layers_map_path: config.layers_map_path(tile_dir),
        alpha_map_path: config.alpha_map_path(tile_dir),
    }
}

/// Write all three bundle images into `tile_dir` with the default layout.
pub fn bundle(terrain: &Terrain, tile_dir: impl AsRef<Path>) -> Result<BundleInfo> {
    bundle_with_config(terrain, tile_dir.as_ref(), &BundleConfig::default())
}

pub fn bundle_with_config(
    terrain: &Terrain,
    tile_dir: &Path,
    config: &BundleConfig,
) -> Result<BundleInfo> {
    if !tile_dir.is_dir() {
        return Err(Error::InvalidInput(format!("invalid tile directory: {}", tile_dir.display())));
    }

    let tileset_path = config.tileset_path(tile_dir);
    let num_tiles = create_tileset(tile_dir, &tileset_path, config.tile_side)?;
    log::info!("Tileset (num_tiles={}): {}", num_tiles, tileset_path.display());

    let layers_map_path = config.layers_map_path(tile_dir);
    create_layers_map(terrain, num_tiles, &layers_map_path)?;
    log::info!("Layers map: {}", layers_map_path.display());

    let alpha_map_path = config.alpha_map_path(tile_dir);
    create_alpha_map(terrain, &alpha_map_path)?;
    log::info!("Alpha map: {}", alpha_map_path.display());

    Ok(BundleInfo {
        tileset_path,
        num_tiles,
        layers_map_path,
        alpha_map_path,
    })
}
