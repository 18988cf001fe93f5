//! Tileset atlas: every paint tile side by side in one row.
//!
//! Slot 0 is an opaque black placeholder for "no tile"; tile `N` (loaded from
//! `TEXTURE<N>.png`) lands in slot `N`.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::core::error::{Error, Result};

/// File name prefix of source tiles
pub const TILE_FILE_PREFIX: &str = "TEXTURE";
/// File extension of source tiles
pub const TILE_FILE_EXTENSION: &str = "png";

/// Largest accepted tile side in pixels
pub const MAX_TILE_SIDE: u32 = 8192;

/// Color of the reserved empty slot
const EMPTY_TILE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Path of source tile `id` (1-based)
pub fn tile_path(tile_dir: &Path, id: u32) -> PathBuf {
    tile_dir.join(format!("{}{}.{}", TILE_FILE_PREFIX, id, TILE_FILE_EXTENSION))
}

/// Count tiles `TEXTURE1`, `TEXTURE2`, ... up to the first gap.
pub fn count_tiles(tile_dir: &Path) -> u32 {
    let mut count = 0;
    while tile_path(tile_dir, count + 1).is_file() {
        count += 1;
    }
    count
}

fn load_tile(path: &Path, tile_side: u32) -> Result<RgbaImage> {
    let tile = image::open(path)?.to_rgba8();
    if tile.width() != tile.height() {
        return Err(Error::InvalidInput(format!(
            "tile {} is not square ({}x{})",
            path.display(),
            tile.width(),
            tile.height()
        )));
    }

    if tile.width() == tile_side {
        return Ok(tile);
    }
    log::debug!("Resizing {} from {} to {}", path.display(), tile.width(), tile_side);
    Ok(imageops::resize(&tile, tile_side, tile_side, FilterType::CatmullRom))
}

/// Build the atlas image; returns it with the slot count (tiles + 1).
///
/// A directory without `TEXTURE1.png` is rejected.
pub fn build_tileset(tile_dir: &Path, tile_side: u32) -> Result<(RgbaImage, u32)> {
    if tile_side == 0 || tile_side > MAX_TILE_SIDE {
        return Err(Error::InvalidInput(format!(
            "tile side must be in 1..={}, got {}",
            MAX_TILE_SIDE, tile_side
        )));
    }

    let tiles = count_tiles(tile_dir);
    if tiles == 0 {
        return Err(Error::InvalidInput(format!(
            "no {} in {}",
            tile_path(Path::new(""), 1).display(),
            tile_dir.display()
        )));
    }

    let num_tiles = tiles + 1;
    let atlas_width = tile_side.checked_mul(num_tiles).ok_or_else(|| {
        Error::InvalidInput(format!("{} tiles of side {} overflow the atlas", tiles, tile_side))
    })?;
    let mut atlas = RgbaImage::from_pixel(atlas_width, tile_side, EMPTY_TILE);

    for tile_id in 1..num_tiles {
        let tile = load_tile(&tile_path(tile_dir, tile_id), tile_side)?;
        imageops::replace(&mut atlas, &tile, i64::from(tile_id) * i64::from(tile_side), 0);
    }

    Ok((atlas, num_tiles))
}

/// Build the atlas and write it to `out` as PNG.
pub fn create_tileset(tile_dir: &Path, out: &Path, tile_side: u32) -> Result<u32> {
    let (atlas, num_tiles) = build_tileset(tile_dir, tile_side)?;
    atlas.save_with_format(out, ImageFormat::Png)?;
    Ok(num_tiles)
}
