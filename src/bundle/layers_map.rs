//! Layers map: one pixel per grid, one channel per paint layer slot.
//!
//! A channel stores `(tile + 1) / num_tiles` scaled to 0..=255, so a shader
//! can recover the atlas slot. Unassigned slots read as 0 (the empty slot).

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::core::error::{Error, Result};
use crate::terrain::{Terrain, NUM_GRIDS_X, NUM_GRIDS_Y};

/// Encode a grid's tile index for a tileset of `num_tiles` slots.
pub fn layer_channel(tile_index: i8, num_tiles: u32) -> u8 {
    let slot = (tile_index as f32 + 1.0) / num_tiles as f32;
    (slot * 255.0).round().clamp(0.0, 255.0) as u8
}

pub fn build_layers_map(terrain: &Terrain, num_tiles: u32) -> Result<RgbaImage> {
    if num_tiles == 0 {
        return Err(Error::InvalidInput("num_tiles must be positive".to_string()));
    }

    let width = NUM_GRIDS_X as u32;
    let height = NUM_GRIDS_Y as u32;
    let mut img = RgbaImage::new(width, height);

    for grid_x in 0..NUM_GRIDS_X {
        for grid_y in 0..NUM_GRIDS_Y {
            let grid = terrain.grid_at(grid_x, grid_y)?;

            let mut rgba = [0u8; 4];
            for (slot, channel) in rgba.iter_mut().enumerate().take(grid.active_layers()) {
                *channel = layer_channel(grid.layer_texture_index[slot], num_tiles);
            }

            // Rows run bottom-up
            img.put_pixel(grid_x as u32, height - 1 - grid_y as u32, Rgba(rgba));
        }
    }

    Ok(img)
}

pub fn create_layers_map(terrain: &Terrain, num_tiles: u32, out: &Path) -> Result<()> {
    build_layers_map(terrain, num_tiles)?.save_with_format(out, ImageFormat::Png)?;
    Ok(())
}
