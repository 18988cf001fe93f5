//! Alpha map: one pixel per LOD 0 height point, one channel per layer slot.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::core::error::Result;
use crate::terrain::{Grid, LayerAlpha, Terrain, NUM_GRIDS_X, NUM_GRIDS_Y, NUM_LAYER_SLOTS};

/// Points along each side of a LOD 0 grid patch
pub const LOD0_GRID_POINTS: usize = 17;

/// Scale a 4-bit weight to 0..=255.
pub fn alpha_channel(nibble: u8) -> u8 {
    ((nibble as f32 / 15.0) * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Channels of one point; slots without a tile are zeroed whatever the weight says.
pub fn point_channels(alpha: LayerAlpha, grid: &Grid) -> [u8; NUM_LAYER_SLOTS] {
    std::array::from_fn(|slot| match grid.layer_tile(slot) {
        Some(_) => alpha_channel(alpha.layer(slot)),
        None => 0,
    })
}

pub fn build_alpha_map(terrain: &Terrain) -> Result<RgbaImage> {
    let width = (NUM_GRIDS_X * LOD0_GRID_POINTS) as u32;
    let height = (NUM_GRIDS_Y * LOD0_GRID_POINTS) as u32;
    let mut img = RgbaImage::new(width, height);
    let mut cleaned = 0usize;

    for grid_x in 0..NUM_GRIDS_X {
        for grid_y in 0..NUM_GRIDS_Y {
            let grid = terrain.grid_at(grid_x, grid_y)?;

            for x in 0..LOD0_GRID_POINTS {
                for y in 0..LOD0_GRID_POINTS {
                    let point = terrain.point_at(grid_x, grid_y, 0, x, y)?;
                    let rgba = point_channels(point.layer_alpha, grid);
                    cleaned += rgba
                        .iter()
                        .zip(point.layer_alpha.layers())
                        .filter(|&(&out, raw)| out == 0 && raw > 0)
                        .count();

                    let px = (grid_x * LOD0_GRID_POINTS + x) as u32;
                    let row = (grid_y * LOD0_GRID_POINTS + y) as u32;
                    img.put_pixel(px, height - 1 - row, Rgba(rgba));
                }
            }
        }
    }

    if cleaned > 0 {
        log::debug!("Zeroed {} alpha channels painted without a tile", cleaned);
    }

    Ok(img)
}

pub fn create_alpha_map(terrain: &Terrain, out: &Path) -> Result<()> {
    build_alpha_map(terrain)?.save_with_format(out, ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::terrain::testing::lod0_terrain;
    use crate::terrain::HeightPoint;

    #[test]
    fn test_alpha_channel_scale() {
        assert_eq!(alpha_channel(0), 0);
        assert_eq!(alpha_channel(1), 17);
        assert_eq!(alpha_channel(8), 136);
        assert_eq!(alpha_channel(15), 255);
    }

    #[test]
    fn test_unassigned_tile_zeroes_channel() {
        let grid = Grid {
            layer_texture_index: [2, -1, 0, -1],
            num_layers: 4,
            ..Default::default()
        };
        let alpha = LayerAlpha::new([15, 15, 5, 0]);
        assert_eq!(point_channels(alpha, &grid), [255, 0, 85, 0]);
    }

    #[test]
    fn test_alpha_map_layout() {
        let terrain = lod0_terrain(
            |_, _, grid| grid.layer_texture_index = [0, 1, -1, 3],
            |gx, gy, lx, ly| {
                let alpha = if (gx, gy, lx, ly) == (2, 1, 4, 6) {
                    LayerAlpha::new([15, 3, 15, 1])
                } else {
                    LayerAlpha::default()
                };
                HeightPoint { layer_alpha: alpha, ..Default::default() }
            },
        );

        let img = build_alpha_map(&terrain).unwrap();
        assert_eq!(img.dimensions(), (544, 544));

        let px = 2 * 17 + 4;
        let py = 543 - (17 + 6);
        assert_eq!(*img.get_pixel(px, py), Rgba([255, 51, 0, 17]));
        assert_eq!(*img.get_pixel(px, 543 - 17), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_alpha_map_requires_lod0_patches() {
        let terrain = lod0_terrain(
            |gx, gy, grid| {
                if (gx, gy) == (0, 0) {
                    grid.mips[0].num_x = 9;
                }
            },
            |_, _, _, _| HeightPoint::default(),
        );
        assert!(matches!(build_alpha_map(&terrain), Err(Error::OutOfRange(_))));
    }
}
