//! On-disk record layouts
//!
//! Point (8 bytes):
//! ```text
//! 0  u16  height
//! 2  i8x3 normal
//! 5  u8   flags        bit 0 hollowed, bits 1..=6 reserved, bit 7 invisible poly
//! 6  u16  layer alpha  4 nibbles, layer 1 lowest
//! ```
//!
//! Map grid (32 bytes, one per mip level):
//! ```text
//! 0  u32  height data   byte offset into the mip's point array
//! 4  i16  num x
//! 6  i16  num y
//! 8  u32  edge data base
//! 12 i16x4 original edge offsets
//! 20 i16x4 mip edge offsets
//! 28 i8x4 edge mipped
//! ```
//!
//! Grid info (288 bytes):
//! ```text
//! 0   f32x3    centre
//! 12  i16      start x
//! 14  i16      start y
//! 16  f32x4x8  corners
//! 144 mapgrid x4
//! 272 i8x8     padding
//! 280 i8x4     layer texture index
//! 284 i8       detail level
//! 285 i8       clip render
//! 286 u8       bit 0 contiguous textures, bits 1..=7 max detail level (signed)
//! 287 i8       num layers
//! ```

use glam::{Vec3, Vec4};

use super::reader::{bits, sign_extend, BinaryReader};
use crate::core::error::Result;
use crate::terrain::grid::{Grid, GridDescriptor, MAX_MIP_LEVELS};
use crate::terrain::point::{HeightPoint, LayerAlpha};

pub const POINT_RECORD_SIZE: usize = 8;
pub const MAP_GRID_RECORD_SIZE: usize = 32;
pub const GRID_RECORD_SIZE: usize = 288;
pub const EDGE_ENTRY_SIZE: usize = 2;

pub fn read_point(r: &mut BinaryReader) -> Result<HeightPoint> {
    let height = r.read_u16("point height")?;
    let normal = r.read_i8_array::<3>("point normal")?;
    let (hollowed, invisible_poly) = HeightPoint::unpack_flags(r.read_u8("point flags")?);
    let layer_alpha = LayerAlpha::from_bits(r.read_u16("point layer alpha")?);

    Ok(HeightPoint {
        height,
        normal,
        hollowed,
        invisible_poly,
        layer_alpha,
    })
}

/// Map-grid descriptor still carrying the on-disk byte offset
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawMapGrid {
    pub height_data_offset: u32,
    pub num_x: i16,
    pub num_y: i16,
    pub edge_data_base: u32,
    pub ori_edge_offsets: [i16; 4],
    pub mip_edge_offsets: [i16; 4],
    pub edge_mipped: [i8; 4],
}

impl RawMapGrid {
    /// Turn the byte offset into an element index of the point array.
    pub fn resolve(&self) -> GridDescriptor {
        GridDescriptor {
            point_index: self.height_data_offset as usize / POINT_RECORD_SIZE,
            num_x: self.num_x,
            num_y: self.num_y,
            edge_data_base: self.edge_data_base,
            ori_edge_offsets: self.ori_edge_offsets,
            mip_edge_offsets: self.mip_edge_offsets,
            edge_mipped: self.edge_mipped,
        }
    }
}

pub fn read_map_grid(r: &mut BinaryReader) -> Result<RawMapGrid> {
    Ok(RawMapGrid {
        height_data_offset: r.read_u32("map grid height data")?,
        num_x: r.read_i16("map grid num x")?,
        num_y: r.read_i16("map grid num y")?,
        edge_data_base: r.read_u32("map grid edge base")?,
        ori_edge_offsets: r.read_i16_array("map grid edge offsets")?,
        mip_edge_offsets: r.read_i16_array("map grid mip edge offsets")?,
        edge_mipped: r.read_i8_array("map grid edge mipped")?,
    })
}

/// Grid record before offset resolution
#[derive(Debug, Clone, PartialEq)]
pub struct RawGrid {
    pub grid: Grid,
    pub map_grids: [RawMapGrid; MAX_MIP_LEVELS],
}

impl RawGrid {
    /// Finish the grid, keeping only logical point indices.
    pub fn resolve(self) -> Grid {
        let mut grid = self.grid;
        for (desc, raw) in grid.mips.iter_mut().zip(self.map_grids.iter()) {
            *desc = raw.resolve();
        }
        grid
    }
}

pub fn read_grid(r: &mut BinaryReader) -> Result<RawGrid> {
    let centre = Vec3::from_array(r.read_f32_array::<3>("grid centre")?);
    let start_x = r.read_i16("grid start x")?;
    let start_y = r.read_i16("grid start y")?;

    let mut corners = [Vec4::ZERO; 8];
    for corner in corners.iter_mut() {
        *corner = Vec4::from_array(r.read_f32_array::<4>("grid corner")?);
    }

    let mut map_grids = [RawMapGrid::default(); MAX_MIP_LEVELS];
    for map_grid in map_grids.iter_mut() {
        *map_grid = read_map_grid(r)?;
    }

    r.read_bytes(8, "grid padding")?;
    let layer_texture_index = r.read_i8_array::<4>("grid layer texture index")?;
    let detail_level = r.read_i8("grid detail level")?;
    let clip_render = r.read_i8("grid clip render")?;
    let packed = r.read_u8("grid detail bits")? as u32;
    let num_layers = r.read_i8("grid num layers")?;

    let grid = Grid {
        centre,
        start_x,
        start_y,
        corners,
        mips: [GridDescriptor::default(); MAX_MIP_LEVELS],
        layer_texture_index,
        detail_level,
        clip_render,
        contiguous_textures: bits(packed, 0, 1) != 0,
        max_detail_level: sign_extend(bits(packed, 1, 7), 7) as i8,
        num_layers,
    };

    Ok(RawGrid { grid, map_grids })
}
