//! TDF header and the values derived from it

use glam::Vec3;
use serde::Serialize;

use crate::core::error::{Error, Result};

/// Grids along X in the terrain lattice
pub const NUM_GRIDS_X: usize = 32;
/// Grids along Y in the terrain lattice
pub const NUM_GRIDS_Y: usize = 32;
/// Total grid cells
pub const NUM_GRIDS: usize = NUM_GRIDS_X * NUM_GRIDS_Y;

/// Header fields as stored on disk, after the magic number
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Header {
    pub num_tex_layers: i32,
    pub terrain_width: i32,
    pub terrain_depth: i32,
    pub filter_scale: f32,
    pub num_allocated_mip_xs: i32,
    pub num_mip_levels: i32,
    pub num_allocated_mip_edges: i32,
}

impl Header {
    /// `((TerrainWidth - 1) / NumGridsX) + 1` with real division.
    pub fn grid_width(&self) -> f32 {
        ((self.terrain_width - 1) as f32 / NUM_GRIDS_X as f32) + 1.0
    }

    /// `((TerrainDepth - 1) / NumGridsY) + 1` with real division.
    pub fn grid_height(&self) -> f32 {
        ((self.terrain_depth - 1) as f32 / NUM_GRIDS_Y as f32) + 1.0
    }

    /// Truncating `TerrainWidth / NumGridsX`.
    pub fn step_x(&self) -> i32 {
        self.terrain_width / NUM_GRIDS_X as i32
    }

    /// Truncating `TerrainDepth / NumGridsY`.
    pub fn step_y(&self) -> i32 {
        self.terrain_depth / NUM_GRIDS_Y as i32
    }

    /// Byte size of the grid-metadata table
    pub fn terr_grid_data_size(&self) -> usize {
        NUM_GRIDS * crate::format::records::GRID_RECORD_SIZE
    }

    /// World scale applied to decoded points; heights are scaled by the filter scale.
    pub fn dimension_scalar(&self) -> Vec3 {
        Vec3::new(1.0, self.filter_scale, 1.0)
    }

    /// Per-grid point dimensions of each mip level, starting at level 0.
    pub fn mip_dims(&self) -> MipDims {
        MipDims {
            width: self.step_x() + 1,
            height: self.step_y() + 1,
        }
    }

    /// Elements in the mip-0 point array: `(StepX+1)*(StepY+1)*NumGrids`.
    pub fn base_point_count(&self) -> Result<usize> {
        section_len(
            (self.step_x() as i64 + 1) * (self.step_y() as i64 + 1),
            "mip 0 point array",
        )
    }
}

/// Iterator over the truncating mip dimension recurrence
/// `dim[L] = (dim[L-1] - 1) / 2 + 1`.
///
/// Each step truncates; `17` walks `17, 9, 5, 3, 2, 2, ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipDims {
    width: i32,
    height: i32,
}

impl MipDims {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Point elements for this level across all grids
    pub fn point_count(&self) -> Result<usize> {
        section_len(self.width as i64 * self.height as i64, "mip point array")
    }

    /// Edge entries for this level across all grids
    pub fn edge_count(&self) -> Result<usize> {
        section_len((self.width as i64 + self.height as i64) * 2, "mip edge array")
    }
}

impl Iterator for MipDims {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        let current = (self.width, self.height);
        self.width = (self.width - 1) / 2 + 1;
        self.height = (self.height - 1) / 2 + 1;
        Some(current)
    }
}

fn section_len(per_grid: i64, what: &str) -> Result<usize> {
    per_grid
        .checked_mul(NUM_GRIDS as i64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| Error::Format(format!("{} has invalid size ({} per grid)", what, per_grid)))
}
