//! Macro-lattice grid cells

use glam::{Vec3, Vec4};
use serde::Serialize;

use super::point::NUM_LAYER_SLOTS;

/// Number of mip descriptors stored per grid
pub const MAX_MIP_LEVELS: usize = 4;

/// Points of one grid at one mip level.
///
/// `point_index` is a logical element index into that mip's point array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GridDescriptor {
    pub point_index: usize,
    pub num_x: i16,
    pub num_y: i16,
    pub edge_data_base: u32,
    pub ori_edge_offsets: [i16; 4],
    pub mip_edge_offsets: [i16; 4],
    pub edge_mipped: [i8; 4],
}

impl GridDescriptor {
    /// Row-major local index of a point inside this grid patch
    pub fn local_index(&self, local_x: usize, local_y: usize) -> usize {
        local_y * self.num_x.max(0) as usize + local_x
    }

    pub fn contains(&self, local_x: usize, local_y: usize) -> bool {
        local_x < self.num_x.max(0) as usize && local_y < self.num_y.max(0) as usize
    }
}

/// One cell of the 32x32 terrain lattice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub centre: Vec3,
    pub start_x: i16,
    pub start_y: i16,
    pub corners: [Vec4; 8],
    pub mips: [GridDescriptor; MAX_MIP_LEVELS],
    /// Tile painted in each layer slot, -1 when unassigned
    pub layer_texture_index: [i8; NUM_LAYER_SLOTS],
    pub detail_level: i8,
    pub clip_render: i8,
    pub contiguous_textures: bool,
    pub max_detail_level: i8,
    pub num_layers: i8,
}

impl Grid {
    /// Number of layer slots in use, clamped to 0..=4
    pub fn active_layers(&self) -> usize {
        self.num_layers.clamp(0, NUM_LAYER_SLOTS as i8) as usize
    }

    /// Tile index of a layer slot, `None` when no tile is assigned
    pub fn layer_tile(&self, slot: usize) -> Option<u8> {
        let index = self.layer_texture_index[slot];
        (index >= 0).then_some(index as u8)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            centre: Vec3::ZERO,
            start_x: 0,
            start_y: 0,
            corners: [Vec4::ZERO; 8],
            mips: [GridDescriptor::default(); MAX_MIP_LEVELS],
            layer_texture_index: [-1; NUM_LAYER_SLOTS],
            detail_level: 0,
            clip_render: 0,
            contiguous_textures: false,
            max_detail_level: 0,
            num_layers: 0,
        }
    }
}
