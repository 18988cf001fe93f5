//! Decoded terrain data model
//!
//! A [`Terrain`] is built once by the format decoder and is read-only
//! afterwards. Grids are flat-indexed `x * NUM_GRIDS_Y + y`; within a grid's
//! mip patch points are row-major (`local_y * num_x + local_x`).

pub mod grid;
pub mod header;
pub mod point;

pub use grid::{Grid, GridDescriptor, MAX_MIP_LEVELS};
pub use header::{Header, MipDims, NUM_GRIDS, NUM_GRIDS_X, NUM_GRIDS_Y};
pub use point::{HeightPoint, LayerAlpha, NUM_LAYER_SLOTS};

use std::path::Path;

use crate::core::error::{Error, Result};

/// A fully decoded TDF terrain
#[derive(Debug, Clone)]
pub struct Terrain {
    header: Header,
    grids: Vec<Grid>,
    /// Point array per decoded mip level
    points: Vec<Vec<HeightPoint>>,
    /// Edge array per decoded mip level
    edges: Vec<Vec<u16>>,
}

impl Terrain {
    /// Assemble a terrain from decoded sections.
    ///
    /// `grids` must hold exactly [`NUM_GRIDS`] cells.
    pub(crate) fn from_parts(
        header: Header,
        grids: Vec<Grid>,
        points: Vec<Vec<HeightPoint>>,
        edges: Vec<Vec<u16>>,
    ) -> Result<Self> {
        if grids.len() != NUM_GRIDS {
            return Err(Error::Format(format!(
                "expected {} grids, got {}",
                NUM_GRIDS,
                grids.len()
            )));
        }
        Ok(Self { header, grids, points, edges })
    }

    /// Decode a terrain from a TDF file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        log::debug!("Read {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(&bytes)
    }

    /// Decode a terrain from an in-memory TDF buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        crate::format::decoder::TerrainDecoder::new(data).decode()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    /// Flat lattice index of grid `(x, y)`
    pub fn grid_index(x: usize, y: usize) -> usize {
        x * NUM_GRIDS_Y + y
    }

    pub fn grid_at(&self, x: usize, y: usize) -> Result<&Grid> {
        if x >= NUM_GRIDS_X || y >= NUM_GRIDS_Y {
            return Err(Error::OutOfRange(format!(
                "grid ({}, {}) outside {}x{} lattice",
                x, y, NUM_GRIDS_X, NUM_GRIDS_Y
            )));
        }
        Ok(&self.grids[Self::grid_index(x, y)])
    }

    /// Number of mip levels with a decoded point array
    pub fn mip_count(&self) -> usize {
        self.points.len()
    }

    /// Point array of a mip level
    pub fn points(&self, mip_level: usize) -> Result<&[HeightPoint]> {
        self.points
            .get(mip_level)
            .map(Vec::as_slice)
            .ok_or(Error::MissingMip(mip_level))
    }

    /// Edge array of a mip level
    pub fn edges(&self, mip_level: usize) -> Result<&[u16]> {
        self.edges
            .get(mip_level)
            .map(Vec::as_slice)
            .ok_or(Error::MissingMip(mip_level))
    }

    /// Number of mip levels with a decoded edge array
    pub fn edge_mip_count(&self) -> usize {
        self.edges.len()
    }

    /// Point `(local_x, local_y)` of grid `(grid_x, grid_y)` at a mip level.
    pub fn point_at(
        &self,
        grid_x: usize,
        grid_y: usize,
        mip_level: usize,
        local_x: usize,
        local_y: usize,
    ) -> Result<&HeightPoint> {
        let grid = self.grid_at(grid_x, grid_y)?;
        if mip_level >= MAX_MIP_LEVELS {
            return Err(Error::MissingMip(mip_level));
        }
        let points = self.points(mip_level)?;
        let desc = &grid.mips[mip_level];

        if !desc.contains(local_x, local_y) {
            return Err(Error::OutOfRange(format!(
                "point ({}, {}) outside {}x{} patch of grid ({}, {}) mip {}",
                local_x, local_y, desc.num_x, desc.num_y, grid_x, grid_y, mip_level
            )));
        }

        let index = desc.point_index + desc.local_index(local_x, local_y);
        points.get(index).ok_or_else(|| {
            Error::OutOfRange(format!(
                "point index {} of grid ({}, {}) past mip {} array of {}",
                index,
                grid_x,
                grid_y,
                mip_level,
                points.len()
            ))
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Builders for in-memory terrains used by unit tests.

    use super::*;

    /// LOD-0 terrain of 17x17 patches, 513 wide, each grid laid out
    /// contiguously in grid-index order.
    pub fn lod0_terrain(
        mut fill_grid: impl FnMut(usize, usize, &mut Grid),
        mut fill_point: impl FnMut(usize, usize, usize, usize) -> HeightPoint,
    ) -> Terrain {
        let header = Header {
            num_tex_layers: 4,
            terrain_width: 513,
            terrain_depth: 513,
            filter_scale: 0.1,
            num_allocated_mip_xs: 1,
            num_mip_levels: 1,
            num_allocated_mip_edges: 0,
        };
        let side = 17usize;
        let mut grids = vec![Grid::default(); NUM_GRIDS];
        let mut points = vec![HeightPoint::default(); NUM_GRIDS * side * side];

        for gx in 0..NUM_GRIDS_X {
            for gy in 0..NUM_GRIDS_Y {
                let idx = Terrain::grid_index(gx, gy);
                let grid = &mut grids[idx];
                grid.start_x = (gx * 16) as i16;
                grid.start_y = (gy * 16) as i16;
                grid.mips[0] = GridDescriptor {
                    point_index: idx * side * side,
                    num_x: side as i16,
                    num_y: side as i16,
                    ..Default::default()
                };
                fill_grid(gx, gy, grid);

                for ly in 0..side {
                    for lx in 0..side {
                        points[idx * side * side + ly * side + lx] = fill_point(gx, gy, lx, ly);
                    }
                }
            }
        }

        Terrain::from_parts(header, grids, vec![points], Vec::new()).unwrap()
    }
}
