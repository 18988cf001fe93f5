//! TDF section decoder
//!
//! Sections are read in a fixed order:
//! magic, header, mip 0 points, higher mip points, edges, grid table,
//! then grid point offsets are resolved to element indices.

use super::reader::BinaryReader;
use super::records::{self, RawGrid, EDGE_ENTRY_SIZE, GRID_RECORD_SIZE, POINT_RECORD_SIZE};
use crate::core::error::{Error, Result};
use crate::terrain::{Grid, Header, HeightPoint, MipDims, Terrain, MAX_MIP_LEVELS, NUM_GRIDS};

/// `"TDF1"` read as a little-endian 32-bit integer
pub const MAGIC: i32 = i32::from_le_bytes(*b"TDF1");

/// Decoder position in the section order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Magic,
    Header,
    BasePoints,
    MipPoints,
    Edges,
    Grids,
    ResolveOffsets,
    Done,
}

/// Single-pass decoder over a complete TDF buffer
pub struct TerrainDecoder<'a> {
    reader: BinaryReader<'a>,
    section: Section,
    header: Header,
    points: Vec<Vec<HeightPoint>>,
    edges: Vec<Vec<u16>>,
    raw_grids: Vec<RawGrid>,
    grids: Vec<Grid>,
}

impl<'a> TerrainDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: BinaryReader::new(data),
            section: Section::Magic,
            header: Header::default(),
            points: Vec::new(),
            edges: Vec::new(),
            raw_grids: Vec::new(),
            grids: Vec::new(),
        }
    }

    /// Run every section and hand back the finished terrain.
    pub fn decode(mut self) -> Result<Terrain> {
        while self.section != Section::Done {
            self.step()?;
        }

        if self.reader.remaining() > 0 {
            log::debug!("{} trailing bytes after grid table ignored", self.reader.remaining());
        }

        Terrain::from_parts(self.header, self.grids, self.points, self.edges)
    }

    /// Decode the current section and advance to the next.
    pub fn step(&mut self) -> Result<Section> {
        let offset = self.reader.position();
        self.section = match self.section {
            Section::Magic => {
                self.read_magic()?;
                Section::Header
            }
            Section::Header => {
                self.read_header()?;
                Section::BasePoints
            }
            Section::BasePoints => {
                self.read_base_points()?;
                Section::MipPoints
            }
            Section::MipPoints => {
                self.read_mip_points()?;
                Section::Edges
            }
            Section::Edges => {
                self.read_edges()?;
                Section::Grids
            }
            Section::Grids => {
                self.read_grids()?;
                Section::ResolveOffsets
            }
            Section::ResolveOffsets => {
                self.grids = self.raw_grids.drain(..).map(RawGrid::resolve).collect();
                Section::Done
            }
            Section::Done => Section::Done,
        };
        log::trace!(
            "Section bytes {}..{}, next: {:?}",
            offset,
            self.reader.position(),
            self.section
        );
        Ok(self.section)
    }

    fn read_magic(&mut self) -> Result<()> {
        let magic = self.reader.read_i32("magic")?;
        if magic != MAGIC {
            return Err(Error::Format(format!(
                "incorrect magic number: {:#010x} != {:#010x}",
                magic, MAGIC
            )));
        }
        Ok(())
    }

    fn read_header(&mut self) -> Result<()> {
        let r = &mut self.reader;
        self.header = Header {
            num_tex_layers: r.read_i32("num tex layers")?,
            terrain_width: r.read_i32("terrain width")?,
            terrain_depth: r.read_i32("terrain depth")?,
            filter_scale: r.read_f32("filter scale")?,
            num_allocated_mip_xs: r.read_i32("num allocated mip xs")?,
            num_mip_levels: r.read_i32("num mip levels")?,
            num_allocated_mip_edges: r.read_i32("num allocated mip edges")?,
        };
        log::debug!(
            "TDF header: {}x{}, {} tex layers, {} mip levels",
            self.header.terrain_width,
            self.header.terrain_depth,
            self.header.num_tex_layers,
            self.header.num_mip_levels
        );
        Ok(())
    }

    fn read_base_points(&mut self) -> Result<()> {
        let count = self.header.base_point_count()?;
        let points =
            self.reader
                .read_records(count, POINT_RECORD_SIZE, "mip 0 points", records::read_point)?;
        log::debug!("Mip 0: {} points", points.len());
        self.points.push(points);
        Ok(())
    }

    fn read_mip_points(&mut self) -> Result<()> {
        let levels = self.header.num_allocated_mip_xs.max(1) as usize;
        for (level, (width, height)) in self.header.mip_dims().enumerate().take(levels).skip(1) {
            let count = MipDims::new(width, height).point_count()?;
            let what = format!("mip {} points", level);
            let points =
                self.reader
                    .read_records(count, POINT_RECORD_SIZE, &what, records::read_point)?;
            log::debug!("Mip {}: {}x{} per grid, {} points", level, width, height, points.len());
            self.points.push(points);
        }
        Ok(())
    }

    fn read_edges(&mut self) -> Result<()> {
        for (level, (width, height)) in self.header.mip_dims().enumerate().take(MAX_MIP_LEVELS) {
            if level as i64 + 1 >= self.header.num_mip_levels as i64 {
                break;
            }
            let count = MipDims::new(width, height).edge_count()?;
            let edges = self.reader.read_u16_vec(count, &format!("mip {} edges", level))?;
            log::debug!(
                "Mip {}: {} edge entries ({} bytes)",
                level,
                edges.len(),
                edges.len() * EDGE_ENTRY_SIZE
            );
            self.edges.push(edges);
        }
        Ok(())
    }

    fn read_grids(&mut self) -> Result<()> {
        debug_assert_eq!(self.header.terr_grid_data_size(), NUM_GRIDS * GRID_RECORD_SIZE);
        self.raw_grids =
            self.reader
                .read_records(NUM_GRIDS, GRID_RECORD_SIZE, "grid table", records::read_grid)?;
        log::debug!(
            "Grid table: {} grids ({} bytes)",
            self.raw_grids.len(),
            self.header.terr_grid_data_size()
        );
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{header_513, TdfBuilder};
    use super::*;

    fn small_header() -> Header {
        Header {
            num_tex_layers: 1,
            terrain_width: 0,
            terrain_depth: 0,
            filter_scale: 1.0,
            num_allocated_mip_xs: 1,
            num_mip_levels: 1,
            num_allocated_mip_edges: 0,
        }
    }

    #[test]
    fn test_magic_value() {
        assert_eq!(MAGIC, 0x3146_4454);
    }

    #[test]
    fn test_bad_magic() {
        let mut data = TdfBuilder::new(small_header()).build();
        data[0] = b'X';
        let err = Terrain::from_bytes(&data).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn test_minimal_buffer_decodes() {
        let builder = TdfBuilder::new(small_header());
        let data = builder.build();
        // 1x1 point per grid, no edges
        assert_eq!(data.len(), 32 + NUM_GRIDS * POINT_RECORD_SIZE + NUM_GRIDS * GRID_RECORD_SIZE);

        let terrain = Terrain::from_bytes(&data).unwrap();
        assert_eq!(*terrain.header(), small_header());
        assert_eq!(terrain.mip_count(), 1);
        assert_eq!(terrain.edge_mip_count(), 0);
        assert_eq!(terrain.points(0).unwrap().len(), NUM_GRIDS);
        assert_eq!(terrain.grid_at(3, 4).unwrap().mips[0].point_index, Terrain::grid_index(3, 4));
    }

    #[test]
    fn test_truncation_anywhere_is_format_error() {
        let data = TdfBuilder::new(small_header()).build();
        for len in [0, 3, 4, 20, 31, 32, 100, data.len() - GRID_RECORD_SIZE, data.len() - 1] {
            let result = Terrain::from_bytes(&data[..len]);
            assert!(matches!(result, Err(Error::Format(_))), "length {} should fail", len);
        }
    }

    #[test]
    fn test_header_only_is_truncated() {
        let builder = TdfBuilder::new(small_header());
        let data = builder.header_bytes();
        let mut decoder = TerrainDecoder::new(&data);
        assert_eq!(decoder.step().unwrap(), Section::Header);
        assert_eq!(decoder.step().unwrap(), Section::BasePoints);
        assert!(matches!(decoder.step(), Err(Error::Format(_))));
    }

    #[test]
    fn test_multi_mip_decode_and_offset_resolution() {
        let mut builder = TdfBuilder::new(header_513(3, 3));
        builder.point = |mip, i| ((mip * 10_000 + i % 10_000) as u16, 0, 0);
        let data = builder.build();

        let terrain = Terrain::from_bytes(&data).unwrap();
        assert_eq!(terrain.mip_count(), 3);
        assert_eq!(terrain.points(0).unwrap().len(), 17 * 17 * NUM_GRIDS);
        assert_eq!(terrain.points(1).unwrap().len(), 9 * 9 * NUM_GRIDS);
        assert_eq!(terrain.points(2).unwrap().len(), 5 * 5 * NUM_GRIDS);
        assert!(matches!(terrain.points(3), Err(Error::MissingMip(3))));

        // Edges for levels 0 and 1 only (stop once level + 1 >= 3)
        assert_eq!(terrain.edge_mip_count(), 2);
        assert_eq!(terrain.edges(0).unwrap().len(), (17 + 17) * 2 * NUM_GRIDS);
        assert_eq!(terrain.edges(1).unwrap().len(), (9 + 9) * 2 * NUM_GRIDS);

        let grid = terrain.grid_at(1, 2).unwrap();
        let idx = Terrain::grid_index(1, 2);
        assert_eq!(grid.mips[1].point_index, idx * 81);
        assert_eq!((grid.mips[1].num_x, grid.mips[1].num_y), (9, 9));

        let point = terrain.point_at(1, 2, 1, 4, 3).unwrap();
        let element = idx * 81 + 3 * 9 + 4;
        assert_eq!(point.height, (10_000 + element % 10_000) as u16);
        assert_eq!(point.normal, [1, 2, 3]);
    }

    #[test]
    fn test_point_fields_survive_decode() {
        let mut builder = TdfBuilder::new(small_header());
        builder.point = |_, i| (i as u16, if i == 5 { 0x81 } else { 0 }, 0x4321);
        builder.layers = |gx, _| ([gx as i8, -1, -1, -1], 1);
        let terrain = Terrain::from_bytes(&builder.build()).unwrap();

        let point = terrain.point_at(0, 5, 0, 0, 0).unwrap();
        assert_eq!(point.height, 5);
        assert!(point.hollowed && point.invisible_poly);
        assert_eq!(point.layer_alpha.layers(), [1, 2, 3, 4]);
        assert_eq!(terrain.grid_at(7, 0).unwrap().layer_texture_index, [7, -1, -1, -1]);
        assert_eq!(terrain.grid_at(7, 3).unwrap().start_y, 48);
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let mut header = small_header();
        header.terrain_width = -100;
        let data = TdfBuilder::new(header).header_bytes();
        assert!(matches!(Terrain::from_bytes(&data), Err(Error::Format(_))));
    }

    #[test]
    fn test_decode_is_deterministic() {
        let data = TdfBuilder::new(header_513(2, 2)).build();
        let a = Terrain::from_bytes(&data).unwrap();
        let b = Terrain::from_bytes(&data).unwrap();
        assert_eq!(a.grids(), b.grids());
        assert_eq!(a.points(1).unwrap(), b.points(1).unwrap());
    }
}
