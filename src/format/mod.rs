//! TDF binary format: reader, record layouts and section decoder

pub mod decoder;
pub mod reader;
pub mod records;

pub use decoder::{Section, TerrainDecoder, MAGIC};
pub use reader::BinaryReader;
