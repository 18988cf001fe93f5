//! tdf_terrain - TDF terrain decoder and paint-layer texture bundler
//!
//! ```no_run
//! use tdf_terrain::{bundle, Terrain};
//!
//! let terrain = Terrain::from_file("TERRDATA.TDF")?;
//! let info = bundle::bundle(&terrain, "textures/")?;
//! info.ensure_ready()?;
//! # Ok::<(), tdf_terrain::Error>(())
//! ```

pub mod core;
pub mod format;
pub mod terrain;
pub mod bundle;

pub use crate::core::error::{Error, Result};
pub use crate::terrain::Terrain;
