//! Terrain texture bundler
//!
//! Decodes a TDF terrain and writes its tileset atlas, layers map and alpha
//! map into the terrain's tile directory.
//!
//! Usage:
//!     tdf_bundle [OPTIONS] <TDF_FILE> <TILE_DIR>
//!
//! Options:
//!     -c, --config <FILE>     JSON bundle config (tile side, output names)
//!     -h, --help              Show this help message

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use tdf_terrain::bundle::{self, BundleConfig};
use tdf_terrain::core::logging;
use tdf_terrain::Terrain;

fn print_help() {
    eprintln!("tdf_bundle - Terrain texture bundler");
    eprintln!();
    eprintln!("Usage: tdf_bundle [OPTIONS] <TDF_FILE> <TILE_DIR>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -c, --config <FILE>     JSON bundle config (tile side, output names)");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    tdf_bundle TERRAIN/MARS/TERRDATA.TDF textures/MARS");
}

#[derive(Debug)]
struct Args {
    tdf_path: PathBuf,
    tile_dir: PathBuf,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut config: Option<PathBuf> = None;
    let mut positional: Vec<PathBuf> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                config = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            path => positional.push(PathBuf::from(path)),
        }
        i += 1;
    }

    let [tdf_path, tile_dir]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| "Expected <TDF_FILE> and <TILE_DIR>".to_string())?;

    Ok(Args { tdf_path, tile_dir, config })
}

fn run(args: &Args) -> tdf_terrain::Result<()> {
    let config = match &args.config {
        Some(path) => BundleConfig::load_sync(path)?,
        None => BundleConfig::default(),
    };

    let start = Instant::now();
    let terrain = Terrain::from_file(&args.tdf_path)?;
    let header = terrain.header();
    log::info!(
        "Decoded {} ({}x{}, {} mip levels) in {:.1}ms",
        args.tdf_path.display(),
        header.terrain_width,
        header.terrain_depth,
        terrain.mip_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    let info = bundle::bundle_with_config(&terrain, &args.tile_dir, &config)?;
    info.ensure_ready()?;
    log::info!("Bundled {} tiles in {:.2}s", info.num_tiles, start.elapsed().as_secs_f64());
    Ok(())
}

fn main() {
    logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
