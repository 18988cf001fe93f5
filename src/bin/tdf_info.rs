//! TDF inspector
//!
//! Prints a JSON summary of a TDF terrain: header, derived sizes, decoded
//! mip levels and, optionally, one grid cell.
//!
//! Usage:
//!     tdf_info [OPTIONS] <TDF_FILE>
//!
//! Options:
//!     --grid <X> <Y>          Also dump grid (X, Y)
//!     -h, --help              Show this help message

use std::env;
use std::path::PathBuf;

use serde_json::json;

use tdf_terrain::core::logging;
use tdf_terrain::terrain::{NUM_GRIDS_X, NUM_GRIDS_Y};
use tdf_terrain::Terrain;

fn print_help() {
    eprintln!("tdf_info - TDF inspector");
    eprintln!();
    eprintln!("Usage: tdf_info [OPTIONS] <TDF_FILE>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    --grid <X> <Y>          Also dump grid (X, Y)");
    eprintln!("    -h, --help              Show this help message");
}

#[derive(Debug)]
struct Args {
    tdf_path: PathBuf,
    grid: Option<(usize, usize)>,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut grid: Option<(usize, usize)> = None;
    let mut tdf_path: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--grid" => {
                if i + 2 >= args.len() {
                    return Err("Missing values for --grid".to_string());
                }
                let x = args[i + 1]
                    .parse()
                    .map_err(|_| format!("Invalid grid x: {}", args[i + 1]))?;
                let y = args[i + 2]
                    .parse()
                    .map_err(|_| format!("Invalid grid y: {}", args[i + 2]))?;
                grid = Some((x, y));
                i += 2;
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            path => {
                if tdf_path.is_some() {
                    return Err("Multiple TDF files specified".to_string());
                }
                tdf_path = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    let tdf_path = tdf_path.ok_or("Missing TDF file")?;
    Ok(Args { tdf_path, grid })
}

fn run(args: &Args) -> tdf_terrain::Result<()> {
    let terrain = Terrain::from_file(&args.tdf_path)?;
    let header = terrain.header();

    let mips: Vec<_> = (0..terrain.mip_count())
        .zip(header.mip_dims())
        .map(|(level, (width, height))| {
            json!({
                "level": level,
                "points_per_grid": [width, height],
                "points": terrain.points(level).map(|p| p.len()).unwrap_or(0),
                "edges": terrain.edges(level).map(|e| e.len()).ok(),
            })
        })
        .collect();

    let mut summary = json!({
        "file": args.tdf_path.display().to_string(),
        "header": header,
        "grid_width": header.grid_width(),
        "grid_height": header.grid_height(),
        "step_x": header.step_x(),
        "step_y": header.step_y(),
        "dimension_scalar": header.dimension_scalar(),
        "terr_grid_data_size": header.terr_grid_data_size(),
        "lattice": [NUM_GRIDS_X, NUM_GRIDS_Y],
        "mips": mips,
    });

    if let Some((x, y)) = args.grid {
        summary["grid"] = serde_json::to_value(terrain.grid_at(x, y)?)?;
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
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
