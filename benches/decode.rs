use criterion::{criterion_group, criterion_main, Criterion, black_box};

use tdf_terrain::bundle::{build_alpha_map, build_layers_map};
use tdf_terrain::format::MAGIC;
use tdf_terrain::format::records::{GRID_RECORD_SIZE, POINT_RECORD_SIZE};
use tdf_terrain::terrain::{NUM_GRIDS, NUM_GRIDS_X, NUM_GRIDS_Y};
use tdf_terrain::Terrain;

const SIDE: usize = 17;

/// 513x513 terrain, LOD 0 only, every grid painted with two layers.
fn synthetic_tdf() -> Vec<u8> {
    let mut out = Vec::new();
    for value in [MAGIC, 2, 513, 513] {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out.extend_from_slice(&0.1f32.to_le_bytes());
    for value in [1i32, 1, 0] {
        out.extend_from_slice(&value.to_le_bytes());
    }

    for i in 0..NUM_GRIDS * SIDE * SIDE {
        out.extend_from_slice(&((i % 4096) as u16).to_le_bytes());
        out.extend_from_slice(&[0, 127, 0, 0]);
        out.extend_from_slice(&((i % 65536) as u16).to_le_bytes());
    }

    for gx in 0..NUM_GRIDS_X {
        for gy in 0..NUM_GRIDS_Y {
            let idx = Terrain::grid_index(gx, gy);
            let mut record = [0u8; GRID_RECORD_SIZE];
            let offset = (idx * SIDE * SIDE * POINT_RECORD_SIZE) as u32;
            record[144..148].copy_from_slice(&offset.to_le_bytes());
            record[148..150].copy_from_slice(&(SIDE as i16).to_le_bytes());
            record[150..152].copy_from_slice(&(SIDE as i16).to_le_bytes());
            record[280..284].copy_from_slice(&[0, 1, 0xFF, 0xFF]);
            record[287] = 2;
            out.extend_from_slice(&record);
        }
    }

    out
}

fn bench_decode(c: &mut Criterion) {
    let data = synthetic_tdf();

    c.bench_function("decode_513", |b| {
        b.iter(|| Terrain::from_bytes(black_box(&data)).expect("decode failed"));
    });
}

fn bench_layers_map(c: &mut Criterion) {
    let terrain = Terrain::from_bytes(&synthetic_tdf()).expect("decode failed");

    c.bench_function("layers_map_32", |b| {
        b.iter(|| build_layers_map(black_box(&terrain), 3).expect("layers map failed"));
    });
}

fn bench_alpha_map(c: &mut Criterion) {
    let terrain = Terrain::from_bytes(&synthetic_tdf()).expect("decode failed");

    c.bench_function("alpha_map_544", |b| {
        b.iter(|| build_alpha_map(black_box(&terrain)).expect("alpha map failed"));
    });
}

criterion_group!(
    benches,
    bench_decode,
    bench_layers_map,
    bench_alpha_map,
);

criterion_main!(benches);
