use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use valetudo_map_renderer::config::RenderConfig;
use valetudo_map_renderer::decode::decode_cells;
use valetudo_map_renderer::render::{encode_png, render_map, render_pixmap};
use valetudo_map_renderer::snapshot::{
    DimensionRange, Entity, EntityKind, Layer, LayerDimensions, LayerKind, MapSize, MapSnapshot,
};

/// Square apartment of `rooms x rooms` segments, each `room` cells wide,
/// enclosed by walls, with a serpentine cleaning path.
fn synthetic_map(rooms: i32, room: i32) -> MapSnapshot {
    let origin = 200;
    let extent = rooms * room;
    let dims = LayerDimensions {
        x: DimensionRange {
            min: origin,
            max: origin + extent - 1,
            ..Default::default()
        },
        y: DimensionRange {
            min: origin,
            max: origin + extent - 1,
            ..Default::default()
        },
    };

    let mut floor = Layer::new(LayerKind::Floor);
    floor.dimensions = dims;
    for y in origin..origin + extent {
        floor.compressed_pixels.extend([origin, y, extent]);
    }

    let mut layers = vec![floor];
    for ry in 0..rooms {
        for rx in 0..rooms {
            let mut segment = Layer::new(LayerKind::Segment);
            segment.dimensions = dims;
            let left = origin + rx * room + 1;
            for y in origin + ry * room + 1..origin + (ry + 1) * room - 1 {
                segment.compressed_pixels.extend([left, y, room - 2]);
            }
            layers.push(segment);
        }
    }

    let mut wall = Layer::new(LayerKind::Wall);
    wall.dimensions = dims;
    for y in origin..origin + extent {
        wall.pixels.extend([origin, y, origin + extent - 1, y]);
    }
    wall.compressed_pixels
        .extend([origin, origin, extent, origin, origin + extent - 1, extent]);
    layers.push(wall);

    let mut path = Vec::new();
    for (row, y) in (origin..origin + extent).step_by(4).enumerate() {
        let (from, to) = if row % 2 == 0 {
            (origin, origin + extent)
        } else {
            (origin + extent, origin)
        };
        path.extend([from * 5, y * 5, to * 5, y * 5]);
    }
    let center = (origin + extent / 2) * 5;

    MapSnapshot {
        size: MapSize { x: 5120, y: 5120 },
        pixel_size: 5,
        layers,
        entities: vec![
            Entity::new(EntityKind::Path, path),
            Entity::new(EntityKind::PredictedPath, vec![center, center, center + 400, center]),
            Entity::new(EntityKind::ChargerLocation, vec![origin * 5 + 50, origin * 5 + 50]),
            Entity::new(EntityKind::RobotPosition, vec![center, center]).with_angle(135.0),
        ],
    }
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for rooms in [2, 6] {
        let snapshot = synthetic_map(rooms, 60);
        group.bench_with_input(BenchmarkId::from_parameter(rooms), &snapshot, |b, data| {
            b.iter(|| {
                let cells: usize = data
                    .layers
                    .iter()
                    .filter_map(|layer| decode_cells(layer).ok())
                    .map(|cells| cells.count())
                    .sum();
                black_box(cells);
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pixmap");
    let config = RenderConfig::default();
    for rooms in [2, 6] {
        let snapshot = synthetic_map(rooms, 60);
        group.bench_with_input(BenchmarkId::from_parameter(rooms), &snapshot, |b, data| {
            b.iter(|| {
                let pixmap = render_pixmap(black_box(data), &config).expect("render failed");
                black_box(pixmap.width());
            });
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_png");
    let config = RenderConfig::default();
    let pixmap = render_pixmap(&synthetic_map(6, 60), &config).expect("render failed");
    group.bench_function("6_rooms", |b| {
        b.iter(|| {
            let png = encode_png(black_box(&pixmap)).expect("encode failed");
            black_box(png.len());
        });
    });
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = RenderConfig::default();
    for rooms in [1, 2, 6] {
        let snapshot = synthetic_map(rooms, 60);
        group.bench_with_input(BenchmarkId::from_parameter(rooms), &snapshot, |b, data| {
            b.iter(|| {
                let png = render_map(black_box(data), &config).expect("render failed");
                black_box(png.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_decode, bench_render, bench_encode, bench_end_to_end
);
criterion_main!(benches);
