use chart_layout::{CompressionMode, DataCompressor, MemoryModel};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};

fn gen_model(rows: usize, columns: usize) -> MemoryModel {
    let mut model = MemoryModel::new(columns);
    for i in 0..rows {
        // simple waveform with drift
        let base = (i as f64 * 0.01).sin() * 10.0 + (i as f64 * 0.0001);
        model.push_row((0..columns).map(|c| base + c as f64).collect());
    }
    model
}

fn bench_grid_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_rebuild");
    for &n in &[50_000usize, 100_000usize] {
        let model = gen_model(n, 4);
        for &width in &[800usize, 2_000usize] {
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("n{n}_w{width}")),
                &width,
                |b, &w| {
                    b.iter_batched(
                        || {
                            let mut compressor = DataCompressor::new();
                            compressor.set_resolution(w, 600);
                            compressor
                        },
                        |mut compressor| {
                            let _ = black_box(compressor.model_data_rows(&model));
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

fn bench_distance_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_merge");
    for &n in &[50_000usize] {
        let model = gen_model(n, 1);
        group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}")), &n, |b, _| {
            b.iter_batched(
                || {
                    let mut compressor = DataCompressor::new();
                    compressor.set_resolution(2_000, 600);
                    compressor.set_compression_mode(CompressionMode::Distance);
                    compressor.set_merge_radius(2.0);
                    compressor
                },
                |mut compressor| {
                    let _ = black_box(compressor.merged_column(&model, 0));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid_rebuild, bench_distance_merge);
criterion_main!(benches);
