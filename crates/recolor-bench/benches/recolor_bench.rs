//! Benchmarks for recolor operations.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use recolor_bench::test_image;
use recolor_color::{ChannelStats, LabConverter, to_lab, transfer};
use recolor_math::Mat3;
use recolor_ops::{resample_to, warp_projective};

/// Benchmark RGB <-> lαβ conversion of single pixels.
fn bench_lab(c: &mut Criterion) {
    let mut group = c.benchmark_group("lab");
    let conv = LabConverter::new();

    let pixels: Vec<[u8; 3]> = (0..10_000u32)
        .map(|i| [(i % 256) as u8, (i / 7 % 256) as u8, (i / 13 % 256) as u8])
        .collect();
    group.throughput(Throughput::Elements(pixels.len() as u64));

    group.bench_function("rgb8_to_lab", |b| {
        b.iter(|| {
            pixels
                .iter()
                .map(|&p| conv.rgb8_to_lab(black_box(p)))
                .collect::<Vec<_>>()
        })
    });

    let labs: Vec<_> = pixels.iter().map(|&p| conv.rgb8_to_lab(p)).collect();
    group.bench_function("lab_to_rgb8", |b| {
        b.iter(|| {
            labs.iter()
                .map(|&l| conv.lab_to_rgb8(black_box(l)))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

/// Benchmark whole-image statistics and transfer.
fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");

    for size in [64u32, 256, 1024] {
        let source = test_image(size, size);
        let dest = test_image(size, size).flipped();
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));

        group.bench_with_input(BenchmarkId::new("stats", size), &dest, |b, img| {
            b.iter(|| ChannelStats::compute(&to_lab(black_box(img))))
        });

        group.bench_with_input(BenchmarkId::new("transfer", size), &dest, |b, img| {
            b.iter(|| transfer(black_box(&source), black_box(img)))
        });
    }

    group.finish();
}

/// Benchmark the projective resampler.
fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");
    let src = test_image(512, 512);

    for target in [256u32, 1024] {
        group.throughput(Throughput::Elements(u64::from(target) * u64::from(target)));
        group.bench_with_input(BenchmarkId::new("scale", target), &target, |b, &t| {
            b.iter(|| resample_to(black_box(&src), t, t))
        });
    }

    let rotation = Mat3::from_rows([[0.8, -0.6, 0.0], [0.6, 0.8, 0.0], [0.0, 0.0, 1.0]]);
    group.throughput(Throughput::Elements(512 * 512));
    group.bench_function("rotate_512", |b| {
        b.iter(|| warp_projective(black_box(&src), black_box(&rotation)))
    });

    group.finish();
}

criterion_group!(benches, bench_lab, bench_transfer, bench_resample);
criterion_main!(benches);
