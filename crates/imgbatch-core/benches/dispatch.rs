//! Benchmarks comparing the two dispatch strategies.
//!
//! Run with: cargo bench -p imgbatch-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, RgbImage};
use imgbatch_core::{BatchJob, Config, DispatchStrategy, FilterKind, ImageCrateBackend};
use std::sync::Arc;

const BATCH_SIZE: usize = 16;

fn synthetic_batch() -> (tempfile::TempDir, tempfile::TempDir) {
    let src = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    for i in 0..BATCH_SIZE {
        let img = RgbImage::from_fn(256, 256, |x, y| image::Rgb([x as u8, y as u8, i as u8]));
        DynamicImage::ImageRgb8(img)
            .save(src.path().join(format!("img{i:02}.png")))
            .unwrap();
    }
    (src, dst)
}

fn benchmark_strategies(c: &mut Criterion) {
    let (src, dst) = synthetic_batch();
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = Config::default();

    for strategy in [DispatchStrategy::WaitGroup, DispatchStrategy::Channel] {
        let job = BatchJob::new(src.path(), dst.path(), FilterKind::Grayscale.into(), strategy);
        c.bench_function(&format!("grayscale_{strategy}"), |b| {
            b.iter(|| {
                let summary = rt
                    .block_on(job.run(Arc::new(ImageCrateBackend), &config, |_| {}))
                    .unwrap();
                black_box(summary);
            })
        });
    }
}

fn benchmark_blur_single(c: &mut Criterion) {
    let img = DynamicImage::ImageRgb8(RgbImage::new(512, 512));

    c.bench_function("blur_sigma_5", |b| {
        b.iter(|| black_box(&img).blur(5.0));
    });
}

criterion_group!(benches, benchmark_strategies, benchmark_blur_single);
criterion_main!(benches);
