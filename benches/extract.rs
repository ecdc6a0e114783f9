#[path = "../util/util.rs"]
mod util;

use util::bench_images;

use std::time::Duration;

use colorsage::ColorExtractor;
use criterion::{
    criterion_group, criterion_main, measurement::WallTime, Bencher, BenchmarkId, Criterion,
    SamplingMode,
};
use image::RgbImage;

fn bench(c: &mut Criterion, group: &str, mut f: impl FnMut(&mut Bencher<WallTime>, &RgbImage)) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_millis(500));

    for (path, image) in bench_images() {
        let (width, height) = image.dimensions();
        group.bench_with_input(
            BenchmarkId::new(path, format!("{width}x{height}")),
            image,
            &mut f,
        );
    }
}

fn extract_single(c: &mut Criterion) {
    bench(c, "extract_single", |b, image| {
        b.iter(|| ColorExtractor::new().extract(image))
    })
}

fn extract_single_banded(c: &mut Criterion) {
    let extractor = ColorExtractor::new().bands(8);
    bench(c, "extract_single_banded", |b, image| {
        b.iter(|| extractor.extract(image))
    })
}

fn extract_par(c: &mut Criterion) {
    bench(c, "extract_par", |b, image| {
        b.iter(|| ColorExtractor::new().extract_par(image))
    })
}

criterion_group!(benches, extract_single, extract_single_banded, extract_par);
criterion_main!(benches);
