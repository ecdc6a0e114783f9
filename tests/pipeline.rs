#![allow(clippy::unwrap_used)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use colorsage::{
    ColorExtractor, Error, ExecutionMode, KmeansOptions, PalettePipeline, QuantizeMethod,
};
use image::{Rgb, RgbImage};

/// A scratch directory removed on drop.
struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("colorsage-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn path(&self, file: &str) -> PathBuf {
        self.0.join(file)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn write_fixtures(dir: &TempDir) -> Vec<PathBuf> {
    let red = dir.path("red.png");
    RgbImage::from_pixel(1, 1, Rgb([255, 0, 0])).save(&red).unwrap();

    let stripes = dir.path("stripes.png");
    RgbImage::from_fn(12, 9, |x, _| match x % 3 {
        0 => Rgb([0, 0, 0]),
        1 => Rgb([255, 255, 255]),
        _ => Rgb([0, 128, 255]),
    })
    .save(&stripes)
    .unwrap();

    let photo = dir.path("photo.jpg");
    RgbImage::from_pixel(16, 16, Rgb([40, 160, 90])).save(&photo).unwrap();

    let garbage = dir.path("garbage.png");
    fs::write(&garbage, b"definitely not an image").unwrap();

    let missing = dir.path("missing.png");

    vec![red, stripes, missing, photo, garbage]
}

fn pipeline(mode: ExecutionMode) -> PalettePipeline {
    let mut pipeline = PalettePipeline::new();
    pipeline
        .quantize_methods([
            QuantizeMethod::Kmeans(KmeansOptions::new().seed(5)),
            QuantizeMethod::MedianCut,
            QuantizeMethod::Average,
        ])
        .execution_mode(mode);
    pipeline
}

fn check_batch(mode: ExecutionMode, dir: &TempDir) {
    let paths = write_fixtures(dir);
    let results = pipeline(mode).run(&paths);

    assert_eq!(results.len(), paths.len());
    for (result, path) in results.iter().zip(&paths) {
        assert_eq!(result.path(), path.as_path());
    }

    let [red, stripes, missing, photo, garbage] = &results[..] else {
        panic!("expected five results");
    };

    for name in [
        ColorExtractor::NAME,
        QuantizeMethod::KMEANS_NAME,
        QuantizeMethod::MEDIAN_CUT_NAME,
        QuantizeMethod::AVERAGE_NAME,
    ] {
        let palette = red.palette(name).unwrap();
        assert_eq!(palette.len(), 1, "{name}");
        assert_eq!(palette.get("#ff0000"), Some(1), "{name}");
    }

    let histogram = stripes.palette(ColorExtractor::NAME).unwrap();
    assert_eq!(histogram.len(), 3);
    assert_eq!(histogram.total_count(), 12 * 9);
    assert_eq!(histogram.get("#0080ff"), Some(36));
    for name in [QuantizeMethod::KMEANS_NAME, QuantizeMethod::MEDIAN_CUT_NAME] {
        assert_eq!(stripes.palette(name).unwrap(), histogram, "{name}");
    }
    assert_eq!(stripes.palette(QuantizeMethod::AVERAGE_NAME).unwrap().total_count(), 3);

    let histogram = photo.palette(ColorExtractor::NAME).unwrap();
    assert_eq!(histogram.total_count(), 16 * 16);
    let kmeans = photo.palette(QuantizeMethod::KMEANS_NAME).unwrap();
    assert!(kmeans.len() <= 5);
    assert_eq!(kmeans.total_count(), 16 * 16);

    assert!(matches!(missing.error(), Some(Error::FileUnreadable { .. })));
    assert!(missing.results().is_none());

    assert!(matches!(garbage.error(), Some(Error::UnsupportedOrCorruptFormat { .. })));
    assert!(garbage.results().is_none());
}

#[test]
fn sequential_batch() {
    let dir = TempDir::new("sequential");
    check_batch(ExecutionMode::Sequential, &dir);
}

#[cfg(feature = "threads")]
#[test]
fn parallel_batch() {
    let dir = TempDir::new("parallel");
    check_batch(ExecutionMode::Parallel, &dir);
}

#[cfg(feature = "threads")]
#[test]
fn modes_agree_on_deterministic_output() {
    let dir = TempDir::new("agree");
    let paths = write_fixtures(&dir);

    let sequential = pipeline(ExecutionMode::Sequential).run(&paths);
    let parallel = pipeline(ExecutionMode::Parallel).run(&paths);

    for (a, b) in sequential.iter().zip(&parallel) {
        assert_eq!(a.path(), b.path());
        assert_eq!(a.is_ok(), b.is_ok());
        assert_eq!(a.results(), b.results());
    }
}

#[test]
fn empty_batch() {
    let paths: [&Path; 0] = [];
    assert!(PalettePipeline::new().run(&paths).is_empty());
}

#[test]
fn failure_does_not_affect_neighbors() {
    let dir = TempDir::new("neighbors");
    let good = dir.path("good.png");
    RgbImage::from_pixel(4, 4, Rgb([10, 20, 30])).save(&good).unwrap();

    let mut pipeline = PalettePipeline::new();
    pipeline.execution_mode(ExecutionMode::Sequential);

    let results = pipeline.run(&[dir.path("nope.png"), good.clone(), dir.path("nope.jpg")]);
    assert!(!results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(!results[2].is_ok());

    let (path, outcome) = results.into_iter().nth(1).unwrap().into_parts();
    assert_eq!(path, good);
    let palettes = outcome.unwrap();
    assert_eq!(palettes[ColorExtractor::NAME].get("#0a141e"), Some(16));
}
