#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use colorsage::{ColorExtractor, Histogram};
use image::{Rgb, RgbImage};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

/// Directory with extra benchmark images, relative to the crate root.
pub const IMAGE_DIR: &str = "img";

pub fn load_images(images: &[PathBuf]) -> Vec<(String, RgbImage)> {
    images
        .iter()
        .map(|path| {
            image::open(path).map(|image| {
                (
                    path.file_name().unwrap().to_string_lossy().into_owned(),
                    image.into_rgb8(),
                )
            })
        })
        .collect::<Result<_, _>>()
        .expect("loaded each image")
}

/// Loads every image in `dir`, or nothing if the directory does not exist.
pub fn load_image_dir(dir: impl AsRef<Path>) -> Vec<(String, RgbImage)> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths = entries
        .collect::<Result<Vec<_>, _>>()
        .expect("read each file")
        .iter()
        .map(std::fs::DirEntry::path)
        .collect::<Vec<_>>();

    paths.sort();

    load_images(&paths)
}

/// A smooth gradient with few distinct colors per row.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) * 127 / (width + height)) as u8,
        ])
    })
}

/// Uniform random noise, close to one distinct color per pixel.
pub fn noise(width: u32, height: u32, seed: u64) -> RgbImage {
    let rng = &mut Xoroshiro128PlusPlus::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb(rng.gen()))
}

/// Noise limited to a handful of levels per channel, like a posterized photo.
pub fn posterized(width: u32, height: u32, seed: u64) -> RgbImage {
    let rng = &mut Xoroshiro128PlusPlus::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb([0; 3].map(|_: u8| rng.gen_range(0..8u8) * 36)))
}

pub fn synthetic_images() -> Vec<(String, RgbImage)> {
    vec![
        ("gradient_1280x720".to_owned(), gradient(1280, 720)),
        ("posterized_1280x720".to_owned(), posterized(1280, 720, 0)),
        ("noise_640x480".to_owned(), noise(640, 480, 1)),
    ]
}

static BENCH_IMAGES: OnceLock<Vec<(String, RgbImage)>> = OnceLock::new();

/// The synthetic images followed by any images in [`IMAGE_DIR`].
pub fn bench_images() -> &'static [(String, RgbImage)] {
    BENCH_IMAGES.get_or_init(|| {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        let mut images = synthetic_images();
        images.extend(load_image_dir(root.join(IMAGE_DIR)));
        images
    })
}

pub fn to_histograms(images: &[(String, RgbImage)]) -> Vec<(String, Histogram)> {
    images
        .iter()
        .map(|(path, image)| (path.clone(), ColorExtractor::new().extract_par(image)))
        .collect()
}
