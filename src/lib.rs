//! A library for extracting color histograms and reduced color palettes from images.
//!
//! `colorsage` first counts every color of an image into a [`Histogram`]
//! (keyed by `#rrggbb` hex strings) and then reduces that histogram to a handful of
//! representative colors with one or more quantization algorithms:
//! - [`kmeans`]: centroid clustering with a perceptual (CIELAB) distance.
//! - [`median_cut`]: recursive splitting of the color list along its widest channel.
//! - [`average`]: averaging of fixed-size buckets of the color list.
//!
//! # Features
//! - `threads`: exposes parallel histogram extraction and parallel batch processing via [`rayon`].
//! - `cli`: builds the `colorsage` command line tool.
//!
//! # High-Level API
//! To get started, see [`PalettePipeline`]:
//! ```no_run
//! # use colorsage::{ExecutionMode, PalettePipeline, QuantizeMethod};
//! let mut pipeline = PalettePipeline::new();
//! pipeline
//!     .palette_size(8u8)
//!     .quantize_methods(QuantizeMethod::all())
//!     .execution_mode(ExecutionMode::Sequential);
//!
//! for result in pipeline.run(&["a.png", "b.jpg"]) {
//!     match result.results() {
//!         Some(palettes) => println!("{}: {} palettes", result.path().display(), palettes.len()),
//!         None => println!("{} failed", result.path().display()),
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(
    clippy::pedantic,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc
)]

mod api;
mod color;
mod error;
mod extract;
mod histogram;
mod types;

pub mod average;
pub mod kmeans;
pub mod median_cut;

pub use api::*;
pub use color::Color;
pub use error::{Error, Result};
pub use extract::ColorExtractor;
pub use histogram::{ColorSummary, Histogram, Palette};
pub use types::PaletteSize;

/// The default number of colors in a palette.
pub const DEFAULT_PALETTE_SIZE: u16 = 5;

/// The default number of refinement rounds for k-means.
pub const KMEANS_ROUNDS: u32 = 10;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use crate::Histogram;
    use image::{Rgb, RgbImage};
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoroshiro128PlusPlus;

    pub fn rgb_image(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb(pixel(x, y)))
    }

    /// A small image with a coarse gradient, a repeated block, and an odd number of rows.
    pub fn test_image() -> RgbImage {
        #[allow(clippy::cast_possible_truncation)]
        rgb_image(37, 23, |x, y| {
            if x < 8 && y < 8 {
                [200, 10, 10]
            } else {
                [(x * 6) as u8, (y * 11) as u8, ((x + y) * 4) as u8]
            }
        })
    }

    /// A histogram with `len` random colors and random counts.
    pub fn random_histogram(seed: u64, len: usize) -> Histogram {
        let rng = &mut Xoroshiro128PlusPlus::seed_from_u64(seed);
        let mut histogram = Histogram::new();
        while histogram.len() < len {
            let rgb = [rng.gen(), rng.gen(), rng.gen()];
            histogram.add_rgb8(rgb, rng.gen_range(1..100));
        }
        histogram
    }

    pub fn histogram(entries: &[(&str, u32)]) -> Histogram {
        Histogram::from_counts(entries.iter().copied()).unwrap()
    }
}
