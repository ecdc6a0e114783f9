//! Contains the [`ColorExtractor`] which builds a [`Histogram`] from an image.
//!
//! The image rows are partitioned into contiguous horizontal bands. Each band is counted
//! into its own local map without any coordination, and the local maps are then merged
//! by adding the counts of identical colors. The merge is commutative and associative,
//! so the final histogram does not depend on the number of bands or the order they finish in.

use crate::Histogram;
use image::RgbImage;
use std::{collections::HashMap, num::NonZeroUsize, ops::Range};
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// Counts every pixel of an image into a [`Histogram`].
///
/// # Examples
/// ```no_run
/// # use colorsage::ColorExtractor;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = image::open("some image")?.into_rgb8();
/// let histogram = ColorExtractor::new().extract(&img);
/// assert_eq!(histogram.total_count(), u64::from(img.width() * img.height()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorExtractor {
    /// The number of row bands, or `None` to use one band per thread.
    bands: Option<NonZeroUsize>,
}

impl ColorExtractor {
    /// The name under which the extracted histogram is reported.
    pub const NAME: &'static str = "ColorExtractor";

    /// Creates a new [`ColorExtractor`] with default options.
    #[must_use]
    pub const fn new() -> Self {
        Self { bands: None }
    }

    /// Sets the number of horizontal bands the image rows are split into.
    ///
    /// A value of `0` restores the default, which is one band per available thread
    /// for [`ColorExtractor::extract_par`] and a single band for [`ColorExtractor::extract`].
    /// Band counts above the image height are reduced to one row per band.
    #[must_use]
    pub const fn bands(mut self, bands: usize) -> Self {
        self.bands = NonZeroUsize::new(bands);
        self
    }

    /// Returns the name of this extractor.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Builds the histogram of `image`, scanning each band in turn on the current thread.
    #[must_use]
    pub fn extract(&self, image: &RgbImage) -> Histogram {
        let bands = self.bands.map_or(1, NonZeroUsize::get);
        merge_bands(
            band_rows(image.height(), bands)
                .into_iter()
                .map(|rows| count_band(image, rows)),
        )
    }

    /// Builds the histogram of `image`, scanning the bands in parallel.
    #[cfg(feature = "threads")]
    #[must_use]
    pub fn extract_par(&self, image: &RgbImage) -> Histogram {
        let bands = self
            .bands
            .map_or_else(rayon::current_num_threads, NonZeroUsize::get);

        let counts = band_rows(image.height(), bands)
            .into_par_iter()
            .map(|rows| count_band(image, rows))
            .collect::<Vec<_>>();

        merge_bands(counts)
    }
}

/// Splits `height` rows into at most `bands` contiguous ranges.
///
/// Every band has `height / bands` rows, except for the last band which also takes the remainder.
fn band_rows(height: u32, bands: usize) -> Vec<Range<u32>> {
    if height == 0 {
        return Vec::new();
    }

    let bands = u32::try_from(bands).unwrap_or(u32::MAX).clamp(1, height);
    let rows = height / bands;

    (0..bands)
        .map(|i| {
            let start = i * rows;
            let end = if i == bands - 1 { height } else { start + rows };
            start..end
        })
        .collect()
}

/// Counts the colors of the pixels in the given rows into a local [`Histogram`].
/// The alpha channel, if any, is already gone.
fn count_band(image: &RgbImage, rows: Range<u32>) -> Histogram {
    let stride = image.width() as usize * 3;
    let start = rows.start as usize * stride;
    let end = rows.end as usize * stride;

    let mut counts = HashMap::<[u8; 3], u32>::new();
    for pixel in image.as_raw()[start..end].chunks_exact(3) {
        let count = counts.entry([pixel[0], pixel[1], pixel[2]]).or_insert(0);
        *count = count.saturating_add(1);
    }

    let mut histogram = Histogram::new();
    for (rgb, count) in counts {
        histogram.add_rgb8(rgb, count);
    }
    histogram
}

/// Adds the band histograms together into a single [`Histogram`].
fn merge_bands(bands: impl IntoIterator<Item = Histogram>) -> Histogram {
    bands.into_iter().fold(Histogram::new(), |mut total, band| {
        total.merge(band);
        total
    })
}
