//! Bucket average quantization.
//!
//! The distinct colors of the histogram (sorted by hex key) are divided into `k` contiguous
//! buckets of `len / k` colors each, with the last bucket also taking the remainder.
//! Each bucket becomes one palette entry keyed by the average of its colors.
//!
//! Unlike [`kmeans`](crate::kmeans) and [`median_cut`](crate::median_cut), the count of each
//! palette entry is the number of *distinct colors* in its bucket, not the number of pixels.
//! So, the counts of the palette sum to the number of distinct colors in the histogram.

use crate::{Color, Histogram, Palette, PaletteSize, Result};
use std::ops::Range;

/// Returns the index ranges of the buckets for `len` colors.
fn buckets(len: usize, k: usize) -> Vec<Range<usize>> {
    let k = k.min(len);
    if k == 0 {
        return Vec::new();
    }

    let size = len / k;
    (0..k)
        .map(|i| {
            let start = i * size;
            let end = if i == k - 1 { len } else { start + size };
            start..end
        })
        .collect()
}

/// Computes a bucket average palette for the colors in `histogram`.
///
/// At most `k` colors are returned.
/// An empty histogram or a `k` of `0` gives an empty palette.
///
/// # Errors
/// Returns an error if a histogram key cannot be decoded.
pub fn palette(histogram: &Histogram, k: PaletteSize) -> Result<Palette> {
    let colors = histogram
        .color_counts()?
        .into_iter()
        .map(|(color, _)| color)
        .collect::<Vec<_>>();

    let mut palette = Palette::new();
    for bucket in buckets(colors.len(), k.as_usize()) {
        let colors = &colors[bucket];
        let count = u32::try_from(colors.len()).unwrap_or(u32::MAX);
        palette.add(Color::average(colors)?, count);
    }

    Ok(palette)
}
