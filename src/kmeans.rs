//! Centroid clustering (k-means) quantization.
//!
//! The initial centroids are chosen uniformly at random from the distinct colors of the histogram.
//! Then, a fixed number of rounds is run, where each round assigns every distinct color to its
//! nearest centroid (by [`Color::distance`]) and moves each centroid to the unweighted average
//! of its assigned colors. No convergence check is done, so the amount of work is fixed by the round count.
//!
//! The palette has one entry per non-empty cluster, keyed by the final centroid and
//! counting the histogram occurrences of every color in that cluster.

use crate::{
    color::{lab_distance, LabColor},
    Color, Histogram, KmeansOptions, Palette, PaletteSize, Result,
};
use ordered_float::OrderedFloat;
use rand::{seq::index, SeedableRng};
use rand_xoshiro::Xoroshiro128PlusPlus;

/// Picks `k` distinct indices into `0..len`, seeded if a seed is given.
fn initial_indices(len: usize, k: usize, seed: Option<u64>) -> Vec<usize> {
    let rng = &mut match seed {
        Some(seed) => Xoroshiro128PlusPlus::seed_from_u64(seed),
        None => Xoroshiro128PlusPlus::from_entropy(),
    };
    index::sample(rng, len, k).into_vec()
}

/// Returns the index of the nearest centroid, preferring the first on ties.
fn nearest(centroids: &[LabColor], color: LabColor) -> usize {
    centroids
        .iter()
        .enumerate()
        .min_by_key(|&(_, &centroid)| OrderedFloat(lab_distance(color, centroid)))
        .map_or(0, |(i, _)| i)
}

/// Runs one round: assigns each color to its nearest centroid,
/// then moves each centroid to the average of its colors.
///
/// `clusters` receives the color indices of each centroid.
/// Centroids with no colors keep their previous value.
fn refine(
    colors: &[Color],
    labs: &[LabColor],
    centroids: &mut [Color],
    clusters: &mut [Vec<usize>],
) -> Result<()> {
    let centroid_labs = centroids.iter().map(|c| c.to_lab()).collect::<Vec<_>>();

    for cluster in clusters.iter_mut() {
        cluster.clear();
    }

    for (i, &lab) in labs.iter().enumerate() {
        clusters[nearest(&centroid_labs, lab)].push(i);
    }

    for (centroid, cluster) in centroids.iter_mut().zip(clusters.iter()) {
        if !cluster.is_empty() {
            let members = cluster.iter().map(|&i| colors[i]).collect::<Vec<_>>();
            *centroid = Color::average(&members)?;
        }
    }

    Ok(())
}

/// One palette entry per non-empty cluster, counting the occurrences of its colors.
fn cluster_palette(
    centroids: &[Color],
    clusters: &[Vec<usize>],
    color_counts: &[(Color, u32)],
) -> Palette {
    let mut palette = Palette::new();
    for (&centroid, cluster) in centroids.iter().zip(clusters) {
        if !cluster.is_empty() {
            let count = cluster
                .iter()
                .fold(0u32, |sum, &i| sum.saturating_add(color_counts[i].1));
            palette.add(centroid, count);
        }
    }
    palette
}

/// Computes a k-means palette for the colors in `histogram`.
///
/// At most `k` colors are returned. If the histogram has fewer than `k` distinct colors,
/// the number of clusters is reduced to the number of distinct colors.
/// An empty histogram or a `k` of `0` gives an empty palette.
///
/// # Errors
/// Returns an error if a histogram key cannot be decoded.
pub fn palette(histogram: &Histogram, k: PaletteSize, options: KmeansOptions) -> Result<Palette> {
    let color_counts = histogram.color_counts()?;
    let k = k.as_usize().min(color_counts.len());
    if k == 0 {
        return Ok(Palette::new());
    }

    let colors = color_counts.iter().map(|&(color, _)| color).collect::<Vec<_>>();
    let labs = colors.iter().map(|color| color.to_lab()).collect::<Vec<_>>();

    let mut centroids = initial_indices(colors.len(), k, options.seed)
        .into_iter()
        .map(|i| colors[i])
        .collect::<Vec<_>>();

    let mut clusters = vec![Vec::new(); k];
    for _ in 0..options.rounds.max(1) {
        refine(&colors, &labs, &mut centroids, &mut clusters)?;
    }

    let palette = cluster_palette(&centroids, &clusters, &color_counts);

    log::trace!("k-means: {} colors into {} clusters", colors.len(), palette.len());

    Ok(palette)
}
