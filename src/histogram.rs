//! Contains the [`Histogram`] type mapping hex colors to occurrence counts.

use crate::{color::hex_rgb8, Color, Result};
use std::collections::{hash_map, HashMap};

/// A mapping from `#rrggbb` hex color strings to occurrence counts.
///
/// A [`Histogram`] built by a [`ColorExtractor`](crate::ColorExtractor) has one entry per distinct
/// color in an image, and its counts sum to the number of pixels in the image.
///
/// Keys are always valid, lowercase `#rrggbb` strings. Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Histogram(HashMap<String, u32>);

/// A [`Histogram`] reduced to a small number of representative colors.
///
/// Each count is the number of original pixels (or, for [`average`](crate::average),
/// distinct colors) represented by the palette color.
pub type Palette = Histogram;

/// Summary statistics for a [`Histogram`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorSummary {
    /// The number of distinct colors.
    pub total_colors: usize,
    /// The color with the highest count and its count.
    pub most_frequent: Option<(String, u32)>,
    /// The color with the lowest count and its count.
    pub least_frequent: Option<(String, u32)>,
}

impl Histogram {
    /// Creates a new, empty [`Histogram`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a [`Histogram`] from hex color strings and counts.
    ///
    /// Keys are normalized to lowercase `#rrggbb`, so different spellings of the same color
    /// (e.g., `FF0000` and `#ff0000ff`) have their counts added together.
    ///
    /// # Errors
    /// Returns [`Error::InvalidColorFormat`](crate::Error::InvalidColorFormat) if a key is not a hex color.
    pub fn from_counts<S: AsRef<str>>(counts: impl IntoIterator<Item = (S, u32)>) -> Result<Self> {
        let mut histogram = Self::new();
        for (hex, count) in counts {
            let color = Color::from_hex(hex.as_ref())?;
            histogram.add_rgb8(color.to_rgb8(), count);
        }
        Ok(histogram)
    }

    /// Adds `count` occurrences of the given color.
    pub fn add(&mut self, color: Color, count: u32) {
        self.add_rgb8(color.to_rgb8(), count);
    }

    /// Adds `count` occurrences of the given 8-bit color.
    pub(crate) fn add_rgb8(&mut self, rgb: [u8; 3], count: u32) {
        self.add_hex(hex_rgb8(rgb), count);
    }

    /// Adds `count` occurrences of an already encoded color. Counts saturate at `u32::MAX`.
    fn add_hex(&mut self, hex: String, count: u32) {
        let total = self.0.entry(hex).or_insert(0);
        *total = total.saturating_add(count);
    }

    /// Adds all counts of `other` into this histogram.
    ///
    /// Merging is commutative and associative. Counts saturate at `u32::MAX`.
    pub fn merge(&mut self, other: Self) {
        if self.is_empty() {
            *self = other;
        } else {
            for (hex, count) in other.0 {
                self.add_hex(hex, count);
            }
        }
    }

    /// Returns the count for the given `#rrggbb` key, if present.
    #[must_use]
    pub fn get(&self, hex: &str) -> Option<u32> {
        self.0.get(hex).copied()
    }

    /// Returns the number of distinct colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether or not the histogram has no colors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the sum of all counts.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.0.values().copied().map(u64::from).sum()
    }

    /// Returns an iterator over the hex colors and their counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.0.iter().map(|(hex, &count)| (hex.as_str(), count))
    }

    /// Decodes the distinct colors and their counts, sorted by hex key.
    ///
    /// # Errors
    /// Returns [`Error::InvalidColorFormat`](crate::Error::InvalidColorFormat) if a key fails to decode.
    pub fn color_counts(&self) -> Result<Vec<(Color, u32)>> {
        let mut entries = self.0.iter().collect::<Vec<_>>();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        entries
            .into_iter()
            .map(|(hex, &count)| Ok((Color::from_hex(hex)?, count)))
            .collect()
    }

    /// Computes the number of distinct colors and the most and least frequent colors.
    ///
    /// Ties are resolved towards the smallest hex string.
    #[must_use]
    pub fn summary(&self) -> ColorSummary {
        let owned = |(hex, &count): (&String, &u32)| (hex.clone(), count);

        ColorSummary {
            total_colors: self.len(),
            most_frequent: self
                .0
                .iter()
                .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
                .map(owned),
            least_frequent: self
                .0
                .iter()
                .min_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0)))
                .map(owned),
        }
    }
}

impl IntoIterator for Histogram {
    type Item = (String, u32);
    type IntoIter = hash_map::IntoIter<String, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Histogram> for HashMap<String, u32> {
    fn from(histogram: Histogram) -> Self {
        histogram.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{tests::*, Error};

    #[test]
    fn from_counts_normalizes_keys() {
        let histogram = histogram(&[("FF0000", 2), ("#ff0000ff", 3), ("#00ff00", 1)]);
        assert_eq!(histogram.len(), 2);
        assert_eq!(histogram.get("#ff0000"), Some(5));
        assert_eq!(histogram.get("#00ff00"), Some(1));
        assert_eq!(histogram.total_count(), 6);
    }

    #[test]
    fn counts_saturate() {
        let histogram = histogram(&[("#ff0000", u32::MAX), ("FF0000", 1), ("#00ff00", 2)]);
        assert_eq!(histogram.get("#ff0000"), Some(u32::MAX));
        assert_eq!(histogram.get("#00ff00"), Some(2));

        let mut merged = histogram.clone();
        merged.merge(histogram);
        assert_eq!(merged.get("#ff0000"), Some(u32::MAX));
        assert_eq!(merged.get("#00ff00"), Some(4));
    }

    #[test]
    fn from_counts_rejects_invalid_keys() {
        let result = Histogram::from_counts([("#ff0000", 1), ("red", 2)]);
        assert!(matches!(result, Err(Error::InvalidColorFormat(s)) if s == "red"));
    }

    #[test]
    fn merge_is_additive() {
        let mut a = histogram(&[("#ff0000", 2), ("#00ff00", 1)]);
        let b = histogram(&[("#ff0000", 3), ("#0000ff", 4)]);
        a.merge(b);
        assert_eq!(a, histogram(&[("#ff0000", 5), ("#00ff00", 1), ("#0000ff", 4)]));

        let mut empty = Histogram::new();
        empty.merge(a.clone());
        assert_eq!(empty, a);
    }

    #[test]
    fn color_counts_are_sorted() {
        let histogram = random_histogram(7, 50);
        let counts = histogram.color_counts().unwrap();
        assert_eq!(counts.len(), 50);
        for pair in counts.windows(2) {
            assert!(pair[0].0.hex() < pair[1].0.hex());
        }
        let total = counts.iter().map(|&(_, count)| u64::from(count)).sum::<u64>();
        assert_eq!(total, histogram.total_count());
    }

    #[test]
    fn summary() {
        assert_eq!(Histogram::new().summary(), ColorSummary::default());

        let summary = histogram(&[("#ff0000", 5), ("#00ff00", 1), ("#0000ff", 5), ("#ffffff", 1)])
            .summary();
        assert_eq!(summary.total_colors, 4);
        assert_eq!(summary.most_frequent, Some(("#0000ff".to_owned(), 5)));
        assert_eq!(summary.least_frequent, Some(("#00ff00".to_owned(), 1)));
    }
}
