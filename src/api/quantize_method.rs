//! Contains the builder structs for the supported quantization methods.

use crate::{average, kmeans, median_cut, Histogram, Palette, PaletteSize, Result, KMEANS_ROUNDS};

/// A builder struct to specify the parameters for k-means.
///
/// # Examples
/// ```
/// # use colorsage::KmeansOptions;
/// let options = KmeansOptions::new()
///     .rounds(20)
///     .seed(42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmeansOptions {
    /// The number of assignment and update rounds to run.
    pub(crate) rounds: u32,
    /// The seed value for the random number generator, or `None` to seed from the OS.
    pub(crate) seed: Option<u64>,
}

impl Default for KmeansOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl KmeansOptions {
    /// Creates a new [`KmeansOptions`] with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self { rounds: KMEANS_ROUNDS, seed: None }
    }

    /// Sets the number of rounds to run k-means for.
    ///
    /// The default is [`KMEANS_ROUNDS`]. A value of `0` is treated as `1`.
    #[must_use]
    pub const fn rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets the seed value for the random number generator used to pick the initial centroids.
    ///
    /// By default, no seed is set and the generator is seeded from the operating system,
    /// so the resulting palette may differ between runs.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The set of supported color quantization methods.
///
/// See the descriptions on each enum variant for more information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizeMethod {
    /// Centroid clustering. Counts are histogram occurrences.
    ///
    /// See the [`kmeans`](crate::kmeans) module for more details.
    Kmeans(KmeansOptions),
    /// Median cut. Counts are histogram occurrences.
    ///
    /// See the [`median_cut`](crate::median_cut) module for more details.
    MedianCut,
    /// Bucket averaging. Counts are the number of distinct colors in each bucket.
    ///
    /// See the [`average`](crate::average) module for more details.
    Average,
}

impl QuantizeMethod {
    /// The name reported for [`QuantizeMethod::Kmeans`].
    pub const KMEANS_NAME: &'static str = "KMeansQuantizer";
    /// The name reported for [`QuantizeMethod::MedianCut`].
    pub const MEDIAN_CUT_NAME: &'static str = "MedianCutQuantizer";
    /// The name reported for [`QuantizeMethod::Average`].
    pub const AVERAGE_NAME: &'static str = "AverageQuantizer";

    /// Creates a new [`QuantizeMethod::Kmeans`] with the default [`KmeansOptions`].
    #[must_use]
    pub const fn kmeans() -> Self {
        Self::Kmeans(KmeansOptions::new())
    }

    /// Returns every quantization method, with default options.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::kmeans(), Self::MedianCut, Self::Average]
    }

    /// Returns the name under which this method's palette is reported.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            QuantizeMethod::Kmeans(_) => Self::KMEANS_NAME,
            QuantizeMethod::MedianCut => Self::MEDIAN_CUT_NAME,
            QuantizeMethod::Average => Self::AVERAGE_NAME,
        }
    }

    /// Reduces `histogram` to a palette of at most `k` colors.
    ///
    /// # Errors
    /// Returns an error if a histogram key cannot be decoded.
    pub fn quantize(&self, histogram: &Histogram, k: PaletteSize) -> Result<Palette> {
        match *self {
            QuantizeMethod::Kmeans(options) => kmeans::palette(histogram, k, options),
            QuantizeMethod::MedianCut => median_cut::palette(histogram, k),
            QuantizeMethod::Average => average::palette(histogram, k),
        }
    }
}

impl Default for QuantizeMethod {
    fn default() -> Self {
        Self::kmeans()
    }
}

impl From<KmeansOptions> for QuantizeMethod {
    fn from(options: KmeansOptions) -> Self {
        Self::Kmeans(options)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn single_pixel_histogram() {
        let histogram = histogram(&[("#ff0000", 1)]);
        for method in QuantizeMethod::all() {
            let result = method.quantize(&histogram, PaletteSize::default()).unwrap();
            assert_eq!(result, histogram, "{}", method.name());
        }
    }

    #[test]
    fn empty_histogram() {
        for method in QuantizeMethod::all() {
            let result = method.quantize(&Histogram::new(), PaletteSize::default()).unwrap();
            assert!(result.is_empty(), "{}", method.name());
        }
    }

    #[test]
    fn names_are_unique() {
        let [a, b, c] = QuantizeMethod::all().map(|method| method.name());
        assert!(a != b && b != c && a != c);
        assert_eq!(QuantizeMethod::from(KmeansOptions::new().seed(1)).name(), "KMeansQuantizer");
    }
}
