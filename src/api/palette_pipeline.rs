//! Contains the [`PalettePipeline`] builder struct for the high level API.

use crate::{ColorExtractor, Error, Palette, PaletteSize, QuantizeMethod, Result};
use image::{DynamicImage, ImageReader};
use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// How a [`PalettePipeline`] runs over multiple files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Process the files one at a time, in order.
    Sequential,
    /// Process each file as its own parallel task.
    #[cfg(feature = "threads")]
    Parallel,
}

impl Default for ExecutionMode {
    fn default() -> Self {
        #[cfg(feature = "threads")]
        {
            Self::Parallel
        }
        #[cfg(not(feature = "threads"))]
        {
            Self::Sequential
        }
    }
}

/// The outcome of running a [`PalettePipeline`] on one image file.
///
/// On success, this holds the histogram of the [`ColorExtractor`] and the palette of
/// each [`QuantizeMethod`], keyed by their names. On failure, it holds only the error.
#[derive(Debug)]
pub struct ImageResult {
    /// The path of the input file.
    path: PathBuf,
    /// The palettes by algorithm name, or the error that stopped processing.
    outcome: Result<HashMap<&'static str, Palette>>,
}

impl ImageResult {
    /// Creates a result for `path`, logging a warning if processing failed.
    fn new(path: &Path, outcome: Result<HashMap<&'static str, Palette>>) -> Self {
        if let Err(err) = &outcome {
            log::warn!("skipping {}: {err}", path.display());
        }
        Self { path: path.to_owned(), outcome }
    }

    /// Returns the path of the input file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the histogram and palettes keyed by algorithm name, or `None` if processing failed.
    #[must_use]
    pub fn results(&self) -> Option<&HashMap<&'static str, Palette>> {
        self.outcome.as_ref().ok()
    }

    /// Returns the histogram or palette for the given algorithm name, if present.
    #[must_use]
    pub fn palette(&self, name: &str) -> Option<&Palette> {
        self.results().and_then(|results| results.get(name))
    }

    /// Returns the error that stopped processing, if any.
    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.outcome.as_ref().err()
    }

    /// Whether or not the image was processed successfully.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Converts this result into its path and outcome.
    #[must_use]
    pub fn into_parts(self) -> (PathBuf, Result<HashMap<&'static str, Palette>>) {
        (self.path, self.outcome)
    }
}

/// A builder struct to specify options to create palettes from image files.
///
/// # Examples
/// Create a pipeline and change its options:
/// ```
/// # use colorsage::{ExecutionMode, KmeansOptions, PalettePipeline, QuantizeMethod};
/// let mut pipeline = PalettePipeline::new();
/// pipeline
///     .palette_size(8u8)
///     .quantize_methods([
///         QuantizeMethod::Kmeans(KmeansOptions::new().seed(7)),
///         QuantizeMethod::MedianCut,
///     ])
///     .execution_mode(ExecutionMode::Sequential);
/// ```
///
/// Then, run it on one file or a list of files:
/// ```no_run
/// # use colorsage::PalettePipeline;
/// # let pipeline = PalettePipeline::new();
/// let result = pipeline.process("some image");
/// let results = pipeline.run(&["some image", "another image"]);
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct PalettePipeline {
    /// The histogram extractor to use.
    extractor: ColorExtractor,
    /// The quantization methods to run on each histogram.
    quantize_methods: Vec<QuantizeMethod>,
    /// The number of colors to put in each palette.
    k: PaletteSize,
    /// How to run over multiple files.
    mode: ExecutionMode,
}

impl Default for PalettePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl PalettePipeline {
    /// Creates a new [`PalettePipeline`] with default options.
    pub fn new() -> Self {
        Self {
            extractor: ColorExtractor::new(),
            quantize_methods: vec![QuantizeMethod::kmeans()],
            k: PaletteSize::default(),
            mode: ExecutionMode::default(),
        }
    }

    /// Sets the palette size which determines the (maximum) number of colors in each palette.
    ///
    /// The default palette size is [`DEFAULT_PALETTE_SIZE`](crate::DEFAULT_PALETTE_SIZE).
    pub fn palette_size(&mut self, size: impl Into<PaletteSize>) -> &mut Self {
        self.k = size.into();
        self
    }

    /// Sets a single color quantization method to use.
    ///
    /// The default is [`QuantizeMethod::kmeans`].
    pub fn quantize_method(&mut self, quantize_method: impl Into<QuantizeMethod>) -> &mut Self {
        self.quantize_methods = vec![quantize_method.into()];
        self
    }

    /// Sets the color quantization methods to use.
    ///
    /// Each method is run on the same histogram. If a method is given more than once,
    /// only the last one is kept, since results are keyed by method name.
    pub fn quantize_methods(
        &mut self,
        quantize_methods: impl IntoIterator<Item = QuantizeMethod>,
    ) -> &mut Self {
        let mut methods = Vec::<QuantizeMethod>::new();
        for method in quantize_methods {
            methods.retain(|m| m.name() != method.name());
            methods.push(method);
        }
        self.quantize_methods = methods;
        self
    }

    /// Sets the [`ColorExtractor`] used to build each histogram.
    pub fn extractor(&mut self, extractor: ColorExtractor) -> &mut Self {
        self.extractor = extractor;
        self
    }

    /// Sets whether multiple files are processed sequentially or in parallel.
    ///
    /// The default is [`ExecutionMode::Parallel`] if the `threads` feature is enabled.
    pub fn execution_mode(&mut self, mode: ExecutionMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Decodes and processes the image at `path`.
    ///
    /// Failing to open or decode the file gives an [`ImageResult`] holding the error.
    pub fn process(&self, path: impl AsRef<Path>) -> ImageResult {
        let path = path.as_ref();
        let outcome = decode(path).and_then(|image| self.palettes(path, &image));
        ImageResult::new(path, outcome)
    }

    /// Processes an already decoded image, reporting the result under `path`.
    pub fn process_image(&self, path: impl AsRef<Path>, image: &DynamicImage) -> ImageResult {
        let path = path.as_ref();
        ImageResult::new(path, self.palettes(path, image))
    }

    /// Processes every file in `paths`, returning one [`ImageResult`] per path in the same order.
    ///
    /// A file that fails does not affect any other file.
    pub fn run<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<ImageResult> {
        match self.mode {
            ExecutionMode::Sequential => {
                log::info!("running in sequential mode on {} files", paths.len());
                paths.iter().map(|path| self.process(path)).collect()
            }
            #[cfg(feature = "threads")]
            ExecutionMode::Parallel => {
                log::info!("running in parallel mode on {} files", paths.len());
                paths.par_iter().map(|path| self.process(path)).collect()
            }
        }
    }

    /// Extracts the histogram once and runs each quantization method on it.
    fn palettes(
        &self,
        path: &Path,
        image: &DynamicImage,
    ) -> Result<HashMap<&'static str, Palette>> {
        let image = image.to_rgb8();

        #[cfg(feature = "threads")]
        let histogram = self.extractor.extract_par(&image);
        #[cfg(not(feature = "threads"))]
        let histogram = self.extractor.extract(&image);

        log::debug!(
            "{}: {}x{} pixels, {} distinct colors",
            path.display(),
            image.width(),
            image.height(),
            histogram.len(),
        );

        let quantize = |method: &QuantizeMethod| {
            method
                .quantize(&histogram, self.k)
                .map(|palette| (method.name(), palette))
        };

        #[cfg(feature = "threads")]
        let palettes = self
            .quantize_methods
            .par_iter()
            .map(quantize)
            .collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "threads"))]
        let palettes = self
            .quantize_methods
            .iter()
            .map(quantize)
            .collect::<Result<Vec<_>>>()?;

        let mut results = HashMap::with_capacity(palettes.len() + 1);
        results.extend(palettes);
        results.insert(self.extractor.name(), histogram);
        Ok(results)
    }
}

/// Opens and decodes the image file. The file is closed before this returns.
fn decode(path: &Path) -> Result<DynamicImage> {
    let unreadable = |source| Error::FileUnreadable { path: path.to_owned(), source };

    let file = File::open(path).map_err(unreadable)?;
    let image = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(unreadable)?
        .decode()
        .map_err(|source| Error::UnsupportedOrCorruptFormat { path: path.to_owned(), source })?;

    log::debug!("{}: decoded", path.display());
    Ok(image)
}
