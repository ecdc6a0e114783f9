//! Text reports and palette swatch images.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use colorsage::{Color, ColorExtractor, ImageResult, Palette, QuantizeMethod};
use image::{Rgb, RgbImage};

/// Side length in pixels of one color block in a palette image.
const SWATCH_SIZE: u32 = 50;

const RESET: &str = "\x1b[0m";

/// Writes the per-image report lines.
#[derive(Clone, Copy)]
pub struct Report<'a> {
    /// The quantization methods, in output order.
    pub methods: &'a [QuantizeMethod],
    /// Whether to also print the full extractor histogram.
    pub full: bool,
    /// Whether to put an ANSI background swatch before each hex color.
    pub swatches: bool,
}

impl Report<'_> {
    pub fn write(&self, out: &mut impl Write, results: &[ImageResult]) -> io::Result<()> {
        for result in results {
            self.write_result(out, result)?;
        }
        out.flush()
    }

    pub fn write_to_file(&self, path: &Path, results: &[ImageResult]) -> io::Result<()> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write(&mut file, results)
    }

    fn write_result(&self, out: &mut impl Write, result: &ImageResult) -> io::Result<()> {
        let path = result.path().display();

        let Some(palettes) = result.results() else {
            if let Some(err) = result.error() {
                writeln!(out, "Error processing file {path}: {err}")?;
            }
            return Ok(());
        };

        if let Some(histogram) = palettes.get(ColorExtractor::NAME) {
            let summary = histogram.summary();
            let (most, most_count) = summary.most_frequent.unwrap_or_default();
            let (least, least_count) = summary.least_frequent.unwrap_or_default();

            writeln!(out, "File: {path}, Summary: Total Colors: {}", summary.total_colors)?;
            writeln!(out, "Most Frequent: {}, Occurrences: {most_count}", self.hex(&most))?;
            writeln!(out, "Least Frequent: {}, Occurrences: {least_count}", self.hex(&least))?;

            if self.full {
                self.write_palette(out, &path, ColorExtractor::NAME, histogram)?;
            }
        }

        for method in self.methods {
            if let Some(palette) = palettes.get(method.name()) {
                self.write_palette(out, &path, method.name(), palette)?;
            }
        }

        Ok(())
    }

    fn write_palette(
        &self,
        out: &mut impl Write,
        path: &impl std::fmt::Display,
        name: &str,
        palette: &Palette,
    ) -> io::Result<()> {
        for (hex, count) in sorted_entries(palette) {
            writeln!(
                out,
                "File: {path}, Quantizer: {name}, Color: {}, Occurrences: {count}",
                self.hex(hex),
            )?;
        }
        Ok(())
    }

    fn hex(&self, hex: &str) -> String {
        match Color::from_hex(hex) {
            Ok(color) if self.swatches => {
                let [r, g, b] = color.to_rgb8();
                format!("\x1b[48;2;{r};{g};{b};30m{hex}{RESET}")
            }
            _ => hex.to_owned(),
        }
    }
}

/// Palette entries by descending count, then by hex.
fn sorted_entries(palette: &Palette) -> Vec<(&str, u32)> {
    let mut entries = palette.iter().collect::<Vec<_>>();
    entries.sort_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)));
    entries
}

/// The file name of the swatch image for the given input file and quantizer.
fn palette_image_path(input: &Path, name: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".into(), |stem| stem.to_string_lossy());
    PathBuf::from(format!("{stem}_{name}_palette.png"))
}

/// Renders the palette as a row of square blocks, in report order.
fn palette_image(palette: &Palette) -> Option<RgbImage> {
    let colors = sorted_entries(palette)
        .into_iter()
        .filter_map(|(hex, _)| Color::from_hex(hex).ok())
        .map(Color::to_rgb8)
        .collect::<Vec<_>>();

    let width = u32::try_from(colors.len()).ok()?.checked_mul(SWATCH_SIZE)?;
    if width == 0 {
        return None;
    }

    Some(RgbImage::from_fn(width, SWATCH_SIZE, |x, _| {
        Rgb(colors[(x / SWATCH_SIZE) as usize])
    }))
}

/// Saves one swatch image per successful image and quantizer,
/// returning the images that could not be written.
pub fn write_palette_images(
    results: &[ImageResult],
    methods: &[QuantizeMethod],
) -> Vec<(PathBuf, image::ImageError)> {
    let mut failures = Vec::new();

    for result in results {
        for method in methods {
            let Some(image) = result.palette(method.name()).and_then(palette_image) else {
                continue;
            };

            let output = palette_image_path(result.path(), method.name());
            match image.save(&output) {
                Ok(()) => log::debug!("wrote {}", output.display()),
                Err(err) => failures.push((result.path().to_owned(), err)),
            }
        }
    }

    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_sort_by_count_then_hex() {
        let palette =
            Palette::from_counts([("#0000ff", 5), ("#ff0000", 10), ("#00ff00", 5)]).unwrap();
        assert_eq!(
            sorted_entries(&palette),
            vec![("#ff0000", 10), ("#0000ff", 5), ("#00ff00", 5)]
        );
    }

    #[test]
    fn swatch_image_layout() {
        let palette = Palette::from_counts([("#ff0000", 2), ("#0000ff", 1)]).unwrap();
        let image = palette_image(&palette).unwrap();
        assert_eq!(image.dimensions(), (2 * SWATCH_SIZE, SWATCH_SIZE));
        assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(image.get_pixel(SWATCH_SIZE, SWATCH_SIZE - 1).0, [0, 0, 255]);

        assert!(palette_image(&Palette::new()).is_none());
    }

    #[test]
    fn swatch_image_name() {
        assert_eq!(
            palette_image_path(Path::new("photos/cat.jpg"), QuantizeMethod::MEDIAN_CUT_NAME),
            PathBuf::from("cat_MedianCutQuantizer_palette.png")
        );
    }

    #[test]
    fn raw_report() {
        let mut pipeline = colorsage::PalettePipeline::new();
        pipeline.quantize_method(QuantizeMethod::MedianCut);

        let image = image::DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([255, 0, 0])));
        let results = [pipeline.process_image("red.png", &image)];
        let report = Report {
            methods: &[QuantizeMethod::MedianCut],
            full: true,
            swatches: false,
        };

        let mut out = Vec::new();
        report.write(&mut out, &results).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "File: red.png, Summary: Total Colors: 1\n\
             Most Frequent: #ff0000, Occurrences: 1\n\
             Least Frequent: #ff0000, Occurrences: 1\n\
             File: red.png, Quantizer: ColorExtractor, Color: #ff0000, Occurrences: 1\n\
             File: red.png, Quantizer: MedianCutQuantizer, Color: #ff0000, Occurrences: 1\n"
        );
    }

    #[test]
    fn swatches_wrap_hex() {
        let report = Report { methods: &[], full: false, swatches: true };
        assert_eq!(report.hex("#0a141e"), "\x1b[48;2;10;20;30;30m#0a141e\x1b[0m");
    }
}
