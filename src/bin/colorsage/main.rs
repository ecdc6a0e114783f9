#![deny(unsafe_code)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

mod output;

use std::{
    fmt::Display,
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use colorsage::{ExecutionMode, KmeansOptions, PalettePipeline, PaletteSize, QuantizeMethod};
use log::{LevelFilter, Log, Metadata, Record};

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CliQuantizer {
    Kmeans,
    Mediancut,
    Average,
}

impl Display for CliQuantizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CliQuantizer::Kmeans => "kmeans",
                CliQuantizer::Mediancut => "mediancut",
                CliQuantizer::Average => "average",
            }
        )
    }
}

/// Extracts color histograms and reduced palettes from images.
#[derive(Parser)]
#[command(name = "colorsage", version)]
pub struct Options {
    /// Process the files one at a time instead of in parallel.
    #[arg(short, long)]
    sequential: bool,

    /// The quantization algorithm to run.
    #[arg(short, long, default_value_t = CliQuantizer::Kmeans)]
    quantizer: CliQuantizer,

    /// Run every quantization algorithm.
    #[arg(long, conflicts_with = "quantizer")]
    all: bool,

    /// The (maximum) number of colors in each palette.
    #[arg(short = 'k', long = "colors", default_value_t = PaletteSize::default(), value_parser = parse_palette_size)]
    k: PaletteSize,

    /// Seed for the k-means initialization. Random if not set.
    #[arg(long)]
    seed: Option<u64>,

    /// Also print the full color histogram of each image.
    #[arg(long)]
    full: bool,

    /// Print plain text without color swatches.
    #[arg(long)]
    raw: bool,

    /// Also write the plain text report to this file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a PNG swatch of each palette to the current directory.
    #[arg(long)]
    palette_images: bool,

    /// Log each processing step to stderr.
    #[arg(long)]
    verbose: bool,

    /// The image files to process.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn parse_palette_size(s: &str) -> Result<PaletteSize, String> {
    let value: u16 = s.parse().map_err(|e| format!("{e}"))?;
    Ok(value.into())
}

/// Writes log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn main() -> ExitCode {
    let options = Options::parse();

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if options.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        });
    }

    let mut kmeans = KmeansOptions::new();
    if let Some(seed) = options.seed {
        kmeans = kmeans.seed(seed);
    }

    let methods = if options.all {
        vec![
            QuantizeMethod::Kmeans(kmeans),
            QuantizeMethod::MedianCut,
            QuantizeMethod::Average,
        ]
    } else {
        vec![match options.quantizer {
            CliQuantizer::Kmeans => QuantizeMethod::Kmeans(kmeans),
            CliQuantizer::Mediancut => QuantizeMethod::MedianCut,
            CliQuantizer::Average => QuantizeMethod::Average,
        }]
    };

    let mode = if options.sequential {
        ExecutionMode::Sequential
    } else {
        ExecutionMode::default()
    };

    let mut pipeline = PalettePipeline::new();
    pipeline
        .palette_size(options.k)
        .quantize_methods(methods.iter().copied())
        .execution_mode(mode);

    let results = pipeline.run(&options.files);

    let report = output::Report {
        methods: &methods,
        full: options.full,
        swatches: !options.raw && io::stdout().is_terminal(),
    };

    let mut ok = true;

    if let Err(err) = report.write(&mut io::stdout().lock(), &results) {
        log::error!("failed to write report: {err}");
        ok = false;
    }

    if let Some(path) = &options.output {
        let plain = output::Report { swatches: false, ..report };
        if let Err(err) = plain.write_to_file(path, &results) {
            log::error!("failed to write {}: {err}", path.display());
            ok = false;
        }
    }

    if options.palette_images {
        for (path, err) in output::write_palette_images(&results, &methods) {
            println!("Error generating palette image for {}: {err}", path.display());
            ok = false;
        }
    }

    if ok && results.iter().all(colorsage::ImageResult::is_ok) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
