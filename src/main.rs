use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use plotcam::{
    init_logging, BinaryRaster, ContourTracer, GcodeGenerator, PlotterConfig, ToolpathGenerator,
};

/// Convert a bitmap image into pen plotter G-code
#[derive(Parser, Debug)]
#[command(name = "plotcam")]
#[command(version, about = "Convert images to pen plotter G-code", long_about = None)]
struct Args {
    /// Path to the input image
    #[arg(short, long)]
    input: String,

    /// Path to the output G-code file
    #[arg(short, long)]
    output: String,

    /// Optional JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<String>,

    /// Threshold for binarizing the image (0-255)
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Draw light pixels instead of dark ones
    #[arg(long)]
    invert: bool,

    /// Pixel to machine unit scale
    #[arg(short, long)]
    scale: Option<f64>,

    /// Maximum allowable deviation for arc fitting, in output units
    #[arg(short, long)]
    arc_tolerance: Option<f64>,

    /// Feed rate for drawing moves (mm/min)
    #[arg(short, long)]
    feed_rate: Option<f64>,
}

fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PlotterConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => PlotterConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if args.invert {
        config.invert = true;
    }
    if let Some(scale) = args.scale {
        config.toolpath.scale = scale;
    }
    if let Some(tolerance) = args.arc_tolerance {
        config.toolpath.arc_tolerance = tolerance;
    }
    if let Some(feed_rate) = args.feed_rate {
        config.gcode.feed_rate = feed_rate;
    }

    let image = image::open(&args.input)
        .with_context(|| format!("Failed to open image {}", args.input))?
        .to_luma8();
    let raster = BinaryRaster::from_image(&image, config.threshold, config.invert)
        .context("Failed to binarize image")?;
    info!(
        width = raster.width(),
        height = raster.height(),
        on_pixels = raster.count_set(),
        "image binarized"
    );

    let traces = ContourTracer::new(&raster).trace_all();
    info!(traces = traces.len(), "contours traced");

    let toolpaths = ToolpathGenerator::new(config.toolpath.clone()).generate(&traces);

    GcodeGenerator::new(config.gcode.clone())
        .write_to_file(&toolpaths, &args.output)
        .with_context(|| format!("Failed to write G-code to {}", args.output))?;

    Ok(())
}
