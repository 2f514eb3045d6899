//! # plotcam
//!
//! Converts bitmap images into pen-plotter G-code.
//!
//! ## Pipeline
//!
//! 1. **BinaryRaster** - decode and threshold the image into an on/off grid
//! 2. **ContourTracer** - walk connected boundary pixels into ordered traces
//! 3. **ArcFitter** - compress each trace into line and arc segments under a
//!    deviation tolerance
//! 4. **ToolpathGenerator** - assemble fitted segments into ordered motion
//!    commands in output units
//! 5. **GcodeGenerator** - render toolpaths as G0/G1/G2/G3 G-code with
//!    pen-up/pen-down bracketing
//!
//! The pipeline is a pure batch transformation: raster in, toolpaths out,
//! deterministic for a fixed input.

pub mod arcfit;
pub mod config;
pub mod error;
pub mod gcode;
pub mod raster;
pub mod toolpath;
pub mod trace;

pub use arcfit::{ArcFitter, CircleFit, FittedSegment, Point, SegmentType};
pub use config::PlotterConfig;
pub use error::{PlotCamError, PlotCamResult};
pub use gcode::{GcodeGenerator, GcodeParameters};
pub use raster::BinaryRaster;
pub use toolpath::{Toolpath, ToolpathCommand, ToolpathGenerator, ToolpathParameters};
pub use trace::{ContourTracer, Trace, TracePoint};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output and RUST_LOG environment
/// variable support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
