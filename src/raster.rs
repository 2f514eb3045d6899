//! Binary raster representation of the input image.
//!
//! The raster is the immutable input to contour tracing: a row-major grid of
//! on/off pixels where "on" means the pen draws there. Out-of-bounds reads
//! are treated as off, which gives image-edge pixels an implicit off
//! neighbor.

use image::GrayImage;

use crate::error::{PlotCamError, PlotCamResult};

/// Immutable 2D grid of on/off pixels.
#[derive(Debug, Clone)]
pub struct BinaryRaster {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl BinaryRaster {
    /// Builds a raster from an explicit row-major pixel buffer.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<bool>) -> PlotCamResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlotCamError::InvalidDimensions { width, height });
        }
        if pixels.len() != width * height {
            return Err(PlotCamError::PixelCountMismatch {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Binarizes a grayscale image. A pixel is on (drawn) when its luma is
    /// below `threshold`: dark marks on light paper. `invert` flips the
    /// predicate for light-on-dark sources.
    pub fn from_image(image: &GrayImage, threshold: u8, invert: bool) -> PlotCamResult<Self> {
        let width = image.width() as usize;
        let height = image.height() as usize;
        if width == 0 || height == 0 {
            return Err(PlotCamError::InvalidDimensions { width, height });
        }
        let pixels = image
            .pixels()
            .map(|p| {
                let dark = p.0[0] < threshold;
                dark != invert
            })
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at (x, y), treating out-of-bounds as off.
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[y * self.width + x]
    }

    /// Number of on pixels in the raster.
    pub fn count_set(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }
}
