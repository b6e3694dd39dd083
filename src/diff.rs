//! Pixel-wise comparison of two images.

use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Color painted where the two images differ.
pub const CHANGED: Rgba<u8> = Rgba([0, 255, 0, 255]);
/// Color painted where they agree.
pub const UNCHANGED: Rgba<u8> = Rgba([0, 0, 0, 255]);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    #[error("image bounds do not match: {first:?} vs {second:?}")]
    DimensionMismatch { first: (u32, u32), second: (u32, u32) },
}

/// A difference map plus the number of pixels that changed.
#[derive(Debug, Clone)]
pub struct Difference {
    pub image: RgbaImage,
    pub changed: usize,
}

/// Builds a map with every differing pixel (any of R, G, B or A) in [`CHANGED`] and the rest
/// in [`UNCHANGED`].
pub fn compare(first: &RgbaImage, second: &RgbaImage) -> Result<Difference, DiffError> {
    if first.dimensions() != second.dimensions() {
        return Err(DiffError::DimensionMismatch {
            first: first.dimensions(),
            second: second.dimensions(),
        });
    }

    let (width, height) = first.dimensions();
    let mut image = RgbaImage::new(width, height);
    let mut changed = 0;

    for ((a, b), out) in first.pixels().zip(second.pixels()).zip(image.pixels_mut()) {
        *out = if a == b {
            UNCHANGED
        } else {
            changed += 1;
            CHANGED
        };
    }

    log::debug!("{changed} of {} pixels differ", width as usize * height as usize);
    Ok(Difference { image, changed })
}
