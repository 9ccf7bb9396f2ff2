//! Vectorized filters built from whole-array `ndarray` arithmetic.
//!
//! No explicit per-pixel loops: grayscale is a linear combination of the
//! three channel planes, sepia is a single `(N, 3) x (3, 3)` matrix
//! product over all pixels.
//!
//! ## Rounding
//!
//! Grayscale evaluates the same expression as the naive loop, element by
//! element, so results are bit-identical. Sepia goes through `dot`, whose
//! summation order is up to the matrix backend; results may differ from
//! the naive loop by one step after truncation.

use ndarray::{Array2, Axis};

use crate::buffer::{PixelBuffer, RGB_CHANNELS};
use crate::error::{FilterError, FilterResult};
use crate::filters::core::{sepia_matrix, SepiaStrength, GRAY_B, GRAY_G, GRAY_R};

fn shape_error(e: ndarray::ShapeError) -> FilterError {
    FilterError::InvalidShape(e.to_string())
}

// ============================================================================
// Grayscale
// ============================================================================

/// Convert an RGB image to single-channel grayscale.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3)
///
/// # Returns
/// New image of shape (height, width, 1)
pub fn gray(input: &PixelBuffer) -> FilterResult<PixelBuffer> {
    input.require_rgb()?;
    let planes = input.view().mapv(f64::from);

    let red = planes.index_axis(Axis(2), 0);
    let green = planes.index_axis(Axis(2), 1);
    let blue = planes.index_axis(Axis(2), 2);

    let luma = GRAY_R * &red + GRAY_G * &green + GRAY_B * &blue;

    PixelBuffer::from_array(luma.mapv(|v| v as u8).insert_axis(Axis(2)))
}

// ============================================================================
// Sepia
// ============================================================================

/// Apply sepia with a variable strength.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3)
/// * `strength` - 0.0 leaves the image unchanged, 1.0 is full sepia
///
/// # Returns
/// New image of shape (height, width, 3), clamped then truncated
pub fn sepia(input: &PixelBuffer, strength: SepiaStrength) -> FilterResult<PixelBuffer> {
    input.require_rgb()?;
    let (height, width, _) = input.dim();

    let m = sepia_matrix(strength);
    let matrix = Array2::from_shape_fn((RGB_CHANNELS, RGB_CHANNELS), |(i, j)| m[i][j]);

    let pixels = input
        .view()
        .mapv(f64::from)
        .into_shape_with_order((height * width, RGB_CHANNELS))
        .map_err(shape_error)?;

    // out[n, i] = sum_j pixels[n, j] * matrix[i, j]
    let toned = pixels.dot(&matrix.t());

    let output = toned
        .mapv(|v| v.clamp(0.0, 255.0) as u8)
        .into_shape_with_order((height, width, RGB_CHANNELS))
        .map_err(shape_error)?;

    PixelBuffer::from_array(output)
}
