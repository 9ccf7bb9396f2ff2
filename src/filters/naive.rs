//! Naive per-pixel filters.
//!
//! Plain nested loops over rows and columns with indexed sample access.
//! This is the reference implementation: the other strategies are
//! checked against its output and timed against its speed.

use ndarray::Array3;

use crate::buffer::{PixelBuffer, GRAY_CHANNELS, RGB_CHANNELS};
use crate::error::FilterResult;
use crate::filters::core::{GRAY_B, GRAY_G, GRAY_R, SEPIA_MATRIX};

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
    let (height, width, _) = input.dim();
    let src = input.view();
    let mut output = Array3::<u8>::zeros((height, width, GRAY_CHANNELS));

    for y in 0..height {
        for x in 0..width {
            let r = src[[y, x, 0]] as f64;
            let g = src[[y, x, 1]] as f64;
            let b = src[[y, x, 2]] as f64;

            output[[y, x, 0]] = (GRAY_R * r + GRAY_G * g + GRAY_B * b) as u8;
        }
    }

    PixelBuffer::from_array(output)
}

// ============================================================================
// Sepia
// ============================================================================

/// Apply full-strength sepia to an RGB image.
///
/// Each channel is truncated to an integer first, then capped at 255.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 3)
///
/// # Returns
/// New image of shape (height, width, 3)
pub fn sepia(input: &PixelBuffer) -> FilterResult<PixelBuffer> {
    input.require_rgb()?;
    let (height, width, _) = input.dim();
    let src = input.view();
    let mut output = Array3::<u8>::zeros((height, width, RGB_CHANNELS));

    for y in 0..height {
        for x in 0..width {
            let r = src[[y, x, 0]] as f64;
            let g = src[[y, x, 1]] as f64;
            let b = src[[y, x, 2]] as f64;

            for c in 0..RGB_CHANNELS {
                let m = &SEPIA_MATRIX[c];
                let v = (r * m[0] + g * m[1] + b * m[2]) as u32;
                output[[y, x, c]] = v.min(255) as u8;
            }
        }
    }

    PixelBuffer::from_array(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    fn scenario() -> PixelBuffer {
        PixelBuffer::new(
            vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120],
            2,
            2,
            3,
        )
        .unwrap()
    }

    #[test]
    fn test_gray_scenario() {
        let result = gray(&scenario()).unwrap();

        assert_eq!(result.dim(), (2, 2, 1));
        assert_eq!(result.into_raw_vec(), vec![18, 48, 78, 108]);
    }

    #[test]
    fn test_gray_pure_channels() {
        let img = PixelBuffer::new(vec![255, 0, 0, 0, 255, 0, 0, 0, 255], 1, 3, 3).unwrap();
        let result = gray(&img).unwrap();

        // 0.21 * 255 = 53.55, 0.72 * 255 = 183.6, 0.07 * 255 = 17.85
        assert_eq!(result.into_raw_vec(), vec![53, 183, 17]);
    }

    #[test]
    fn test_gray_rejects_non_rgb() {
        let rgba = PixelBuffer::zeros(2, 2, 4).unwrap();
        assert!(matches!(gray(&rgba), Err(FilterError::InvalidShape(_))));

        let single = PixelBuffer::zeros(2, 2, 1).unwrap();
        assert!(matches!(gray(&single), Err(FilterError::InvalidShape(_))));
    }

    #[test]
    fn test_sepia_keeps_shape() {
        let result = sepia(&scenario()).unwrap();
        assert_eq!(result.dim(), (2, 2, 3));
    }

    #[test]
    fn test_sepia_known_pixel() {
        let img = PixelBuffer::new(vec![100, 50, 10], 1, 1, 3).unwrap();
        let result = sepia(&img).unwrap();

        // R: 39.3 + 38.45 + 1.89 = 79.64
        // G: 34.9 + 34.3 + 1.68 = 70.88
        // B: 27.2 + 26.7 + 1.31 = 55.21
        assert_eq!(result.into_raw_vec(), vec![79, 70, 55]);
    }

    #[test]
    fn test_sepia_white_saturates() {
        let img = PixelBuffer::new(vec![255, 255, 255], 1, 1, 3).unwrap();
        let result = sepia(&img).unwrap();

        // Blue row sums to 0.937, so 255 * 0.937 = 238.935
        assert_eq!(result.into_raw_vec(), vec![255, 255, 238]);
    }

    #[test]
    fn test_sepia_does_not_mutate_input() {
        let img = scenario();
        let before = img.clone();
        let _ = sepia(&img).unwrap();
        assert_eq!(img, before);
    }
}
