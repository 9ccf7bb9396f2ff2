//! Compiled filters: tight loops over contiguous rows, run in parallel.
//!
//! Same per-pixel arithmetic as the naive kernels (through the inline
//! helpers in `core`), so grayscale and sepia both match the reference
//! exactly. Speed comes from slice iteration without bounds checks and
//! from spreading rows over the rayon thread pool.

use rayon::prelude::*;

use crate::buffer::{PixelBuffer, GRAY_CHANNELS, RGB_CHANNELS};
use crate::error::{FilterError, FilterResult};
use crate::filters::core::{gray_value, sepia_channel, SEPIA_MATRIX};

fn contiguous(input: &PixelBuffer) -> FilterResult<&[u8]> {
    input
        .as_slice()
        .ok_or_else(|| FilterError::InvalidShape("pixel data is not contiguous".to_string()))
}

/// Convert an RGB image to single-channel grayscale.
pub fn gray(input: &PixelBuffer) -> FilterResult<PixelBuffer> {
    input.require_rgb()?;
    let (height, width, _) = input.dim();
    let src = contiguous(input)?;
    let mut output = vec![0u8; height * width];

    output
        .par_chunks_exact_mut(width)
        .zip(src.par_chunks_exact(width * RGB_CHANNELS))
        .for_each(|(dst_row, src_row)| {
            for (dst, px) in dst_row.iter_mut().zip(src_row.chunks_exact(RGB_CHANNELS)) {
                *dst = gray_value(px[0], px[1], px[2]);
            }
        });

    PixelBuffer::new(output, height, width, GRAY_CHANNELS)
}

/// Apply full-strength sepia to an RGB image.
pub fn sepia(input: &PixelBuffer) -> FilterResult<PixelBuffer> {
    input.require_rgb()?;
    let (height, width, _) = input.dim();
    let src = contiguous(input)?;
    let row_len = width * RGB_CHANNELS;
    let mut output = vec![0u8; height * row_len];

    let [m_r, m_g, m_b] = &SEPIA_MATRIX;

    output
        .par_chunks_exact_mut(row_len)
        .zip(src.par_chunks_exact(row_len))
        .for_each(|(dst_row, src_row)| {
            for (dst, px) in dst_row
                .chunks_exact_mut(RGB_CHANNELS)
                .zip(src_row.chunks_exact(RGB_CHANNELS))
            {
                let (r, g, b) = (px[0], px[1], px[2]);
                dst[0] = sepia_channel(m_r, r, g, b);
                dst[1] = sepia_channel(m_g, r, g, b);
                dst[2] = sepia_channel(m_b, r, g, b);
            }
        });

    PixelBuffer::new(output, height, width, RGB_CHANNELS)
}
