//! Coefficients and per-pixel math shared by every filter implementation.
//!
//! This module provides:
//! - Grayscale luminosity weights
//! - The sepia matrix and its strength-interpolated form
//! - `SepiaStrength`, validated at construction
//! - Inline per-pixel helpers used by the compiled kernels
//!
//! All arithmetic is done in `f64` and converted back to `u8` by
//! truncation toward zero after clamping to 0-255.

use crate::error::{FilterError, FilterResult};

/// Luminosity weights for grayscale conversion.
pub const GRAY_R: f64 = 0.21;
pub const GRAY_G: f64 = 0.72;
pub const GRAY_B: f64 = 0.07;

/// Full-strength sepia matrix. Row `i` produces output channel `i`.
pub const SEPIA_MATRIX: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Amount of sepia to apply, 0.0 (unchanged) to 1.0 (full sepia).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct SepiaStrength(f64);

impl SepiaStrength {
    pub const NONE: SepiaStrength = SepiaStrength(0.0);
    pub const FULL: SepiaStrength = SepiaStrength(1.0);

    /// Rejects values outside `[0, 1]` (and NaN) instead of clamping them.
    pub fn new(k: f64) -> FilterResult<Self> {
        if !(0.0..=1.0).contains(&k) {
            return Err(FilterError::InvalidArgument(format!(
                "sepia strength must be between 0 and 1, got {k}"
            )));
        }
        Ok(Self(k))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_full(self) -> bool {
        self.0 == 1.0
    }
}

impl Default for SepiaStrength {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<f64> for SepiaStrength {
    type Error = FilterError;

    fn try_from(k: f64) -> FilterResult<Self> {
        Self::new(k)
    }
}

/// Interpolate between identity (`k = 0`) and `SEPIA_MATRIX` (`k = 1`).
///
/// Diagonal entries are `1 - (1 - s) * k`, off-diagonal entries `s * k`.
pub fn sepia_matrix(strength: SepiaStrength) -> [[f64; 3]; 3] {
    let k = strength.value();
    let mut m = [[0.0; 3]; 3];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, v) in row.iter_mut().enumerate() {
            *v = if i == j {
                1.0 - (1.0 - SEPIA_MATRIX[i][j]) * k
            } else {
                SEPIA_MATRIX[i][j] * k
            };
        }
    }
    m
}

/// Grayscale value of one pixel. Truncates, never rounds.
#[inline(always)]
pub fn gray_value(r: u8, g: u8, b: u8) -> u8 {
    (GRAY_R * r as f64 + GRAY_G * g as f64 + GRAY_B * b as f64) as u8
}

/// One output channel of the sepia transform: dot product, clamp, truncate.
#[inline(always)]
pub fn sepia_channel(row: &[f64; 3], r: u8, g: u8, b: u8) -> u8 {
    let v = r as f64 * row[0] + g as f64 * row[1] + b as f64 * row[2];
    v.clamp(0.0, 255.0) as u8
}
