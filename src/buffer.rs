//! Owned pixel buffers.
//!
//! ## Layout
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 (kernel input, sepia output) |
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel (grayscale output) |
//!
//! Samples are stored row-major in a single contiguous block. Every
//! constructor validates the shape, so a `PixelBuffer` that exists is
//! never degenerate.

use std::ops::Index;

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, FilterResult};

/// Channel count of every kernel input (R, G, B).
pub const RGB_CHANNELS: usize = 3;

/// Channel count of grayscale output.
pub const GRAY_CHANNELS: usize = 1;

/// An owned `(height, width, channels)` block of 8-bit samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

fn check_dims(height: usize, width: usize, channels: usize) -> FilterResult<usize> {
    if height == 0 || width == 0 || channels == 0 {
        return Err(FilterError::InvalidShape(format!(
            "degenerate dimensions {height}x{width}x{channels}"
        )));
    }
    height
        .checked_mul(width)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            FilterError::InvalidShape(format!(
                "dimensions {height}x{width}x{channels} overflow"
            ))
        })
}

impl PixelBuffer {
    /// Build a buffer from row-major samples.
    ///
    /// # Arguments
    /// * `data` - Samples, length must equal `height * width * channels`
    /// * `height`, `width`, `channels` - Shape, all non-zero
    pub fn new(data: Vec<u8>, height: usize, width: usize, channels: usize) -> FilterResult<Self> {
        let expected = check_dims(height, width, channels)?;
        if data.len() != expected {
            return Err(FilterError::InvalidShape(format!(
                "expected {expected} samples for {height}x{width}x{channels}, got {}",
                data.len()
            )));
        }
        let data = Array3::from_shape_vec((height, width, channels), data)
            .map_err(|e| FilterError::InvalidShape(e.to_string()))?;
        Ok(Self { data })
    }

    /// Wrap an existing array, copying it into standard layout if needed.
    pub fn from_array(array: Array3<u8>) -> FilterResult<Self> {
        let (height, width, channels) = array.dim();
        check_dims(height, width, channels)?;
        let data = if array.is_standard_layout() {
            array
        } else {
            array.as_standard_layout().into_owned()
        };
        Ok(Self { data })
    }

    /// Build a buffer by evaluating `f(y, x, c)` for every sample.
    pub fn from_fn<F>(height: usize, width: usize, channels: usize, f: F) -> FilterResult<Self>
    where
        F: FnMut((usize, usize, usize)) -> u8,
    {
        check_dims(height, width, channels)?;
        Ok(Self {
            data: Array3::from_shape_fn((height, width, channels), f),
        })
    }

    /// All-zero buffer of the given shape.
    pub fn zeros(height: usize, width: usize, channels: usize) -> FilterResult<Self> {
        check_dims(height, width, channels)?;
        Ok(Self {
            data: Array3::zeros((height, width, channels)),
        })
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// `(height, width, channels)`
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; zero-sized buffers are rejected on construction.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn as_array(&self) -> &Array3<u8> {
        &self.data
    }

    /// Row-major samples, `None` only if the layout is not contiguous.
    pub fn as_slice(&self) -> Option<&[u8]> {
        self.data.as_slice()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Consume the buffer and return its row-major samples.
    pub fn into_raw_vec(self) -> Vec<u8> {
        self.data.into_raw_vec_and_offset().0
    }

    /// Fail with `InvalidShape` unless this is an RGB buffer.
    pub fn require_rgb(&self) -> FilterResult<()> {
        if self.channels() != RGB_CHANNELS {
            return Err(FilterError::InvalidShape(format!(
                "expected {RGB_CHANNELS} channels (RGB), got {}",
                self.channels()
            )));
        }
        Ok(())
    }
}

impl TryFrom<Array3<u8>> for PixelBuffer {
    type Error = FilterError;

    fn try_from(array: Array3<u8>) -> FilterResult<Self> {
        Self::from_array(array)
    }
}

impl Index<[usize; 3]> for PixelBuffer {
    type Output = u8;

    fn index(&self, index: [usize; 3]) -> &u8 {
        &self.data[index]
    }
}
