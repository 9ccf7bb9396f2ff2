//! Instapy Rust
//!
//! Grayscale and sepia filters implemented three ways (naive loops,
//! vectorized array arithmetic, compiled parallel loops) with identical
//! numeric contracts, a registry that picks an implementation by name,
//! and a harness that times them against each other.
//!
//! ## Image Format
//! Kernels take RGB buffers of shape (height, width, 3) with `u8`
//! samples. Grayscale returns (height, width, 1); sepia keeps the shape.
//!
//! ## Usage
//! ```
//! use instapy_rust::{get_filter, measure, PixelBuffer};
//!
//! let image = PixelBuffer::new(vec![10, 20, 30, 40, 50, 60], 1, 2, 3).unwrap();
//! let kernel = get_filter("color2gray", "numba").unwrap();
//!
//! let gray = kernel.apply(&image).unwrap();
//! assert_eq!(gray.into_raw_vec(), vec![18, 48]);
//!
//! let timing = measure(&kernel, &image, 3).unwrap();
//! assert!(timing.mean_seconds >= 0.0);
//! ```
//!
//! Decoding, encoding and displaying images is left to the caller.

pub mod buffer;
pub mod config;
pub mod error;
pub mod filters;
pub mod registry;
pub mod timing;

pub use buffer::PixelBuffer;
pub use config::TimingConfig;
pub use error::{FilterError, FilterResult};
pub use filters::core::SepiaStrength;
pub use registry::{get_filter, resolve, FilterName, FilterRegistry, Implementation, Kernel};
pub use timing::{make_reports, measure, time_one, TimingReport, TimingResult};
