//! Color filters, each provided by several execution strategies.
//!
//! ## Supported Formats
//!
//! | Filter | Input | Output |
//! |--------|-------|--------|
//! | gray | (H, W, 3) u8 | (H, W, 1) u8 |
//! | sepia | (H, W, 3) u8 | (H, W, 3) u8 |
//!
//! Any other channel count is rejected with `InvalidShape`.
//!
//! ## Architecture
//!
//! Every strategy follows these principles:
//! - **Pure** - Input is borrowed, never mutated; output is a new buffer
//! - **Same arithmetic** - `f64` math, truncation toward zero, clamp to 0-255
//! - **Thread-safe** - No shared state, so any kernel may run on any thread
//!
//! ## Strategies
//!
//! - **naive**: indexed nested loops, the reference for speed and output
//! - **vectorized**: whole-array `ndarray` expressions; sepia takes a strength
//! - **compiled**: contiguous row loops spread over rayon

pub mod core;
pub mod naive;
pub mod vectorized;
pub mod compiled;
