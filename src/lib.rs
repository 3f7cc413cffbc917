//! Cutout sampling and anti-aliased resampling for image-guided generation
//!
//! A scoring model judges an image through many small square cuts. This crate
//! decides where those cuts land and how large they are, steers repeated
//! draws away from already-sampled regions with a decaying heatmap, and
//! resamples every cut to a fixed size with windowed-sinc anti-aliasing.

#![deny(unsafe_code)]

/// Cut generation: overview and inner cuts, scatter cuts, and sessions
pub mod cutout;
/// Errors, defaults, file I/O, diagnostics and the command line
pub mod io;
/// Filter kernels and cubic interpolation
pub mod math;
/// Image buffers and resampling
pub mod raster;
/// Bounds arithmetic and the sampling heatmap
pub mod spatial;

pub use io::error::{CutError, Result};
