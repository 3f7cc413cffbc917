//! Image buffers and resampling

/// Channel-first image buffer and pixel-level transforms
pub mod buffer;
/// Anti-aliased resampling to a fixed size
pub mod resample;

pub use buffer::Image;
pub use resample::resample;
