//! Numerical building blocks for resampling and heatmap relaxation

/// Windowed-sinc and Gaussian kernels with separable axis convolution
pub mod filter;
/// Corner-aligned cubic convolution taps
pub mod interpolation;
