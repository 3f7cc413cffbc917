//! Cubic convolution interpolation with corner-aligned sampling
//!
//! Implements the Keys cubic kernel as used by common bicubic resizers. With
//! corner alignment the first and last output samples land exactly on the
//! first and last input samples, so resizing to the same size is an identity.

use crate::io::configuration::BICUBIC_COEFFICIENT;

/// Four source indices and their weights for one output sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicTaps {
    /// Source indices, clamped to the valid range
    pub indices: [usize; 4],
    /// Interpolation weights (sum to 1)
    pub weights: [f64; 4],
}

/// Keys cubic convolution kernel evaluated at distance `x`
pub fn cubic_weight(x: f64, a: f64) -> f64 {
    let x = x.abs();
    if x <= 1.0 {
        ((a + 2.0) * x - (a + 3.0)).mul_add(x * x, 1.0)
    } else if x < 2.0 {
        ((a * x - 5.0 * a) * x + 8.0 * a).mul_add(x, -4.0 * a)
    } else {
        0.0
    }
}

/// Compute the taps for resampling an axis of `input_len` samples to `output_len`
///
/// Returns one entry per output sample. Both lengths must be non-zero; an
/// empty vector is returned otherwise.
pub fn corner_aligned_taps(input_len: usize, output_len: usize) -> Vec<CubicTaps> {
    if input_len == 0 || output_len == 0 {
        return Vec::new();
    }

    let scale = if output_len > 1 {
        (input_len - 1) as f64 / (output_len - 1) as f64
    } else {
        0.0
    };
    let last = input_len - 1;

    (0..output_len)
        .map(|o| {
            let source = o as f64 * scale;
            let base = source.floor();
            let t = source - base;
            let base = base as isize;

            let mut indices = [0; 4];
            let mut weights = [0.0; 4];
            for (k, (index, weight)) in indices.iter_mut().zip(weights.iter_mut()).enumerate() {
                let offset = k as isize - 1;
                *index = (base + offset).clamp(0, last as isize) as usize;
                *weight = cubic_weight(t - offset as f64, BICUBIC_COEFFICIENT);
            }

            CubicTaps { indices, weights }
        })
        .collect()
}
