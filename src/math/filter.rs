//! Separable 1-D filters: windowed sinc, Gaussian, and axis convolution
//!
//! Kernels are built in `f64` and applied to any floating grid. Borders are
//! handled by folding out-of-range indices back into the signal, so kernels
//! wider than the signal itself remain well defined.

use ndarray::{Array2, ArrayView2, Axis};
use num_traits::Float;

use crate::io::configuration::GAUSSIAN_TRUNCATE;

/// How indices beyond the signal ends map back inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Mirror about the edge sample, which is not repeated (`c b | a b c`)
    Reflect,
    /// Mirror about the edge itself, repeating the edge sample (`b a | a b c`)
    Symmetric,
}

impl Boundary {
    /// Map a possibly out-of-range index into `0..len`
    ///
    /// `len` must be non-zero.
    pub const fn fold(self, index: isize, len: usize) -> usize {
        let n = len as isize;
        match self {
            Self::Reflect => {
                if n == 1 {
                    return 0;
                }
                let period = 2 * (n - 1);
                let i = index.rem_euclid(period);
                if i >= n { (period - i) as usize } else { i as usize }
            }
            Self::Symmetric => {
                let period = 2 * n;
                let i = index.rem_euclid(period);
                if i >= n {
                    (period - 1 - i) as usize
                } else {
                    i as usize
                }
            }
        }
    }
}

/// Normalized sinc, `sin(pi x) / (pi x)` with the removable singularity filled
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = std::f64::consts::PI * x;
        px.sin() / px
    }
}

/// Sample positions spanning the kernel support at the given downsampling ratio
///
/// Produces the symmetric sequence `..., -2r, -r, 0, r, 2r, ...` with steps of
/// `ratio`, covering just inside `(-width, width)`. Smaller ratios yield more
/// taps and therefore a wider low-pass in source pixels.
pub fn ramp(ratio: f64, width: f64) -> Vec<f64> {
    let n = (width / ratio + 1.0).ceil() as usize;
    let half: Vec<f64> = (0..n).map(|i| i as f64 * ratio).collect();

    let mut positions: Vec<f64> = half.iter().skip(1).rev().map(|&x| -x).collect();
    positions.extend_from_slice(&half);

    // The outermost samples land on or past the window edge
    let end = positions.len().saturating_sub(1);
    positions.get(1..end).map(<[f64]>::to_vec).unwrap_or_default()
}

/// Lanczos-windowed sinc evaluated at `positions`, normalized to unit sum
pub fn lanczos_kernel(positions: &[f64], a: f64) -> Vec<f64> {
    let raw: Vec<f64> = positions
        .iter()
        .map(|&x| {
            if -a < x && x < a {
                sinc(x) * sinc(x / a)
            } else {
                0.0
            }
        })
        .collect();
    normalize(raw)
}

/// Anti-aliasing kernel for shrinking an axis by `ratio = target / source`
pub fn antialias_kernel(ratio: f64, radius: f64) -> Vec<f64> {
    lanczos_kernel(&ramp(ratio, radius), radius)
}

/// Sampled Gaussian with radius `round(truncate * sigma)`, normalized to unit sum
pub fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    if sigma <= 0.0 {
        return vec![1.0];
    }
    let radius = GAUSSIAN_TRUNCATE.mul_add(sigma, 0.5) as isize;
    let denom = 2.0 * sigma * sigma;
    let raw = (-radius..=radius)
        .map(|offset| {
            let x = offset as f64;
            (-x * x / denom).exp()
        })
        .collect();
    normalize(raw)
}

fn normalize(mut kernel: Vec<f64>) -> Vec<f64> {
    let sum: f64 = kernel.iter().sum();
    if sum != 0.0 {
        for weight in &mut kernel {
            *weight /= sum;
        }
    }
    kernel
}

/// Correlate every lane along `axis` with a centered odd-length kernel
///
/// The output has the same shape as the input. Samples outside the lane are
/// taken from `boundary`.
pub fn convolve_axis<T: Float>(
    plane: ArrayView2<'_, T>,
    kernel: &[f64],
    axis: Axis,
    boundary: Boundary,
) -> Array2<T> {
    let mut output = Array2::zeros(plane.raw_dim());
    let half = (kernel.len() / 2) as isize;
    let taps: Vec<T> = kernel
        .iter()
        .map(|&k| T::from(k).unwrap_or_else(T::zero))
        .collect();

    for (lane_in, mut lane_out) in plane
        .lanes(axis)
        .into_iter()
        .zip(output.lanes_mut(axis))
    {
        let len = lane_in.len();
        if len == 0 {
            continue;
        }
        for (i, out) in lane_out.iter_mut().enumerate() {
            let mut acc = T::zero();
            for (k, &tap) in taps.iter().enumerate() {
                let source = i as isize + k as isize - half;
                if let Some(&value) = lane_in.get(boundary.fold(source, len)) {
                    acc = acc + value * tap;
                }
            }
            *out = acc;
        }
    }

    output
}

/// Two-dimensional Gaussian blur applied as two separable passes
pub fn gaussian_blur<T: Float>(plane: ArrayView2<'_, T>, sigma: f64) -> Array2<T> {
    let kernel = gaussian_kernel(sigma);
    let rows = convolve_axis(plane, &kernel, Axis(0), Boundary::Symmetric);
    convolve_axis(rows.view(), &kernel, Axis(1), Boundary::Symmetric)
}
