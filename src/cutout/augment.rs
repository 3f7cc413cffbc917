//! Pluggable per-cut augmentation
//!
//! The sampler treats augmentation as an opaque `image -> image` step. The
//! randomness source is passed through so randomized strategies stay
//! reproducible under a seeded generator.

use rand::{Rng, RngCore};

use crate::io::configuration::{AUGMENT_FLIP_PROBABILITY, AUGMENT_NOISE_AMPLITUDE};
use crate::raster::Image;

/// Strategy applied to every cut that is not explicitly exempt
///
/// Implementations must return an image of the same shape they receive.
pub trait Augmentation {
    /// Transform a single cut
    fn augment(&mut self, cut: Image, rng: &mut dyn RngCore) -> Image;
}

impl<F> Augmentation for F
where
    F: FnMut(Image, &mut dyn RngCore) -> Image,
{
    fn augment(&mut self, cut: Image, rng: &mut dyn RngCore) -> Image {
        self(cut, rng)
    }
}

/// Leaves every cut untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Augmentation for Identity {
    fn augment(&mut self, cut: Image, _rng: &mut dyn RngCore) -> Image {
        cut
    }
}

/// Random horizontal mirror followed by small uniform pixel noise
#[derive(Debug, Clone, Copy)]
pub struct FlipJitter {
    /// Probability of mirroring the cut
    pub flip_probability: f64,
    /// Noise is drawn uniformly from `[-amplitude, amplitude)`; non-finite
    /// or non-positive values disable it
    pub noise_amplitude: f32,
}

impl Default for FlipJitter {
    fn default() -> Self {
        Self {
            flip_probability: AUGMENT_FLIP_PROBABILITY,
            noise_amplitude: AUGMENT_NOISE_AMPLITUDE,
        }
    }
}

impl Augmentation for FlipJitter {
    fn augment(&mut self, cut: Image, rng: &mut dyn RngCore) -> Image {
        let flip_probability = if self.flip_probability.is_nan() {
            0.0
        } else {
            self.flip_probability.clamp(0.0, 1.0)
        };
        let mut out = if rng.random_bool(flip_probability) {
            cut.flip_horizontal()
        } else {
            cut
        };

        // Non-finite amplitudes have no uniform range; leave the cut noiseless
        if self.noise_amplitude.is_finite() && self.noise_amplitude > 0.0 {
            let amplitude = self.noise_amplitude;
            out.data_mut()
                .mapv_inplace(|v| rng.random_range(-amplitude..amplitude) + v);
        }
        out
    }
}
