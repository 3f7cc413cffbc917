//! Unguided random cuts over a zero-padded canvas
//!
//! A simpler alternative to [`CutoutSampler`](crate::cutout::CutoutSampler):
//! sizes follow a clipped normal distribution relative to the canvas, offsets
//! are uniform, and the last quarter of the batch is the whole canvas.
//! Augmentation runs before resampling here, on the variable-size crop.

use log::debug;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

use crate::cutout::augment::Augmentation;
use crate::cutout::sampler::CutoutBatch;
use crate::io::configuration::{SCATTER_SIZE_MEAN, SCATTER_SIZE_STD};
use crate::io::error::{Result, invalid_dimensions, invalid_parameter};
use crate::raster::{Image, resample};
use crate::spatial::bounds::CutBounds;

/// Random-size, random-offset cut generator
pub struct ScatterSampler<A> {
    cut_size: usize,
    cut_count: usize,
    skip_augment: bool,
    size_distribution: Normal<f64>,
    augmentation: A,
}

impl<A: Augmentation> ScatterSampler<A> {
    /// Create a scatter sampler emitting `cut_count` cuts of `cut_size`
    ///
    /// # Errors
    ///
    /// Returns an error if `cut_size` is zero
    pub fn new(cut_size: usize, cut_count: usize, skip_augment: bool, augmentation: A) -> Result<Self> {
        if cut_size == 0 {
            return Err(invalid_dimensions("scatter sampling", &"cut_size must be positive"));
        }
        let size_distribution = Normal::new(SCATTER_SIZE_MEAN, SCATTER_SIZE_STD)
            .map_err(|e| invalid_parameter("size_distribution", &SCATTER_SIZE_STD, &e))?;

        Ok(Self {
            cut_size,
            cut_count,
            skip_augment,
            size_distribution,
            augmentation,
        })
    }

    /// Sample one batch; the returned batch carries no inner bounds
    ///
    /// # Errors
    ///
    /// Returns an error if resampling fails
    pub fn sample<R: Rng>(&mut self, image: &Image, rng: &mut R) -> Result<CutoutBatch> {
        let canvas = image.pad(image.height() / 4);
        let (side_x, side_y) = (canvas.width(), canvas.height());
        let max_size = side_x.min(side_y);
        let min_fraction = (self.cut_size as f64 / max_size as f64).min(1.0);

        let whole_from = self.cut_count - self.cut_count / 4;
        debug!(
            "scattering {} cuts over a {side_x}x{side_y} canvas",
            self.cut_count
        );

        let mut cuts = Vec::with_capacity(self.cut_count);
        for index in 0..self.cut_count {
            let cut = if index > whole_from {
                canvas.clone()
            } else {
                let fraction = self
                    .size_distribution
                    .sample(rng)
                    .clamp(min_fraction, 1.0);
                let size = ((max_size as f64 * fraction) as usize).max(1);
                let offset_x = rng.random_range(0..(side_x + 1).saturating_sub(size).max(1));
                let offset_y = rng.random_range(0..(side_y + 1).saturating_sub(size).max(1));
                let (left, top) = (offset_x as i64, offset_y as i64);
                canvas.crop(CutBounds::new(left, left + size as i64, top, top + size as i64))?
            };

            let cut = if self.skip_augment {
                cut
            } else {
                self.augmentation.augment(cut, &mut *rng as &mut dyn RngCore)
            };
            cuts.push(resample(&cut, self.cut_size, self.cut_size)?);
        }

        Ok(CutoutBatch {
            cuts,
            inner_bounds: Vec::new(),
            cut_size: self.cut_size,
        })
    }
}
