//! Probability-weighted centerpoint sampling with suppression and decay
//!
//! The heatmap holds one non-negative weight per pixel. Every cut multiplies
//! the weights under it by a penalty, pushing later cuts toward regions that
//! have not been sampled yet. Between calls a Gaussian blur followed by a
//! blend toward 1.0 relaxes the suppression so every region is eventually
//! revisited.

use log::trace;
use ndarray::{Array2, s};
use rand::Rng;

use crate::io::configuration::{
    DEFAULT_DECAY_SCALE, DEFAULT_DECAY_SIGMA, DEFAULT_OVERLAP_PENALTY,
};
use crate::io::error::{CutError, Result, invalid_dimensions, invalid_parameter};
use crate::math::filter::gaussian_blur;
use crate::spatial::bounds::{center_to_bounds, interior_range};

/// Fixed dynamics of a heatmap instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatmapConfig {
    /// Weight of the uniform floor in the decay blend (`> 0`)
    pub decay_scale: f64,
    /// Gaussian blur standard deviation in pixels (`>= 0`)
    pub decay_sigma: f64,
    /// Multiplier applied under each cut, in `(0, 1)`
    pub overlap_penalty_coef: f64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            decay_scale: DEFAULT_DECAY_SCALE,
            decay_sigma: DEFAULT_DECAY_SIGMA,
            overlap_penalty_coef: DEFAULT_OVERLAP_PENALTY,
        }
    }
}

impl HeatmapConfig {
    /// Check every field is within its allowed range
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range field
    pub fn validate(&self) -> Result<()> {
        if !(self.decay_scale > 0.0 && self.decay_scale.is_finite()) {
            return Err(invalid_parameter(
                "decay_scale",
                &self.decay_scale,
                &"must be positive and finite",
            ));
        }
        if !(self.decay_sigma >= 0.0 && self.decay_sigma.is_finite()) {
            return Err(invalid_parameter(
                "decay_sigma",
                &self.decay_sigma,
                &"must be non-negative and finite",
            ));
        }
        if !(self.overlap_penalty_coef > 0.0 && self.overlap_penalty_coef < 1.0) {
            return Err(invalid_parameter(
                "overlap_penalty_coef",
                &self.overlap_penalty_coef,
                &"must lie strictly between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Per-pixel weight grid of shape `(side_y, side_x)`
#[derive(Debug, Clone)]
pub struct SpatialHeatmap {
    weights: Array2<f64>,
    config: HeatmapConfig,
}

impl SpatialHeatmap {
    /// Uniform heatmap with default dynamics
    ///
    /// # Errors
    ///
    /// Returns an error if either side is zero
    pub fn new(side_x: usize, side_y: usize) -> Result<Self> {
        Self::with_config(side_x, side_y, HeatmapConfig::default())
    }

    /// Uniform heatmap with custom dynamics
    ///
    /// # Errors
    ///
    /// Returns an error if either side is zero or the configuration is invalid
    pub fn with_config(side_x: usize, side_y: usize, config: HeatmapConfig) -> Result<Self> {
        if side_x == 0 || side_y == 0 {
            return Err(invalid_dimensions(
                "heatmap construction",
                &format!("grid must be non-empty, got {side_x}x{side_y}"),
            ));
        }
        Self::from_weights(Array2::ones((side_y, side_x)), config)
    }

    /// Heatmap seeded with explicit weights (rows are `y`, columns are `x`)
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, holds a negative or non-finite
    /// weight, or the configuration is invalid
    pub fn from_weights(weights: Array2<f64>, config: HeatmapConfig) -> Result<Self> {
        config.validate()?;
        if weights.is_empty() {
            return Err(invalid_dimensions(
                "heatmap construction",
                &"weight grid must be non-empty",
            ));
        }
        if weights.iter().any(|&w| !(w >= 0.0 && w.is_finite())) {
            return Err(invalid_parameter(
                "weights",
                &"grid",
                &"weights must be finite and non-negative",
            ));
        }
        Ok(Self { weights, config })
    }

    /// Width of the grid (`side_x`)
    pub fn side_x(&self) -> usize {
        self.weights.ncols()
    }

    /// Height of the grid (`side_y`)
    pub fn side_y(&self) -> usize {
        self.weights.nrows()
    }

    /// Current weights, rows are `y`
    pub const fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Fixed dynamics of this instance
    pub const fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Overwrite a single weight
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is outside the grid or the weight is
    /// negative or non-finite
    pub fn set_weight(&mut self, x: usize, y: usize, weight: f64) -> Result<()> {
        if !(weight >= 0.0 && weight.is_finite()) {
            return Err(invalid_parameter(
                "weight",
                &weight,
                &"must be finite and non-negative",
            ));
        }
        let (side_x, side_y) = (self.side_x(), self.side_y());
        let cell = self.weights.get_mut([y, x]).ok_or_else(|| {
            invalid_dimensions(
                "set_weight",
                &format!("cell ({x}, {y}) outside {side_x}x{side_y}"),
            )
        })?;
        *cell = weight;
        Ok(())
    }

    /// Suppress the window a cut of `size` centered at `(center_x, center_y)` covers
    ///
    /// # Errors
    ///
    /// Returns an error if the center lies outside the grid
    pub fn add_cut(&mut self, center_x: usize, center_y: usize, size: usize) -> Result<()> {
        let bounds = center_to_bounds(center_x, center_y, size, self.side_x(), self.side_y())?;
        let (rows, cols) = bounds.grid_ranges(self.side_y(), self.side_x());
        let penalty = self.config.overlap_penalty_coef;
        self.weights
            .slice_mut(s![rows, cols])
            .mapv_inplace(|w| w * penalty);
        trace!("heatmap suppressed {bounds:?} by {penalty}");
        Ok(())
    }

    /// Blur the grid and blend it toward the uniform weight 1.0
    pub fn decay(&mut self) {
        let blurred = gaussian_blur(self.weights.view(), self.config.decay_sigma);
        let scale = self.config.decay_scale;
        self.weights = blurred.mapv(|w| (scale + w) / (1.0 + scale));
    }

    /// Draw a centerpoint with probability proportional to its weight
    ///
    /// Unpadded draws exclude a border of `cut_size / 2` on every side so the
    /// whole cut stays inside the image. Padded draws may land anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`CutError::DegenerateHeatmap`] if the eligible weights sum to
    /// zero
    pub fn sample_centerpoint<R: Rng>(
        &self,
        cut_size: usize,
        padded: bool,
        rng: &mut R,
    ) -> Result<(usize, usize)> {
        let margin = if padded { 0 } else { cut_size / 2 };
        let cols = interior_range(self.side_x(), margin);
        let rows = interior_range(self.side_y(), margin);
        let (row_offset, col_offset) = (rows.start, cols.start);

        let region = self.weights.slice(s![rows, cols]);
        let total: f64 = region.sum();
        if !(total > 0.0 && total.is_finite()) {
            return Err(CutError::DegenerateHeatmap {
                region: region.dim(),
            });
        }

        let mut remaining = rng.random::<f64>() * total;
        let mut fallback = None;
        for ((row, col), &weight) in region.indexed_iter() {
            if weight <= 0.0 {
                continue;
            }
            if remaining < weight {
                return Ok((col + col_offset, row + row_offset));
            }
            remaining -= weight;
            fallback = Some((col + col_offset, row + row_offset));
        }

        // Rounding can leave a sliver past the last positive cell
        fallback.ok_or(CutError::DegenerateHeatmap {
            region: region.dim(),
        })
    }
}
