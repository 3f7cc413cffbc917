//! Per-run driver that owns the heatmap across sampling steps
//!
//! A generation loop asks for cuts once per step. The session scales the
//! requested counts, guarantees a non-empty batch, keeps one heatmap per
//! image size, and relaxes it after every step.

use log::debug;
use rand::Rng;

use crate::cutout::augment::Augmentation;
use crate::cutout::sampler::{CutoutBatch, CutoutParams, CutoutSampler};
use crate::io::configuration::{
    DEFAULT_CUT_SIZE, DEFAULT_INNER_COUNT, DEFAULT_INNER_GRAY_FRACTION,
    DEFAULT_INNER_SIZE_EXPONENT, DEFAULT_OVERVIEW_COUNT, MIN_INNER_WHEN_EMPTY,
};
use crate::io::error::{Result, invalid_parameter};
use crate::raster::Image;
use crate::spatial::heatmap::{HeatmapConfig, SpatialHeatmap};

/// Settings fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Side length of every emitted cut
    pub cut_size: usize,
    /// Scales the requested overview and inner counts
    pub cut_count_multiplier: f64,
    /// Guide inner cuts with a persistent heatmap
    pub use_heatmap: bool,
    /// Allow inner cuts to extend past the image
    pub pad_inner: bool,
    /// Use the smallest size for every inner cut
    pub fix_inner_size: bool,
    /// Bypass augmentation
    pub skip_augment: bool,
    /// Dynamics of the heatmap, when enabled
    pub heatmap: HeatmapConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cut_size: DEFAULT_CUT_SIZE,
            cut_count_multiplier: 1.0,
            use_heatmap: false,
            pad_inner: false,
            fix_inner_size: false,
            skip_augment: false,
            heatmap: HeatmapConfig::default(),
        }
    }
}

/// Cut counts and shape parameters for a single step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRequest {
    /// Requested overview cuts before scaling
    pub overview: usize,
    /// Requested inner cuts before scaling
    pub inner: usize,
    /// Inner size distribution exponent
    pub inner_size_exponent: f64,
    /// Leading share of inner cuts converted to grayscale
    pub inner_gray_fraction: f64,
}

impl Default for StepRequest {
    fn default() -> Self {
        Self {
            overview: DEFAULT_OVERVIEW_COUNT,
            inner: DEFAULT_INNER_COUNT,
            inner_size_exponent: DEFAULT_INNER_SIZE_EXPONENT,
            inner_gray_fraction: DEFAULT_INNER_GRAY_FRACTION,
        }
    }
}

/// Stateful cut source for one generation run
#[derive(Debug)]
pub struct CutSession {
    config: SessionConfig,
    heatmap: Option<SpatialHeatmap>,
    steps: usize,
}

impl CutSession {
    /// Start a session
    ///
    /// # Errors
    ///
    /// Returns an error if the multiplier is negative or the heatmap
    /// configuration is invalid
    pub fn new(config: SessionConfig) -> Result<Self> {
        if !(config.cut_count_multiplier >= 0.0 && config.cut_count_multiplier.is_finite()) {
            return Err(invalid_parameter(
                "cut_count_multiplier",
                &config.cut_count_multiplier,
                &"must be non-negative and finite",
            ));
        }
        config.heatmap.validate()?;
        Ok(Self {
            config,
            heatmap: None,
            steps: 0,
        })
    }

    /// Current heatmap, if one has been created
    pub const fn heatmap(&self) -> Option<&SpatialHeatmap> {
        self.heatmap.as_ref()
    }

    /// Number of completed steps
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Overview and inner counts after scaling and the empty-batch guard
    pub fn scaled_counts(&self, request: &StepRequest) -> (usize, usize) {
        let scale = |count: usize| (count as f64 * self.config.cut_count_multiplier).floor() as usize;
        let overview = scale(request.overview);
        let inner = scale(request.inner);
        if overview == 0 && inner == 0 {
            (0, MIN_INNER_WHEN_EMPTY)
        } else {
            (overview, inner)
        }
    }

    /// Produce the cuts for one step and relax the heatmap afterwards
    ///
    /// # Errors
    ///
    /// Returns an error if the request parameters are invalid or sampling fails
    pub fn step<A: Augmentation, R: Rng>(
        &mut self,
        image: &Image,
        request: &StepRequest,
        augmentation: A,
        rng: &mut R,
    ) -> Result<CutoutBatch> {
        let (overview_count, inner_count) = self.scaled_counts(request);
        debug!("step {}: {overview_count} overview and {inner_count} inner cuts", self.steps);

        let params = CutoutParams {
            cut_size: self.config.cut_size,
            overview_count,
            inner_count,
            inner_size_exponent: request.inner_size_exponent,
            inner_gray_fraction: request.inner_gray_fraction,
            pad_inner: self.config.pad_inner,
            fix_inner_size: self.config.fix_inner_size,
            skip_augment: self.config.skip_augment,
        };
        let mut sampler = CutoutSampler::new(params, augmentation)?;

        if self.config.use_heatmap {
            self.ensure_heatmap(image)?;
        }

        let batch = sampler.sample(image, self.heatmap.as_mut(), rng)?;

        if let Some(heatmap) = self.heatmap.as_mut() {
            heatmap.decay();
        }
        self.steps += 1;
        Ok(batch)
    }

    fn ensure_heatmap(&mut self, image: &Image) -> Result<()> {
        let (side_x, side_y) = (image.width(), image.height());
        let matches = self
            .heatmap
            .as_ref()
            .is_some_and(|map| map.side_x() == side_x && map.side_y() == side_y);

        if !matches {
            if self.heatmap.is_some() {
                debug!("image size changed to {side_x}x{side_y}, discarding heatmap");
            } else {
                debug!("creating {side_x}x{side_y} heatmap");
            }
            self.heatmap = Some(SpatialHeatmap::with_config(
                side_x,
                side_y,
                self.config.heatmap,
            )?);
        }
        Ok(())
    }
}
