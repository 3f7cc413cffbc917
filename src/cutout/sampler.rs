//! Overview and inner cut orchestration
//!
//! One call produces a batch of `cut_size x cut_size` cuts: first the
//! overview cuts derived from the whole letterboxed image, then the inner
//! cuts whose size and position are drawn at random (optionally guided by a
//! [`SpatialHeatmap`]). Batch order is significant to callers that weight
//! cuts by index.

use log::{debug, trace};
use ndarray::{Array4, ArrayView3, Axis};
use rand::{Rng, RngCore};

use crate::cutout::augment::Augmentation;
use crate::io::configuration::{
    DEFAULT_CUT_SIZE, DEFAULT_INNER_COUNT, DEFAULT_INNER_GRAY_FRACTION,
    DEFAULT_INNER_SIZE_EXPONENT, DEFAULT_OVERVIEW_COUNT, MAX_DETERMINISTIC_OVERVIEWS,
};
use crate::io::error::{Result, invalid_dimensions, invalid_parameter};
use crate::raster::{Image, resample};
use crate::spatial::bounds::{CutBounds, center_to_bounds, random_sample};
use crate::spatial::heatmap::SpatialHeatmap;

/// Deterministic whole-image variants, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverviewVariant {
    /// The letterboxed image as is
    Identity,
    /// Luma broadcast to all channels
    Grayscale,
    /// Mirrored left to right
    Flipped,
    /// Mirrored, then converted to grayscale
    GrayscaleFlipped,
}

impl OverviewVariant {
    /// Candidate order; requesting fewer than four keeps the leading entries
    pub const ORDER: [Self; MAX_DETERMINISTIC_OVERVIEWS] = [
        Self::Identity,
        Self::Grayscale,
        Self::Flipped,
        Self::GrayscaleFlipped,
    ];

    /// Apply this variant to an overview cut
    pub fn apply(self, cut: &Image) -> Image {
        match self {
            Self::Identity => cut.clone(),
            Self::Grayscale => cut.grayscale(),
            Self::Flipped => cut.flip_horizontal(),
            Self::GrayscaleFlipped => cut.flip_horizontal().grayscale(),
        }
    }
}

/// Per-call sampling parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoutParams {
    /// Side length of every emitted cut
    pub cut_size: usize,
    /// Number of whole-image cuts
    pub overview_count: usize,
    /// Number of sub-region cuts
    pub inner_count: usize,
    /// Size distribution exponent; above 1 favors small cuts, below 1 large ones
    pub inner_size_exponent: f64,
    /// Leading share of inner cuts converted to grayscale, in `[0, 1]`
    pub inner_gray_fraction: f64,
    /// Allow inner cuts to extend past the image, filling with zeros
    pub pad_inner: bool,
    /// Use the smallest size for every inner cut instead of drawing one
    pub fix_inner_size: bool,
    /// Bypass the augmentation strategy
    pub skip_augment: bool,
}

impl Default for CutoutParams {
    fn default() -> Self {
        Self {
            cut_size: DEFAULT_CUT_SIZE,
            overview_count: DEFAULT_OVERVIEW_COUNT,
            inner_count: DEFAULT_INNER_COUNT,
            inner_size_exponent: DEFAULT_INNER_SIZE_EXPONENT,
            inner_gray_fraction: DEFAULT_INNER_GRAY_FRACTION,
            pad_inner: false,
            fix_inner_size: false,
            skip_augment: false,
        }
    }
}

impl CutoutParams {
    /// Check every field is within its allowed range
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range field
    pub fn validate(&self) -> Result<()> {
        if self.cut_size == 0 {
            return Err(invalid_dimensions("cutout sampling", &"cut_size must be positive"));
        }
        if !(self.inner_size_exponent >= 0.0 && self.inner_size_exponent.is_finite()) {
            return Err(invalid_parameter(
                "inner_size_exponent",
                &self.inner_size_exponent,
                &"must be non-negative and finite",
            ));
        }
        if !(0.0..=1.0).contains(&self.inner_gray_fraction) {
            return Err(invalid_parameter(
                "inner_gray_fraction",
                &self.inner_gray_fraction,
                &"must lie in [0, 1]",
            ));
        }
        Ok(())
    }

    /// Number of leading inner cuts that are converted to grayscale
    pub fn gray_inner_count(&self) -> usize {
        (self.inner_gray_fraction * self.inner_count as f64).floor() as usize
    }
}

/// Ordered cuts plus the source bounds of the inner cuts
#[derive(Debug, Clone)]
pub struct CutoutBatch {
    /// Overview cuts first, then inner cuts in draw order
    pub cuts: Vec<Image>,
    /// One entry per inner cut, parallel to the tail of `cuts`
    pub inner_bounds: Vec<CutBounds>,
    /// Side length shared by every cut
    pub cut_size: usize,
}

impl CutoutBatch {
    /// Number of cuts
    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    /// Whether the batch holds no cuts
    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Number of overview cuts at the head of the batch
    pub fn overview_len(&self) -> usize {
        self.cuts.len().saturating_sub(self.inner_bounds.len())
    }

    /// Stack every cut into one `(n, channels, cut_size, cut_size)` tensor
    ///
    /// # Errors
    ///
    /// Returns an error if the cuts do not share one shape
    pub fn stack(&self) -> Result<Array4<f32>> {
        let views: Vec<ArrayView3<'_, f32>> = self.cuts.iter().map(Image::view).collect();
        if views.is_empty() {
            return Ok(Array4::zeros((0, 3, self.cut_size, self.cut_size)));
        }
        Ok(ndarray::stack(Axis(0), &views)?)
    }
}

/// Produces overview and inner cuts for one image per call
///
/// Holds no state between calls besides its parameters and augmentation
/// strategy; heatmap persistence is the caller's concern.
pub struct CutoutSampler<A> {
    params: CutoutParams,
    augmentation: A,
}

impl<A: Augmentation> CutoutSampler<A> {
    /// Create a sampler
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are out of range
    pub fn new(params: CutoutParams, augmentation: A) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            augmentation,
        })
    }

    /// Parameters used for every call
    pub const fn params(&self) -> &CutoutParams {
        &self.params
    }

    /// Sample one batch of cuts from `image`
    ///
    /// When a heatmap is supplied each inner centerpoint is drawn from it and
    /// immediately suppressed. The heatmap is not decayed here.
    ///
    /// # Errors
    ///
    /// Returns an error if the heatmap shape differs from the image, the
    /// heatmap has no eligible weight, or resampling fails
    pub fn sample<R: Rng>(
        &mut self,
        image: &Image,
        mut heatmap: Option<&mut SpatialHeatmap>,
        rng: &mut R,
    ) -> Result<CutoutBatch> {
        let params = self.params;
        let (side_x, side_y) = (image.width(), image.height());

        if let Some(map) = heatmap.as_deref() {
            if map.side_x() != side_x || map.side_y() != side_y {
                return Err(invalid_dimensions(
                    "cutout sampling",
                    &format!(
                        "heatmap is {}x{} but image is {side_x}x{side_y}",
                        map.side_x(),
                        map.side_y()
                    ),
                ));
            }
        }

        debug!(
            "sampling {} overview and {} inner cuts at {}px",
            params.overview_count, params.inner_count, params.cut_size
        );

        let mut cuts = Vec::with_capacity(params.overview_count + params.inner_count);
        self.overview_cuts(image, &mut cuts, rng)?;

        let max_size = side_x.min(side_y);
        let min_size = max_size.min(params.cut_size);
        let gray_count = params.gray_inner_count();
        let mut inner_bounds = Vec::with_capacity(params.inner_count);

        for index in 0..params.inner_count {
            let size = if params.fix_inner_size {
                min_size
            } else {
                let u: f64 = rng.random();
                let span = (max_size - min_size) as f64;
                u.powf(params.inner_size_exponent)
                    .mul_add(span, min_size as f64)
                    .round() as usize
            }
            .max(1);

            let (center_x, center_y) = match heatmap.as_deref_mut() {
                Some(map) => {
                    let center = map.sample_centerpoint(size, params.pad_inner, rng)?;
                    map.add_cut(center.0, center.1, size)?;
                    center
                }
                None => {
                    let margin = if params.pad_inner { 0 } else { size / 2 };
                    random_sample(side_x, side_y, margin, rng)?
                }
            };

            // Padded bounds are computed on the padded canvas, then reported in
            // image coordinates; the crop zero-fills whatever lies outside
            let bounds = if params.pad_inner {
                let pad = size / 2;
                let offset = -(pad as i64);
                center_to_bounds(
                    center_x + pad,
                    center_y + pad,
                    size,
                    side_x + 2 * pad,
                    side_y + 2 * pad,
                )?
                .shifted(offset, offset)
            } else {
                center_to_bounds(center_x, center_y, size, side_x, side_y)?
            };
            trace!("inner cut {index}: size {size} at ({center_x}, {center_y}) -> {bounds:?}");

            let mut cut = image.crop(at_least_one_pixel(bounds))?;
            if index < gray_count {
                cut = cut.grayscale();
            }
            let cut = resample(&cut, params.cut_size, params.cut_size)?;
            cuts.push(self.finish(cut, rng));
            inner_bounds.push(bounds);
        }

        Ok(CutoutBatch {
            cuts,
            inner_bounds,
            cut_size: params.cut_size,
        })
    }

    fn overview_cuts<R: Rng>(
        &mut self,
        image: &Image,
        cuts: &mut Vec<Image>,
        rng: &mut R,
    ) -> Result<()> {
        let count = self.params.overview_count;
        if count == 0 {
            return Ok(());
        }

        let size = self.params.cut_size;
        let overview = resample(&image.letterbox(), size, size)?;

        if count <= MAX_DETERMINISTIC_OVERVIEWS {
            cuts.extend(
                OverviewVariant::ORDER
                    .iter()
                    .take(count)
                    .map(|variant| variant.apply(&overview)),
            );
        } else {
            for _ in 0..count {
                let cut = self.finish(overview.clone(), rng);
                cuts.push(cut);
            }
        }
        Ok(())
    }

    fn finish<R: Rng>(&mut self, cut: Image, rng: &mut R) -> Image {
        if self.params.skip_augment {
            cut
        } else {
            self.augmentation.augment(cut, rng as &mut dyn RngCore)
        }
    }
}

// A size-1 cut has pad 0, which yields an empty window; keep one pixel
const fn at_least_one_pixel(mut bounds: CutBounds) -> CutBounds {
    if bounds.right <= bounds.left {
        bounds.right = bounds.left + 1;
    }
    if bounds.bottom <= bounds.top {
        bounds.bottom = bounds.top + 1;
    }
    bounds
}
