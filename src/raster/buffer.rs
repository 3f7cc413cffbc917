//! Channel-first floating point image buffer
//!
//! Pixels are stored as `(channels, height, width)` in an `ndarray::Array3`.
//! Values are not clamped anywhere in this module; display code clamps.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis, s};

use crate::io::configuration::LUMA_WEIGHTS;
use crate::io::error::{Result, invalid_dimensions};
use crate::spatial::bounds::CutBounds;

/// Dense multi-channel image with normalized floating point values
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: Array3<f32>,
}

impl Image {
    /// Wrap a `(channels, height, width)` array
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero
    pub fn new(data: Array3<f32>) -> Result<Self> {
        let (channels, height, width) = data.dim();
        if channels == 0 || height == 0 || width == 0 {
            return Err(invalid_dimensions(
                "image construction",
                &format!("image must be non-empty, got {channels}x{height}x{width}"),
            ));
        }
        Ok(Self { data })
    }

    /// Image filled with a single value
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero
    pub fn filled(channels: usize, height: usize, width: usize, value: f32) -> Result<Self> {
        Self::new(Array3::from_elem((channels, height, width), value))
    }

    /// Number of channels
    pub fn channels(&self) -> usize {
        self.data.dim().0
    }

    /// Height in pixels (`side_y`)
    pub fn height(&self) -> usize {
        self.data.dim().1
    }

    /// Width in pixels (`side_x`)
    pub fn width(&self) -> usize {
        self.data.dim().2
    }

    /// Shape as `(channels, height, width)`
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Borrow the underlying pixel array
    pub fn view(&self) -> ArrayView3<'_, f32> {
        self.data.view()
    }

    /// Borrow a single channel plane
    pub fn plane(&self, channel: usize) -> ArrayView2<'_, f32> {
        self.data.index_axis(Axis(0), channel)
    }

    /// Mutable access to the pixel array
    pub const fn data_mut(&mut self) -> &mut Array3<f32> {
        &mut self.data
    }

    /// Consume the image and return its pixel array
    pub fn into_array(self) -> Array3<f32> {
        self.data
    }

    /// Rebuild an image from per-channel planes of identical shape
    ///
    /// # Errors
    ///
    /// Returns an error if no planes are given or their shapes differ
    pub fn from_planes(planes: &[Array2<f32>]) -> Result<Self> {
        let views: Vec<ArrayView2<'_, f32>> = planes.iter().map(Array2::view).collect();
        if views.is_empty() {
            return Err(invalid_dimensions(
                "image construction",
                &"at least one channel plane is required",
            ));
        }
        let data = ndarray::stack(Axis(0), &views)?;
        Self::new(data)
    }

    /// Copy the pixels inside `bounds`, treating everything outside the image as zero
    ///
    /// Bounds are half-open (`left..right`, `top..bottom`) and may extend
    /// past any edge, which is how padded cuts are extracted without building
    /// the padded canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds enclose no pixels
    pub fn crop(&self, bounds: CutBounds) -> Result<Self> {
        let crop_width = bounds.width();
        let crop_height = bounds.height();
        if crop_width == 0 || crop_height == 0 {
            return Err(invalid_dimensions(
                "crop",
                &format!("bounds {bounds:?} enclose no pixels"),
            ));
        }

        let mut out = Array3::zeros((self.channels(), crop_height, crop_width));

        // Intersection of the requested window with the image, in image coordinates
        let src_left = bounds.left.clamp(0, self.width() as i64);
        let src_right = bounds.right.clamp(0, self.width() as i64);
        let src_top = bounds.top.clamp(0, self.height() as i64);
        let src_bottom = bounds.bottom.clamp(0, self.height() as i64);

        if src_left < src_right && src_top < src_bottom {
            let dst_left = (src_left - bounds.left) as usize;
            let dst_top = (src_top - bounds.top) as usize;
            let w = (src_right - src_left) as usize;
            let h = (src_bottom - src_top) as usize;

            out.slice_mut(s![.., dst_top..dst_top + h, dst_left..dst_left + w])
                .assign(&self.data.slice(s![
                    ..,
                    src_top as usize..src_bottom as usize,
                    src_left as usize..src_right as usize
                ]));
        }

        Self::new(out)
    }

    /// Zero-pad the shorter axis so the image becomes (nearly) square
    ///
    /// Each side of the shorter axis gets `floor(diff / 2)` zero pixels, so
    /// an odd difference leaves the result one pixel short of square.
    #[must_use]
    pub fn letterbox(&self) -> Self {
        let (height, width) = (self.height(), self.width());
        let side = height.min(width);
        let pad_x = (height - side) / 2;
        let pad_y = (width - side) / 2;

        let out_width = width + 2 * pad_x;
        let out_height = height + 2 * pad_y;
        let mut out = Array3::zeros((self.channels(), out_height, out_width));
        out.slice_mut(s![.., pad_y..pad_y + height, pad_x..pad_x + width])
            .assign(&self.data);

        Self { data: out }
    }

    /// Zero-pad every side by `pad` pixels
    #[must_use]
    pub fn pad(&self, pad: usize) -> Self {
        let (height, width) = (self.height(), self.width());
        let mut out = Array3::zeros((self.channels(), height + 2 * pad, width + 2 * pad));
        out.slice_mut(s![.., pad..pad + height, pad..pad + width])
            .assign(&self.data);
        Self { data: out }
    }

    /// Luma broadcast to every channel
    ///
    /// Three-channel images use ITU-R 601 weights; other channel counts use
    /// the channel mean.
    #[must_use]
    pub fn grayscale(&self) -> Self {
        let luma: Array2<f32> = if self.channels() == 3 {
            let mut acc = Array2::zeros((self.height(), self.width()));
            for (plane, &weight) in self.data.outer_iter().zip(LUMA_WEIGHTS.iter()) {
                acc.scaled_add(weight, &plane);
            }
            acc
        } else {
            self.data
                .mean_axis(Axis(0))
                .unwrap_or_else(|| Array2::zeros((self.height(), self.width())))
        };

        let mut data = Array3::zeros(self.data.raw_dim());
        for mut plane in data.outer_iter_mut() {
            plane.assign(&luma);
        }
        Self { data }
    }

    /// Mirror left to right
    #[must_use]
    pub fn flip_horizontal(&self) -> Self {
        Self {
            data: self.data.slice(s![.., .., ..;-1]).to_owned(),
        }
    }
}
