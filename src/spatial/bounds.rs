//! Pixel bounds arithmetic for cut windows and uniform centerpoint draws

use std::ops::Range;

use rand::Rng;

use crate::io::error::{Result, invalid_dimensions};

/// Half-open pixel window `left..right` by `top..bottom`
///
/// Coordinates are relative to the unpadded image origin. Bounds reported for
/// padded cuts may be negative or exceed the image extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CutBounds {
    /// First column (inclusive)
    pub left: i64,
    /// Last column (exclusive)
    pub right: i64,
    /// First row (inclusive)
    pub top: i64,
    /// Last row (exclusive)
    pub bottom: i64,
}

impl CutBounds {
    /// Bounds from `(left, right, top, bottom)`
    pub const fn new(left: i64, right: i64, top: i64, bottom: i64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Window width in pixels (zero if inverted)
    pub const fn width(&self) -> usize {
        if self.right > self.left {
            (self.right - self.left) as usize
        } else {
            0
        }
    }

    /// Window height in pixels (zero if inverted)
    pub const fn height(&self) -> usize {
        if self.bottom > self.top {
            (self.bottom - self.top) as usize
        } else {
            0
        }
    }

    /// Move the window by `(dx, dy)`
    #[must_use]
    pub const fn shifted(self, dx: i64, dy: i64) -> Self {
        Self {
            left: self.left + dx,
            right: self.right + dx,
            top: self.top + dy,
            bottom: self.bottom + dy,
        }
    }

    /// Row and column index ranges, clipped to a `rows x cols` grid
    pub fn grid_ranges(&self, rows: usize, cols: usize) -> (Range<usize>, Range<usize>) {
        let clip = |value: i64, limit: usize| value.clamp(0, limit as i64) as usize;
        let row_start = clip(self.top, rows);
        let row_end = clip(self.bottom, rows).max(row_start);
        let col_start = clip(self.left, cols);
        let col_end = clip(self.right, cols).max(col_start);
        (row_start..row_end, col_start..col_end)
    }

    /// As the `(left, right, top, bottom)` tuple used in diagnostics
    pub const fn as_tuple(&self) -> (i64, i64, i64, i64) {
        (self.left, self.right, self.top, self.bottom)
    }
}

/// Convert a center point and cut size into clamped pixel bounds
///
/// Each side is clamped independently, so near an edge the window shrinks
/// instead of shifting; the result can be smaller than `size` and non-square.
///
/// # Errors
///
/// Returns an error if the image extent is zero or the center lies outside
/// `0..=image_x` by `0..=image_y`
pub fn center_to_bounds(
    center_x: usize,
    center_y: usize,
    size: usize,
    image_x: usize,
    image_y: usize,
) -> Result<CutBounds> {
    if image_x == 0 || image_y == 0 {
        return Err(invalid_dimensions(
            "center_to_bounds",
            &format!("image extent must be non-zero, got {image_x}x{image_y}"),
        ));
    }
    if center_x > image_x || center_y > image_y {
        return Err(invalid_dimensions(
            "center_to_bounds",
            &format!("center ({center_x}, {center_y}) lies outside {image_x}x{image_y}"),
        ));
    }

    let pad = (size / 2) as i64;
    let (cx, cy) = (center_x as i64, center_y as i64);

    Ok(CutBounds {
        left: (cx - pad).max(0),
        right: (cx + pad).min(image_x as i64),
        top: (cy - pad).max(0),
        bottom: (cy + pad).min(image_y as i64),
    })
}

/// Indices eligible as centers on one axis when `margin` pixels are excluded per side
///
/// When the margin leaves nothing (an even cut exactly as wide as the axis)
/// the range collapses to the middle cell, whose window spans the full axis.
pub const fn interior_range(side: usize, margin: usize) -> Range<usize> {
    if side > 2 * margin {
        margin..side - margin
    } else {
        side / 2..side / 2 + 1
    }
}

/// Draw a uniformly random centerpoint at least `inner_mask_size` pixels from each edge
///
/// With a zero margin any pixel may be drawn, which is only sensible when the
/// cut will be zero-padded. The function does not know the intended cut size;
/// callers pass a margin consistent with it.
///
/// # Errors
///
/// Returns an error if either side is zero
pub fn random_sample<R: Rng>(
    side_x: usize,
    side_y: usize,
    inner_mask_size: usize,
    rng: &mut R,
) -> Result<(usize, usize)> {
    if side_x == 0 || side_y == 0 {
        return Err(invalid_dimensions(
            "random_sample",
            &format!("image extent must be non-zero, got {side_x}x{side_y}"),
        ));
    }

    let x = rng.random_range(interior_range(side_x, inner_mask_size));
    let y = rng.random_range(interior_range(side_y, inner_mask_size));
    Ok((x, y))
}
