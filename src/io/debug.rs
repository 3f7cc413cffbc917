//! Diagnostic renderings of the heatmap, cut bounds and individual cuts
//!
//! These are read-only consumers of sampler output, intended for inspecting
//! where cuts land during a run.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::cutout::CutoutBatch;
use crate::io::configuration::{BOUNDS_IMAGE_NAME, CUT_IMAGE_PREFIX, HEATMAP_IMAGE_NAME};
use crate::io::error::{CutError, Result};
use crate::io::image::to_rgb;
use crate::raster::Image;
use crate::spatial::{CutBounds, SpatialHeatmap};

/// Outline color for cut bounds
const BOUNDS_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Render heatmap weights as gray levels (weight 1.0 is white)
pub fn heatmap_to_rgb(heatmap: &SpatialHeatmap) -> RgbImage {
    let weights = heatmap.weights();
    let mut out = RgbImage::new(heatmap.side_x() as u32, heatmap.side_y() as u32);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let weight = weights
            .get((y as usize, x as usize))
            .copied()
            .unwrap_or(0.0);
        let level = (weight.clamp(0.0, 1.0) * 255.0).round() as u8;
        *pixel = Rgb([level, level, level]);
    }
    out
}

/// Draw a one-pixel outline for every bound over the image
///
/// Bounds that extend past the image are clipped; only visible edges are drawn.
pub fn bounds_overlay(image: &Image, bounds: &[CutBounds]) -> RgbImage {
    let mut out = to_rgb(image);
    let (width, height) = (i64::from(out.width()), i64::from(out.height()));

    let mut plot = |x: i64, y: i64| {
        if (0..width).contains(&x) && (0..height).contains(&y) {
            out.put_pixel(x as u32, y as u32, BOUNDS_COLOR);
        }
    };

    for b in bounds {
        // Outline the last pixel inside the half-open window
        let (right, bottom) = (b.right - 1, b.bottom - 1);
        for x in b.left..=right {
            plot(x, b.top);
            plot(x, bottom);
        }
        for y in b.top..=bottom {
            plot(b.left, y);
            plot(right, y);
        }
    }

    out
}

/// Write the heatmap, bounds overlay and every cut into `dir`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an image cannot be saved
pub fn save_debug_images(
    dir: &Path,
    image: &Image,
    batch: &CutoutBatch,
    heatmap: Option<&SpatialHeatmap>,
) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| CutError::FileSystem {
        path: dir.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    if let Some(heatmap) = heatmap {
        save(&heatmap_to_rgb(heatmap), &dir.join(HEATMAP_IMAGE_NAME))?;
    }
    save(
        &bounds_overlay(image, &batch.inner_bounds),
        &dir.join(BOUNDS_IMAGE_NAME),
    )?;
    for (index, cut) in batch.cuts.iter().enumerate() {
        save(
            &to_rgb(cut),
            &dir.join(format!("{CUT_IMAGE_PREFIX}_{index}.png")),
        )?;
    }
    Ok(())
}

fn save(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path).map_err(|e| CutError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
