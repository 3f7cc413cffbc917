//! Conversion between image files and channel-first float buffers

use std::path::Path;

use image::{Rgb, RgbImage};
use ndarray::Array3;

use crate::io::error::{CutError, Result};
use crate::raster::Image;

/// Load an image file as a 3-channel buffer with values in `[0, 1]`
///
/// # Errors
///
/// Returns an error if:
/// - The file at the given path cannot be opened or decoded
/// - The decoded image is empty
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Image> {
    let path_buf = path.as_ref().to_path_buf();
    let decoded = image::open(&path_buf).map_err(|e| CutError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    from_rgb(&decoded.to_rgb8())
}

/// Convert an 8-bit RGB image into a normalized channel-first buffer
///
/// # Errors
///
/// Returns an error if the image is empty
pub fn from_rgb(rgb: &RgbImage) -> Result<Image> {
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let mut data = Array3::zeros((3, height, width));

    for (x, y, pixel) in rgb.enumerate_pixels() {
        for (c, &value) in pixel.0.iter().enumerate() {
            if let Some(slot) = data.get_mut((c, y as usize, x as usize)) {
                *slot = f32::from(value) / 255.0;
            }
        }
    }

    Image::new(data)
}

/// Render a buffer as 8-bit RGB, clamping values to `[0, 1]`
///
/// Single-channel buffers are replicated to gray; extra channels beyond the
/// third are ignored.
pub fn to_rgb(image: &Image) -> RgbImage {
    let view = image.view();
    let channels = image.channels();
    let mut out = RgbImage::new(image.width() as u32, image.height() as u32);

    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let mut rgb = [0u8; 3];
        for (c, slot) in rgb.iter_mut().enumerate() {
            let channel = c.min(channels - 1);
            let value = view
                .get((channel, y as usize, x as usize))
                .copied()
                .unwrap_or(0.0);
            *slot = to_byte(value);
        }
        *pixel = Rgb(rgb);
    }

    out
}

/// Map a normalized value to a byte, clamping out-of-range input
pub fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
