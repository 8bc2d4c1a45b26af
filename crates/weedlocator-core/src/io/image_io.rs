use std::path::Path;

use image::ImageFormat;
use ndarray::Array2;

use crate::error::Result;
use crate::frame::{mask_to_gray, Frame};

/// Load any image the `image` crate can decode as a BGR frame.
///
/// Grayscale and alpha inputs are converted to 8-bit RGB first.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    Ok(Frame::from_rgb_image(&img.to_rgb8()))
}

/// Save a frame, choosing the format from the file extension (PNG when unknown).
pub fn save_frame(frame: &Frame, path: &Path) -> Result<()> {
    let img = frame.to_rgb_image();
    match ImageFormat::from_path(path) {
        Ok(format) => img.save_with_format(path, format)?,
        Err(_) => img.save_with_format(path, ImageFormat::Png)?,
    }
    Ok(())
}

/// Save a binary mask as 8-bit grayscale PNG (255 = foreground).
pub fn save_mask(mask: &Array2<bool>, path: &Path) -> Result<()> {
    mask_to_gray(mask).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
