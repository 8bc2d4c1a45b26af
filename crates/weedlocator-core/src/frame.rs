use image::{GrayImage, Luma, Rgb, RgbImage};
use ndarray::{Array2, Array3};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{Result, WeedError};

/// A single color image frame.
/// Samples are 8-bit, stored in blue-green-red order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width, channels)
    pub data: Array3<u8>,
}

impl Frame {
    pub fn new(data: Array3<u8>) -> Self {
        Self { data }
    }

    /// Frame of the given size filled with one BGR value.
    pub fn filled(width: usize, height: usize, bgr: [u8; 3]) -> Self {
        let data = Array3::from_shape_fn((height, width, COLOR_CHANNEL_COUNT), |(_, _, ch)| bgr[ch]);
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// BGR triple at (row, col). Panics when out of bounds.
    pub fn bgr(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    pub fn set_bgr(&mut self, row: usize, col: usize, bgr: [u8; 3]) {
        for (ch, &v) in bgr.iter().enumerate() {
            self.data[[row, col, ch]] = v;
        }
    }

    /// Reject frames the detector cannot process.
    pub fn validate(&self) -> Result<()> {
        let (h, w, c) = self.data.dim();
        if h == 0 || w == 0 {
            return Err(WeedError::Input(format!("empty frame ({w}x{h})")));
        }
        if c != COLOR_CHANNEL_COUNT {
            return Err(WeedError::Input(format!(
                "expected {COLOR_CHANNEL_COUNT} channels, got {c}"
            )));
        }
        Ok(())
    }

    /// Build a frame from an RGB image, swapping to BGR order.
    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let data = Array3::from_shape_fn(
            (h as usize, w as usize, COLOR_CHANNEL_COUNT),
            |(row, col, ch)| img.get_pixel(col as u32, row as u32).0[2 - ch],
        );
        Self { data }
    }

    /// Convert back to an RGB image.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width() as u32, self.height() as u32);
        for row in 0..self.height() {
            for col in 0..self.width() {
                let [b, g, r] = self.bgr(row, col);
                img.put_pixel(col as u32, row as u32, Rgb([r, g, b]));
            }
        }
        img
    }
}

/// Binary mask as an 8-bit grayscale image (255 = foreground).
pub fn mask_to_gray(mask: &Array2<bool>) -> GrayImage {
    let (h, w) = mask.dim();
    GrayImage::from_fn(w as u32, h as u32, |x, y| {
        Luma([if mask[[y as usize, x as usize]] { 255 } else { 0 }])
    })
}
