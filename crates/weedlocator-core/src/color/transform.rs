use ndarray::{Array2, Zip};

use crate::consts::{EXG_SCALE, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::Frame;

/// Derived channel values for one pixel, each quantized to the domain the
/// detection thresholds are expressed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelChannels {
    /// Excess-green index in [0, 255].
    pub exg: u8,
    /// Hue in [0, 179] (degrees / 2).
    pub hue: u8,
    /// Saturation in [0, 255].
    pub saturation: u8,
    /// Value (brightness) in [0, 255].
    pub value: u8,
}

/// Per-pixel derived planes of a whole frame, shape = (height, width).
#[derive(Clone, Debug)]
pub struct ColorChannels {
    pub exg: Array2<u8>,
    pub hue: Array2<u8>,
    pub saturation: Array2<u8>,
    pub value: Array2<u8>,
}

impl ColorChannels {
    pub fn dim(&self) -> (usize, usize) {
        self.exg.dim()
    }

    pub fn at(&self, row: usize, col: usize) -> PixelChannels {
        PixelChannels {
            exg: self.exg[[row, col]],
            hue: self.hue[[row, col]],
            saturation: self.saturation[[row, col]],
            value: self.value[[row, col]],
        }
    }
}

/// Chromatic excess-green index of a BGR sample.
///
/// Uses normalized coordinates r = R/S, g = G/S, b = B/S with S = R + G + B,
/// computes (2g - r - b) * 255 and clamps into [0, 255]. Black maps to 0.
pub fn excess_green(bgr: [u8; 3]) -> u8 {
    let [b, g, r] = bgr.map(f32::from);
    let sum = r + g + b;
    if sum == 0.0 {
        return 0;
    }
    let index = (2.0 * g - r - b) / sum;
    (index * EXG_SCALE).clamp(0.0, 255.0) as u8
}

/// Convert a BGR sample to 8-bit HSV: hue in [0, 179], saturation and value in [0, 255].
pub fn bgr_to_hsv(bgr: [u8; 3]) -> (u8, u8, u8) {
    let [b, g, r] = bgr.map(f32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let value = max as u8;
    let saturation = if max == 0.0 {
        0
    } else {
        (255.0 * delta / max).round() as u8
    };

    let mut degrees = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (g - b) / delta
    } else if max == g {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if degrees < 0.0 {
        degrees += 360.0;
    }
    // 359 degrees rounds up to 180, which is the same angle as 0.
    let hue = ((degrees / 2.0).round() as u16 % 180) as u8;

    (hue, saturation, value)
}

pub fn pixel_channels(bgr: [u8; 3]) -> PixelChannels {
    let (hue, saturation, value) = bgr_to_hsv(bgr);
    PixelChannels {
        exg: excess_green(bgr),
        hue,
        saturation,
        value,
    }
}

/// Derive the excess-green and HSV planes of a frame.
///
/// The frame must have three channels; see [`Frame::validate`].
pub fn transform(frame: &Frame) -> ColorChannels {
    let (h, w) = (frame.height(), frame.width());
    let mut exg = Array2::<u8>::zeros((h, w));
    let mut hue = Array2::<u8>::zeros((h, w));
    let mut saturation = Array2::<u8>::zeros((h, w));
    let mut value = Array2::<u8>::zeros((h, w));

    let zip = Zip::indexed(&mut exg)
        .and(&mut hue)
        .and(&mut saturation)
        .and(&mut value);
    let fill = |(row, col): (usize, usize), e: &mut u8, hu: &mut u8, s: &mut u8, v: &mut u8| {
        let px = pixel_channels(frame.bgr(row, col));
        *e = px.exg;
        *hu = px.hue;
        *s = px.saturation;
        *v = px.value;
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(fill);
    } else {
        zip.for_each(fill);
    }

    ColorChannels {
        exg,
        hue,
        saturation,
        value,
    }
}
