use ndarray::{Array2, Zip};

use crate::color::{ColorChannels, PixelChannels};
use crate::consts::PARALLEL_PIXEL_THRESHOLD;

use super::config::{Algorithm, DetectionConfig};

/// A per-pixel foreground test over derived channel values.
pub type MaskPredicate = fn(&PixelChannels, &DetectionConfig) -> bool;

impl Algorithm {
    /// The masking predicate this algorithm applies to every pixel.
    pub fn predicate(self) -> MaskPredicate {
        match self {
            Algorithm::Exg => exg_predicate,
            Algorithm::Hsv => hsv_predicate,
            Algorithm::ExHsv => exhsv_predicate,
        }
    }
}

/// Excess-green value within [exg_min, exg_max].
pub fn exg_predicate(px: &PixelChannels, config: &DetectionConfig) -> bool {
    (config.exg_min..=config.exg_max).contains(&px.exg)
}

/// Hue window test, inverted when `invert_hue` is set.
pub fn hue_test(hue: u8, config: &DetectionConfig) -> bool {
    let inside = (config.hue_min..=config.hue_max).contains(&hue);
    inside != config.invert_hue
}

/// Hue test plus brightness and saturation windows.
pub fn hsv_predicate(px: &PixelChannels, config: &DetectionConfig) -> bool {
    hue_test(px.hue, config)
        && (config.brightness_min..=config.brightness_max).contains(&px.value)
        && (config.saturation_min..=config.saturation_max).contains(&px.saturation)
}

pub fn exhsv_predicate(px: &PixelChannels, config: &DetectionConfig) -> bool {
    exg_predicate(px, config) && hsv_predicate(px, config)
}

/// Build the binary vegetation mask with the configured algorithm.
pub fn build_mask(channels: &ColorChannels, config: &DetectionConfig) -> Array2<bool> {
    let predicate = config.algorithm.predicate();
    let (h, w) = channels.dim();
    let mut mask = Array2::from_elem((h, w), false);

    let zip = Zip::indexed(&mut mask);
    let apply = |(row, col): (usize, usize), m: &mut bool| {
        *m = predicate(&channels.at(row, col), config);
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_for_each(apply);
    } else {
        zip.for_each(apply);
    }

    mask
}
