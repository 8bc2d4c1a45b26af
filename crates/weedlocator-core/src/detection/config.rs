use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::annotate::AnnotationStyle;
use crate::consts::{
    DEFAULT_BRIGHTNESS_MAX, DEFAULT_BRIGHTNESS_MIN, DEFAULT_EXG_MAX, DEFAULT_EXG_MIN,
    DEFAULT_HUE_MAX, DEFAULT_HUE_MIN, DEFAULT_MIN_AREA, DEFAULT_SATURATION_MAX,
    DEFAULT_SATURATION_MIN, HUE_DOMAIN_MAX,
};
use crate::error::ConfigError;

/// Which channel predicate(s) build the vegetation mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    /// Excess-green window only.
    Exg,
    /// Hue, saturation and brightness windows.
    Hsv,
    /// Both of the above.
    #[default]
    ExHsv,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Exg, Algorithm::Hsv, Algorithm::ExHsv];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exg => "exg",
            Self::Hsv => "hsv",
            Self::ExHsv => "exhsv",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exg" => Ok(Self::Exg),
            "hsv" => Ok(Self::Hsv),
            "exhsv" => Ok(Self::ExHsv),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(value: Algorithm) -> Self {
        value.as_str().to_string()
    }
}

/// Threshold configuration for one detection pass.
///
/// All bounds are inclusive. Hue uses the 8-bit convention (0..=179).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    #[serde(default)]
    pub algorithm: Algorithm,
    #[serde(default = "default_exg_min")]
    pub exg_min: u8,
    #[serde(default = "default_exg_max")]
    pub exg_max: u8,
    #[serde(default = "default_hue_min")]
    pub hue_min: u8,
    #[serde(default = "default_hue_max")]
    pub hue_max: u8,
    #[serde(default = "default_brightness_min")]
    pub brightness_min: u8,
    #[serde(default = "default_brightness_max")]
    pub brightness_max: u8,
    #[serde(default = "default_saturation_min")]
    pub saturation_min: u8,
    #[serde(default = "default_saturation_max")]
    pub saturation_max: u8,
    /// Minimum filled-region area (pixels) for a region to be reported.
    #[serde(default = "default_min_area")]
    pub min_area: i64,
    /// Maximum filled-region area (pixels); `None` keeps arbitrarily large regions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_area: Option<i64>,
    /// Select hues outside [hue_min, hue_max] instead of inside, for targets
    /// whose hue range wraps around 0.
    #[serde(default)]
    pub invert_hue: bool,
    /// Number of 3x3 closing passes applied to the mask before contour search.
    #[serde(default)]
    pub close_iterations: u32,
    #[serde(default)]
    pub annotation: AnnotationStyle,
}

fn default_exg_min() -> u8 {
    DEFAULT_EXG_MIN
}
fn default_exg_max() -> u8 {
    DEFAULT_EXG_MAX
}
fn default_hue_min() -> u8 {
    DEFAULT_HUE_MIN
}
fn default_hue_max() -> u8 {
    DEFAULT_HUE_MAX
}
fn default_brightness_min() -> u8 {
    DEFAULT_BRIGHTNESS_MIN
}
fn default_brightness_max() -> u8 {
    DEFAULT_BRIGHTNESS_MAX
}
fn default_saturation_min() -> u8 {
    DEFAULT_SATURATION_MIN
}
fn default_saturation_max() -> u8 {
    DEFAULT_SATURATION_MAX
}
fn default_min_area() -> i64 {
    DEFAULT_MIN_AREA
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            exg_min: DEFAULT_EXG_MIN,
            exg_max: DEFAULT_EXG_MAX,
            hue_min: DEFAULT_HUE_MIN,
            hue_max: DEFAULT_HUE_MAX,
            brightness_min: DEFAULT_BRIGHTNESS_MIN,
            brightness_max: DEFAULT_BRIGHTNESS_MAX,
            saturation_min: DEFAULT_SATURATION_MIN,
            saturation_max: DEFAULT_SATURATION_MAX,
            min_area: DEFAULT_MIN_AREA,
            max_area: None,
            invert_hue: false,
            close_iterations: 0,
            annotation: AnnotationStyle::default(),
        }
    }
}

impl DetectionConfig {
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_min_area(mut self, min_area: i64) -> Self {
        self.min_area = min_area;
        self
    }

    pub fn with_max_area(mut self, max_area: Option<i64>) -> Self {
        self.max_area = max_area;
        self
    }

    /// Check every threshold pair and the area cutoffs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pairs = [
            ("exg", self.exg_min, self.exg_max),
            ("hue", self.hue_min, self.hue_max),
            ("brightness", self.brightness_min, self.brightness_max),
            ("saturation", self.saturation_min, self.saturation_max),
        ];
        for (channel, min, max) in pairs {
            if min > max {
                return Err(ConfigError::InvertedRange { channel, min, max });
            }
        }

        if self.hue_max > HUE_DOMAIN_MAX {
            return Err(ConfigError::HueOutOfRange {
                bound: "hue_max",
                value: self.hue_max,
            });
        }

        if self.min_area < 0 {
            return Err(ConfigError::NegativeMinArea(self.min_area));
        }

        if let Some(max) = self.max_area {
            if max < self.min_area {
                return Err(ConfigError::InvertedAreaRange {
                    min: self.min_area,
                    max,
                });
            }
        }

        Ok(())
    }
}
