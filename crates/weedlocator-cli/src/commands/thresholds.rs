use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use weedlocator_core::detection::{Algorithm, DetectionConfig};

#[derive(Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    /// Excess green only
    Exg,
    /// Hue, saturation and brightness windows
    Hsv,
    /// Excess green and HSV combined
    Exhsv,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Exg => Algorithm::Exg,
            AlgorithmArg::Hsv => Algorithm::Hsv,
            AlgorithmArg::Exhsv => Algorithm::ExHsv,
        }
    }
}

/// Threshold flags shared by `detect` and `mask`.
///
/// Every flag is optional; unset flags keep the value from `--config` (or the
/// built-in default when no config file is given).
#[derive(Args)]
pub struct ThresholdArgs {
    /// Detection config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Segmentation algorithm
    #[arg(long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    #[arg(long)]
    pub exg_min: Option<u8>,
    #[arg(long)]
    pub exg_max: Option<u8>,

    /// Lower hue bound (0-179)
    #[arg(long)]
    pub hue_min: Option<u8>,
    /// Upper hue bound (0-179)
    #[arg(long)]
    pub hue_max: Option<u8>,

    #[arg(long)]
    pub brightness_min: Option<u8>,
    #[arg(long)]
    pub brightness_max: Option<u8>,
    #[arg(long)]
    pub saturation_min: Option<u8>,
    #[arg(long)]
    pub saturation_max: Option<u8>,

    /// Minimum region area in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub min_area: Option<i64>,

    /// Maximum region area in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub max_area: Option<i64>,

    /// Select hues outside [hue-min, hue-max] (true or false)
    #[arg(long, value_name = "BOOL")]
    pub invert_hue: Option<bool>,

    /// Number of 3x3 closing passes before contour search
    #[arg(long)]
    pub close: Option<u32>,
}

impl ThresholdArgs {
    /// Load the base config, apply flag overrides and validate the result.
    pub fn resolve(&self) -> Result<DetectionConfig> {
        let mut config = match self.config {
            Some(ref path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                toml::from_str(&contents)
                    .with_context(|| format!("Invalid detection config {}", path.display()))?
            }
            None => DetectionConfig::default(),
        };
        self.apply(&mut config);
        config.validate().context("Invalid thresholds")?;
        Ok(config)
    }

    fn apply(&self, config: &mut DetectionConfig) {
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm.into();
        }
        let overrides = [
            (self.exg_min, &mut config.exg_min),
            (self.exg_max, &mut config.exg_max),
            (self.hue_min, &mut config.hue_min),
            (self.hue_max, &mut config.hue_max),
            (self.brightness_min, &mut config.brightness_min),
            (self.brightness_max, &mut config.brightness_max),
            (self.saturation_min, &mut config.saturation_min),
            (self.saturation_max, &mut config.saturation_max),
        ];
        for (flag, field) in overrides {
            if let Some(v) = flag {
                *field = v;
            }
        }
        if let Some(min_area) = self.min_area {
            config.min_area = min_area;
        }
        if self.max_area.is_some() {
            config.max_area = self.max_area;
        }
        if let Some(invert) = self.invert_hue {
            config.invert_hue = invert;
        }
        if let Some(close) = self.close {
            config.close_iterations = close;
        }
    }
}
