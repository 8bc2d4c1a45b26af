use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeedError {
    #[error("Invalid input frame: {0}")]
    Input(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

/// Reasons a [`DetectionConfig`](crate::detection::DetectionConfig) is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{channel} range is inverted: min {min} > max {max}")]
    InvertedRange {
        channel: &'static str,
        min: u8,
        max: u8,
    },

    #[error("{bound} = {value} is outside the hue domain 0..=179")]
    HueOutOfRange { bound: &'static str, value: u8 },

    #[error("min_area must be non-negative, got {0}")]
    NegativeMinArea(i64),

    #[error("area range is inverted: min_area {min} > max_area {max}")]
    InvertedAreaRange { min: i64, max: i64 },

    #[error("unknown algorithm '{0}' (expected exg, hsv or exhsv)")]
    UnknownAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, WeedError>;
