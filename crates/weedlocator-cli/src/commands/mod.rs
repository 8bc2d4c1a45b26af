pub mod config;
pub mod detect;
pub mod mask;
pub mod thresholds;
