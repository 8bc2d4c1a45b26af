pub mod annotate;
pub mod color;
pub mod consts;
pub mod detection;
pub mod error;
pub mod frame;
pub mod io;

pub use detection::{detect, Algorithm, DetectionConfig, DetectionResult};
pub use error::{ConfigError, Result, WeedError};
pub use frame::Frame;
