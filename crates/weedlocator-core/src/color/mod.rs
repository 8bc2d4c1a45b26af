pub mod transform;

pub use transform::{transform, ColorChannels, PixelChannels};
