pub mod batch;
pub mod components;
pub mod config;
pub mod contour;
pub mod detect;
pub mod geometry;
pub mod morphology;
pub mod threshold;

pub use batch::detect_batch;
pub use config::{Algorithm, DetectionConfig};
pub use contour::{Contour, Point};
pub use detect::{compute_mask, detect, Detection, DetectionResult};
pub use geometry::{BoundingBox, Centroid};
