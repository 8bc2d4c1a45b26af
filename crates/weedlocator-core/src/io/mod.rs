pub mod image_io;

pub use image_io::{load_frame, save_frame, save_mask};
