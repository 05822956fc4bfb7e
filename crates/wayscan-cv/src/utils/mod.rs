//! Utility modules

pub mod image;
pub mod output;

pub use image::ImageUtils;
pub use output::OutputWriter;
