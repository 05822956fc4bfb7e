//! Wayscan Computer Vision Library
//!
//! Single-frame obstacle detection and coarse steering using OpenCV: a
//! per-column free-space boundary, thresholded contour obstacles, and an
//! annotated output frame.

pub mod contours;
pub mod detection;
pub mod edges;
pub mod error;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use contours::ContourExtractor;
pub use detection::{
    NavigationOutcome, NavigatorConfig, ObstacleNavigator, RenderVariant, SceneAnalysis,
};
pub use edges::EdgeProfiler;
pub use error::NavError;
pub use render::{HighlightRenderer, TraceRenderer};
pub use wayscan_core::{DirectionLabel, EdgeProfile, ObstacleRecord};

// Error handling
pub type Result<T> = std::result::Result<T, NavError>;

/// Core traits for the CV system
pub mod traits {
    use super::*;
    use opencv::core::Mat;

    /// Binary edge raster scanned by the `EdgeProfiler`
    pub trait EdgeMask {
        fn width(&self) -> usize;
        fn height(&self) -> usize;
        /// Nonzero pixel at column `x`, row `y`
        fn is_edge(&self, x: usize, y: usize) -> Result<bool>;
    }

    /// Strategy drawing analysis results onto a copy of the input frame
    pub trait AnnotationRenderer: Send + Sync {
        fn variant(&self) -> RenderVariant;

        /// Draw in place; the canvas keeps its dimensions
        fn render(&self, canvas: &mut Mat, scene: &SceneAnalysis) -> Result<()>;

        /// Label reported to callers alongside the rendered frame
        fn reported_direction(&self, scene: &SceneAnalysis) -> DirectionLabel;
    }
}
