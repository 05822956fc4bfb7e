//! Wayscan domain model
//!
//! Image-free pieces of the obstacle/steering pipeline: contour geometry,
//! the per-column free-space boundary, chunked direction heuristic and
//! obstacle summaries.

pub mod direction;
pub mod geometry;
pub mod obstacle;
pub mod profile;

pub use direction::{DirectionConfig, DirectionHeuristic, DirectionLabel, NavigationDecision};
pub use geometry::{BoundingBox, Contour, PixelPoint};
pub use obstacle::{ObstacleRecord, ObstacleSummaryBuilder};
pub use profile::{ChunkAverage, EdgePoint, EdgeProfile};
