//! Obstacle records built from thresholded contours

use crate::geometry::Contour;
use serde::{Deserialize, Serialize};

/// Reported obstacle candidate.
///
/// `id` is the index of the contour in the full extraction order, so ids
/// stay stable and may have gaps once small contours are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleRecord {
    pub id: usize,
    pub area: f64,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Area filter turning contours into obstacle records
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSummaryBuilder {
    min_area: f64,
}

impl Default for ObstacleSummaryBuilder {
    fn default() -> Self {
        Self::new(500.0)
    }
}

impl ObstacleSummaryBuilder {
    pub fn new(min_area: f64) -> Self {
        Self { min_area }
    }

    pub fn min_area(&self) -> f64 {
        self.min_area
    }

    /// Keep contours whose area strictly exceeds the minimum, in extraction order
    pub fn summarize(&self, contours: &[Contour]) -> Vec<ObstacleRecord> {
        contours
            .iter()
            .enumerate()
            .filter_map(|(id, contour)| {
                let area = contour.area();
                if area <= self.min_area {
                    return None;
                }

                let bbox = contour.bounding_box();
                Some(ObstacleRecord {
                    id,
                    area,
                    x: bbox.x,
                    y: bbox.y,
                    width: bbox.width,
                    height: bbox.height,
                })
            })
            .collect()
    }
}
