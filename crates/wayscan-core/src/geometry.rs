//! Pixel-space geometry shared by the vision pipeline
//!
//! Contours arrive from the thresholding stage as ordered boundary points;
//! area and bounding box are derived here so they can be checked without
//! an image backend.

use serde::{Deserialize, Serialize};

/// Integer pixel coordinate (x grows right, y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box with inclusive pixel extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// Closed boundary of a thresholded region, in discovery order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contour {
    points: Vec<PixelPoint>,
}

impl Contour {
    pub fn new(points: Vec<PixelPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Polygon area via the shoelace formula, always non-negative.
    ///
    /// Fewer than three points enclose nothing and report zero.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }

        let mut twice_area = 0i64;
        let mut prev = self.points[self.points.len() - 1];
        for &p in &self.points {
            twice_area += prev.x as i64 * p.y as i64 - p.x as i64 * prev.y as i64;
            prev = p;
        }

        (twice_area as f64 / 2.0).abs()
    }

    /// Smallest upright box containing every boundary pixel.
    ///
    /// Width and height count pixels inclusively, so a single point has a 1x1 box.
    pub fn bounding_box(&self) -> BoundingBox {
        let Some(first) = self.points.first() else {
            return BoundingBox::default();
        };

        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        BoundingBox::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }
}

impl FromIterator<PixelPoint> for Contour {
    fn from_iter<T: IntoIterator<Item = PixelPoint>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
