//! Lower free-space boundary sampled across image columns

use serde::{Deserialize, Serialize};

/// Lowest edge pixel found at one sampled column.
///
/// `found` is false when the column scan hit no edge and `y` fell back to row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePoint {
    pub x: i32,
    pub y: i32,
    pub found: bool,
}

impl EdgePoint {
    pub fn detected(x: i32, y: i32) -> Self {
        Self { x, y, found: true }
    }

    pub fn missing(x: i32) -> Self {
        Self { x, y: 0, found: false }
    }
}

/// One `EdgePoint` per sampled column, ordered left to right
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeProfile {
    pub points: Vec<EdgePoint>,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl EdgeProfile {
    pub fn new(points: Vec<EdgePoint>, frame_width: u32, frame_height: u32) -> Self {
        Self {
            points,
            frame_width,
            frame_height,
        }
    }

    /// Number of sampled columns for a frame width and stride
    pub fn expected_len(frame_width: u32, step: usize) -> usize {
        (frame_width as usize).div_ceil(step.max(1))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether any sampled column actually hit an edge
    pub fn has_edges(&self) -> bool {
        self.points.iter().any(|p| p.found)
    }

    /// Split into contiguous chunks of `len / chunk_count` points.
    ///
    /// Leftover points form a trailing partial chunk. If the profile is
    /// shorter than `chunk_count`, the whole profile is a single chunk.
    /// Concatenating the result always reproduces `points`.
    pub fn partition(&self, chunk_count: usize) -> Vec<&[EdgePoint]> {
        if self.points.is_empty() {
            return Vec::new();
        }

        let chunk_size = self.points.len() / chunk_count.max(1);
        if chunk_size == 0 {
            return vec![self.points.as_slice()];
        }

        self.points.chunks(chunk_size).collect()
    }
}

/// Mean position of one chunk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkAverage {
    pub avg_y: f64,
    pub avg_x: f64,
}

impl ChunkAverage {
    /// `None` for an empty chunk
    pub fn of(chunk: &[EdgePoint]) -> Option<Self> {
        if chunk.is_empty() {
            return None;
        }

        let n = chunk.len() as f64;
        let sum_y: f64 = chunk.iter().map(|p| p.y as f64).sum();
        let sum_x: f64 = chunk.iter().map(|p| p.x as f64).sum();

        Some(Self {
            avg_y: sum_y / n,
            avg_x: sum_x / n,
        })
    }

    /// Lexicographic order on (avg_y, avg_x)
    pub fn cmp_height_first(&self, other: &Self) -> std::cmp::Ordering {
        self.avg_y
            .total_cmp(&other.avg_y)
            .then(self.avg_x.total_cmp(&other.avg_x))
    }
}
