//! Coarse steering decision from the free-space boundary

use crate::profile::{ChunkAverage, EdgeProfile};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete steering label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionLabel {
    Forward,
    Left,
    Right,
    Unknown,
}

impl DirectionLabel {
    /// Short machine-friendly name
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionLabel::Forward => "forward",
            DirectionLabel::Left => "left",
            DirectionLabel::Right => "right",
            DirectionLabel::Unknown => "unknown",
        }
    }

    /// Instruction text shown to operators and drawn on the annotated frame
    pub fn instruction(&self) -> &'static str {
        match self {
            DirectionLabel::Forward => "Move forward",
            DirectionLabel::Left => "Move left",
            DirectionLabel::Right => "Move right",
            DirectionLabel::Unknown => "Cannot determine direction",
        }
    }
}

impl fmt::Display for DirectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction heuristic parameters.
///
/// The pixel thresholds were tuned on 640x480 frames. With `scale_to_frame`
/// they are rescaled to the actual frame size, so the reference resolution
/// reproduces them exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionConfig {
    /// Number of chunks the edge profile is split into
    pub chunk_count: usize,
    /// A forward boundary lower than this row (larger y) is "close to the camera"
    pub near_boundary_y: f64,
    /// Farthest free space left of this column steers left, otherwise right
    pub left_split_x: f64,
    /// Frame width the thresholds were tuned on
    pub reference_width: u32,
    /// Frame height the thresholds were tuned on
    pub reference_height: u32,
    /// Rescale thresholds by actual frame size / reference size
    pub scale_to_frame: bool,
}

impl Default for DirectionConfig {
    fn default() -> Self {
        Self {
            chunk_count: 3,
            near_boundary_y: 250.0,
            left_split_x: 310.0,
            reference_width: 640,
            reference_height: 480,
            scale_to_frame: true,
        }
    }
}

impl DirectionConfig {
    /// (near_boundary_y, left_split_x) for a frame of the given size
    pub fn thresholds_for(&self, frame_width: u32, frame_height: u32) -> (f64, f64) {
        if !self.scale_to_frame || self.reference_width == 0 || self.reference_height == 0 {
            return (self.near_boundary_y, self.left_split_x);
        }

        (
            self.near_boundary_y * frame_height as f64 / self.reference_height as f64,
            self.left_split_x * frame_width as f64 / self.reference_width as f64,
        )
    }
}

/// Everything the heuristic looked at, kept for rendering and reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationDecision {
    pub label: DirectionLabel,
    /// Averages of every chunk except the trailing one
    pub averages: Vec<ChunkAverage>,
    pub forward_edge: Option<ChunkAverage>,
    pub farthest_point: Option<ChunkAverage>,
}

impl NavigationDecision {
    pub fn unknown() -> Self {
        Self {
            label: DirectionLabel::Unknown,
            averages: Vec::new(),
            forward_edge: None,
            farthest_point: None,
        }
    }
}

/// Chunk-averaging steering heuristic
#[derive(Debug, Clone, Default)]
pub struct DirectionHeuristic {
    config: DirectionConfig,
}

impl DirectionHeuristic {
    pub fn new(config: DirectionConfig) -> Self {
        Self { config }
    }

    /// Averages of all partitions but the last one
    pub fn chunk_averages(&self, profile: &EdgeProfile) -> Vec<ChunkAverage> {
        let chunks = profile.partition(self.config.chunk_count);
        let retained = chunks.len().saturating_sub(1);

        chunks[..retained]
            .iter()
            .filter_map(|chunk| ChunkAverage::of(chunk))
            .collect()
    }

    /// Derive the steering label.
    ///
    /// Never fails: a profile too short to yield an average, or one with no
    /// detected edge at all, resolves to `Unknown`.
    pub fn decide(&self, profile: &EdgeProfile) -> NavigationDecision {
        if !profile.has_edges() {
            return NavigationDecision::unknown();
        }

        let averages = self.chunk_averages(profile);
        let Some(last_index) = averages.len().checked_sub(1) else {
            return NavigationDecision::unknown();
        };

        let forward_edge = averages[last_index.min(1)];
        let farthest_point = averages
            .iter()
            .copied()
            .min_by(|a, b| a.cmp_height_first(b))
            .unwrap_or(forward_edge);

        let (near_y, split_x) = self
            .config
            .thresholds_for(profile.frame_width, profile.frame_height);

        let label = if forward_edge.avg_y > near_y {
            if farthest_point.avg_x < split_x {
                DirectionLabel::Left
            } else {
                DirectionLabel::Right
            }
        } else {
            DirectionLabel::Forward
        };

        NavigationDecision {
            label,
            averages,
            forward_edge: Some(forward_edge),
            farthest_point: Some(farthest_point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::EdgePoint;

    /// 640x480 frame sampled every 5 px, boundary row given per column
    fn profile_from(rows: impl Fn(i32) -> i32) -> EdgeProfile {
        let points = (0..640)
            .step_by(5)
            .map(|x| EdgePoint::detected(x, rows(x)))
            .collect();
        EdgeProfile::new(points, 640, 480)
    }

    #[test]
    fn test_far_boundary_goes_forward() {
        let decision = DirectionHeuristic::default().decide(&profile_from(|_| 120));

        assert_eq!(decision.label, DirectionLabel::Forward);
        assert_eq!(decision.averages.len(), 3);
    }

    #[test]
    fn test_boundary_sloping_down_to_the_left_steers_left() {
        // Obstacle close on the right and middle, open space far away on the left
        let decision = DirectionHeuristic::default().decide(&profile_from(|x| {
            if x < 213 { 60 + x / 4 } else { 400 }
        }));

        assert_eq!(decision.label, DirectionLabel::Left);
        let forward = decision.forward_edge.unwrap();
        let farthest = decision.farthest_point.unwrap();
        assert!(forward.avg_y > 250.0);
        assert!(farthest.avg_x < 310.0);
    }

    #[test]
    fn test_open_space_on_the_right_steers_right() {
        let decision = DirectionHeuristic::default().decide(&profile_from(|x| {
            if x < 427 { 420 } else { 40 }
        }));

        assert_eq!(decision.label, DirectionLabel::Right);
    }

    #[test]
    fn test_trailing_chunk_is_ignored() {
        // 128 columns -> chunks of 42,42,42,2; the last two columns never count
        let profile = profile_from(|x| if x >= 630 { 0 } else { 300 });
        let averages = DirectionHeuristic::default().chunk_averages(&profile);

        assert_eq!(averages.len(), 3);
        assert!(averages.iter().all(|a| a.avg_y == 300.0));
    }

    #[test]
    fn test_single_column_is_unknown() {
        let profile = EdgeProfile::new(vec![EdgePoint::detected(0, 100)], 1, 480);
        let decision = DirectionHeuristic::default().decide(&profile);

        assert_eq!(decision.label, DirectionLabel::Unknown);
        assert!(decision.averages.is_empty());
    }

    #[test]
    fn test_no_detected_edges_is_unknown() {
        let points = (0..128).map(|i| EdgePoint::missing(i * 5)).collect();
        let profile = EdgeProfile::new(points, 640, 480);

        assert_eq!(DirectionHeuristic::default().decide(&profile).label, DirectionLabel::Unknown);
    }

    #[test]
    fn test_single_average_is_used_as_forward_edge() {
        // Four columns split in two: only the first chunk is averaged
        let config = DirectionConfig { chunk_count: 2, ..Default::default() };
        let points = vec![
            EdgePoint::detected(0, 400),
            EdgePoint::detected(5, 400),
            EdgePoint::detected(10, 10),
            EdgePoint::detected(15, 10),
        ];
        let profile = EdgeProfile::new(points, 640, 480);
        let decision = DirectionHeuristic::new(config).decide(&profile);

        assert_eq!(decision.averages.len(), 1);
        assert_eq!(decision.forward_edge, decision.farthest_point);
        assert_eq!(decision.label, DirectionLabel::Left);
    }

    #[test]
    fn test_thresholds_scale_with_frame() {
        let config = DirectionConfig::default();

        assert_eq!(config.thresholds_for(640, 480), (250.0, 310.0));
        assert_eq!(config.thresholds_for(1280, 960), (500.0, 620.0));

        let fixed = DirectionConfig { scale_to_frame: false, ..Default::default() };
        assert_eq!(fixed.thresholds_for(1280, 960), (250.0, 310.0));
    }

    #[test]
    fn test_same_shape_scaled_frame_keeps_decision() {
        let points = (0..1280)
            .step_by(5)
            .map(|x| EdgePoint::detected(x, if x < 426 { 120 + x / 8 } else { 800 }))
            .collect();
        let profile = EdgeProfile::new(points, 1280, 960);

        assert_eq!(DirectionHeuristic::default().decide(&profile).label, DirectionLabel::Left);
    }

    #[test]
    fn test_label_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DirectionLabel::Left).unwrap(), "\"left\"");
        assert_eq!(DirectionLabel::Unknown.instruction(), "Cannot determine direction");
    }
}
