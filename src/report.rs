//! JSON report returned for each analyzed upload

use serde::{Deserialize, Serialize};
use std::path::Path;
use wayscan_core::{DirectionLabel, ObstacleRecord};
use wayscan_cv::NavigationOutcome;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub success: bool,
    pub original_image: String,
    pub processed_image: String,
    /// Operator-facing instruction, e.g. "Move left"
    pub direction: String,
    pub direction_label: DirectionLabel,
    pub description: String,
    pub contours_info: Vec<ObstacleRecord>,
}

impl AnalysisReport {
    pub fn new(original: &Path, outcome: &NavigationOutcome, description: String) -> Self {
        Self {
            success: true,
            original_image: original.display().to_string(),
            processed_image: outcome.output_path.display().to_string(),
            direction: outcome.direction.instruction().to_string(),
            direction_label: outcome.direction,
            description,
            contours_info: outcome.obstacles.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub success: bool,
    pub error: String,
}

impl FailureReport {
    pub fn new(error: impl ToString) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}
