//! Wayscan service glue
//!
//! Collaborators around the vision core: upload intake, the scene
//! description service and the JSON report, plus `analyze_upload` which
//! ties them to an `ObstacleNavigator`.

pub mod caption;
pub mod report;
pub mod upload;

use anyhow::{Context, Result};
use caption::CaptionService;
use report::AnalysisReport;
use std::path::Path;
use upload::UploadPolicy;
use wayscan_cv::ObstacleNavigator;

/// Check an image, run the navigator on it, and attach a scene description
pub fn analyze_upload(
    navigator: &ObstacleNavigator,
    captions: &CaptionService,
    policy: &UploadPolicy,
    image_path: &Path,
    prompt: Option<&str>,
) -> Result<AnalysisReport> {
    policy
        .check_path(image_path)
        .with_context(|| format!("Rejected input: {:?}", image_path))?;

    let outcome = navigator
        .process_path(image_path)
        .with_context(|| format!("Error processing image: {:?}", image_path))?;

    let description = captions.describe_file(image_path, prompt);
    Ok(AnalysisReport::new(image_path, &outcome, description))
}
