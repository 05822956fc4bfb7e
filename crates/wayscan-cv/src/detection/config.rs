//! Navigator configuration

use crate::error::NavError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wayscan_core::DirectionConfig;

/// Main navigator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub edges: EdgeProfileConfig,
    pub contours: ContourConfig,
    pub direction: DirectionConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

/// Free-space boundary extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeProfileConfig {
    /// Bilateral filter pixel neighbourhood diameter
    pub blur_diameter: i32,
    /// Bilateral filter range sigma
    pub blur_sigma_color: f64,
    /// Bilateral filter spatial sigma
    pub blur_sigma_space: f64,
    /// Canny hysteresis low threshold
    pub canny_low: f64,
    /// Canny hysteresis high threshold
    pub canny_high: f64,
    /// Column sampling stride (STEP)
    pub column_step: usize,
    /// Rows skipped at the bottom of the frame before scanning upward
    pub bottom_margin: usize,
}

impl Default for EdgeProfileConfig {
    fn default() -> Self {
        Self {
            blur_diameter: 9,
            blur_sigma_color: 40.0,
            blur_sigma_space: 40.0,
            canny_low: 50.0,
            canny_high: 100.0,
            column_step: 5,
            bottom_margin: 5,
        }
    }
}

/// Obstacle candidate extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    pub blur_diameter: i32,
    pub blur_sigma_color: f64,
    pub blur_sigma_space: f64,
    /// Intensities at or below this become foreground (inverted binary threshold)
    pub threshold: f64,
    /// Contours must enclose strictly more than this many pixels (MIN_AREA)
    pub min_area: f64,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            blur_diameter: 9,
            blur_sigma_color: 75.0,
            blur_sigma_space: 75.0,
            threshold: 106.0,
            min_area: 500.0,
        }
    }
}

/// Which annotation strategy draws the output frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderVariant {
    /// Boundary trace, contours, navigation vector and direction text (canonical)
    #[default]
    Trace,
    /// Numbered obstacle boxes with a fixed caption; direction is not computed
    Highlight,
}

impl std::str::FromStr for RenderVariant {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(RenderVariant::Trace),
            "highlight" => Ok(RenderVariant::Highlight),
            other => Err(NavError::InvalidConfig(format!("unknown render variant '{other}'"))),
        }
    }
}

/// Visualization configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub variant: RenderVariant,
    /// Caption drawn by the highlight variant
    pub highlight_caption: String,
    pub trace_thickness: i32,
    pub contour_thickness: i32,
    pub vector_thickness: i32,
    pub box_thickness: i32,
    pub font_scale: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            variant: RenderVariant::Trace,
            highlight_caption: "Obstacle Detection".to_string(),
            trace_thickness: 1,
            contour_thickness: 3,
            vector_thickness: 3,
            box_thickness: 2,
            font_scale: 1.0,
        }
    }
}

/// Encoding of persisted frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// Where and how annotated frames are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub prefix: String,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "static/uploads".into(),
            prefix: "processed".to_string(),
            format: OutputFormat::Jpeg,
        }
    }
}

impl NavigatorConfig {
    /// Load from a JSON file; omitted fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| NavError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = serde_json::from_str(&text).map_err(|e| NavError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(NavError::InvalidConfig(msg.to_string()));

        if self.edges.column_step == 0 {
            return invalid("edges.column_step must be at least 1");
        }
        if self.edges.canny_low > self.edges.canny_high {
            return invalid("edges.canny_low must not exceed edges.canny_high");
        }
        for (name, d) in [
            ("edges.blur_diameter", self.edges.blur_diameter),
            ("contours.blur_diameter", self.contours.blur_diameter),
        ] {
            if d <= 0 || d % 2 == 0 {
                return Err(NavError::InvalidConfig(format!("{name} must be a positive odd number")));
            }
        }
        if self.contours.min_area < 0.0 {
            return invalid("contours.min_area must not be negative");
        }
        if self.direction.chunk_count == 0 {
            return invalid("direction.chunk_count must be at least 1");
        }
        if self.direction.reference_width == 0 || self.direction.reference_height == 0 {
            return invalid("direction reference dimensions must be non-zero");
        }
        if self.output.prefix.contains(['/', '\\']) {
            return invalid("output.prefix must not contain path separators");
        }

        Ok(())
    }
}
