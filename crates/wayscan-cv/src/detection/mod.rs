//! High-level navigation module

pub mod config;
pub mod navigator;

pub use config::{NavigatorConfig, OutputFormat, RenderVariant};
pub use navigator::{NavigationOutcome, ObstacleNavigator, SceneAnalysis};
