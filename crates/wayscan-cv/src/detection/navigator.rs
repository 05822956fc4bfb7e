//! Single-frame obstacle navigator

use super::config::{NavigatorConfig, RenderVariant};
use crate::contours::ContourExtractor;
use crate::edges::EdgeProfiler;
use crate::traits::AnnotationRenderer;
use crate::utils::{ImageUtils, OutputWriter};
use crate::Result;
use image::RgbImage;
use opencv::{core::Mat, prelude::*};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use wayscan_core::{
    Contour, DirectionHeuristic, DirectionLabel, EdgeProfile, NavigationDecision, ObstacleRecord,
    ObstacleSummaryBuilder,
};

/// Every derived value of one frame, before anything is drawn or written
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneAnalysis {
    pub profile: EdgeProfile,
    /// All external contours, unfiltered, in discovery order
    pub contours: Vec<Contour>,
    pub obstacles: Vec<ObstacleRecord>,
    pub decision: NavigationDecision,
}

/// Result handed back to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationOutcome {
    pub output_path: PathBuf,
    pub direction: DirectionLabel,
    pub obstacles: Vec<ObstacleRecord>,
    pub renderer: RenderVariant,
}

/// Runs boundary profiling, contour extraction, the steering heuristic and
/// annotation for one frame at a time.
///
/// Holds no per-frame state, so one instance can serve many frames
/// concurrently; only the output directory is shared.
pub struct ObstacleNavigator {
    config: NavigatorConfig,
    profiler: EdgeProfiler,
    extractor: ContourExtractor,
    heuristic: DirectionHeuristic,
    summarizer: ObstacleSummaryBuilder,
    renderer: Box<dyn AnnotationRenderer>,
    writer: OutputWriter,
}

impl ObstacleNavigator {
    /// Create a navigator; the configuration is validated first
    pub fn new(config: NavigatorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            profiler: EdgeProfiler::new(config.edges.clone()),
            extractor: ContourExtractor::new(config.contours.clone()),
            heuristic: DirectionHeuristic::new(config.direction.clone()),
            summarizer: ObstacleSummaryBuilder::new(config.contours.min_area),
            renderer: config.render.variant.build(&config.render),
            writer: OutputWriter::new(&config.output),
            config,
        })
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Swap the annotation strategy
    pub fn with_renderer(mut self, renderer: Box<dyn AnnotationRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Analyze a BGR Mat without drawing or persisting anything
    pub fn analyze_mat(&self, frame: &Mat) -> Result<SceneAnalysis> {
        let profile = self.profiler.profile_image(frame)?;
        let decision = self.heuristic.decide(&profile);
        if decision.label == DirectionLabel::Unknown {
            warn!(
                columns = profile.len(),
                has_edges = profile.has_edges(),
                "free-space boundary too sparse, direction unknown"
            );
        }

        let contours = self.extractor.extract(frame)?;
        let obstacles = self.summarizer.summarize(&contours);
        debug!(
            contours = contours.len(),
            obstacles = obstacles.len(),
            min_area = self.summarizer.min_area(),
            "obstacles summarized"
        );

        Ok(SceneAnalysis {
            profile,
            contours,
            obstacles,
            decision,
        })
    }

    /// Analyze a decoded frame without drawing or persisting anything
    pub fn analyze(&self, image: &RgbImage) -> Result<SceneAnalysis> {
        let frame = ImageUtils::rgb_to_mat(image)?;
        self.analyze_mat(&frame)
    }

    /// Draw the analysis onto a copy of `image`
    pub fn annotate(&self, image: &RgbImage, scene: &SceneAnalysis) -> Result<RgbImage> {
        let mut canvas = ImageUtils::rgb_to_mat(image)?;
        self.renderer.render(&mut canvas, scene)?;
        ImageUtils::mat_to_rgb(&canvas)
    }

    /// Analyze, annotate and persist one decoded frame
    pub fn process_image(&self, image: &RgbImage) -> Result<NavigationOutcome> {
        let frame = ImageUtils::rgb_to_mat(image)?;
        let scene = self.analyze_mat(&frame)?;

        let mut canvas = frame.try_clone()?;
        self.renderer.render(&mut canvas, &scene)?;
        let annotated = ImageUtils::mat_to_rgb(&canvas)?;
        let output_path = self.writer.write(&annotated)?;

        let direction = self.renderer.reported_direction(&scene);
        info!(
            output = %output_path.display(),
            %direction,
            obstacles = scene.obstacles.len(),
            renderer = ?self.renderer.variant(),
            "frame processed"
        );

        Ok(NavigationOutcome {
            output_path,
            direction,
            obstacles: scene.obstacles,
            renderer: self.renderer.variant(),
        })
    }

    /// Decode an image file and process it
    pub fn process_path<P: AsRef<Path>>(&self, path: P) -> Result<NavigationOutcome> {
        let image = ImageUtils::decode_path(&path)?;
        debug!(path = %path.as_ref().display(), width = image.width(), height = image.height(), "decoded input");
        self.process_image(&image)
    }

    /// Decode in-memory bytes and process them
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<NavigationOutcome> {
        let image = ImageUtils::decode_bytes(bytes)?;
        self.process_image(&image)
    }

    /// Process independent frames; results keep the input order
    #[cfg(feature = "parallel")]
    pub fn process_batch<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<Result<NavigationOutcome>> {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.process_path(p)).collect()
    }

    /// Process independent frames; results keep the input order
    #[cfg(not(feature = "parallel"))]
    pub fn process_batch<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<Result<NavigationOutcome>> {
        paths.iter().map(|p| self.process_path(p)).collect()
    }
}
