//! Numbered obstacle boxes

use super::bgr;
use crate::detection::config::{RenderConfig, RenderVariant};
use crate::detection::SceneAnalysis;
use crate::traits::AnnotationRenderer;
use crate::Result;
use opencv::{
    core::{Mat, Point, Rect},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA},
};
use wayscan_core::DirectionLabel;

#[derive(Debug, Clone, Default)]
pub struct HighlightRenderer {
    config: RenderConfig,
}

impl HighlightRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl AnnotationRenderer for HighlightRenderer {
    fn variant(&self) -> RenderVariant {
        RenderVariant::Highlight
    }

    fn render(&self, canvas: &mut Mat, scene: &SceneAnalysis) -> Result<()> {
        let color = bgr(0, 255, 0);

        for (n, obstacle) in scene.obstacles.iter().enumerate() {
            imgproc::rectangle(
                canvas,
                Rect::new(obstacle.x, obstacle.y, obstacle.width, obstacle.height),
                color,
                self.config.box_thickness,
                LINE_8,
                0,
            )?;

            imgproc::put_text(
                canvas,
                &format!("Object {}", n + 1),
                Point::new(obstacle.x, (obstacle.y - 10).max(12)),
                FONT_HERSHEY_SIMPLEX,
                0.5 * self.config.font_scale,
                color,
                2,
                LINE_AA,
                false,
            )?;
        }

        imgproc::put_text(
            canvas,
            &self.config.highlight_caption,
            Point::new(10, 30),
            FONT_HERSHEY_SIMPLEX,
            self.config.font_scale,
            bgr(255, 0, 0),
            2,
            LINE_AA,
            false,
        )?;

        Ok(())
    }

    /// Direction is not part of this view; always the `Unknown` sentinel
    fn reported_direction(&self, _scene: &SceneAnalysis) -> DirectionLabel {
        DirectionLabel::Unknown
    }
}
