//! Boundary trace with navigation vector

use super::bgr;
use crate::contours::to_cv_contours;
use crate::detection::config::{RenderConfig, RenderVariant};
use crate::detection::SceneAnalysis;
use crate::traits::AnnotationRenderer;
use crate::Result;
use opencv::{
    core::{Mat, Point},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8, LINE_AA},
    prelude::*,
};
use wayscan_core::{ChunkAverage, DirectionLabel};

/// Canonical renderer: everything the steering decision was based on
#[derive(Debug, Clone, Default)]
pub struct TraceRenderer {
    config: RenderConfig,
}

impl TraceRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn line(&self, canvas: &mut Mat, from: Point, to: Point, color: opencv::core::Scalar, thickness: i32) -> Result<()> {
        imgproc::line(canvas, from, to, color, thickness, LINE_8, 0)?;
        Ok(())
    }
}

fn to_point(avg: &ChunkAverage) -> Point {
    Point::new(avg.avg_x.round() as i32, avg.avg_y.round() as i32)
}

impl AnnotationRenderer for TraceRenderer {
    fn variant(&self) -> RenderVariant {
        RenderVariant::Trace
    }

    fn render(&self, canvas: &mut Mat, scene: &SceneAnalysis) -> Result<()> {
        let bottom = canvas.rows() - 1;
        let origin = Point::new((canvas.cols() - 1) / 2, bottom);
        let green = bgr(0, 255, 0);

        // Free-space boundary and the column segments below it
        let points: Vec<Point> = scene
            .profile
            .points
            .iter()
            .map(|p| Point::new(p.x, p.y))
            .collect();
        for pair in points.windows(2) {
            self.line(canvas, pair[0], pair[1], green, self.config.trace_thickness)?;
        }
        for p in &points {
            self.line(canvas, Point::new(p.x, bottom), *p, green, self.config.trace_thickness)?;
        }

        if !scene.contours.is_empty() {
            imgproc::draw_contours(
                canvas,
                &to_cv_contours(&scene.contours),
                -1,
                bgr(255, 0, 0),
                self.config.contour_thickness,
                LINE_8,
                &Mat::default(),
                i32::MAX,
                Point::new(0, 0),
            )?;
        }

        // Navigation vector: every averaged chunk, then the chosen forward edge
        for avg in &scene.decision.averages {
            self.line(canvas, origin, to_point(avg), bgr(0, 0, 255), 2)?;
        }
        if let Some(forward) = &scene.decision.forward_edge {
            self.line(canvas, origin, to_point(forward), green, self.config.vector_thickness)?;
        }

        imgproc::put_text(
            canvas,
            self.reported_direction(scene).instruction(),
            Point::new(origin.x - 100, 50),
            FONT_HERSHEY_SIMPLEX,
            self.config.font_scale,
            bgr(255, 0, 0),
            2,
            LINE_AA,
            false,
        )?;

        Ok(())
    }

    fn reported_direction(&self, scene: &SceneAnalysis) -> DirectionLabel {
        scene.decision.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ImageUtils;
    use image::{Rgb, RgbImage};
    use wayscan_core::{EdgePoint, EdgeProfile, NavigationDecision};

    #[test]
    fn test_boundary_line_drawn() -> Result<()> {
        let input = RgbImage::from_pixel(120, 160, Rgb([128, 128, 128]));
        let points = (0..120).step_by(5).map(|x| EdgePoint::detected(x, 100)).collect();
        let scene = SceneAnalysis {
            profile: EdgeProfile::new(points, 120, 160),
            contours: Vec::new(),
            obstacles: Vec::new(),
            decision: NavigationDecision::unknown(),
        };

        let mut canvas = ImageUtils::rgb_to_mat(&input)?;
        TraceRenderer::default().render(&mut canvas, &scene)?;
        let output = ImageUtils::mat_to_rgb(&canvas)?;

        let green = Rgb([0, 255, 0]);
        // Boundary between sampled columns, and a column segment below it
        assert_eq!(*output.get_pixel(12, 100), green);
        assert_eq!(*output.get_pixel(10, 130), green);

        // Between column segments, above and below the boundary
        for (x, y) in [(12, 130), (12, 75), (117, 140)] {
            assert_eq!(output.get_pixel(x, y), input.get_pixel(x, y), "pixel ({x}, {y})");
        }
        Ok(())
    }
}
