//! Obstacle candidates: external contours of the dark regions of a frame

use crate::detection::config::ContourConfig;
use crate::Result;
use opencv::{
    core::{Mat, Point, Vector},
    imgproc,
    prelude::*,
};
use tracing::debug;
use wayscan_core::{Contour, PixelPoint};

/// Blur, grayscale, inverted threshold, external contours
#[derive(Debug, Clone, Default)]
pub struct ContourExtractor {
    config: ContourConfig,
}

impl ContourExtractor {
    pub fn new(config: ContourConfig) -> Self {
        Self { config }
    }

    /// Binary mask (0 / 255): 255 where smoothed intensity is at or below the cutoff
    pub fn threshold_mask(&self, image: &Mat) -> Result<Mat> {
        let mut blurred = Mat::default();
        imgproc::bilateral_filter_def(
            image,
            &mut blurred,
            self.config.blur_diameter,
            self.config.blur_sigma_color,
            self.config.blur_sigma_space,
        )?;

        let mut gray = Mat::default();
        imgproc::cvt_color_def(&blurred, &mut gray, imgproc::COLOR_BGR2GRAY)?;

        let mut thresh = Mat::default();
        imgproc::threshold(
            &gray,
            &mut thresh,
            self.config.threshold,
            255.0,
            imgproc::THRESH_BINARY_INV,
        )?;

        Ok(thresh)
    }

    /// Raw OpenCV contours of a binary mask, outermost boundaries only
    pub fn find_external(&self, mask: &Mat) -> Result<Vector<Vector<Point>>> {
        let mut contours = Vector::<Vector<Point>>::new();
        imgproc::find_contours_def(
            mask,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
        )?;
        Ok(contours)
    }

    /// Every external contour in discovery order, unfiltered
    pub fn extract(&self, image: &Mat) -> Result<Vec<Contour>> {
        let mask = self.threshold_mask(image)?;
        let raw = self.find_external(&mask)?;

        let contours: Vec<Contour> = raw
            .iter()
            .map(|contour| contour.iter().map(|p| PixelPoint::new(p.x, p.y)).collect())
            .collect();

        debug!(count = contours.len(), "contours extracted");
        Ok(contours)
    }
}

/// Back to OpenCV's representation, for drawing
pub(crate) fn to_cv_contours(contours: &[Contour]) -> Vector<Vector<Point>> {
    contours
        .iter()
        .map(|contour| {
            contour
                .points()
                .iter()
                .map(|p| Point::new(p.x, p.y))
                .collect::<Vector<Point>>()
        })
        .collect()
}
