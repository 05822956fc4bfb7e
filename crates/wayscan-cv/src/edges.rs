//! Free-space boundary: first strong edge above the bottom of each sampled column

use crate::detection::config::EdgeProfileConfig;
use crate::traits::EdgeMask;
use crate::Result;
use opencv::{core::Mat, imgproc, prelude::*};
use tracing::debug;
use wayscan_core::{EdgePoint, EdgeProfile};

impl EdgeMask for Mat {
    fn width(&self) -> usize {
        self.cols().max(0) as usize
    }

    fn height(&self) -> usize {
        self.rows().max(0) as usize
    }

    fn is_edge(&self, x: usize, y: usize) -> Result<bool> {
        Ok(*self.at_2d::<u8>(y as i32, x as i32)? != 0)
    }
}

impl EdgeMask for image::GrayImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn is_edge(&self, x: usize, y: usize) -> Result<bool> {
        Ok(self.get_pixel(x as u32, y as u32)[0] != 0)
    }
}

/// Edge-preserving blur, Canny, then a bottom-up scan per sampled column
#[derive(Debug, Clone, Default)]
pub struct EdgeProfiler {
    config: EdgeProfileConfig,
}

impl EdgeProfiler {
    pub fn new(config: EdgeProfileConfig) -> Self {
        Self { config }
    }

    /// Binary edge mask (0 / 255) of a BGR frame
    pub fn edge_mask(&self, image: &Mat) -> Result<Mat> {
        let mut blurred = Mat::default();
        imgproc::bilateral_filter_def(
            image,
            &mut blurred,
            self.config.blur_diameter,
            self.config.blur_sigma_color,
            self.config.blur_sigma_space,
        )?;

        let mut edges = Mat::default();
        imgproc::canny_def(&blurred, &mut edges, self.config.canny_low, self.config.canny_high)?;

        Ok(edges)
    }

    /// Full stage: mask the frame and scan it
    pub fn profile_image(&self, image: &Mat) -> Result<EdgeProfile> {
        let mask = self.edge_mask(image)?;
        self.scan(&mask)
    }

    /// Scan every `column_step`-th column from `height - 1 - bottom_margin`
    /// up to row 1; the first edge pixel wins, otherwise the point sits at row 0.
    ///
    /// Frames shorter than the margin scan nothing rather than failing.
    pub fn scan<M: EdgeMask + ?Sized>(&self, mask: &M) -> Result<EdgeProfile> {
        let (width, height) = (mask.width(), mask.height());
        let step = self.config.column_step.max(1);
        let start_row = height.saturating_sub(1 + self.config.bottom_margin);

        let mut points = Vec::with_capacity(EdgeProfile::expected_len(width as u32, step));
        for x in (0..width).step_by(step) {
            let mut point = EdgePoint::missing(x as i32);
            for y in (1..=start_row).rev() {
                if mask.is_edge(x, y)? {
                    point = EdgePoint::detected(x as i32, y as i32);
                    break;
                }
            }
            points.push(point);
        }

        let profile = EdgeProfile::new(points, width as u32, height as u32);
        debug!(
            columns = profile.len(),
            detected = profile.points.iter().filter(|p| p.found).count(),
            "edge profile scanned"
        );
        Ok(profile)
    }
}
