//! Image decoding and OpenCV Mat conversions

use crate::error::NavError;
use crate::Result;
use image::RgbImage;
use opencv::{
    core::{Mat, Scalar, StsUnmatchedSizes, CV_8UC3},
    imgproc,
    prelude::*,
};
use std::path::Path;

/// Image utility functions bridging the `image` crate and OpenCV
pub struct ImageUtils;

impl ImageUtils {
    /// Read and decode an image file
    pub fn decode_path<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| NavError::decode(name.clone(), e))?;

        Self::decode_named(&bytes, name)
    }

    /// Decode an in-memory encoded image (PNG, JPEG, ...)
    pub fn decode_bytes(bytes: &[u8]) -> Result<RgbImage> {
        Self::decode_named(bytes, "<memory>")
    }

    fn decode_named(bytes: &[u8], name: impl Into<String>) -> Result<RgbImage> {
        let name = name.into();
        let decoded = image::load_from_memory(bytes).map_err(|e| NavError::decode(name.clone(), e))?;
        let rgb = decoded.to_rgb8();

        if rgb.width() == 0 || rgb.height() == 0 {
            return Err(NavError::decode(name, "image has no pixels"));
        }
        Ok(rgb)
    }

    /// Convert an RGB image into a BGR 8UC3 Mat
    pub fn rgb_to_mat(rgb_image: &RgbImage) -> Result<Mat> {
        let (width, height) = rgb_image.dimensions();
        let mut rgb = Mat::new_rows_cols_with_default(height as i32, width as i32, CV_8UC3, Scalar::all(0.0))?;
        rgb.data_bytes_mut()?.copy_from_slice(rgb_image.as_raw());

        let mut bgr = Mat::default();
        imgproc::cvt_color_def(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR)?;
        Ok(bgr)
    }

    /// Convert a BGR 8UC3 Mat back into an RGB image
    pub fn mat_to_rgb(mat: &Mat) -> Result<RgbImage> {
        let mut rgb = Mat::default();
        imgproc::cvt_color_def(mat, &mut rgb, imgproc::COLOR_BGR2RGB)?;

        let (width, height) = (rgb.cols().max(0) as u32, rgb.rows().max(0) as u32);
        RgbImage::from_raw(width, height, rgb.data_bytes()?.to_vec()).ok_or_else(|| {
            NavError::Vision(opencv::Error::new(
                StsUnmatchedSizes,
                format!("{}x{} Mat is not a packed 8-bit 3-channel frame", width, height),
            ))
        })
    }
}
