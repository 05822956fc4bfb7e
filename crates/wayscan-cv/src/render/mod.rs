//! Annotation strategies
//!
//! Two renderers exist and are chosen explicitly through `RenderVariant`:
//!
//! - `TraceRenderer` (canonical) draws the free-space boundary, contour
//!   outlines, the navigation vector and the steering instruction.
//! - `HighlightRenderer` boxes and numbers each obstacle under a fixed
//!   caption. It does not encode direction and reports `Unknown`.
//!
//! They disagree on what the reported direction is; neither is folded into
//! the other.

pub mod highlight;
pub mod trace;

pub use highlight::HighlightRenderer;
pub use trace::TraceRenderer;

use crate::detection::config::{RenderConfig, RenderVariant};
use crate::traits::AnnotationRenderer;
use opencv::core::Scalar;

/// OpenCV color from RGB components (OpenCV stores BGR)
pub(crate) fn bgr(r: u8, g: u8, b: u8) -> Scalar {
    Scalar::new(b as f64, g as f64, r as f64, 255.0)
}

impl RenderVariant {
    /// Instantiate the renderer for this variant
    pub fn build(self, config: &RenderConfig) -> Box<dyn AnnotationRenderer> {
        match self {
            RenderVariant::Trace => Box::new(TraceRenderer::new(config.clone())),
            RenderVariant::Highlight => Box::new(HighlightRenderer::new(config.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matches_variant() {
        let config = RenderConfig::default();

        assert_eq!(RenderVariant::Trace.build(&config).variant(), RenderVariant::Trace);
        assert_eq!(RenderVariant::Highlight.build(&config).variant(), RenderVariant::Highlight);
    }

    #[test]
    fn test_bgr_order() {
        let color = bgr(1, 2, 3);
        assert_eq!((color[0], color[1], color[2]), (3.0, 2.0, 1.0));
    }
}
