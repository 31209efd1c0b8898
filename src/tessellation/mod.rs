//! Renderer-facing primitives: polylines for the curve and arrow glyphs for
//! frames. Nothing here touches a rendering API.

mod arrow_style;
mod frame_glyph;
mod tessellate_curve;

pub use arrow_style::ArrowStyle;
pub use frame_glyph::{Arrow, Color, FrameGlyphs};
pub use tessellate_curve::{TessellateCurve, DEFAULT_CURVE_SEGMENTS};

use crate::math::Point3;

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

impl Polyline {
    /// Colour the curve polyline is drawn in.
    pub const COLOR: Color = Color(0x0000ff);

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
