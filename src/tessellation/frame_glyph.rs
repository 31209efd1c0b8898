use crate::math::{Point3, Vector3};
use crate::operations::FrameSample;

use super::ArrowStyle;

/// A 24-bit `0xRRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const TANGENT: Self = Self(0xff0000);
    pub const NORMAL: Self = Self(0x00ff00);
    pub const BINORMAL: Self = Self(0xff00ff);
    pub const TANGENT_LIGHT: Self = Self(0xff6666);
    pub const NORMAL_LIGHT: Self = Self(0x66ff66);
    pub const BINORMAL_LIGHT: Self = Self(0xff66ff);
}

/// One arrow for the renderer to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub origin: Point3,
    /// Unit direction.
    pub direction: Vector3,
    pub length: f64,
    pub head_length: f64,
    pub head_width: f64,
    pub color: Color,
}

/// The T, N and B arrows of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGlyphs {
    pub tangent: Arrow,
    pub normal: Arrow,
    pub binormal: Arrow,
}

impl FrameGlyphs {
    /// Glyphs for the frame at the current `t`.
    #[must_use]
    pub fn single(sample: &FrameSample) -> Self {
        Self::build(
            sample,
            &ArrowStyle::single(),
            [Color::TANGENT, Color::NORMAL, Color::BINORMAL],
        )
    }

    /// Lighter, smaller glyphs for frames drawn all along the curve.
    #[must_use]
    pub fn overlay(sample: &FrameSample) -> Self {
        Self::build(
            sample,
            &ArrowStyle::overlay(),
            [
                Color::TANGENT_LIGHT,
                Color::NORMAL_LIGHT,
                Color::BINORMAL_LIGHT,
            ],
        )
    }

    /// Glyphs with an explicit style and `[T, N, B]` colours.
    #[must_use]
    pub fn build(sample: &FrameSample, style: &ArrowStyle, colors: [Color; 3]) -> Self {
        let arrow = |direction: Vector3, color: Color| Arrow {
            origin: sample.origin,
            direction,
            length: style.length(),
            head_length: style.head_length(),
            head_width: style.head_width(),
            color,
        };
        let [t, n, b] = colors;
        Self {
            tangent: arrow(sample.frame.tangent, t),
            normal: arrow(sample.frame.normal, n),
            binormal: arrow(sample.frame.binormal, b),
        }
    }

    /// The three arrows as `[T, N, B]`.
    #[must_use]
    pub fn arrows(&self) -> [Arrow; 3] {
        [self.tangent, self.normal, self.binormal]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::FrenetFrame;

    fn sample() -> FrameSample {
        FrameSample {
            t: 0.0,
            origin: Point3::new(1.0, 2.0, 3.0),
            frame: FrenetFrame::FALLBACK,
            degeneracy: None,
        }
    }

    #[test]
    fn single_frame_colors_and_length() {
        let glyphs = FrameGlyphs::single(&sample());
        assert_eq!(glyphs.tangent.color, Color(0xff0000));
        assert_eq!(glyphs.normal.color, Color(0x00ff00));
        assert_eq!(glyphs.binormal.color, Color(0xff00ff));
        for arrow in glyphs.arrows() {
            assert_eq!(arrow.origin, Point3::new(1.0, 2.0, 3.0));
            assert!((arrow.length - 0.5).abs() < f64::EPSILON);
        }
        assert_eq!(glyphs.binormal.direction, Vector3::z());
    }

    #[test]
    fn overlay_uses_light_colors() {
        let glyphs = FrameGlyphs::overlay(&sample());
        assert_eq!(
            glyphs.arrows().map(|a| a.color),
            [
                Color::TANGENT_LIGHT,
                Color::NORMAL_LIGHT,
                Color::BINORMAL_LIGHT
            ]
        );
        assert!((glyphs.tangent.length - 0.4).abs() < 1e-12);
    }
}
