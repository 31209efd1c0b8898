use crate::error::{GeometryError, Result};
use crate::geometry::Curve;
use crate::math::{Point3, Vector3, DEGENERACY_EPSILON};

use super::differentiate::{Derivatives, Differentiator};

/// Orthonormal right-handed moving frame of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrenetFrame {
    /// Unit tangent `T`.
    pub tangent: Vector3,
    /// Unit principal normal `N`.
    pub normal: Vector3,
    /// Unit binormal `B = T x N`.
    pub binormal: Vector3,
}

impl FrenetFrame {
    /// Frame used when the tangent is undefined: the world axes.
    pub const FALLBACK: Self = Self {
        tangent: Vector3::new(1.0, 0.0, 0.0),
        normal: Vector3::new(0.0, 1.0, 0.0),
        binormal: Vector3::new(0.0, 0.0, 1.0),
    };

    /// Returns `true` if all three vectors are unit length, pairwise
    /// orthogonal and right-handed, within `tolerance`.
    #[must_use]
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let (t, n, b) = (&self.tangent, &self.normal, &self.binormal);
        let unit = [t, n, b].iter().all(|v| (v.norm() - 1.0).abs() <= tolerance);
        let orthogonal =
            t.dot(n).abs() <= tolerance && n.dot(b).abs() <= tolerance && b.dot(t).abs() <= tolerance;
        let right_handed = (t.cross(n) - b).norm() <= tolerance;
        unit && orthogonal && right_handed
    }

    /// Returns `true` if no component is NaN or infinite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.tangent, self.normal, self.binormal]
            .iter()
            .all(|v| v.iter().all(|c| c.is_finite()))
    }
}

/// Why a frame had to be constructed from a fallback rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// `|r'| < ε`: the tangent is undefined (the curve stops or has a cusp).
    ZeroVelocity,
    /// `|r' x r''| < ε`: the curve is locally straight and the normal is
    /// chosen arbitrarily.
    Collinear,
}

/// Thresholds used by [`FrameAt`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTolerance {
    /// Magnitude below which `r'` or `r' x r''` counts as zero.
    pub epsilon: f64,
    /// When `|T·x̂|` exceeds this, `ŷ` is used as the reference for an
    /// arbitrary normal instead of `x̂`.
    pub axis_alignment: f64,
}

impl Default for FrameTolerance {
    fn default() -> Self {
        Self {
            epsilon: DEGENERACY_EPSILON,
            axis_alignment: 0.99,
        }
    }
}

/// A frame together with the derivatives it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFrame {
    pub t: f64,
    pub position: Point3,
    pub velocity: Vector3,
    pub acceleration: Vector3,
    pub frame: FrenetFrame,
    /// `Some` if a fallback rule was applied.
    pub degeneracy: Option<Degeneracy>,
}

/// Computes the Frenet frame of a curve at a parameter value.
pub struct FrameAt {
    t: f64,
    differentiator: Differentiator,
    tolerance: FrameTolerance,
}

impl FrameAt {
    /// Creates a new `FrameAt` query with the default step and tolerances.
    #[must_use]
    pub fn new(t: f64) -> Self {
        Self {
            t,
            differentiator: Differentiator::default(),
            tolerance: FrameTolerance::default(),
        }
    }

    /// Uses the given differentiator instead of the default one.
    #[must_use]
    pub fn with_differentiator(mut self, differentiator: Differentiator) -> Self {
        self.differentiator = differentiator;
        self
    }

    /// Uses the given degeneracy thresholds.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: FrameTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the query.
    ///
    /// Numerical degeneracies never fail: they resolve to a deterministic
    /// frame and are reported through [`ResolvedFrame::degeneracy`].
    ///
    /// # Errors
    ///
    /// Returns the evaluation error if the curve cannot be sampled at
    /// `t - h`, `t` or `t + h` or a derivative overflows, and
    /// [`GeometryError::Degenerate`] if the frame still comes out non-finite.
    pub fn execute<C: Curve + ?Sized>(&self, curve: &C) -> Result<ResolvedFrame> {
        let Derivatives {
            position,
            velocity,
            acceleration,
        } = self.differentiator.all(curve, self.t)?;
        let (frame, degeneracy) = build_frame(&velocity, &acceleration, &self.tolerance);
        if !frame.is_finite() {
            let reason = format!("frame at t = {} is not finite", self.t);
            return Err(GeometryError::Degenerate(reason).into());
        }

        match degeneracy {
            Some(Degeneracy::ZeroVelocity) => tracing::warn!(
                t = self.t,
                "tangent magnitude near zero, using the world-axis frame"
            ),
            Some(Degeneracy::Collinear) => tracing::warn!(
                t = self.t,
                "binormal magnitude near zero, choosing an arbitrary normal"
            ),
            None => {}
        }

        Ok(ResolvedFrame {
            t: self.t,
            position,
            velocity,
            acceleration,
            frame,
            degeneracy,
        })
    }
}

/// Builds (T, N, B) from `r'` and `r''`.
///
/// Both vectors are scaled by their largest component before norms and the
/// cross product are taken, so large finite derivatives do not overflow.
/// The thresholds still apply to the unscaled magnitudes.
#[must_use]
pub fn build_frame(
    velocity: &Vector3,
    acceleration: &Vector3,
    tolerance: &FrameTolerance,
) -> (FrenetFrame, Option<Degeneracy>) {
    let v_scale = scale_of(velocity);
    let v = velocity / v_scale;
    let speed = v.norm() * v_scale;
    if speed < tolerance.epsilon {
        return (FrenetFrame::FALLBACK, Some(Degeneracy::ZeroVelocity));
    }
    let tangent = v.normalize();

    let a_scale = scale_of(acceleration);
    let cross = v.cross(&(acceleration / a_scale));
    let cross_len = cross.norm() * v_scale * a_scale;
    if cross_len < tolerance.epsilon {
        let reference = if tangent.x.abs() > tolerance.axis_alignment {
            Vector3::y()
        } else {
            Vector3::x()
        };
        let normal = reference.cross(&tangent).normalize();
        let binormal = tangent.cross(&normal).normalize();
        let frame = FrenetFrame {
            tangent,
            normal,
            binormal,
        };
        return (frame, Some(Degeneracy::Collinear));
    }

    let binormal = cross.normalize();
    let normal = binormal.cross(&tangent).normalize();
    let frame = FrenetFrame {
        tangent,
        normal,
        binormal,
    };
    (frame, None)
}

fn scale_of(v: &Vector3) -> f64 {
    let scale = v.amax();
    if scale > 0.0 && scale.is_finite() {
        scale
    } else {
        1.0
    }
}
