use crate::error::{RangeError, Result};
use crate::geometry::curve::{evaluate_finite, Curve};
use crate::operations::SampleRange;

use super::Polyline;

/// Default number of segments for the curve polyline.
pub const DEFAULT_CURVE_SEGMENTS: usize = 200;

/// Samples a curve densely into a polyline.
///
/// Produces `segments + 1` points at `t_i = t_min + (t_max - t_min) * i / segments`.
/// The pass is all-or-nothing: the first point that cannot be evaluated, or
/// that has a non-finite coordinate, fails the whole tessellation so a
/// caller never draws a partial curve.
pub struct TessellateCurve {
    range: SampleRange,
    segments: usize,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::NoSegments`] if `segments` is zero.
    pub fn new(range: SampleRange, segments: usize) -> Result<Self> {
        if segments == 0 {
            return Err(RangeError::NoSegments.into());
        }
        Ok(Self { range, segments })
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error encountered.
    pub fn execute<C: Curve + ?Sized>(&self, curve: &C) -> Result<Polyline> {
        let points = (0..=self.segments)
            .map(|i| evaluate_finite(curve, self.range.subdivision(i, self.segments)))
            .collect::<Result<Vec<_>>>()
            .inspect_err(|err| tracing::warn!(error = %err, "curve tessellation aborted"))?;
        Ok(Polyline { points })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{EvaluationFault, FrenetError};
    use crate::geometry::{Axis, ParametricCurve};
    use approx::assert_abs_diff_eq;

    #[test]
    fn unit_circle_four_segments() {
        let curve = ParametricCurve::compile("cos(t)", "sin(t)", "0").unwrap();
        let range = SampleRange::new(0.0, std::f64::consts::TAU).unwrap();
        let polyline = TessellateCurve::new(range, 4).unwrap().execute(&curve).unwrap();
        assert_eq!(polyline.len(), 5);
        for p in &polyline.points {
            assert_abs_diff_eq!(p.coords.norm(), 1.0, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(polyline.points[2].x, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_segments_is_rejected() {
        let range = SampleRange::new(0.0, 1.0).unwrap();
        assert!(matches!(
            TessellateCurve::new(range, 0),
            Err(FrenetError::Range(RangeError::NoSegments))
        ));
    }

    #[test]
    fn any_bad_point_fails_the_whole_pass() {
        // Only the last sample (t = 1) divides by zero.
        let curve = ParametricCurve::compile("t", "1/(t-1)", "0").unwrap();
        let range = SampleRange::new(0.0, 1.0).unwrap();
        let err = TessellateCurve::new(range, 10)
            .unwrap()
            .execute(&curve)
            .unwrap_err();
        match err {
            FrenetError::Evaluation(e) => {
                assert_eq!(e.axis, Axis::Y);
                assert_eq!(e.fault, EvaluationFault::DivisionByZero);
                assert_abs_diff_eq!(e.t, 1.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
