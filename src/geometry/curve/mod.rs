mod helix;
mod line;
mod parametric;

pub use helix::Helix;
pub use line::Line;
pub use parametric::ParametricCurve;

use crate::error::{EvaluationError, EvaluationFault, Result};
use crate::geometry::Axis;
use crate::math::Point3;

/// A curve `r: ℝ → ℝ³` in 3D space.
///
/// Implementations must be deterministic: evaluating the same `t` twice
/// yields the same point.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if any component cannot be evaluated at `t`.
    fn evaluate(&self, t: f64) -> Result<Point3>;
}

/// Evaluates `curve` at `t` and rejects points with a non-finite coordinate.
///
/// # Errors
///
/// Propagates the curve's own error, or returns an [`EvaluationError`] with
/// [`EvaluationFault::NonFinite`] naming the first non-finite axis.
pub fn evaluate_finite<C: Curve + ?Sized>(curve: &C, t: f64) -> Result<Point3> {
    let p = curve.evaluate(t)?;
    if let Some(axis) = Axis::ALL.into_iter().find(|a| !p[a.index()].is_finite()) {
        return Err(EvaluationError {
            t,
            axis,
            fault: EvaluationFault::NonFinite,
        }
        .into());
    }
    Ok(p)
}
