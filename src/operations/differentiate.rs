use crate::error::{EvaluationError, EvaluationFault, RangeError, Result};
use crate::geometry::{Axis, Curve};
use crate::math::{Point3, Vector3, DIFFERENTIATION_STEP};

/// Position and the first two derivatives of a curve at one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Derivatives {
    /// `r(t)`
    pub position: Point3,
    /// `r'(t)`
    pub velocity: Vector3,
    /// `r''(t)`
    pub acceleration: Vector3,
}

/// Central finite-difference differentiator with a fixed step `h`.
///
/// - `r'(t)  = (r(t+h) - r(t-h)) / 2h`
/// - `r''(t) = (r(t+h) - 2 r(t) + r(t-h)) / h²`
///
/// Nothing is cached between calls. Steps close to machine epsilon lose
/// accuracy to cancellation; no attempt is made to compensate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Differentiator {
    step: f64,
}

impl Default for Differentiator {
    fn default() -> Self {
        Self {
            step: DIFFERENTIATION_STEP,
        }
    }
}

impl Differentiator {
    /// Creates a differentiator with step `h`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::NonPositiveStep`] if `step` is not a positive
    /// finite number.
    pub fn new(step: f64) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(RangeError::NonPositiveStep { step }.into());
        }
        Ok(Self { step })
    }

    /// Returns the step `h`.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// First derivative `r'(t)`.
    ///
    /// # Errors
    ///
    /// Propagates the evaluation error of `r(t-h)` or `r(t+h)`, or reports
    /// a non-finite result if the difference overflows.
    pub fn first<C: Curve + ?Sized>(&self, curve: &C, t: f64) -> Result<Vector3> {
        let h = self.step;
        let ahead = curve.evaluate(t + h)?;
        let behind = curve.evaluate(t - h)?;
        finite((ahead - behind) / (2.0 * h), t)
    }

    /// Second derivative `r''(t)`.
    ///
    /// # Errors
    ///
    /// Propagates the evaluation error of `r(t-h)`, `r(t)` or `r(t+h)`.
    pub fn second<C: Curve + ?Sized>(&self, curve: &C, t: f64) -> Result<Vector3> {
        Ok(self.all(curve, t)?.acceleration)
    }

    /// Samples `r` once at `t-h`, `t` and `t+h` and returns the position with
    /// both derivatives.
    ///
    /// # Errors
    ///
    /// Propagates the first evaluation error among the three samples, or
    /// reports a non-finite result if a difference overflows.
    pub fn all<C: Curve + ?Sized>(&self, curve: &C, t: f64) -> Result<Derivatives> {
        let h = self.step;
        let ahead = curve.evaluate(t + h)?;
        let here = curve.evaluate(t)?;
        let behind = curve.evaluate(t - h)?;
        Ok(Derivatives {
            position: here,
            velocity: finite((ahead - behind) / (2.0 * h), t)?,
            acceleration: finite(((ahead - here) - (here - behind)) / (h * h), t)?,
        })
    }
}

fn finite(v: Vector3, t: f64) -> Result<Vector3> {
    match Axis::ALL.into_iter().find(|axis| !v[axis.index()].is_finite()) {
        Some(axis) => Err(EvaluationError {
            t,
            axis,
            fault: EvaluationFault::NonFinite,
        }
        .into()),
        None => Ok(v),
    }
}
