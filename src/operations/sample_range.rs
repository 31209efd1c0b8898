use crate::error::{RangeError, Result};

/// Parameter interval `[t_min, t_max]` to sample a curve over.
///
/// Both ends are finite and `t_min < t_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRange {
    t_min: f64,
    t_max: f64,
}

impl SampleRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::EmptyRange`] unless both ends are finite and
    /// `t_min < t_max`.
    pub fn new(t_min: f64, t_max: f64) -> Result<Self> {
        if !(t_min.is_finite() && t_max.is_finite() && t_min < t_max) {
            return Err(RangeError::EmptyRange { t_min, t_max }.into());
        }
        Ok(Self { t_min, t_max })
    }

    #[must_use]
    pub fn t_min(&self) -> f64 {
        self.t_min
    }

    #[must_use]
    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    /// Length `t_max - t_min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Clamps `t` into the range. NaN maps to `t_min`.
    #[must_use]
    pub fn clamp(&self, t: f64) -> f64 {
        if t.is_nan() {
            return self.t_min;
        }
        t.clamp(self.t_min, self.t_max)
    }

    /// Parameter of subdivision point `i` of `segments`: `t_min + span * i / segments`.
    #[must_use]
    pub fn subdivision(&self, i: usize, segments: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let fraction = i as f64 / segments as f64;
        self.t_min + self.span() * fraction
    }

    /// Parameter `t_min + k * step`.
    #[must_use]
    pub fn step_at(&self, step: f64, k: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let k = k as f64;
        self.t_min + step * k
    }

    /// Number of parameters `t_min + k * step` that do not exceed `t_max`.
    ///
    /// `step` must already be validated as positive and finite.
    #[must_use]
    pub fn step_count(&self, step: f64) -> usize {
        let steps = (self.span() / step).floor();
        // Saturating float-to-int cast; absurdly small steps are caught by the caller's limit.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut whole = steps as usize;
        // The quotient can round to either side of an integer; settle it with
        // the arithmetic that places the samples.
        if self.step_at(step, whole.saturating_add(1)) <= self.t_max {
            whole = whole.saturating_add(1);
        } else if whole > 0 && self.step_at(step, whole) > self.t_max {
            whole -= 1;
        }
        whole.saturating_add(1)
    }
}

/// Validates a sparse-sampling step `Δt`.
///
/// # Errors
///
/// Returns [`RangeError::NonPositiveStep`] unless `step` is positive and finite.
pub fn validate_step(step: f64) -> Result<f64> {
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(RangeError::NonPositiveStep { step }.into())
    }
}
