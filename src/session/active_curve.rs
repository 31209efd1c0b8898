use std::sync::Arc;

use crate::error::Result;
use crate::geometry::curve::{evaluate_finite, Curve};

/// Holder of the curve currently in use.
///
/// The curve is an immutable snapshot. [`ActiveCurve::try_replace`] swaps in
/// a new one only after it evaluates to a finite point at a check
/// parameter; on failure the previous snapshot stays active. Readers that
/// cloned the `Arc` keep their snapshot regardless of later swaps.
#[derive(Debug, Clone)]
pub struct ActiveCurve<C> {
    current: Arc<C>,
}

impl<C: Curve> ActiveCurve<C> {
    /// Wraps an initial curve without probing it.
    #[must_use]
    pub fn new(curve: C) -> Self {
        Self {
            current: Arc::new(curve),
        }
    }

    /// Returns the active snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<C> {
        Arc::clone(&self.current)
    }

    /// Evaluates `candidate` at `check_t` and commits it if every component is
    /// finite there.
    ///
    /// # Errors
    ///
    /// Returns the evaluation error at `check_t`; the active curve is unchanged.
    pub fn try_replace(&mut self, candidate: C, check_t: f64) -> Result<()> {
        evaluate_finite(&candidate, check_t)?;
        self.current = Arc::new(candidate);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::ParametricCurve;

    #[test]
    fn replaces_after_successful_check() {
        let mut active = ActiveCurve::new(ParametricCurve::compile("t", "0", "0").unwrap());
        let candidate = ParametricCurve::compile("cos(t)", "sin(t)", "t").unwrap();
        active.try_replace(candidate, 0.0).unwrap();
        assert_eq!(active.current().sources(), ["cos(t)", "sin(t)", "t"]);
    }

    #[test]
    fn failed_check_keeps_previous_curve() {
        let mut active = ActiveCurve::new(ParametricCurve::compile("t", "0", "0").unwrap());
        let before = active.current();
        let candidate = ParametricCurve::compile("t", "1/t", "0").unwrap();
        assert!(active.try_replace(candidate, 0.0).is_err());
        assert!(Arc::ptr_eq(&before, &active.current()));
    }

    #[test]
    fn readers_keep_their_snapshot() {
        let mut active = ActiveCurve::new(ParametricCurve::compile("1", "2", "3").unwrap());
        let reader = active.current();
        let candidate = ParametricCurve::compile("4", "5", "6").unwrap();
        active.try_replace(candidate, 0.0).unwrap();
        assert_eq!(reader.sources(), ["1", "2", "3"]);
        assert_eq!(active.current().sources(), ["4", "5", "6"]);
    }
}
