//! Interactive state: the active curve, the sampling range, the current `t`
//! and playback.
//!
//! [`Session`] is the single writer. Every operation returns an explicit
//! [`Result`]; the message of the most recent failure stays available via
//! [`Session::last_error`] until the next successful operation clears it.
//! A failed operation never changes the curve, range or step that were in
//! effect before it.

mod active_curve;
mod playback;
mod report;

pub use active_curve::ActiveCurve;
pub use playback::{Playback, DEFAULT_PLAYBACK_SPEED};
pub use report::FrameReport;

use std::sync::Arc;

use crate::error::{FrenetError, RangeError, Result};
use crate::geometry::curve::evaluate_finite;
use crate::geometry::ParametricCurve;
use crate::math::DIFFERENTIATION_STEP;
use crate::operations::{
    validate_step, Differentiator, FrameAt, FrameSequence, FrameTolerance, FramesAlong,
    ResolvedFrame, SampleRange, DEFAULT_MAX_FRAMES,
};
use crate::tessellation::{Polyline, TessellateCurve, DEFAULT_CURVE_SEGMENTS};

/// Tunables for a [`Session`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    /// Initial `x(t)`, `y(t)`, `z(t)` expressions.
    pub expressions: [String; 3],
    /// Initial `t_min`.
    pub t_min: f64,
    /// Initial `t_max`.
    pub t_max: f64,
    /// Finite-difference step `h`.
    pub differentiation_step: f64,
    /// Degeneracy thresholds for the frame builder.
    pub frame_tolerance: FrameTolerance,
    /// Segments of the curve polyline.
    pub curve_segments: usize,
    /// Initial spacing `Δt` of the frames drawn along the curve.
    pub frame_step: f64,
    /// Upper bound on frames drawn along the curve.
    pub max_frames: usize,
    /// Playback speed in `t` per second.
    pub playback_speed: f64,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            expressions: ["cos(t)".to_owned(), "sin(t)".to_owned(), "t / 4".to_owned()],
            t_min: 0.0,
            t_max: 10.0,
            differentiation_step: DIFFERENTIATION_STEP,
            frame_tolerance: FrameTolerance::default(),
            curve_segments: DEFAULT_CURVE_SEGMENTS,
            frame_step: 1.0,
            max_frames: DEFAULT_MAX_FRAMES,
            playback_speed: DEFAULT_PLAYBACK_SPEED,
        }
    }
}

/// Owner of the mutable state of one visualizer.
#[derive(Debug)]
pub struct Session {
    curve: ActiveCurve<ParametricCurve>,
    range: SampleRange,
    t: f64,
    frame_step: f64,
    curve_segments: usize,
    max_frames: usize,
    differentiator: Differentiator,
    tolerance: FrameTolerance,
    playback: Playback,
    last_error: Option<String>,
}

impl Session {
    /// Creates a session from `params`, compiling the initial curve.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is invalid or the initial curve
    /// does not compile or evaluate at `t_min`.
    pub fn new(params: SessionParams) -> Result<Self> {
        let range = SampleRange::new(params.t_min, params.t_max)?;
        let frame_step = validate_step(params.frame_step)?;
        if params.curve_segments == 0 {
            return Err(RangeError::NoSegments.into());
        }
        let differentiator = Differentiator::new(params.differentiation_step)?;

        let [x, y, z] = &params.expressions;
        let curve = ParametricCurve::compile(x, y, z)?;
        evaluate_finite(&curve, range.t_min())?;

        Ok(Self {
            curve: ActiveCurve::new(curve),
            range,
            t: range.t_min(),
            frame_step,
            curve_segments: params.curve_segments,
            max_frames: params.max_frames,
            differentiator,
            tolerance: params.frame_tolerance,
            playback: Playback::new(params.playback_speed),
            last_error: None,
        })
    }

    /// Returns the active curve snapshot.
    #[must_use]
    pub fn curve(&self) -> Arc<ParametricCurve> {
        self.curve.current()
    }

    #[must_use]
    pub fn range(&self) -> SampleRange {
        self.range
    }

    /// Returns the current parameter.
    #[must_use]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Returns the spacing of the frames drawn along the curve.
    #[must_use]
    pub fn frame_step(&self) -> f64 {
        self.frame_step
    }

    /// Message of the most recent failed operation, if not yet cleared.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    /// Compiles three new component expressions and makes them the active
    /// curve if they all compile and evaluate at `t_min`.
    ///
    /// # Errors
    ///
    /// Returns the first compile error (tagged with its axis) or the
    /// evaluation error at `t_min`. The previous curve stays active.
    pub fn update_curve(&mut self, x: &str, y: &str, z: &str) -> Result<()> {
        let check_t = self.range.t_min();
        let result = ParametricCurve::compile(x.trim(), y.trim(), z.trim())
            .map_err(FrenetError::from)
            .and_then(|candidate| self.curve.try_replace(candidate, check_t));
        if result.is_ok() {
            tracing::debug!(x, y, z, "curve updated");
        }
        self.record(result)
    }

    /// Parses and applies a new `[t_min, t_max]` range, clamping the current
    /// `t` into it.
    ///
    /// The active curve must evaluate at the new `t_min`, just as a new curve
    /// must evaluate at the current one.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::InvalidNumber`] or [`RangeError::EmptyRange`]
    /// for bad input, or the curve's evaluation error at the new `t_min`. The
    /// previous range is preserved.
    pub fn update_range(&mut self, t_min: &str, t_max: &str) -> Result<()> {
        let result = parse_number("t_min", t_min)
            .and_then(|lo| Ok((lo, parse_number("t_max", t_max)?)))
            .and_then(|(lo, hi)| SampleRange::new(lo, hi))
            .and_then(|range| {
                evaluate_finite(&*self.curve.current(), range.t_min())?;
                Ok(range)
            });
        let range = self.record(result)?;

        self.range = range;
        self.t = range.clamp(self.t);
        tracing::info!(t_min = range.t_min(), t_max = range.t_max(), "t range updated");
        Ok(())
    }

    /// Parses and applies a new frame spacing `Δt`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::InvalidNumber`] or
    /// [`RangeError::NonPositiveStep`]; the previous step is preserved.
    pub fn set_frame_step(&mut self, text: &str) -> Result<()> {
        let result = parse_number("frame step", text).and_then(validate_step);
        self.frame_step = self.record(result)?;
        Ok(())
    }

    /// Moves the current parameter, clamped into the range. Returns the
    /// value actually set.
    pub fn set_t(&mut self, t: f64) -> f64 {
        self.t = self.range.clamp(t);
        self.t
    }

    /// Parses `text` and moves the current parameter there, clamped into
    /// the range.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::InvalidNumber`]; `t` is unchanged.
    pub fn set_t_text(&mut self, text: &str) -> Result<f64> {
        let t = self.record(parse_number("t", text))?;
        Ok(self.set_t(t))
    }

    /// Advances playback by `elapsed_secs` and returns the new `t`.
    pub fn advance(&mut self, elapsed_secs: f64) -> f64 {
        self.t = self.playback.advance(&self.range, self.t, elapsed_secs);
        self.t
    }

    /// Samples the active curve into a polyline.
    ///
    /// # Errors
    ///
    /// Returns the first evaluation error; no partial polyline is produced.
    pub fn curve_polyline(&mut self) -> Result<Polyline> {
        let curve = self.curve.current();
        let result = TessellateCurve::new(self.range, self.curve_segments)
            .and_then(|op| op.execute(&*curve));
        self.record(result)
    }

    /// Computes the frame at the current `t`.
    ///
    /// # Errors
    ///
    /// Returns the evaluation error if the curve cannot be differentiated
    /// at `t`.
    pub fn current_frame(&mut self) -> Result<ResolvedFrame> {
        let curve = self.curve.current();
        let result = FrameAt::new(self.t)
            .with_differentiator(self.differentiator)
            .with_tolerance(self.tolerance)
            .execute(&*curve);
        self.record(result)
    }

    /// Display strings for the frame at the current `t`.
    ///
    /// If the frame cannot be computed the vectors read `[-, -, -]` and the
    /// failure is kept in [`Session::last_error`].
    pub fn frame_report(&mut self) -> FrameReport {
        match self.current_frame() {
            Ok(resolved) => FrameReport::from(&resolved),
            Err(_) => FrameReport::missing(self.t),
        }
    }

    /// Places frames along the whole range at the current frame spacing.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::TooManySamples`] if the spacing is too fine.
    /// Individual bad samples are skipped, not reported as errors.
    pub fn all_frames(&mut self) -> Result<FrameSequence> {
        let curve = self.curve.current();
        let result = FramesAlong::new(self.range, self.frame_step).and_then(|op| {
            op.with_max_frames(self.max_frames)
                .with_differentiator(self.differentiator)
                .with_tolerance(self.tolerance)
                .execute(&*curve)
        });
        self.record(result)
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(err) => {
                tracing::warn!(error = %err, "operation failed");
                self.last_error = Some(err.to_string());
            }
        }
        result
    }
}

fn parse_number(field: &'static str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| {
            RangeError::InvalidNumber {
                field,
                text: text.to_owned(),
            }
            .into()
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::Degeneracy;
    use approx::assert_abs_diff_eq;

    fn session() -> Session {
        Session::new(SessionParams::default()).unwrap()
    }

    #[test]
    fn default_session_draws_everything() {
        let mut session = session();
        assert_eq!(session.curve_polyline().unwrap().len(), 201);
        assert_eq!(session.all_frames().unwrap().samples.len(), 11);
        let report = session.frame_report();
        assert_eq!(report.position, "[1.000, 0.000, 0.000]");
        assert!(session.last_error().is_none());
    }

    #[test]
    fn unparsable_t_is_reported() {
        let mut session = session();
        session.set_t(2.0);
        let err = session.set_t_text("two").unwrap_err();
        assert_eq!(
            err,
            FrenetError::Range(RangeError::InvalidNumber {
                field: "t",
                text: "two".to_owned()
            })
        );
        assert_abs_diff_eq!(session.t(), 2.0);
        assert!(session.last_error().is_some());

        assert_abs_diff_eq!(session.set_t_text(" 42 ").unwrap(), 10.0);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn failed_frame_reports_placeholders() {
        let mut session = session();
        session.update_curve("t", "1/(t-1)", "0").unwrap();
        session.set_t(1.0);
        let report = session.frame_report();
        assert_eq!(report.tangent, "[-, -, -]");
        assert_eq!(report.position, "[-, -, -]");
        assert!(session.last_error().unwrap().contains("y(t)"));

        session.set_t(2.0);
        assert_eq!(session.frame_report().position, "[2.000, 1.000, 0.000]");
        assert!(session.last_error().is_none());
    }

    #[test]
    fn bad_expression_keeps_previous_curve_and_reports() {
        let mut session = session();
        let err = session.update_curve("t", "foo(t)", "0").unwrap_err();
        assert!(matches!(err, FrenetError::Compile(_)));
        assert_eq!(session.curve().sources(), ["cos(t)", "sin(t)", "t / 4"]);
        assert!(session.last_error().unwrap().contains("y(t) = 'foo(t)'"));
    }

    #[test]
    fn curve_failing_sanity_check_is_rejected() {
        let mut session = session();
        // ln(0) at t_min = 0.
        assert!(session.update_curve("t", "ln(t)", "0").is_err());
        assert_eq!(session.curve().sources(), ["cos(t)", "sin(t)", "t / 4"]);
    }

    #[test]
    fn success_clears_error_message() {
        let mut session = session();
        assert!(session.update_curve("t +", "0", "0").is_err());
        assert!(session.last_error().is_some());
        session.update_curve(" t ", "t^2", "0").unwrap();
        assert!(session.last_error().is_none());
        assert_eq!(session.curve().sources(), ["t", "t^2", "0"]);
    }

    #[test]
    fn invalid_range_preserves_previous() {
        let mut session = session();
        assert!(matches!(
            session.update_range("5", "1"),
            Err(FrenetError::Range(RangeError::EmptyRange { .. }))
        ));
        assert!(matches!(
            session.update_range("abc", "1"),
            Err(FrenetError::Range(RangeError::InvalidNumber { field: "t_min", .. }))
        ));
        assert_abs_diff_eq!(session.range().t_min(), 0.0);
        assert_abs_diff_eq!(session.range().t_max(), 10.0);
    }

    #[test]
    fn range_update_clamps_current_t() {
        let mut session = session();
        session.set_t(8.0);
        session.update_range("-1", "2.5").unwrap();
        assert_abs_diff_eq!(session.t(), 2.5);
        assert_abs_diff_eq!(session.set_t(-7.0), -1.0);
    }

    #[test]
    fn range_must_keep_curve_evaluable_at_t_min() {
        let mut session = session();
        session.update_curve("sqrt(t)", "t", "0").unwrap();
        assert!(session.update_range("-1", "1").is_err());
        assert_abs_diff_eq!(session.range().t_min(), 0.0);
    }

    #[test]
    fn frame_step_validation() {
        let mut session = session();
        assert!(session.set_frame_step("0").is_err());
        assert!(session.set_frame_step("-2").is_err());
        assert!(session.set_frame_step("x").is_err());
        assert_abs_diff_eq!(session.frame_step(), 1.0);
        session.set_frame_step("2.5").unwrap();
        assert_eq!(session.all_frames().unwrap().samples.len(), 5);
    }

    #[test]
    fn degenerate_frame_is_not_an_error() {
        let mut session = session();
        session.update_curve("1", "2", "3").unwrap();
        let resolved = session.current_frame().unwrap();
        assert_eq!(resolved.degeneracy, Some(Degeneracy::ZeroVelocity));
        assert!(session.last_error().is_none());
    }

    #[test]
    fn dense_failure_does_not_affect_sparse_frames() {
        let mut session = session();
        session.update_curve("t", "1/(t-5)", "0").unwrap();
        assert!(session.curve_polyline().is_err());
        let frames = session.all_frames().unwrap();
        assert_eq!(frames.samples.len(), 10);
        assert_eq!(frames.skipped, vec![5.0]);
    }

    #[test]
    fn playback_wraps_within_range() {
        let mut session = session();
        session.playback_mut().play();
        session.set_t(9.75);
        assert_abs_diff_eq!(session.advance(0.5), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let params = SessionParams {
            curve_segments: 0,
            ..SessionParams::default()
        };
        assert!(Session::new(params).is_err());
        let params = SessionParams {
            t_min: 3.0,
            t_max: 3.0,
            ..SessionParams::default()
        };
        assert!(Session::new(params).is_err());
    }
}
