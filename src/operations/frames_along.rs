use crate::error::{RangeError, Result};
use crate::geometry::curve::{evaluate_finite, Curve};
use crate::math::Point3;

use super::differentiate::Differentiator;
use super::frenet_frame::{Degeneracy, FrameAt, FrameTolerance, FrenetFrame, ResolvedFrame};
use super::sample_range::{validate_step, SampleRange};

/// Default upper bound on the number of frames one pass may produce.
pub const DEFAULT_MAX_FRAMES: usize = 10_000;

/// A frame placed on the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    pub t: f64,
    pub origin: Point3,
    pub frame: FrenetFrame,
    pub degeneracy: Option<Degeneracy>,
}

impl From<&ResolvedFrame> for FrameSample {
    fn from(resolved: &ResolvedFrame) -> Self {
        Self {
            t: resolved.t,
            origin: resolved.position,
            frame: resolved.frame,
            degeneracy: resolved.degeneracy,
        }
    }
}

/// Result of a sparse frame pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSequence {
    /// Frames in increasing `t`.
    pub samples: Vec<FrameSample>,
    /// Parameters that were skipped because the curve could not be evaluated there.
    pub skipped: Vec<f64>,
}

/// Places Frenet frames at `t = t_min, t_min + Δt, …` while `t ≤ t_max`.
///
/// Sampling is best-effort: a parameter where the origin or the frame
/// cannot be evaluated is skipped and the pass continues. Contrast with
/// [`TessellateCurve`](crate::tessellation::TessellateCurve), which fails
/// the whole pass on the first bad point.
pub struct FramesAlong {
    range: SampleRange,
    step: f64,
    max_frames: usize,
    differentiator: Differentiator,
    tolerance: FrameTolerance,
}

impl FramesAlong {
    /// Creates a new `FramesAlong` operation.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::NonPositiveStep`] if `step` is not positive and finite.
    pub fn new(range: SampleRange, step: f64) -> Result<Self> {
        Ok(Self {
            range,
            step: validate_step(step)?,
            max_frames: DEFAULT_MAX_FRAMES,
            differentiator: Differentiator::default(),
            tolerance: FrameTolerance::default(),
        })
    }

    /// Caps the number of frames a pass may produce.
    #[must_use]
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    #[must_use]
    pub fn with_differentiator(mut self, differentiator: Differentiator) -> Self {
        self.differentiator = differentiator;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: FrameTolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the pass.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::TooManySamples`] before sampling if the pass
    /// would exceed the frame limit. Evaluation failures never fail the pass.
    pub fn execute<C: Curve + ?Sized>(&self, curve: &C) -> Result<FrameSequence> {
        let count = self.range.step_count(self.step);
        if count > self.max_frames {
            return Err(RangeError::TooManySamples {
                requested: count,
                limit: self.max_frames,
            }
            .into());
        }

        let mut sequence = FrameSequence {
            samples: Vec::with_capacity(count),
            skipped: Vec::new(),
        };

        for k in 0..count {
            let t = self.range.step_at(self.step, k);
            if t > self.range.t_max() {
                break;
            }
            match self.sample(curve, t) {
                Ok(sample) => sequence.samples.push(sample),
                Err(err) => {
                    tracing::warn!(t, error = %err, "skipping frame");
                    sequence.skipped.push(t);
                }
            }
        }

        tracing::debug!(
            frames = sequence.samples.len(),
            skipped = sequence.skipped.len(),
            "sampled frames along curve"
        );
        Ok(sequence)
    }

    fn sample<C: Curve + ?Sized>(&self, curve: &C, t: f64) -> Result<FrameSample> {
        let origin = evaluate_finite(curve, t)?;
        let resolved = FrameAt::new(t)
            .with_differentiator(self.differentiator)
            .with_tolerance(self.tolerance)
            .execute(curve)?;
        Ok(FrameSample {
            t,
            origin,
            frame: resolved.frame,
            degeneracy: resolved.degeneracy,
        })
    }
}
