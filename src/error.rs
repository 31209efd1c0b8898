use thiserror::Error;

use crate::geometry::Axis;

/// Top-level error type for the Frenet engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrenetError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// An expression could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot compile {}'{expression}': {reason} (at offset {offset})", axis_prefix(.axis))]
pub struct CompileError {
    /// The offending source text.
    pub expression: String,
    /// Human-readable reason.
    pub reason: String,
    /// Byte offset into `expression` where the problem was detected.
    pub offset: usize,
    /// Component the expression was meant for, when known.
    pub axis: Option<Axis>,
}

impl CompileError {
    /// Creates a compile error that is not yet tied to an axis.
    #[must_use]
    pub fn new(expression: &str, reason: impl Into<String>, offset: usize) -> Self {
        Self {
            expression: expression.to_owned(),
            reason: reason.into(),
            offset,
            axis: None,
        }
    }

    /// Tags the error with the curve component it belongs to.
    #[must_use]
    pub fn for_axis(mut self, axis: Axis) -> Self {
        self.axis = Some(axis);
        self
    }
}

fn axis_prefix(axis: &Option<Axis>) -> String {
    axis.map(|a| format!("{a}(t) = ")).unwrap_or_default()
}

/// Why a single scalar evaluation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvaluationFault {
    #[error("division by zero")]
    DivisionByZero,

    #[error("argument outside the domain of {0}")]
    Domain(&'static str),

    #[error("result is not a finite number")]
    NonFinite,
}

/// A curve could not be evaluated at a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("evaluation of {axis}(t) failed at t = {t}: {fault}")]
pub struct EvaluationError {
    /// Parameter value that failed.
    pub t: f64,
    /// Component that failed.
    pub axis: Axis,
    /// Underlying reason.
    pub fault: EvaluationFault,
}

/// Invalid sampling range, step, or numeric input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("invalid t range: t_min ({t_min}) must be less than t_max ({t_max})")]
    EmptyRange { t_min: f64, t_max: f64 },

    #[error("invalid step {step}: must be positive")]
    NonPositiveStep { step: f64 },

    #[error("segment count must be at least 1")]
    NoSegments,

    #[error("{field} is not a number: '{text}'")]
    InvalidNumber { field: &'static str, text: String },

    #[error("{requested} samples requested, limit is {limit}")]
    TooManySamples { requested: usize, limit: usize },
}

/// Invalid analytic curve definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Invalid renderer-facing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`FrenetError`].
pub type Result<T> = std::result::Result<T, FrenetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_message_names_axis() {
        let err = CompileError::new("sin(", "expected expression", 4).for_axis(Axis::Y);
        assert_eq!(
            err.to_string(),
            "cannot compile y(t) = 'sin(': expected expression (at offset 4)"
        );
    }

    #[test]
    fn evaluation_error_message() {
        let err = EvaluationError {
            t: 0.0,
            axis: Axis::X,
            fault: EvaluationFault::DivisionByZero,
        };
        assert_eq!(
            FrenetError::from(err).to_string(),
            "evaluation of x(t) failed at t = 0: division by zero"
        );
    }
}
