use crate::error::{CompileError, EvaluationError, Result};
use crate::expression::{compile, CompiledFunction};
use crate::geometry::Axis;
use crate::math::Point3;

use super::Curve;

/// A space curve `r(t) = (x(t), y(t), z(t))` built from three compiled
/// scalar expressions.
#[derive(Debug, Clone)]
pub struct ParametricCurve {
    components: [CompiledFunction; 3],
}

impl ParametricCurve {
    /// Composes three compiled functions into a vector-valued curve.
    #[must_use]
    pub fn new(x: CompiledFunction, y: CompiledFunction, z: CompiledFunction) -> Self {
        Self {
            components: [x, y, z],
        }
    }

    /// Compiles the three component expressions.
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`], tagged with its axis.
    pub fn compile(x: &str, y: &str, z: &str) -> std::result::Result<Self, CompileError> {
        let component = |axis: Axis, source: &str| compile(source).map_err(|e| e.for_axis(axis));
        Ok(Self::new(
            component(Axis::X, x)?,
            component(Axis::Y, y)?,
            component(Axis::Z, z)?,
        ))
    }

    /// Returns the compiled function for one component.
    #[must_use]
    pub fn component(&self, axis: Axis) -> &CompiledFunction {
        &self.components[axis.index()]
    }

    /// Returns the source text of the three components.
    #[must_use]
    pub fn sources(&self) -> [&str; 3] {
        [
            self.components[0].source(),
            self.components[1].source(),
            self.components[2].source(),
        ]
    }
}

impl Curve for ParametricCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let mut coords = [0.0; 3];
        for axis in Axis::ALL {
            coords[axis.index()] = self.components[axis.index()]
                .evaluate(t)
                .map_err(|fault| EvaluationError { t, axis, fault })?;
        }
        Ok(Point3::new(coords[0], coords[1], coords[2]))
    }
}
