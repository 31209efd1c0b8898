use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, DEGENERACY_EPSILON};

use super::Curve;

/// A straight line `P(t) = origin + t * direction`.
///
/// The direction keeps its length, so `|P'(t)|` equals `|direction|`.
/// Every point of a line is a collinear-derivative point for the Frenet
/// frame builder.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point3,
    direction: Vector3,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is (nearly) zero-length.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        if direction.norm() < DEGENERACY_EPSILON {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self { origin, direction })
    }

    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }
}

impl Curve for Line {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        Ok(self.origin + self.direction * t)
    }
}
