use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, DEGENERACY_EPSILON};

use super::Curve;

/// A circular helix around an axis.
///
/// `P(t) = center + radius * (cos(t) * ref_dir + sin(t) * (axis x ref_dir)) + pitch * t * axis`
///
/// With `pitch = 0` the helix degenerates to a circle in the plane through
/// `center` perpendicular to `axis`. The analytic Frenet frame is known in
/// closed form, which makes helices useful reference geometry.
#[derive(Debug, Clone)]
pub struct Helix {
    center: Point3,
    radius: f64,
    axis: Vector3,
    ref_dir: Vector3,
    pitch: f64,
}

impl Helix {
    /// Creates a new helix.
    ///
    /// # Arguments
    ///
    /// * `center` - Point on the axis at `t = 0`
    /// * `radius` - Radius (must be positive)
    /// * `axis` - Axis direction
    /// * `ref_dir` - Direction of `P(0) - center` (must be perpendicular to `axis`)
    /// * `pitch` - Rise along the axis per radian
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive, a direction is
    /// zero-length, or `ref_dir` is not perpendicular to `axis`.
    pub fn new(
        center: Point3,
        radius: f64,
        axis: Vector3,
        ref_dir: Vector3,
        pitch: f64,
    ) -> Result<Self> {
        if radius < DEGENERACY_EPSILON {
            return Err(GeometryError::Degenerate("helix radius must be positive".into()).into());
        }

        let axis_len = axis.norm();
        let ref_len = ref_dir.norm();
        if axis_len < DEGENERACY_EPSILON || ref_len < DEGENERACY_EPSILON {
            return Err(GeometryError::ZeroVector.into());
        }
        let axis = axis / axis_len;
        let ref_dir = ref_dir / ref_len;

        if axis.dot(&ref_dir).abs() > DEGENERACY_EPSILON {
            return Err(GeometryError::Degenerate(
                "reference direction must be perpendicular to axis".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            radius,
            axis,
            ref_dir,
            pitch,
        })
    }

    /// A circle of the given radius in the XY plane, centered at the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive.
    pub fn circle_xy(radius: f64) -> Result<Self> {
        Self::new(Point3::origin(), radius, Vector3::z(), Vector3::x(), 0.0)
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Returns the unit axis direction.
    #[must_use]
    pub fn axis(&self) -> &Vector3 {
        &self.axis
    }

    /// Curvature `r / (r² + c²)`.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        self.radius / (self.radius * self.radius + self.pitch * self.pitch)
    }

    /// Torsion `c / (r² + c²)`.
    #[must_use]
    pub fn torsion(&self) -> f64 {
        self.pitch / (self.radius * self.radius + self.pitch * self.pitch)
    }

    /// Unit vector from the curve point at `t` towards the axis.
    ///
    /// This is the principal normal of the helix.
    #[must_use]
    pub fn inward_normal(&self, t: f64) -> Vector3 {
        -(self.ref_dir * t.cos() + self.second_dir() * t.sin())
    }

    fn second_dir(&self) -> Vector3 {
        self.axis.cross(&self.ref_dir)
    }
}

impl Curve for Helix {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let radial = self.ref_dir * t.cos() + self.second_dir() * t.sin();
        Ok(self.center + radial * self.radius + self.axis * (self.pitch * t))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn non_perpendicular_reference_is_rejected() {
        let result = Helix::new(
            Point3::origin(),
            1.0,
            Vector3::z(),
            Vector3::new(1.0, 0.0, 1.0),
            0.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn zero_radius_is_rejected() {
        assert!(Helix::circle_xy(0.0).is_err());
    }

    #[test]
    fn circle_points_lie_on_radius() {
        let circle = Helix::circle_xy(2.0).unwrap();
        for i in 0..8 {
            let p = circle.evaluate(f64::from(i) * 0.7).unwrap();
            assert_relative_eq!(p.coords.norm(), 2.0, epsilon = 1e-12);
            assert_relative_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn helix_rises_along_axis() {
        let helix = Helix::new(Point3::origin(), 1.0, Vector3::z(), Vector3::x(), 0.5).unwrap();
        let p = helix.evaluate(std::f64::consts::TAU).unwrap();
        assert_relative_eq!(p, Point3::new(1.0, 0.0, std::f64::consts::PI), epsilon = 1e-12);
        assert_relative_eq!(helix.curvature(), 0.8);
        assert_relative_eq!(helix.torsion(), 0.4);
    }
}
