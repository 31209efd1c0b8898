pub mod format;

pub use format::{format_vector, format_vector_opt};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Magnitude below which a derivative or cross product is treated as zero.
pub const DEGENERACY_EPSILON: f64 = 1e-8;

/// Default step `h` for central finite differences.
pub const DIFFERENTIATION_STEP: f64 = 1e-5;
