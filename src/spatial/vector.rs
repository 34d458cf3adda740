//! nalgebra point and vector types shared by the spatial layer
//!
//! nalgebra is reached through parry's re-export so both always agree on
//! one version. The helpers below cover component checks nalgebra leaves
//! to the caller.

pub use parry3d_f64::na::{Matrix3, Point3, Rotation3, Vector3};

/// Check that every component is finite
pub fn is_finite(vector: &Vector3<f64>) -> bool {
    vector.iter().all(|component| component.is_finite())
}

/// Check that every component is finite and greater than zero
pub fn is_strictly_positive(vector: &Vector3<f64>) -> bool {
    vector
        .iter()
        .all(|&component| component.is_finite() && component > 0.0)
}

/// Unit vector in the same direction, `None` for zero or non-finite input
pub fn unit(vector: &Vector3<f64>) -> Option<Vector3<f64>> {
    is_finite(vector)
        .then_some(vector)
        .and_then(|finite| finite.try_normalize(f64::EPSILON))
}

/// Components as `(x, y, z)` for messages
pub fn describe(vector: &Vector3<f64>) -> String {
    format!("({}, {}, {})", vector.x, vector.y, vector.z)
}
