//! World-transform helpers.
//!
//! Leaf nodes carry a precomputed local-to-world matrix; the engine never
//! composes transforms from a live hierarchy. The constructors here build
//! such matrices for callers and tests, and [`apply`] is the single
//! point-transform routine the extraction path goes through.

use nalgebra::{Matrix4, Point3, Vector3};

/// Apply a 4x4 affine transform to a point, including translation.
pub fn apply(matrix: &Matrix4<f64>, point: &Point3<f64>) -> Point3<f64> {
    matrix.transform_point(point)
}

/// Transform builder for common world matrices.
pub struct Transform;

impl Transform {
    /// Identity matrix for leaves already in world space.
    pub fn identity() -> Matrix4<f64> {
        Matrix4::identity()
    }

    /// Create a translation matrix.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a rotation matrix from Euler angles (radians), applied Z, Y, X.
    pub fn rotation(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        let rx = Matrix4::new_rotation(Vector3::new(x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, z));
        rz * ry * rx
    }

    /// Create a non-uniform scale matrix.
    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Matrix4<f64> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }
}
