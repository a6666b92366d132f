//! Triangle primitive and face-normal computation.

use nalgebra::{Point3, Vector3};

/// A world-space triangle produced during scene extraction.
///
/// Triangles are transient: they exist only between extraction and
/// encoding and carry no connectivity information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point3<f64>,
    pub b: Point3<f64>,
    pub c: Point3<f64>,
}

impl Triangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self { a, b, c }
    }

    /// Compute the unit face normal as `(c - b) × (a - b)`, normalized.
    ///
    /// The edge ordering fixes the winding convention of the output format
    /// and must agree between the ASCII and binary encoders, so both go
    /// through this single implementation.
    ///
    /// A degenerate triangle (collinear or coincident vertices) has a
    /// zero-length cross product; the normal falls back to the zero vector
    /// instead of failing the export. STL consumers treat the stored normal
    /// as advisory and recompute from winding when it is unusable.
    pub fn normal(&self) -> Vector3<f64> {
        let cb = self.c - self.b;
        let ab = self.a - self.b;
        let cross = cb.cross(&ab);
        let len = cross.norm();
        if len > f64::EPSILON {
            cross / len
        } else {
            Vector3::zeros()
        }
    }

    /// Uniformly scale all three vertices about the origin.
    ///
    /// Used for unit conversion at encode time. The factor must be positive;
    /// uniform positive scaling leaves the unit normal unchanged.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            a: Point3::from(self.a.coords * factor),
            b: Point3::from(self.b.coords * factor),
            c: Point3::from(self.c.coords * factor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_winding_golden() {
        // Fixed winding reference: +Z for this vertex order.
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let n = tri.normal();
        assert!((n.x - 0.0).abs() < 1e-12);
        assert!((n.y - 0.0).abs() < 1e-12);
        assert!((n.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normal_is_unit_length() {
        let tri = Triangle::new(
            Point3::new(0.3, -1.2, 4.0),
            Point3::new(2.5, 0.1, -0.7),
            Point3::new(-1.0, 3.0, 1.5),
        );
        assert!((tri.normal().norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_preserves_normal() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let scaled = tri.scaled(1000.0);
        assert_eq!(scaled.b, Point3::new(1000.0, 0.0, 0.0));
        assert_eq!(scaled.normal(), tri.normal());
    }

    #[test]
    fn test_degenerate_triangle_zero_normal() {
        // Collinear vertices: cross product vanishes.
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert_eq!(tri.normal(), Vector3::zeros());

        // Coincident vertices as well.
        let p = Point3::new(5.0, 5.0, 5.0);
        let tri = Triangle::new(p, p, p);
        assert_eq!(tri.normal(), Vector3::zeros());
    }
}
