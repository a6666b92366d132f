//! Measurement helpers for point chains.
//!
//! The surrounding tool lets a user tap a sequence of world-space points and
//! reports the distance between consecutive taps. The algorithmic part
//! lives here: span measurement between two points, total polyline length,
//! and axis-aligned bounds over a point set.

use nalgebra::{Point3, Vector3};

/// Measured span between two points.
#[derive(Debug, Clone, Copy)]
pub struct Span {
    pub from: Point3<f64>,
    pub to: Point3<f64>,
    /// Euclidean length.
    pub length: f64,
    /// Absolute per-axis components.
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Span {
    /// Midpoint of the span, e.g. for label placement.
    pub fn midpoint(&self) -> Point3<f64> {
        Point3::from((self.from.coords + self.to.coords) / 2.0)
    }

    /// Normalized direction, or `None` for a zero-length span.
    pub fn direction(&self) -> Option<Vector3<f64>> {
        if self.length > f64::EPSILON {
            Some((self.to - self.from) / self.length)
        } else {
            None
        }
    }
}

/// Measure the span between two points.
pub fn span(from: Point3<f64>, to: Point3<f64>) -> Span {
    let diff = to - from;
    Span {
        from,
        to,
        length: diff.norm(),
        dx: diff.x.abs(),
        dy: diff.y.abs(),
        dz: diff.z.abs(),
    }
}

/// Total length of the polyline through `points`, in order.
///
/// Fewer than two points measure zero.
pub fn polyline_length(points: &[Point3<f64>]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).norm())
        .sum()
}

/// Axis-aligned bounding box accumulated from points.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Bounds of a point set; `None` when empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in iter {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.min.z = bounds.min.z.min(p.z);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
            bounds.max.z = bounds.max.z.max(p.z);
        }
        Some(bounds)
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }
}
