//! Depth-first triangle extraction.
//!
//! Walks the scene tree parent-before-children (sibling order as stored)
//! and lazily yields world-space triangles. The walk keeps an explicit node
//! stack instead of a visitor callback, so no shared mutable accumulator is
//! involved and the stream can be consumed incrementally by the encoders.

use log::trace;
use nalgebra::{Matrix4, Point3};

use crate::error::ExportResult;
use crate::geometry::Triangle;
use crate::scene::{Geometry, MeshNode};
use crate::transform;

/// Lazily iterate over every world-space triangle in the subtree at `root`.
///
/// The iterator yields `Err` once for the first malformed geometry it
/// reaches and then fuses; a truncated triangle must fail the whole export
/// rather than be silently skipped.
pub fn triangles(root: &MeshNode) -> Triangles<'_> {
    Triangles {
        stack: vec![root],
        batch: Vec::new().into_iter(),
        failed: false,
    }
}

/// Iterator over the triangles of a scene tree. See [`triangles`].
pub struct Triangles<'a> {
    stack: Vec<&'a MeshNode>,
    batch: std::vec::IntoIter<Triangle>,
    failed: bool,
}

impl Iterator for Triangles<'_> {
    type Item = ExportResult<Triangle>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(triangle) = self.batch.next() {
                return Some(Ok(triangle));
            }
            match self.stack.pop()? {
                MeshNode::Group { children } => {
                    // Reverse push keeps stored sibling order on a LIFO stack.
                    self.stack.extend(children.iter().rev());
                }
                MeshNode::Leaf {
                    geometry,
                    transform,
                } => match extract_leaf(geometry, transform) {
                    Ok(batch) => self.batch = batch.into_iter(),
                    Err(e) => {
                        self.failed = true;
                        return Some(Err(e));
                    }
                },
            }
        }
    }
}

/// Transform a leaf's vertices into world space once, then group them into
/// triangles along the indexed or non-indexed path.
fn extract_leaf(geometry: &Geometry, matrix: &Matrix4<f64>) -> ExportResult<Vec<Triangle>> {
    // Structural validation up front; indexing below cannot go out of range.
    let count = geometry.triangle_count()?;

    let world: Vec<Point3<f64>> = geometry
        .positions()
        .iter()
        .map(|p| transform::apply(matrix, p))
        .collect();

    let mut batch = Vec::with_capacity(count);
    match geometry.indices() {
        Some(indices) => {
            for triple in indices.chunks_exact(3) {
                batch.push(Triangle::new(
                    world[triple[0] as usize],
                    world[triple[1] as usize],
                    world[triple[2] as usize],
                ));
            }
        }
        None => {
            for triple in world.chunks_exact(3) {
                batch.push(Triangle::new(triple[0], triple[1], triple[2]));
            }
        }
    }

    trace!("leaf contributed {} triangles", batch.len());
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use crate::transform::Transform;

    fn unit_triangle_at(x: f64) -> Geometry {
        Geometry::from_triangles(vec![
            Point3::new(x, 0.0, 0.0),
            Point3::new(x + 1.0, 0.0, 0.0),
            Point3::new(x, 1.0, 0.0),
        ])
    }

    #[test]
    fn test_indexed_extraction_count() {
        let geometry = Geometry::indexed(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        );
        let tree = MeshNode::leaf(geometry, Transform::identity());
        let triangles: Vec<_> = triangles(&tree).collect::<ExportResult<_>>().unwrap();
        assert_eq!(triangles.len(), 2);
    }

    #[test]
    fn test_translation_applied_to_vertices() {
        let tree = MeshNode::leaf(unit_triangle_at(0.0), Transform::translation(1.0, 2.0, 3.0));
        let tri = triangles(&tree).next().unwrap().unwrap();
        assert_eq!(tri.a, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(tri.b, Point3::new(2.0, 2.0, 3.0));
        assert_eq!(tri.c, Point3::new(1.0, 3.0, 3.0));
    }

    #[test]
    fn test_depth_first_sibling_order() {
        // Two siblings, the second with a nested child; triangles must come
        // out in stored order: 0.0, 10.0, 20.0.
        let tree = MeshNode::group(vec![
            MeshNode::leaf(unit_triangle_at(0.0), Transform::identity()),
            MeshNode::group(vec![
                MeshNode::leaf(unit_triangle_at(10.0), Transform::identity()),
                MeshNode::leaf(unit_triangle_at(20.0), Transform::identity()),
            ]),
        ]);
        let xs: Vec<f64> = triangles(&tree).map(|t| t.unwrap().a.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_malformed_leaf_fails_and_fuses() {
        let ragged = Geometry::from_triangles(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ]);
        let tree = MeshNode::group(vec![
            MeshNode::leaf(unit_triangle_at(0.0), Transform::identity()),
            MeshNode::leaf(ragged, Transform::identity()),
            MeshNode::leaf(unit_triangle_at(5.0), Transform::identity()),
        ]);
        let mut iter = triangles(&tree);
        assert!(iter.next().unwrap().is_ok());
        assert!(matches!(
            iter.next(),
            Some(Err(ExportError::VertexCountNotTriangles { count: 2 }))
        ));
        // Fused: the leaf after the failure is never reached.
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_empty_tree_yields_nothing() {
        let tree = MeshNode::group(vec![MeshNode::group(vec![])]);
        assert_eq!(triangles(&tree).count(), 0);
    }
}
