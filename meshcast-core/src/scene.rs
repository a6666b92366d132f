//! Scene model consumed by the export engine.
//!
//! The engine does not depend on any retained scene-graph library. Callers
//! hand over a tree of [`MeshNode`] values with world transforms already
//! resolved; the engine only reads the tree and never mutates it.

use nalgebra::{Matrix4, Point3};

use crate::error::{ExportError, ExportResult};

/// A node in the hierarchical scene.
///
/// Group nodes contribute no triangles themselves; their children are still
/// visited in stored order. Leaf nodes carry geometry plus the precomputed
/// local-to-world transform. A source node holding both geometry and
/// children maps to a group containing the leaf first.
#[derive(Debug, Clone)]
pub enum MeshNode {
    Group { children: Vec<MeshNode> },
    Leaf {
        geometry: Geometry,
        transform: Matrix4<f64>,
    },
}

impl MeshNode {
    pub fn group(children: Vec<MeshNode>) -> Self {
        Self::Group { children }
    }

    pub fn leaf(geometry: Geometry, transform: Matrix4<f64>) -> Self {
        Self::Leaf {
            geometry,
            transform,
        }
    }

    /// Total triangles in this subtree.
    ///
    /// Validates every geometry structurally (triple alignment and index
    /// range) without transforming a single vertex, so encoders can reject
    /// malformed input before any output byte is written.
    pub fn triangle_count(&self) -> ExportResult<u64> {
        match self {
            Self::Group { children } => {
                let mut total = 0u64;
                for child in children {
                    total += child.triangle_count()?;
                }
                Ok(total)
            }
            Self::Leaf { geometry, .. } => Ok(geometry.triangle_count()? as u64),
        }
    }
}

/// An immutable vertex buffer with an optional flat index buffer.
///
/// With indices present, consecutive index triples select triangles from the
/// vertex buffer (shared vertices stored once). Without indices, consecutive
/// position triples are triangles.
#[derive(Debug, Clone)]
pub struct Geometry {
    positions: Vec<Point3<f64>>,
    indices: Option<Vec<u32>>,
}

impl Geometry {
    /// Indexed geometry: triangles are triples of indices into `positions`.
    pub fn indexed(positions: Vec<Point3<f64>>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Some(indices),
        }
    }

    /// Non-indexed geometry: every consecutive position triple is a triangle.
    pub fn from_triangles(positions: Vec<Point3<f64>>) -> Self {
        Self {
            positions,
            indices: None,
        }
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    /// Number of triangles this geometry describes.
    ///
    /// Fails with a malformed-geometry error when the index count (or, for
    /// non-indexed buffers, the vertex count) is not a multiple of 3, or
    /// when an index falls outside the vertex buffer.
    pub fn triangle_count(&self) -> ExportResult<usize> {
        match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(ExportError::IndexCountNotTriangles {
                        count: indices.len(),
                    });
                }
                for &index in indices {
                    if index as usize >= self.positions.len() {
                        return Err(ExportError::IndexOutOfRange {
                            index,
                            vertex_count: self.positions.len(),
                        });
                    }
                }
                Ok(indices.len() / 3)
            }
            None => {
                if self.positions.len() % 3 != 0 {
                    return Err(ExportError::VertexCountNotTriangles {
                        count: self.positions.len(),
                    });
                }
                Ok(self.positions.len() / 3)
            }
        }
    }
}
