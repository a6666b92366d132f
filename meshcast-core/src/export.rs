//! STL encoders.
//!
//! Two independent serializers consume the same triangle stream: a textual
//! one following the `solid`/`facet` grammar and a little-endian binary one
//! (80-byte header, u32 triangle count, 50 bytes per triangle). Both paths
//! share vertex transformation, scaling, and normal computation, so they
//! always agree on the triangle set they describe.
//!
//! Writers validate the whole tree before emitting the first byte; a
//! malformed geometry never produces a partial document. Triangles are then
//! streamed per node, so memory stays bounded by the largest single
//! geometry rather than the whole scene.

use std::io::Write;

use log::debug;

use crate::error::{ExportError, ExportResult};
use crate::extract;
use crate::scene::MeshNode;

/// Solid name used when the caller does not supply one.
pub const DEFAULT_SOLID_NAME: &str = "exported";

/// Caller-facing knobs for an export call.
///
/// `unit_scale` converts model units into output units (e.g. `1000.0` for a
/// scene measured in meters printed in millimeters). It must be finite and
/// strictly positive.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub solid_name: String,
    pub unit_scale: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            solid_name: DEFAULT_SOLID_NAME.to_string(),
            unit_scale: 1.0,
        }
    }
}

impl ExportOptions {
    pub fn named(solid_name: impl Into<String>) -> Self {
        Self {
            solid_name: solid_name.into(),
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    fn validate(&self) -> ExportResult<()> {
        if !self.unit_scale.is_finite() || self.unit_scale <= 0.0 {
            return Err(ExportError::InvalidUnitScale {
                scale: self.unit_scale,
            });
        }
        Ok(())
    }
}

/// Serialize the tree as ASCII STL into `writer`.
///
/// An empty tree produces a format-valid empty solid
/// (`solid <name>` / `endsolid <name>` with no facets).
pub fn write_ascii<W: Write>(
    root: &MeshNode,
    options: &ExportOptions,
    writer: &mut W,
) -> ExportResult<()> {
    options.validate()?;
    let count = root.triangle_count()?;
    debug!(
        "exporting {count} triangles as ASCII STL solid '{}'",
        options.solid_name
    );

    writeln!(writer, "solid {}", options.solid_name)?;
    for triangle in extract::triangles(root) {
        let triangle = triangle?.scaled(options.unit_scale);
        let n = triangle.normal();
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in [&triangle.a, &triangle.b, &triangle.c] {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", options.solid_name)?;

    Ok(())
}

/// Serialize the tree as binary STL into `writer`.
///
/// Output length is exactly `84 + 50 * triangle_count`. Positions and
/// normals are truncated from f64 to the format's 32-bit floats; the 80-byte
/// header is opaque to consumers and left all zero.
pub fn write_binary<W: Write>(
    root: &MeshNode,
    options: &ExportOptions,
    writer: &mut W,
) -> ExportResult<()> {
    options.validate()?;
    let count = root.triangle_count()?;
    let count32 =
        u32::try_from(count).map_err(|_| ExportError::TooManyTriangles { count })?;
    debug!(
        "exporting {count32} triangles as binary STL solid '{}'",
        options.solid_name
    );

    writer.write_all(&[0u8; 80])?;
    writer.write_all(&count32.to_le_bytes())?;

    for triangle in extract::triangles(root) {
        let triangle = triangle?.scaled(options.unit_scale);
        let n = triangle.normal();
        write_f32_triple(writer, n.x, n.y, n.z)?;
        for v in [&triangle.a, &triangle.b, &triangle.c] {
            write_f32_triple(writer, v.x, v.y, v.z)?;
        }
        // Attribute byte count, always zero.
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Export the tree as an ASCII STL string.
pub fn export_ascii(root: &MeshNode, options: &ExportOptions) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_ascii(root, options, &mut buf)?;
    // The grammar and `{:.6e}` fields only ever emit ASCII bytes.
    Ok(String::from_utf8(buf).expect("ASCII STL output is valid UTF-8"))
}

/// Export the tree as a binary STL byte buffer.
pub fn export_binary(root: &MeshNode, options: &ExportOptions) -> ExportResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_binary(root, options, &mut buf)?;
    Ok(buf)
}

fn write_f32_triple<W: Write>(writer: &mut W, x: f64, y: f64, z: f64) -> ExportResult<()> {
    writer.write_all(&(x as f32).to_le_bytes())?;
    writer.write_all(&(y as f32).to_le_bytes())?;
    writer.write_all(&(z as f32).to_le_bytes())?;
    Ok(())
}
