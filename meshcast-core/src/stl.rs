//! STL reading for binary and ASCII formats.
//!
//! Parsed output is a flat facet soup: the format carries no connectivity,
//! so no attempt is made to reconstruct shared vertices. Stored normals are
//! kept as read; consumers that need reliable normals recompute them from
//! winding.

use nalgebra::{Point3, Vector3};
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::double,
    sequence::preceded,
    IResult,
};

use crate::error::{ParseError, ParseResult};
use crate::scene::Geometry;

/// STL file format variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    Ascii,
    Binary,
}

/// One facet: the stored normal plus three vertices, widened to f64.
#[derive(Debug, Clone, Copy)]
pub struct Facet {
    pub normal: Vector3<f64>,
    pub vertices: [Point3<f64>; 3],
}

/// A parsed STL document.
#[derive(Debug, Clone)]
pub struct StlModel {
    /// Solid name from the ASCII header line, if any. Binary files have none.
    pub name: Option<String>,
    pub facets: Vec<Facet>,
}

impl StlModel {
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Flatten the facet soup into non-indexed scene geometry, ready to be
    /// re-exported through the engine.
    pub fn to_geometry(&self) -> Geometry {
        let positions = self
            .facets
            .iter()
            .flat_map(|facet| facet.vertices)
            .collect();
        Geometry::from_triangles(positions)
    }
}

/// Parse a binary STL buffer.
pub fn parse_binary(data: &[u8]) -> ParseResult<StlModel> {
    const HEADER: usize = 84;
    const RECORD: usize = 50;

    if data.len() < HEADER {
        return Err(ParseError::TooShort {
            expected: HEADER,
            got: data.len(),
        });
    }

    let declared = u32::from_le_bytes([data[80], data[81], data[82], data[83]]);
    let available = ((data.len() - HEADER) / RECORD) as u32;
    if available < declared {
        return Err(ParseError::Truncated {
            declared,
            parsed: available,
        });
    }

    let mut facets = Vec::with_capacity(declared as usize);
    let mut offset = HEADER;
    for _ in 0..declared {
        let normal = read_triple(data, offset);
        let a = read_triple(data, offset + 12);
        let b = read_triple(data, offset + 24);
        let c = read_triple(data, offset + 36);
        facets.push(Facet {
            normal: Vector3::new(normal.0, normal.1, normal.2),
            vertices: [
                Point3::new(a.0, a.1, a.2),
                Point3::new(b.0, b.1, b.2),
                Point3::new(c.0, c.1, c.2),
            ],
        });
        // 12 normal bytes + 36 vertex bytes + 2 attribute bytes.
        offset += RECORD;
    }

    Ok(StlModel { name: None, facets })
}

/// Parse an ASCII STL string.
pub fn parse_ascii(input: &str) -> ParseResult<StlModel> {
    match parse_solid(input) {
        Ok((_, model)) => Ok(model),
        Err(e) => Err(ParseError::Syntax(e.to_string())),
    }
}

/// Detect the format and parse either variant.
///
/// A buffer opening with `solid` that parses as the ASCII grammar is ASCII;
/// anything else falls back to binary (some binary files carry `solid` in
/// their opaque header).
pub fn parse(data: &[u8]) -> ParseResult<(StlFormat, StlModel)> {
    if data.len() > 5 && &data[0..5] == b"solid" {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(model) = parse_ascii(text) {
                return Ok((StlFormat::Ascii, model));
            }
        }
    }
    parse_binary(data).map(|model| (StlFormat::Binary, model))
}

fn parse_solid(input: &str) -> IResult<&str, StlModel> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, name_line) = not_line_ending(input)?;
    let (input, facets) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;

    let name = name_line.trim();
    let name = (!name.is_empty()).then(|| name.to_string());

    Ok((input, StlModel { name, facets }))
}

fn parse_facet(input: &str) -> IResult<&str, Facet> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, normal) = parse_triple(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = parse_vertex(input)?;
    let (input, b) = parse_vertex(input)?;
    let (input, c) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((
        input,
        Facet {
            normal: Vector3::new(normal.0, normal.1, normal.2),
            vertices: [a, b, c],
        },
    ))
}

fn parse_vertex(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    let (input, (x, y, z)) = parse_triple(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn parse_triple(input: &str) -> IResult<&str, (f64, f64, f64)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = double(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = double(input)?;
    Ok((input, (x, y, z)))
}

fn read_triple(data: &[u8], offset: usize) -> (f64, f64, f64) {
    (
        read_f32(data, offset),
        read_f32(data, offset + 4),
        read_f32(data, offset + 8),
    )
}

fn read_f32(data: &[u8], offset: usize) -> f64 {
    f64::from(f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]))
}
