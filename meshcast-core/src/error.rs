//! Error types for STL export and parsing.

use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type alias for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while extracting triangles or encoding STL.
#[derive(Debug, Error)]
pub enum ExportError {
    /// An index buffer whose length is not a multiple of 3.
    #[error("index buffer has {count} indices, not a multiple of 3")]
    IndexCountNotTriangles { count: usize },

    /// A non-indexed vertex buffer whose length is not a multiple of 3.
    #[error("vertex buffer has {count} vertices, not a multiple of 3")]
    VertexCountNotTriangles { count: usize },

    /// An index referencing a vertex outside the vertex buffer.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Unit scale must be a finite, strictly positive factor.
    #[error("unit scale {scale} is not a positive finite number")]
    InvalidUnitScale { scale: f64 },

    /// The binary format stores the triangle count as a u32.
    #[error("{count} triangles exceed the u32 count field of binary STL")]
    TooManyTriangles { count: u64 },

    /// Failure writing to the output sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while reading an STL file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input shorter than the fixed binary header and count field.
    #[error("input is {got} bytes, too small for an STL header ({expected} bytes)")]
    TooShort { expected: usize, got: usize },

    /// Binary input that ends before the declared triangle count is reached.
    #[error("binary STL truncated: {declared} triangles declared, {parsed} read")]
    Truncated { declared: u32, parsed: u32 },

    /// ASCII input that does not match the solid/facet grammar.
    #[error("ASCII STL syntax error: {0}")]
    Syntax(String),

    /// Failure reading from the input source.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
