use thiserror::Error;

/// Errors raised while building a solid definition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("solid needs at least 4 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("face {face} has {len} vertices, expected 3 or 4")]
    BadFaceArity { face: usize, len: usize },

    #[error("face {face} references vertex {index} but the solid has {count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        count: usize,
    },

    #[error("{faces} faces but {colors} face colors")]
    ColorCountMismatch { faces: usize, colors: usize },
}

/// Connection-level failures of an orientation source.
///
/// Malformed samples are not errors; they are dropped by the source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("sensor connection lost: {0}")]
    Disconnected(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
