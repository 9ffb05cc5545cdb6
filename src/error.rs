use thiserror::Error;

/// Which part of the 16-bit index space a polygon overflowed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Overflow {
    /// Cumulative ring vertex count.
    #[error("{0} vertices (max 65535)")]
    Vertices(usize),
    /// Triangles produced by earcut.
    #[error("{0} triangles (max 65535)")]
    Triangles(usize),
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Precondition {
    #[error("bucket was already uploaded")]
    AlreadyUploaded,
    #[error("bucket has not been uploaded yet")]
    NotUploaded,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BucketError {
    /// The polygon cannot be addressed by one draw group; split it upstream.
    #[error("geometry too large for a 16-bit draw group: {0}")]
    GeometryTooLarge(Overflow),

    #[error("earcut rejected polygon: {0}")]
    Triangulation(String),

    #[error("precondition violated: {0}")]
    Precondition(#[from] Precondition),

    #[error("layer is not a fill layer")]
    NotAFillLayer,
}
