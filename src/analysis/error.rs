use thiserror::Error;

/// Error type for cross-cast aggregation, track projection and section gridding.
///
/// All variants are input-validity failures; none of the operations return
/// partial results.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SectionError {
    /// Casts do not share an identical vertical grid
    #[error("Casts must share pressure levels (cast {0} differs from cast 0)")]
    GridMismatch(usize),

    /// The collection has no casts
    #[error("Cast collection is empty")]
    EmptyGroup,

    /// A projection track needs at least two vertices
    #[error("Track needs at least 2 vertices, got {0}")]
    InsufficientTrack(usize),

    /// Too few valid observations to triangulate
    #[error("Need at least 3 non-collinear observations, got {0}")]
    InsufficientData(usize),

    /// A requested field is absent from a cast
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A cast has no station coordinates
    #[error("Cast {0} has no coordinates")]
    MissingCoordinates(usize),

    /// Section resolution must be positive
    #[error("Track resolution must be at least 1")]
    InvalidResolution,
}
