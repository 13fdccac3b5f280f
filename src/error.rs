use thiserror::Error;

#[derive(Debug, Error)]
pub enum GradientError {
    #[error("gradient needs at least one control point")]
    Empty,

    /// A control point could not be resolved to a table index, or a segment
    /// had no end point to interpolate towards.
    #[error("control point {index} at position {position} has no valid table index")]
    PositionOrdering { index: usize, position: f64 },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid gradient configuration: {0}")]
    Config(#[from] serde_json::Error),
}
