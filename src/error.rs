use thiserror::Error;

/// Errors that can occur while building curve models from a stroke.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CurveError {
    #[error("stroke has {found} points, at least {required} are needed")]
    InsufficientPoints { found: usize, required: usize },

    #[error("spline needs at least 2 knots, got {0}")]
    TooFewKnots(usize),

    #[error("knot count {knots} does not match value count {values}")]
    LengthMismatch { knots: usize, values: usize },

    #[error("knots must be strictly increasing (index {0})")]
    UnsortedKnots(usize),

    #[error("axis ranges must be positive and finite, got x={x_range} y={y_range}")]
    InvalidRange { x_range: f64, y_range: f64 },

    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    #[error("failed to parse stroke input: {0}")]
    InputParse(String),
}
