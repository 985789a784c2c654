use thiserror::Error;

/// Top-level error type for sonogrid.
#[derive(Debug, Error)]
pub enum SonogridError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Medium(#[from] MediumError),

    #[error(transparent)]
    Fit(#[from] FitError),
}

/// Errors related to grid storage and indexing.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("invalid grid shape {shape:?}: every dimension must be positive")]
    InvalidShape { shape: Vec<usize> },

    #[error("index {index:?} is out of bounds for grid shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("grid shapes do not match: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: Vec<usize>,
        right: Vec<usize>,
    },
}

/// Errors raised while validating shape-generator inputs.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors related to acoustic medium property evaluation.
#[derive(Debug, Error)]
pub enum MediumError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors related to numerical parameter fitting.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("objective is not finite at the initial guess")]
    NonFiniteObjective,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SonogridError {
    /// Returns `true` if the error was caused by a rejected input value.
    ///
    /// Shape errors, out-of-range indices and every `InvalidArgument` /
    /// `ParameterOutOfRange` variant count as invalid arguments.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Self::Grid(_)
            | Self::Geometry(GeometryError::InvalidArgument(_))
            | Self::Medium(_)
            | Self::Fit(FitError::InvalidArgument(_)) => true,
            Self::Fit(FitError::NonFiniteObjective) => false,
        }
    }
}

/// Shorthand for building a [`GeometryError::InvalidArgument`] result.
pub(crate) fn invalid_argument<T>(message: impl Into<String>) -> Result<T> {
    Err(GeometryError::InvalidArgument(message.into()).into())
}

/// Convenience type alias for results using [`SonogridError`].
pub type Result<T> = std::result::Result<T, SonogridError>;
