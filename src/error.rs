use thiserror::Error;

/// Top-level error type for the planis geometry kernel.
///
/// The numeric predicate layer is total and never errors; only the
/// triangulation seam and the text-format boundary are fallible.
#[derive(Debug, Error)]
pub enum PlanisError {
    #[error(transparent)]
    Triangulation(#[from] TriangulationError),

    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors from the polygon triangulation collaborator.
#[derive(Debug, Error)]
pub enum TriangulationError {
    #[error("triangulator rejected input: {0}")]
    Rejected(String),
}

/// Errors from the whitespace-delimited polygon text format.
#[derive(Debug, Error)]
pub enum IoError {
    #[error(transparent)]
    Read(#[from] std::io::Error),

    #[error("unexpected end of input while reading {0}")]
    UnexpectedEnd(&'static str),

    #[error("invalid {expected} {token:?}")]
    InvalidToken {
        token: String,
        expected: &'static str,
    },
}

/// Convenience type alias for results using [`PlanisError`].
pub type Result<T> = std::result::Result<T, PlanisError>;
