use thiserror::Error;

/// Returned when attempting to invert a matrix whose determinant is zero (or so close to zero that
/// its reciprocal is not finite).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("matrix is not invertible")]
pub struct SingularMatrixError;
