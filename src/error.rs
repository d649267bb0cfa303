use thiserror::Error;

/// Errors produced when reading serialized vectors and matrices.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("expected a JSON array")]
    NotAnArray,

    #[error("expected {expected} elements, found {found}")]
    Length { expected: usize, found: usize },

    #[error("element {index} is not a number")]
    NotANumber { index: usize },

    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
