//! Text and JSON representations of vectors and matrices.

pub mod json;
pub mod text;

pub use json::Json;
