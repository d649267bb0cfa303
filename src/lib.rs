//! Double-precision vectors, matrices and geometry utilities.
//!
//! The numeric core ([`Vector`], [`Matrix`], [`Quat`] and the slice [`kernel`]) lives in the
//! `dmath-linalg` crate and is re-exported here. This crate adds the utilities built on top of it:
//!
//! - [`pose`]: rigid transforms made of a position and an orientation.
//! - [`camera`]: orthographic and perspective projections, view matrices.
//! - [`rotation`]: rotation matrices from angle-axis pairs and directions.
//! - [`intersection`]: plane, line and triangle intersection tests.
//! - [`color`]: RGB/HSV conversion.
//! - [`random`]: random scalars and vectors.
//! - [`io`]: text formatting and JSON interchange.
//!
//! # Examples
//!
//! ```
//! use dmath::*;
//!
//! let m = Mat2d::from_rows([[4.0, 7.0], [2.0, 6.0]]);
//! assert_eq!(m.determinant(), 10.0);
//! assert_eq!(io::text::matrix_string(&m, Style::default()), "(dmat[2]) {  4, 2, /**/ 7, 6  }");
//! ```

pub mod camera;
pub mod color;
mod error;
pub mod intersection;
pub mod io;
pub mod pose;
pub mod random;
pub mod rotation;

pub use dmath_linalg::*;
pub use error::{Error, Result};
pub use io::{text::Style, Json};
pub use pose::Pose;
