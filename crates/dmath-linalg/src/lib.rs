//! Small, fixed-size linear algebra for `dmath`.
//!
//! This crate provides the numeric core the rest of `dmath` is built on:
//!
//! - [`Vector`], an `N`-element column vector, with aliases for 2 to 4 dimensions ([`Vec2d`],
//!   [`Vec3d`], [`Vec4d`] for double precision).
//! - [`Matrix`], a column-major matrix, with aliases for 2x2 to 4x4 square matrices ([`Mat2d`],
//!   [`Mat3d`], [`Mat4d`]).
//! - [`Quat`], a quaternion used to represent 3D rotations.
//! - [`kernel`], size-generic functions operating on flat column-major buffers. Vector
//!   arithmetic and the square matrix operations forward to these.
//!
//! # Goals & Non-Goals
//!
//! - Don't support dynamically-sized vectors and matrices. Dimensions are const generics, so the
//!   same code handles every size, and only the determinant and inverse need per-size formulas.
//! - Support only a single, column-major, unpadded data layout for matrices and vectors. Element
//!   `(row, col)` of an `N`x`N` matrix lives at flat index `col * N + row`.
//! - Be generic over the element type, but don't try to support non-[`Copy`] numeric types (eg.
//!   "big decimals").
//! - Report non-invertible matrices to the caller ([`Matrix::try_invert`]) instead of producing
//!   infinities.
//!
//! # Interoperability
//!
//! Vectors, matrices and quaternions implement the [`approx`] comparison traits, [`serde`]'s
//! `Serialize`/`Deserialize`, and (when their element type does) [`bytemuck::Pod`].

mod approx_eq;
mod error;
pub mod kernel;
mod matrix;
mod quat;
mod serialize;
mod traits;
mod vector;

pub use error::*;
pub use matrix::*;
pub use quat::*;
pub use traits::*;
pub use vector::*;
