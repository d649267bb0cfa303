//! JSON interchange using [`serde_json::Value`] trees.
//!
//! A vector is stored as an array of numbers, a matrix as an array of columns, each column being
//! an array of numbers. Reading is strict: the arrays must have exactly the right length, and
//! every element must be a number.
//!
//! Non-finite numbers cannot be represented in JSON and are written as `null`, which is rejected
//! when reading them back.

use serde_json::{Number, Value};

use crate::{Error, Matrix, Result, Vector};

/// Conversion to and from JSON values.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// let m = Mat2d::from_rows([[1.0, 2.0], [3.0, 4.5]]);
/// let json = m.to_json_string();
/// assert_eq!(json, "[[1.0,3.0],[2.0,4.5]]");
/// assert_eq!(Mat2d::from_json_str(&json).unwrap(), m);
///
/// assert!(Vec3d::from_json_str("[1, 2]").is_err());
/// ```
pub trait Json: Sized {
    fn to_json(&self) -> Value;

    fn from_json(value: &Value) -> Result<Self>;

    fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }
}

fn number(x: f64) -> Value {
    Number::from_f64(x).map_or(Value::Null, Value::Number)
}

fn array(elems: &[f64]) -> Value {
    Value::Array(elems.iter().copied().map(number).collect())
}

/// Reads an array of exactly `N` numbers.
///
/// `offset` is added to the index reported in [`Error::NotANumber`].
fn read_numbers<const N: usize>(value: &Value, offset: usize) -> Result<[f64; N]> {
    let Value::Array(elems) = value else {
        return Err(Error::NotAnArray);
    };
    if elems.len() != N {
        return Err(Error::Length {
            expected: N,
            found: elems.len(),
        });
    }

    let mut out = [0.0; N];
    for (i, (dst, elem)) in out.iter_mut().zip(elems).enumerate() {
        *dst = elem
            .as_f64()
            .ok_or(Error::NotANumber { index: offset + i })?;
    }
    Ok(out)
}

impl<const N: usize> Json for Vector<f64, N> {
    fn to_json(&self) -> Value {
        array(self.as_slice())
    }

    fn from_json(value: &Value) -> Result<Self> {
        read_numbers::<N>(value, 0)
            .map(Vector::from)
            .map_err(|e| {
                log::debug!("rejected JSON for a {}-vector: {}", N, e);
                e
            })
    }
}

impl<const N: usize> Json for Matrix<f64, N, N> {
    fn to_json(&self) -> Value {
        Value::Array(self.columns().iter().map(|col| array(col)).collect())
    }

    fn from_json(value: &Value) -> Result<Self> {
        read_numbers_nested::<N>(value)
            .map(Matrix::from_columns)
            .map_err(|e| {
                log::debug!("rejected JSON for a {}x{} matrix: {}", N, N, e);
                e
            })
    }
}

fn read_numbers_nested<const N: usize>(value: &Value) -> Result<[[f64; N]; N]> {
    let Value::Array(columns) = value else {
        return Err(Error::NotAnArray);
    };
    if columns.len() != N {
        return Err(Error::Length {
            expected: N,
            found: columns.len(),
        });
    }

    let mut out = [[0.0; N]; N];
    for (col, (dst, column)) in out.iter_mut().zip(columns).enumerate() {
        *dst = read_numbers::<N>(column, col * N)?;
    }
    Ok(out)
}
