//! [`serde`] support.
//!
//! Vectors and quaternions are serialized as a sequence of their elements. Matrices are serialized
//! as a sequence of columns, each column being a sequence of elements, matching the column-major
//! storage order. With `serde_json`, a 2x2 matrix with rows `[1, 2]` and `[3, 4]` becomes
//! `[[1,3],[2,4]]`.
//!
//! Deserialization is strict: sequences of the wrong length are rejected.

use std::{fmt, marker::PhantomData};

use serde::{
    de::{self, IgnoredAny, SeqAccess, Visitor},
    ser::SerializeTuple,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{Matrix, Quat, Vector};

/// Serializes a slice as a fixed-length tuple.
struct Tuple<'a, T>(&'a [T]);

impl<T: Serialize> Serialize for Tuple<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(self.0.len())?;
        for elem in self.0 {
            tup.serialize_element(elem)?;
        }
        tup.end()
    }
}

/// Collects exactly `N` elements of a sequence into an array.
fn collect_exact<'de, A, T, const N: usize>(
    mut seq: A,
    exp: &dyn de::Expected,
) -> Result<[T; N], A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    let mut elems = Vec::with_capacity(N);
    while elems.len() < N {
        match seq.next_element()? {
            Some(elem) => elems.push(elem),
            None => return Err(de::Error::invalid_length(elems.len(), exp)),
        }
    }
    if seq.next_element::<IgnoredAny>()?.is_some() {
        return Err(de::Error::invalid_length(N + 1, exp));
    }
    match <[T; N]>::try_from(elems) {
        Ok(array) => Ok(array),
        Err(_) => unreachable!("exactly {} elements were collected", N),
    }
}

impl<T: Serialize, const N: usize> Serialize for Vector<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Tuple(self.as_slice()).serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for Vector<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VectorVisitor<T, const N: usize>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for VectorVisitor<T, N> {
            type Value = Vector<T, N>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a sequence of {} elements", N)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
                collect_exact(seq, &self).map(Vector::from)
            }
        }

        deserializer.deserialize_tuple(N, VectorVisitor(PhantomData))
    }
}

impl<T: Serialize, const R: usize, const C: usize> Serialize for Matrix<T, R, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(C)?;
        for column in self.columns() {
            tup.serialize_element(&Tuple(column))?;
        }
        tup.end()
    }
}

impl<'de, T: Deserialize<'de>, const R: usize, const C: usize> Deserialize<'de>
    for Matrix<T, R, C>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MatrixVisitor<T, const R: usize, const C: usize>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>, const R: usize, const C: usize> Visitor<'de>
            for MatrixVisitor<T, R, C>
        {
            type Value = Matrix<T, R, C>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a sequence of {} columns with {} elements each", C, R)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
                let columns: [Vector<T, R>; C] = collect_exact(seq, &self)?;
                Ok(Matrix::from_columns(columns))
            }
        }

        deserializer.deserialize_tuple(C, MatrixVisitor(PhantomData))
    }
}

impl<T: Serialize> Serialize for Quat<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Tuple(self.as_slice()).serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Quat<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vector::deserialize(deserializer).map(Quat::from_vec)
    }
}
