use std::{array, fmt};

use crate::{kernel, Number, One, SingularMatrixError, Vector, Zero};

mod ops;

/// A 2x2 matrix.
pub type Mat2<T> = Matrix<T, 2, 2>;
/// A 2x2 matrix with [`f32`] elements.
pub type Mat2f = Mat2<f32>;
/// A 2x2 matrix with [`f64`] elements.
pub type Mat2d = Mat2<f64>;
/// A 3x3 matrix.
pub type Mat3<T> = Matrix<T, 3, 3>;
/// A 3x3 matrix with [`f32`] elements.
pub type Mat3f = Mat3<f32>;
/// A 3x3 matrix with [`f64`] elements.
pub type Mat3d = Mat3<f64>;
/// A 4x4 matrix.
pub type Mat4<T> = Matrix<T, 4, 4>;
/// A 4x4 matrix with [`f32`] elements.
pub type Mat4f = Mat4<f32>;
/// A 4x4 matrix with [`f64`] elements.
pub type Mat4d = Mat4<f64>;

/// A column-major matrix with `R` rows and `C` columns, and element type `T`.
///
/// # Construction
///
/// There are several ways to create a [`Matrix`]:
///
/// - [`Matrix::from_rows`] and [`Matrix::from_columns`] allow filling a matrix with raw elements,
///   as well as creating them from an array of row or column vectors.
/// - [`Matrix::from_fn`] will create each element by invoking a closure with its row and column.
/// - For square matrices (where `R` equals `C`), [`Matrix::from_diagonal`] can be used to create a
///   matrix with a specified diagonal and zero outside of its diagonal.
///
/// Additionally, some associated constants for commonly used matrices are defined:
///
/// - [`Matrix::ZERO`] is a matrix with every element set to 0.
/// - [`Matrix::IDENTITY`] is a matrix with 1 on its diagonal and 0 everywhere else.
///
/// # Element Access
///
/// [`Matrix`] implements the [`Index`] and [`IndexMut`] traits for tuples of `(usize, usize)`. The
/// first element of the tuple is the *row* (Y coordinate), the second is the *column* (X
/// coordinate), matching common mathematical notation. Indices are 0-based.
///
/// ```
/// # use dmath_linalg::*;
/// let mut mat = Matrix::from_rows([
///     [0, 1]
/// ]);
/// mat[(0, 0)] = 4;
/// assert_eq!(mat[(0, 0)], 4);
/// assert_eq!(mat[(0, 1)], 1);
/// ```
///
/// Indexing out of bounds will result in a panic, just like it does for slices. [`Matrix::get`] and
/// [`Matrix::get_mut`] return [`Option`]s instead and can be used for checked indexing.
///
/// # Storage
///
/// Elements are stored column by column without padding. For square matrices,
/// [`Matrix::as_flat`] exposes this storage as a single slice where element `(row, col)` lives at
/// index `col * N + row`, which is the layout every function in [`kernel`] expects. Row, column,
/// block, multiplication, determinant, and inverse operations on square matrices are all
/// implemented in terms of those functions.
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Hash)]
pub struct Matrix<T, const R: usize, const C: usize>([[T; R]; C]);

#[rustfmt::skip]
unsafe impl<T: bytemuck::Zeroable, const R: usize, const C: usize> bytemuck::Zeroable for Matrix<T, R, C> {}
unsafe impl<T: bytemuck::Pod, const R: usize, const C: usize> bytemuck::Pod for Matrix<T, R, C> {}

impl<T, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Creates a [`Matrix`] from an array of row vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let columns = Matrix::from_columns([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, columns);
    /// ```
    pub fn from_rows<U: Into<Vector<T, C>>>(rows: [U; R]) -> Self
    where
        T: Copy,
    {
        Matrix::from_columns(rows).transpose()
    }

    /// Creates a [`Matrix`] from an array of column vectors.
    pub fn from_columns<U: Into<Vector<T, R>>>(columns: [U; C]) -> Self {
        Self(columns.map(|col| col.into().into_array()))
    }

    /// Creates a [`Matrix`] by invoking a closure with the position (row and column) of each element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let mat = Matrix::from_fn(|row, col| row * 10 + col);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self(array::from_fn(|col| array::from_fn(|row| cb(row, col))))
    }

    /// Applies a closure to each element, returning a new matrix.
    pub fn map<F, U>(self, mut f: F) -> Matrix<U, R, C>
    where
        F: FnMut(T) -> U,
    {
        Matrix(self.0.map(|column| column.map(&mut f)))
    }

    /// Swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]).transpose();
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// ```
    pub fn transpose(self) -> Matrix<T, C, R>
    where
        T: Copy,
    {
        Matrix::from_fn(|row, col| self[(col, row)])
    }

    /// Returns a reference to the element at `(row, col)`, or [`None`] if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.get(0, 0), Some(&0));
    /// assert_eq!(mat.get(1, 0), Some(&3));
    /// assert_eq!(mat.get(2, 0), None);
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.0.get(col).and_then(|col| col.get(row))
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.0.get_mut(col).and_then(|col| col.get_mut(row))
    }

    /// Returns the columns of this matrix as an array of column arrays.
    #[inline]
    pub fn into_columns(self) -> [[T; R]; C] {
        self.0
    }

    /// Returns a reference to the columns of this matrix.
    #[inline]
    pub fn columns(&self) -> &[[T; R]; C] {
        &self.0
    }
}

impl<T: Zero + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// A matrix with every element set to 0.
    pub const ZERO: Self = Self([[T::ZERO; R]; C]);
}

impl<T: Zero + One + Copy, const R: usize, const C: usize> Matrix<T, R, C> {
    /// The identity matrix.
    ///
    /// The matrix has the value 1 on its diagonal and 0 everywhere else.
    ///
    /// Multiplying any vector with this matrix returns the vector unchanged.
    pub const IDENTITY: Self = {
        let mut cols = [[T::ZERO; R]; C];
        let mut i = 0;
        while i < R && i < C {
            cols[i][i] = T::ONE;
            i += 1;
        }
        Self(cols)
    };
}

impl<T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for Matrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a, T: fmt::Debug, const R: usize, const C: usize>(
            &'a Matrix<T, R, C>,
            usize,
        );
        impl<'a, T: fmt::Debug, const R: usize, const C: usize> fmt::Debug for FormatRow<'a, T, R, C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for col in 0..C {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", self.0[(self.1, col)])?;
                }
                write!(f, "]")?;
                Ok(())
            }
        }

        let mut list = f.debug_list();
        for row in 0..R {
            list.entry(&FormatRow(self, row));
        }
        list.finish()
    }
}

/// Operations on square matrices, implemented with the [`kernel`] functions.
impl<T, const N: usize> Matrix<T, N, N> {
    /// Returns the elements of this matrix as a flat, column-major slice of length `N * N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(mat.as_flat(), &[1, 3, 2, 4]);
    /// ```
    #[inline]
    pub fn as_flat(&self) -> &[T] {
        self.0.as_flattened()
    }

    /// Returns the elements of this matrix as a mutable, flat, column-major slice.
    #[inline]
    pub fn as_flat_mut(&mut self) -> &mut [T] {
        self.0.as_flattened_mut()
    }

    /// Returns a [`Vector`] holding the diagonal elements of this square matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(mat.into_diagonal(), [1, 4]);
    /// ```
    pub fn into_diagonal(self) -> Vector<T, N>
    where
        T: Copy,
    {
        Vector::from_fn(|i| self[(i, i)])
    }

    /// Creates a square matrix from its diagonal.
    ///
    /// Elements outside the diagonal will be initialized with zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let diag = Matrix::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag, Matrix::from_rows([
    ///     [1, 0, 0],
    ///     [0, 2, 0],
    ///     [0, 0, 3],
    /// ]));
    /// ```
    pub fn from_diagonal<D: Into<Vector<T, N>>>(diag: D) -> Self
    where
        T: Zero + Copy,
    {
        let diag = diag.into();
        let mut this = Self::ZERO;
        for i in 0..N {
            this[(i, i)] = diag[i];
        }
        this
    }

    /// Returns row `row` of the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `row` is not less than `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [1, 2],
    ///     [3, 4],
    /// ]);
    /// assert_eq!(mat.row(1), vec2(3, 4));
    /// assert_eq!(mat.col(1), vec2(2, 4));
    /// ```
    pub fn row(&self, row: usize) -> Vector<T, N>
    where
        T: Zero + Copy,
    {
        let mut out = Vector::<T, N>::ZERO;
        kernel::get_row(out.as_mut_slice(), self.as_flat(), row, N);
        out
    }

    /// Returns column `col` of the matrix.
    ///
    /// # Panics
    ///
    /// Panics if `col` is not less than `N`.
    pub fn col(&self, col: usize) -> Vector<T, N>
    where
        T: Zero + Copy,
    {
        let mut out = Vector::<T, N>::ZERO;
        kernel::get_col(out.as_mut_slice(), self.as_flat(), col, N);
        out
    }

    /// Overwrites row `row` with the elements of `v`.
    pub fn set_row(&mut self, row: usize, v: Vector<T, N>)
    where
        T: Copy,
    {
        kernel::set_row(self.as_flat_mut(), v.as_slice(), row, N);
    }

    /// Overwrites column `col` with the elements of `v`.
    pub fn set_col(&mut self, col: usize, v: Vector<T, N>)
    where
        T: Copy,
    {
        kernel::set_col(self.as_flat_mut(), v.as_slice(), col, N);
    }

    /// Sets every element of row `row` to `value`.
    pub fn set_row_splat(&mut self, row: usize, value: T)
    where
        T: Copy,
    {
        kernel::set_row_splat(self.as_flat_mut(), value, row, N);
    }

    /// Sets every element of column `col` to `value`.
    pub fn set_col_splat(&mut self, col: usize, value: T)
    where
        T: Copy,
    {
        kernel::set_col_splat(self.as_flat_mut(), value, col, N);
    }

    /// Returns the `B`x`B` sub-matrix whose upper left element is at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the block does not fit into the matrix, ie. if `row + B` or `col + B` exceed `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let mat: Mat4<usize> = Matrix::from_fn(|row, col| row * 10 + col);
    /// let block: Mat2<usize> = mat.block(1, 2);
    /// assert_eq!(block, Matrix::from_rows([
    ///     [12, 13],
    ///     [22, 23],
    /// ]));
    /// ```
    pub fn block<const B: usize>(&self, row: usize, col: usize) -> Matrix<T, B, B>
    where
        T: Zero + Copy,
    {
        let mut out = Matrix::<T, B, B>::ZERO;
        kernel::get_block(out.as_flat_mut(), self.as_flat(), row, col, B, N);
        out
    }

    /// Overwrites the `B`x`B` sub-matrix whose upper left element is at `(row, col)` with `block`.
    ///
    /// # Panics
    ///
    /// Panics if the block does not fit into the matrix.
    pub fn set_block<const B: usize>(&mut self, block: &Matrix<T, B, B>, row: usize, col: usize)
    where
        T: Copy,
    {
        kernel::set_block(self.as_flat_mut(), block.as_flat(), row, col, B, N);
    }

    /// Returns the upper left `B`x`B` sub-matrix.
    ///
    /// This is commonly used to extract the rotation part of a 4x4 transformation matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let rot: Mat3d = Mat4d::IDENTITY.upper_left();
    /// assert_eq!(rot, Mat3d::IDENTITY);
    /// ```
    pub fn upper_left<const B: usize>(&self) -> Matrix<T, B, B>
    where
        T: Zero + Copy,
    {
        self.block(0, 0)
    }

    /// Overwrites the upper left `B`x`B` sub-matrix with `block`.
    pub fn set_upper_left<const B: usize>(&mut self, block: &Matrix<T, B, B>)
    where
        T: Copy,
    {
        self.set_block(block, 0, 0);
    }

    /// Returns the *trace* of the matrix (the sum of all elements on the diagonal).
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let diag = Matrix::from_diagonal([1, 2, 3]);
    /// assert_eq!(diag.trace(), 1 + 2 + 3);
    ///
    /// assert_eq!(Mat3d::IDENTITY.trace(), 3.0);
    /// ```
    pub fn trace(&self) -> T
    where
        T: Number,
    {
        kernel::trace(self.as_flat(), N)
    }

    /// Transposes this matrix in place.
    pub fn transpose_in_place(&mut self) {
        kernel::transpose_in_place(self.as_flat_mut(), N);
    }

    /// Converts every element into the element type `U`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let wide: Mat2d = Mat2f::IDENTITY.cast();
    /// assert_eq!(wide, Mat2d::IDENTITY);
    /// ```
    pub fn cast<U>(&self) -> Matrix<U, N, N>
    where
        T: Copy + Into<U>,
        U: Zero + Copy,
    {
        let mut out = Matrix::<U, N, N>::ZERO;
        kernel::cast_into(out.as_flat_mut(), self.as_flat(), N);
        out
    }
}

impl<T: Number, const N: usize> Matrix<T, N, N> {
    /// Returns the [determinant] of the matrix.
    ///
    /// Only available for 2x2, 3x3, and 4x4 matrices; other sizes fail to compile.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [4.0, 7.0],
    ///     [2.0, 6.0],
    /// ]);
    /// assert_eq!(mat.determinant(), 10.0);
    /// ```
    ///
    /// [determinant]: https://en.wikipedia.org/wiki/Determinant
    pub fn determinant(&self) -> T {
        const { assert!(N >= 2 && N <= 4, "determinant requires a 2x2, 3x3, or 4x4 matrix") };
        kernel::det(self.as_flat(), N)
    }

    /// Returns the inverse of this matrix, or an error if it is not invertible.
    ///
    /// Only available for 2x2, 3x3, and 4x4 matrices; other sizes fail to compile.
    ///
    /// # Errors
    ///
    /// Returns [`SingularMatrixError`] if the [`determinant()`] of `self` is zero, or if it or the
    /// inverse's elements are out of the representable range (see [`kernel::inv`]).
    ///
    /// [`determinant()`]: Self::determinant
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(Mat3d::IDENTITY.try_invert(), Ok(Mat3d::IDENTITY));
    /// assert!(Mat3d::ZERO.try_invert().is_err());
    /// ```
    pub fn try_invert(&self) -> Result<Self, SingularMatrixError> {
        const { assert!(N >= 2 && N <= 4, "inverse requires a 2x2, 3x3, or 4x4 matrix") };
        let mut out = Self::ZERO;
        match kernel::inv(out.as_flat_mut(), self.as_flat(), N) {
            Ok(()) => Ok(out),
            Err(e) => {
                log::trace!("{}x{} matrix is not invertible", N, N);
                Err(e)
            }
        }
    }

    /// Inverts this matrix.
    ///
    /// # Panics
    ///
    /// This method will panic if `self` is not invertible (ie. if its [`determinant()`] is zero).
    /// Use [`Matrix::try_invert`] to handle that case.
    ///
    /// [`determinant()`]: Self::determinant
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(Mat2::<i32>::IDENTITY.invert(), Mat2::<i32>::IDENTITY);
    /// assert_eq!(Mat4d::IDENTITY.invert(), Mat4d::IDENTITY);
    /// ```
    pub fn invert(&self) -> Self {
        match self.try_invert() {
            Ok(inv) => inv,
            Err(_) => panic!("attempt to invert a non-invertible matrix"),
        }
    }
}

impl<T, const R: usize, const C: usize> Default for Matrix<T, R, C>
where
    T: Default,
{
    fn default() -> Self {
        Self::from_fn(|_, _| T::default())
    }
}
