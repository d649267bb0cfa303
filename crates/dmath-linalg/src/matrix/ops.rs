use std::ops::{Add, Index, IndexMut, Mul, MulAssign, Neg, Sub};

use crate::{kernel, traits::Number, Matrix, Vector};

impl<T, const R: usize, const C: usize> Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.0[col][row]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<T, R, C> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.0[col][row]
    }
}

// More general `PartialEq` impl than what the derive generates.
impl<T, U, const R: usize, const C: usize> PartialEq<Matrix<U, R, C>> for Matrix<T, R, C>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Matrix<U, R, C>) -> bool {
        self.0.eq(&other.0)
    }
}

impl<T, const R: usize, const C: usize> Eq for Matrix<T, R, C> where T: Eq {}

/// Matrix * Column Vector.
impl<T, const N: usize> Mul<Vector<T, N>> for Matrix<T, N, N>
where
    T: Number,
{
    type Output = Vector<T, N>;

    fn mul(self, rhs: Vector<T, N>) -> Self::Output {
        let mut out = Vector::<T, N>::ZERO;
        kernel::mul_vec(out.as_mut_slice(), self.as_flat(), rhs.as_slice(), N);
        out
    }
}

/// Row Vector * Matrix.
impl<T, const N: usize> Mul<Matrix<T, N, N>> for Vector<T, N>
where
    T: Number,
{
    type Output = Vector<T, N>;

    fn mul(self, rhs: Matrix<T, N, N>) -> Self::Output {
        let mut out = Vector::<T, N>::ZERO;
        kernel::vec_mul_mat(out.as_mut_slice(), self.as_slice(), rhs.as_flat(), N);
        out
    }
}

/// Matrix * Matrix.
impl<T, const N: usize> Mul<Matrix<T, N, N>> for Matrix<T, N, N>
where
    T: Number,
{
    type Output = Matrix<T, N, N>;

    fn mul(self, rhs: Matrix<T, N, N>) -> Self::Output {
        let mut out = Matrix::<T, N, N>::ZERO;
        kernel::mul_mat(out.as_flat_mut(), self.as_flat(), rhs.as_flat(), N);
        out
    }
}

/// Matrix *= Matrix.
impl<T, const N: usize> MulAssign<Matrix<T, N, N>> for Matrix<T, N, N>
where
    T: Number,
{
    fn mul_assign(&mut self, rhs: Matrix<T, N, N>) {
        kernel::mul_mat_assign(self.as_flat_mut(), rhs.as_flat(), N);
    }
}

/// Matrix * Scalar.
impl<T, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C>
where
    T: Number,
{
    type Output = Matrix<T, R, C>;

    fn mul(self, rhs: T) -> Self::Output {
        self.map(|elem| elem * rhs)
    }
}

/// Element-wise addition.
impl<T, const R: usize, const C: usize> Add for Matrix<T, R, C>
where
    T: Number,
{
    type Output = Matrix<T, R, C>;

    fn add(self, rhs: Self) -> Self::Output {
        Matrix::from_fn(|row, col| self[(row, col)] + rhs[(row, col)])
    }
}

/// Element-wise subtraction.
impl<T, const R: usize, const C: usize> Sub for Matrix<T, R, C>
where
    T: Number,
{
    type Output = Matrix<T, R, C>;

    fn sub(self, rhs: Self) -> Self::Output {
        Matrix::from_fn(|row, col| self[(row, col)] - rhs[(row, col)])
    }
}

/// Element-wise negation.
impl<T, const R: usize, const C: usize> Neg for Matrix<T, R, C>
where
    T: Number,
{
    type Output = Matrix<T, R, C>;

    fn neg(self) -> Self::Output {
        self.map(T::neg)
    }
}
