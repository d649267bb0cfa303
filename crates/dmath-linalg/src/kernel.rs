//! Size-generic dense kernels operating on flat, column-major buffers.
//!
//! Every function in this module takes the matrix dimension `n` explicitly and operates on slices
//! holding exactly `n` (vector) or `n * n` (matrix) elements. Element `(row, col)` of a matrix is
//! stored at index `col * n + row`.
//!
//! The typed [`Matrix`] and [`Vector`] APIs forward to these functions; they are public so that
//! callers holding raw buffers (eg. from a GPU mapping, or a [`bytemuck`] cast) can use them
//! directly.
//!
//! Functions that write into `dst` while reading from another argument rely on the borrow checker
//! to guarantee that the buffers are disjoint. The `*_assign` and `*_in_place` variants cover the
//! cases where the output replaces one of the inputs; they buffer through a fixed-size temporary
//! of [`MAX_SIZE`]` * `[`MAX_SIZE`] elements.
//!
//! # Panics
//!
//! All functions panic if a buffer length does not match `n`, or if a row, column, or block index
//! is out of range. [`det`] and [`inv`] additionally panic unless `n` is 2, 3 or 4.
//!
//! [`Matrix`]: crate::Matrix
//! [`Vector`]: crate::Vector

use std::ops;

use crate::{Abs, Number, One, SingularMatrixError, Zero};

/// The largest dimension supported by the in-place kernels.
pub const MAX_SIZE: usize = 4;

#[track_caller]
fn check_vec<T>(v: &[T], n: usize) {
    assert_eq!(v.len(), n, "vector buffer has wrong length for n={n}");
}

#[track_caller]
fn check_mat<T>(m: &[T], n: usize) {
    assert_eq!(m.len(), n * n, "matrix buffer has wrong length for n={n}");
}

#[track_caller]
fn check_tmp(n: usize) {
    assert!(
        n <= MAX_SIZE,
        "in-place kernels support n <= {MAX_SIZE}, got n={n}"
    );
}

#[track_caller]
fn check_det_size(n: usize) {
    assert!(
        (2..=4).contains(&n),
        "determinant and inverse are only implemented for n in 2..=4, got n={n}"
    );
}

/// `x - x` is zero for every finite value, and NaN for infinities and NaN.
fn is_finite<T: Number>(x: T) -> bool {
    x - x == T::ZERO
}

/// `dst = I` (the identity matrix).
pub fn eye<T: Zero + One>(dst: &mut [T], n: usize) {
    check_mat(dst, n);
    for c in 0..n {
        for r in 0..n {
            dst[c * n + r] = if r == c { T::ONE } else { T::ZERO };
        }
    }
}

/// `dst = m[row][:]`
pub fn get_row<T: Copy>(dst: &mut [T], m: &[T], row: usize, n: usize) {
    check_vec(dst, n);
    check_mat(m, n);
    assert!(row < n, "row index {row} out of range for n={n}");
    for c in 0..n {
        dst[c] = m[c * n + row];
    }
}

/// `dst = m[:][col]`
pub fn get_col<T: Copy>(dst: &mut [T], m: &[T], col: usize, n: usize) {
    check_vec(dst, n);
    check_mat(m, n);
    assert!(col < n, "column index {col} out of range for n={n}");
    dst.copy_from_slice(&m[col * n..(col + 1) * n]);
}

/// `dst[row][:] = v`
pub fn set_row<T: Copy>(dst: &mut [T], v: &[T], row: usize, n: usize) {
    check_mat(dst, n);
    check_vec(v, n);
    assert!(row < n, "row index {row} out of range for n={n}");
    for c in 0..n {
        dst[c * n + row] = v[c];
    }
}

/// `dst[:][col] = v`
pub fn set_col<T: Copy>(dst: &mut [T], v: &[T], col: usize, n: usize) {
    check_mat(dst, n);
    check_vec(v, n);
    assert!(col < n, "column index {col} out of range for n={n}");
    dst[col * n..(col + 1) * n].copy_from_slice(v);
}

/// `dst[row][:] = s`
pub fn set_row_splat<T: Copy>(dst: &mut [T], s: T, row: usize, n: usize) {
    check_mat(dst, n);
    assert!(row < n, "row index {row} out of range for n={n}");
    for c in 0..n {
        dst[c * n + row] = s;
    }
}

/// `dst[:][col] = s`
pub fn set_col_splat<T: Copy>(dst: &mut [T], s: T, col: usize, n: usize) {
    check_mat(dst, n);
    assert!(col < n, "column index {col} out of range for n={n}");
    dst[col * n..(col + 1) * n].fill(s);
}

/// Returns the sum of the diagonal, from the upper left to the lower right.
pub fn trace<T: Number>(m: &[T], n: usize) -> T {
    check_mat(m, n);
    (0..n).fold(T::ZERO, |acc, i| acc + m[i * n + i])
}

/// `dst = m^T`
pub fn transpose<T: Copy>(dst: &mut [T], m: &[T], n: usize) {
    check_mat(dst, n);
    check_mat(m, n);
    for c in 0..n {
        for r in 0..n {
            dst[c * n + r] = m[r * n + c];
        }
    }
}

/// `m = m^T`
pub fn transpose_in_place<T>(m: &mut [T], n: usize) {
    check_mat(m, n);
    for c in 0..n {
        for r in c + 1..n {
            m.swap(c * n + r, r * n + c);
        }
    }
}

/// Converts every element of the `n * n` matrix `src` into `dst`, keeping its position.
///
/// This is typically used to widen an [`f32`] matrix into an [`f64`] one.
pub fn cast_into<T, U>(dst: &mut [U], src: &[T], n: usize)
where
    T: Copy + Into<U>,
{
    check_mat(dst, n);
    check_mat(src, n);
    for (dst, src) in dst.iter_mut().zip(src) {
        *dst = (*src).into();
    }
}

/// `dst = a @ b`
pub fn mul_mat<T: Number>(dst: &mut [T], a: &[T], b: &[T], n: usize) {
    check_mat(dst, n);
    check_mat(a, n);
    check_mat(b, n);
    for c in 0..n {
        for r in 0..n {
            dst[c * n + r] = (0..n).fold(T::ZERO, |acc, k| acc + a[k * n + r] * b[c * n + k]);
        }
    }
}

/// `a = a @ b`
pub fn mul_mat_assign<T: Number>(a: &mut [T], b: &[T], n: usize) {
    check_tmp(n);
    let mut tmp = [T::ZERO; MAX_SIZE * MAX_SIZE];
    mul_mat(&mut tmp[..n * n], a, b, n);
    a.copy_from_slice(&tmp[..n * n]);
}

/// `dst = a @ v` (matrix times column vector)
pub fn mul_vec<T: Number>(dst: &mut [T], a: &[T], v: &[T], n: usize) {
    check_vec(dst, n);
    check_mat(a, n);
    check_vec(v, n);
    for r in 0..n {
        dst[r] = (0..n).fold(T::ZERO, |acc, c| acc + a[c * n + r] * v[c]);
    }
}

/// `v = a @ v`
pub fn mul_vec_assign<T: Number>(v: &mut [T], a: &[T], n: usize) {
    check_tmp(n);
    let mut tmp = [T::ZERO; MAX_SIZE];
    mul_vec(&mut tmp[..n], a, v, n);
    v.copy_from_slice(&tmp[..n]);
}

/// `dst = v @ b` (row vector times matrix)
pub fn vec_mul_mat<T: Number>(dst: &mut [T], v: &[T], b: &[T], n: usize) {
    check_vec(dst, n);
    check_vec(v, n);
    check_mat(b, n);
    for c in 0..n {
        dst[c] = (0..n).fold(T::ZERO, |acc, r| acc + b[c * n + r] * v[r]);
    }
}

/// `v = v @ b`
pub fn vec_mul_mat_assign<T: Number>(v: &mut [T], b: &[T], n: usize) {
    check_tmp(n);
    let mut tmp = [T::ZERO; MAX_SIZE];
    vec_mul_mat(&mut tmp[..n], v, b, n);
    v.copy_from_slice(&tmp[..n]);
}

#[track_caller]
fn zip_with<T: Copy>(dst: &mut [T], a: &[T], b: &[T], n: usize, f: impl Fn(T, T) -> T) {
    check_vec(dst, n);
    check_vec(a, n);
    check_vec(b, n);
    for i in 0..n {
        dst[i] = f(a[i], b[i]);
    }
}

/// `dst = a + b`
pub fn add<T: Copy + ops::Add<Output = T>>(dst: &mut [T], a: &[T], b: &[T], n: usize) {
    zip_with(dst, a, b, n, |a, b| a + b);
}

/// `dst = a - b`
pub fn sub<T: Copy + ops::Sub<Output = T>>(dst: &mut [T], a: &[T], b: &[T], n: usize) {
    zip_with(dst, a, b, n, |a, b| a - b);
}

/// `dst[i] = a[i] * b[i]`
pub fn mul<T: Copy + ops::Mul<Output = T>>(dst: &mut [T], a: &[T], b: &[T], n: usize) {
    zip_with(dst, a, b, n, |a, b| a * b);
}

/// `dst[i] = a[i] / b[i]`
pub fn div<T: Copy + ops::Div<Output = T>>(dst: &mut [T], a: &[T], b: &[T], n: usize) {
    zip_with(dst, a, b, n, |a, b| a / b);
}

/// `dst = a * s`
pub fn mul_scalar<T: Copy + ops::Mul<Output = T>>(dst: &mut [T], a: &[T], s: T, n: usize) {
    check_vec(dst, n);
    check_vec(a, n);
    for i in 0..n {
        dst[i] = a[i] * s;
    }
}

/// `dst = a / s`
pub fn div_scalar<T: Copy + ops::Div<Output = T>>(dst: &mut [T], a: &[T], s: T, n: usize) {
    check_vec(dst, n);
    check_vec(a, n);
    for i in 0..n {
        dst[i] = a[i] / s;
    }
}

/// `dst = -a`
pub fn neg<T: Copy + ops::Neg<Output = T>>(dst: &mut [T], a: &[T], n: usize) {
    check_vec(dst, n);
    check_vec(a, n);
    for i in 0..n {
        dst[i] = -a[i];
    }
}

/// Returns `a . b`.
pub fn dot<T: Number>(a: &[T], b: &[T], n: usize) -> T {
    check_vec(a, n);
    check_vec(b, n);
    (0..n).fold(T::ZERO, |acc, i| acc + a[i] * b[i])
}

pub fn sum<T: Number>(a: &[T], n: usize) -> T {
    check_vec(a, n);
    a.iter().fold(T::ZERO, |acc, &x| acc + x)
}

/// Returns the sum of the absolute values of `a` (the L1 norm).
pub fn norm_1<T: Number + Abs>(a: &[T], n: usize) -> T {
    check_vec(a, n);
    a.iter().fold(T::ZERO, |acc, &x| acc + x.abs())
}

/// Returns the largest absolute value in `a` (the maximum norm), or 0 if every element is NaN.
pub fn norm_inf<T: Number + Abs>(a: &[T], n: usize) -> T {
    check_vec(a, n);
    a.iter().fold(T::ZERO, |acc, &x| if x.abs() > acc { x.abs() } else { acc })
}

/// Returns the index of the first smallest element of `a`.
///
/// NaN elements never compare smaller, so they are only reported when `a[0]` is NaN.
pub fn min_index<T: PartialOrd>(a: &[T], n: usize) -> usize {
    check_vec(a, n);
    (1..n).fold(0, |best, i| if a[i] < a[best] { i } else { best })
}

/// Returns the index of the first largest element of `a`.
pub fn max_index<T: PartialOrd>(a: &[T], n: usize) -> usize {
    check_vec(a, n);
    (1..n).fold(0, |best, i| if a[i] > a[best] { i } else { best })
}

/// Returns whether every `|a[i] - b[i]|` is at most `eps`.
///
/// A NaN in either input makes the vectors compare unequal.
pub fn equals_eps<T: Number + Abs>(a: &[T], b: &[T], eps: T, n: usize) -> bool {
    check_vec(a, n);
    check_vec(b, n);
    (0..n).all(|i| (a[i] - b[i]).abs() <= eps)
}

/// Like [`equals_eps`], with a separate tolerance per element.
pub fn equals_eps_vec<T: Number + Abs>(a: &[T], b: &[T], eps: &[T], n: usize) -> bool {
    check_vec(a, n);
    check_vec(b, n);
    check_vec(eps, n);
    (0..n).all(|i| (a[i] - b[i]).abs() <= eps[i])
}

/// Returns the [determinant] of the `n * n` matrix `m`.
///
/// Uses the closed-form cofactor expansions, so only `n` in `2..=4` is supported.
///
/// [determinant]: https://en.wikipedia.org/wiki/Determinant
pub fn det<T: Number>(m: &[T], n: usize) -> T {
    check_det_size(n);
    check_mat(m, n);

    // Variables are named after the column-major element order: `a, b, c` is the first column.
    match *m {
        [a, b, c, d] => a * d - c * b,
        [a, b, c, d, e, f, g, h, i] => {
            a * (e * i - h * f) - d * (b * i - c * h) + g * (b * f - c * e)
        }
        [a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p] => {
            let t0 = k * p - o * l;
            let t1 = j * p - n * l;
            let t2 = j * o - n * k;
            let t3 = i * p - m * l;
            let t4 = i * o - m * k;
            let t5 = i * n - m * j;

            a * (f * t0 - g * t1 + h * t2) - b * (e * t0 - g * t3 + h * t4)
                + c * (e * t1 - f * t3 + h * t5)
                - d * (e * t2 - f * t4 + g * t5)
        }
        _ => unreachable!(),
    }
}

/// Writes the adjugate of `m` into `dst`, and returns the determinant of `m`.
fn adjugate<T: Number>(dst: &mut [T], m: &[T]) -> T {
    match *m {
        [a, b, c, d] => {
            dst.copy_from_slice(&[d, -b, -c, a]);
            a * d - b * c
        }
        [a, b, c, d, e, f, g, h, i] => {
            #[rustfmt::skip]
            dst.copy_from_slice(&[
                e * i - f * h,     -(b * i - h * c),  b * f - e * c,
                -(d * i - g * f),  a * i - c * g,     -(a * f - d * c),
                d * h - g * e,     -(a * h - g * b),  a * e - b * d,
            ]);
            a * dst[0] + b * dst[3] + c * dst[6]
        }
        [a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p] => {
            let mut t = [
                k * p - o * l,
                j * p - n * l,
                j * o - n * k,
                i * p - m * l,
                i * o - m * k,
                i * n - m * j,
            ];

            dst[0] = f * t[0] - g * t[1] + h * t[2];
            dst[4] = -(e * t[0] - g * t[3] + h * t[4]);
            dst[8] = e * t[1] - f * t[3] + h * t[5];
            dst[12] = -(e * t[2] - f * t[4] + g * t[5]);

            dst[1] = -(b * t[0] - c * t[1] + d * t[2]);
            dst[5] = a * t[0] - c * t[3] + d * t[4];
            dst[9] = -(a * t[1] - b * t[3] + d * t[5]);
            dst[13] = a * t[2] - b * t[4] + c * t[5];

            t = [
                g * p - o * h,
                f * p - n * h,
                f * o - n * g,
                e * p - m * h,
                e * o - m * g,
                e * n - m * f,
            ];

            dst[2] = b * t[0] - c * t[1] + d * t[2];
            dst[6] = -(a * t[0] - c * t[3] + d * t[4]);
            dst[10] = a * t[1] - b * t[3] + d * t[5];
            dst[14] = -(a * t[2] - b * t[4] + c * t[5]);

            t = [
                g * l - k * h,
                f * l - j * h,
                f * k - j * g,
                e * l - i * h,
                e * k - i * g,
                e * j - i * f,
            ];

            dst[3] = -(b * t[0] - c * t[1] + d * t[2]);
            dst[7] = a * t[0] - c * t[3] + d * t[4];
            dst[11] = -(a * t[1] - b * t[3] + d * t[5]);
            dst[15] = a * t[2] - b * t[4] + c * t[5];

            a * dst[0] + b * dst[4] + c * dst[8] + d * dst[12]
        }
        _ => unreachable!(),
    }
}

/// `dst = m^-1`
///
/// Computes the inverse as the adjugate divided by the determinant, for `n` in `2..=4`.
///
/// # Errors
///
/// Returns [`SingularMatrixError`] if the determinant of `m` is zero or not finite, or if any
/// element of the inverse would not be finite. This includes matrices whose determinant
/// overflows or underflows (eg. a diagonal of `1e200` or `1e-200` at 2x2). `dst` is left
/// unmodified in that case.
pub fn inv<T: Number>(dst: &mut [T], m: &[T], n: usize) -> Result<(), SingularMatrixError> {
    check_det_size(n);
    check_mat(dst, n);
    check_mat(m, n);

    let mut adj = [T::ZERO; MAX_SIZE * MAX_SIZE];
    let adj = &mut adj[..n * n];
    let det = adjugate(adj, m);
    if det == T::ZERO || !is_finite(det) || !is_finite(T::ONE / det) {
        return Err(SingularMatrixError);
    }

    for elem in adj.iter_mut() {
        *elem = *elem / det;
    }
    if !adj.iter().all(|&elem| is_finite(elem)) {
        return Err(SingularMatrixError);
    }

    dst.copy_from_slice(adj);
    Ok(())
}

/// `m = m^-1`
///
/// # Errors
///
/// Returns [`SingularMatrixError`] if `m` is not invertible, leaving `m` unmodified.
pub fn inv_in_place<T: Number>(m: &mut [T], n: usize) -> Result<(), SingularMatrixError> {
    check_det_size(n);
    let mut tmp = [T::ZERO; MAX_SIZE * MAX_SIZE];
    inv(&mut tmp[..n * n], m, n)?;
    m.copy_from_slice(&tmp[..n * n]);
    Ok(())
}

#[track_caller]
fn check_block(row: usize, col: usize, block_n: usize, n: usize) {
    let fits = |start: usize| start.checked_add(block_n).is_some_and(|end| end <= n);
    assert!(
        fits(row) && fits(col),
        "{block_n}x{block_n} block at ({row}, {col}) does not fit into a {n}x{n} matrix"
    );
}

/// `dst_block = m[row..row + block_n][col..col + block_n]`
pub fn get_block<T: Copy>(
    dst_block: &mut [T],
    m: &[T],
    row: usize,
    col: usize,
    block_n: usize,
    n: usize,
) {
    check_mat(dst_block, block_n);
    check_mat(m, n);
    check_block(row, col, block_n, n);
    for c in 0..block_n {
        let src = (col + c) * n + row;
        dst_block[c * block_n..(c + 1) * block_n].copy_from_slice(&m[src..src + block_n]);
    }
}

/// `dst[row..row + block_n][col..col + block_n] = block`
pub fn set_block<T: Copy>(
    dst: &mut [T],
    block: &[T],
    row: usize,
    col: usize,
    block_n: usize,
    n: usize,
) {
    check_mat(dst, n);
    check_mat(block, block_n);
    check_block(row, col, block_n, n);
    for c in 0..block_n {
        let dst_start = (col + c) * n + row;
        dst[dst_start..dst_start + block_n].copy_from_slice(&block[c * block_n..(c + 1) * block_n]);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn eye_n(n: usize) -> Vec<f64> {
        let mut m = vec![0.0; n * n];
        eye(&mut m, n);
        m
    }

    /// Deterministic, well-conditioned test matrix (diagonally dominant).
    fn test_mat(n: usize, seed: u64) -> Vec<f64> {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut m = (0..n * n).map(|_| rng.f64() * 2.0 - 1.0).collect::<Vec<_>>();
        for i in 0..n {
            m[i * n + i] += n as f64;
        }
        m
    }

    #[test]
    fn eye_and_trace() {
        for n in 1..=4 {
            let m = eye_n(n);
            assert_eq!(trace(&m, n), n as f64);
            for c in 0..n {
                for r in 0..n {
                    assert_eq!(m[c * n + r], if r == c { 1.0 } else { 0.0 });
                }
            }
        }
    }

    #[test]
    fn row_col_roundtrip() {
        let n = 3;
        let mut m = test_mat(n, 1);
        let v = [7.0, 8.0, 9.0];
        let mut out = [0.0; 3];
        for i in 0..n {
            set_row(&mut m, &v, i, n);
            get_row(&mut out, &m, i, n);
            assert_eq!(out, v);

            set_col(&mut m, &v, i, n);
            get_col(&mut out, &m, i, n);
            assert_eq!(out, v);
        }
    }

    #[test]
    fn row_col_layout() {
        // column-major: columns are contiguous
        let m = [1.0, 2.0, 3.0, 4.0];
        let mut v = [0.0; 2];
        get_row(&mut v, &m, 0, 2);
        assert_eq!(v, [1.0, 3.0]);
        get_col(&mut v, &m, 1, 2);
        assert_eq!(v, [3.0, 4.0]);
    }

    #[test]
    fn splat() {
        let mut m = [0.0; 9];
        set_row_splat(&mut m, 5.0, 1, 3);
        assert_eq!(m, [0.0, 5.0, 0.0, 0.0, 5.0, 0.0, 0.0, 5.0, 0.0]);
        set_col_splat(&mut m, 2.0, 2, 3);
        assert_eq!(m, [0.0, 5.0, 0.0, 0.0, 5.0, 0.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "row index 2 out of range")]
    fn row_out_of_range() {
        let mut v = [0.0; 2];
        get_row(&mut v, &[0.0; 4], 2, 2);
    }

    #[test]
    fn transpose_involution() {
        for n in 1..=4 {
            let m = test_mat(n, n as u64);
            let mut t = vec![0.0; n * n];
            transpose(&mut t, &m, n);
            let mut tt = t.clone();
            transpose_in_place(&mut tt, n);
            assert_eq!(tt, m);

            let mut back = vec![0.0; n * n];
            transpose(&mut back, &t, n);
            assert_eq!(back, m);
        }
    }

    #[test]
    fn identity_laws() {
        for n in 2..=4 {
            let m = test_mat(n, 10 + n as u64);
            let id = eye_n(n);
            let mut out = vec![0.0; n * n];
            mul_mat(&mut out, &id, &m, n);
            assert_eq!(out, m);
            mul_mat(&mut out, &m, &id, n);
            assert_eq!(out, m);
        }
    }

    #[test]
    fn mul_mat_assign_matches() {
        let n = 4;
        let a = test_mat(n, 3);
        let b = test_mat(n, 4);
        let mut expected = vec![0.0; n * n];
        mul_mat(&mut expected, &a, &b, n);

        let mut a2 = a.clone();
        mul_mat_assign(&mut a2, &b, n);
        assert_eq!(a2, expected);
    }

    #[test]
    fn mul_vec_forms() {
        // rows [[1, 2], [3, 4]]
        let m = [1.0, 3.0, 2.0, 4.0];
        let mut out = [0.0; 2];
        mul_vec(&mut out, &m, &[1.0, 1.0], 2);
        assert_eq!(out, [3.0, 7.0]);

        vec_mul_mat(&mut out, &[1.0, 1.0], &m, 2);
        assert_eq!(out, [4.0, 6.0]);

        let mut v = [1.0, 0.0];
        mul_vec_assign(&mut v, &m, 2);
        assert_eq!(v, [1.0, 3.0]);

        let mut v = [1.0, 0.0];
        vec_mul_mat_assign(&mut v, &m, 2);
        assert_eq!(v, [1.0, 2.0]);
    }

    #[test]
    fn cast() {
        let src = [1.5f32, 2.0, -3.25, 4.0];
        let mut dst = [0.0f64; 4];
        cast_into(&mut dst, &src, 2);
        assert_eq!(dst, [1.5, 2.0, -3.25, 4.0]);
    }

    #[test]
    fn det_known_values() {
        for n in 2..=4 {
            assert_eq!(det(&eye_n(n), n), 1.0);

            let mut m = test_mat(n, 20 + n as u64);
            set_row_splat(&mut m, 0.0, n - 1, n);
            assert_eq!(det(&m, n), 0.0);

            let mut m = test_mat(n, 30 + n as u64);
            set_col_splat(&mut m, 0.0, 0, n);
            assert_eq!(det(&m, n), 0.0);
        }

        // rows [[-2, -1, 2], [2, 1, 4], [-3, 3, -1]]
        let m = [-2, 2, -3, -1, 1, 3, 2, 4, -1];
        assert_eq!(det(&m, 3), 54);

        // rows [[1, 0, 2, -1], [3, 0, 0, 5], [2, 1, 4, -3], [1, 0, 5, 0]]
        let m = [1, 3, 2, 1, 0, 0, 1, 0, 2, 0, 4, 5, -1, 5, -3, 0];
        assert_eq!(det(&m, 4), 30);
    }

    #[test]
    fn det_matches_transpose() {
        for n in 2..=4 {
            let m = test_mat(n, 40 + n as u64);
            let mut t = vec![0.0; n * n];
            transpose(&mut t, &m, n);
            assert_abs_diff_eq!(det(&m, n), det(&t, n), epsilon = 1e-12);
        }
    }

    #[test]
    #[should_panic(expected = "only implemented for n in 2..=4")]
    fn det_unsupported_size() {
        det(&[0.0; 25], 5);
    }

    #[test]
    fn inverse_2x2() {
        // rows [[4, 7], [2, 6]]
        let m = [4.0, 2.0, 7.0, 6.0];
        assert_eq!(det(&m, 2), 10.0);

        let mut out = [0.0; 4];
        inv(&mut out, &m, 2).unwrap();
        assert_abs_diff_eq!(&out[..], &[0.6, -0.2, -0.7, 0.4][..], epsilon = 1e-12);
    }

    #[test]
    fn inverse_roundtrip() {
        for n in 2..=4 {
            for seed in 0..10 {
                let m = test_mat(n, seed * 7 + n as u64);
                let mut m_inv = vec![0.0; n * n];
                inv(&mut m_inv, &m, n).unwrap();

                let mut prod = vec![0.0; n * n];
                mul_mat(&mut prod, &m, &m_inv, n);
                assert_abs_diff_eq!(&prod[..], &eye_n(n)[..], epsilon = 1e-9);

                let mut in_place = m.clone();
                inv_in_place(&mut in_place, n).unwrap();
                assert_eq!(in_place, m_inv);
            }
        }
    }

    #[test]
    fn inverse_singular() {
        for n in 2..=4 {
            let m = vec![1.0; n * n];
            let mut out = vec![-1.0; n * n];
            assert_eq!(inv(&mut out, &m, n), Err(SingularMatrixError));
            assert!(out.iter().all(|&x| x == -1.0), "output must be untouched");

            let mut in_place = m.clone();
            assert!(inv_in_place(&mut in_place, n).is_err());
            assert_eq!(in_place, m);
        }

        // nonzero (subnormal) determinant whose reciprocal overflows
        let tiny = [1e-160, 0.0, 0.0, 1e-160];
        assert!(inv(&mut [0.0; 4], &tiny, 2).is_err());
    }

    #[test]
    fn inverse_out_of_range_determinant() {
        // det = 1e400 overflows to infinity, and its reciprocal is a finite 0
        let huge = [1e200, 0.0, 0.0, 1e200];
        let mut out = [-1.0; 4];
        assert_eq!(inv(&mut out, &huge, 2), Err(SingularMatrixError));
        assert_eq!(out, [-1.0; 4]);

        let huge3 = [1e120, 0.0, 0.0, 0.0, 1e120, 0.0, 0.0, 0.0, 1e120];
        assert!(inv(&mut [0.0; 9], &huge3, 3).is_err());

        // det = 1e-400 underflows to zero
        let small = [1e-200, 0.0, 0.0, 1e-200];
        assert!(inv(&mut [0.0; 4], &small, 2).is_err());

        let nan = [f64::NAN, 0.0, 0.0, 1.0];
        assert!(inv(&mut [0.0; 4], &nan, 2).is_err());

        // large but representable magnitudes still invert
        let big = [1e100, 0.0, 0.0, 1e100];
        let mut out = [0.0; 4];
        inv(&mut out, &big, 2).unwrap();
        assert_abs_diff_eq!(out[0] * 1e100, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(out[3] * 1e100, 1.0, epsilon = 1e-15);
        assert_eq!((out[1], out[2]), (0.0, 0.0));
    }

    #[test]
    #[should_panic(expected = "does not fit into a 4x4 matrix")]
    fn block_offset_overflow() {
        let m = [0.0; 16];
        get_block(&mut [0.0; 4], &m, usize::MAX, 0, 2, 4);
    }

    #[test]
    fn block_honors_offset() {
        let n = 4;
        let m = (0..16).map(|i| i as f64).collect::<Vec<_>>();

        let mut block = [0.0; 4];
        get_block(&mut block, &m, 1, 2, 2, n);
        // element (r, c) of the block is m[(2 + c) * 4 + 1 + r]
        assert_eq!(block, [9.0, 10.0, 13.0, 14.0]);

        let mut dst = vec![0.0; 16];
        set_block(&mut dst, &block, 1, 2, 2, n);
        for c in 0..n {
            for r in 0..n {
                let expected = if (1..3).contains(&r) && (2..4).contains(&c) {
                    m[c * n + r]
                } else {
                    0.0
                };
                assert_eq!(dst[c * n + r], expected);
            }
        }
    }

    #[test]
    fn block_upper_left() {
        let m = (0..16).map(|i| i as f64).collect::<Vec<_>>();
        let mut block = [0.0; 9];
        get_block(&mut block, &m, 0, 0, 3, 4);
        assert_eq!(block, [0.0, 1.0, 2.0, 4.0, 5.0, 6.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn block_out_of_range() {
        let mut block = [0.0; 9];
        get_block(&mut block, &[0.0; 16], 2, 0, 3, 4);
    }

    #[test]
    fn elementwise_vectors() {
        let a = [1.0, -2.0, 3.0];
        let b = [4.0, 0.5, -1.0];
        let mut dst = [0.0; 3];

        add(&mut dst, &a, &b, 3);
        assert_eq!(dst, [5.0, -1.5, 2.0]);
        sub(&mut dst, &a, &b, 3);
        assert_eq!(dst, [-3.0, -2.5, 4.0]);
        mul(&mut dst, &a, &b, 3);
        assert_eq!(dst, [4.0, -1.0, -3.0]);
        div(&mut dst, &a, &b, 3);
        assert_eq!(dst, [0.25, -4.0, -3.0]);
        mul_scalar(&mut dst, &a, -2.0, 3);
        assert_eq!(dst, [-2.0, 4.0, -6.0]);
        div_scalar(&mut dst, &a, 4.0, 3);
        assert_eq!(dst, [0.25, -0.5, 0.75]);
        neg(&mut dst, &a, 3);
        assert_eq!(dst, [-1.0, 2.0, -3.0]);

        assert_eq!(dot(&a, &b, 3), 0.0);
        assert_eq!(sum(&a, 3), 2.0);
        assert_eq!(norm_1(&a, 3), 6.0);
        assert_eq!(norm_inf(&a, 3), 3.0);
        assert_eq!(min_index(&a, 3), 1);
        assert_eq!(max_index(&b, 3), 0);
    }

    #[test]
    fn vector_tolerance() {
        let a = [1.0, 2.0];
        assert!(equals_eps(&a, &[1.0, 2.25], 0.25, 2));
        assert!(!equals_eps(&a, &[1.0, 2.25], 0.125, 2));
        assert!(equals_eps_vec(&a, &[0.5, 2.25], &[0.5, 0.25], 2));
        assert!(!equals_eps_vec(&a, &[0.5, 2.25], &[0.25, 0.25], 2));
        assert!(!equals_eps(&[f64::NAN], &[f64::NAN], f64::INFINITY, 1));
    }

    #[test]
    #[should_panic(expected = "vector buffer has wrong length")]
    fn vector_length_mismatch() {
        let mut dst = [0.0; 2];
        add(&mut dst, &[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 3);
    }
}
