mod ops;

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use crate::{vec4, Mat3, Matrix, Number, One, Real, Vector, Zero};

/// A quaternion with double-precision components.
pub type Quatd = Quat<f64>;

/// A quaternion consisting of 3 imaginary numbers and a real number.
///
/// Unit-length quaternions ("*versors*") are commonly used to represent rotations in 3D space.
///
/// Quaternions are represented similar to a 4-dimensional vector, with an `x`, `y`, `z` and `w`
/// component, where `w` is the real part. [`Quat`] dereferences to that [`Vector`], so the
/// components can be accessed as fields.
///
/// Multiplying two quaternions computes their Hamilton product; multiplying a quaternion with a
/// 3D [`Vector`] rotates that vector (see [`Quat::rotate`]).
#[derive(Clone, Copy, PartialEq, Hash)]
#[repr(transparent)]
pub struct Quat<T> {
    vec: Vector<T, 4>,
}

impl<T: Zero + One> Quat<T> {
    /// The multiplicative identity.
    ///
    /// This is a unit quaternion that will not change a vector it is multiplied with.
    pub const IDENTITY: Self = Self {
        vec: vec4(T::ZERO, T::ZERO, T::ZERO, T::ONE),
    };
}

impl<T> Quat<T> {
    /// Creates a quaternion from a 4-dimensional [`Vector`].
    ///
    /// The `x`, `y`, and `z` coordinates correspond to the `i`, `j`, and `k` imaginary parts, while
    /// the `w` component corresponds to the real number part of the quaternion.
    pub fn from_vec(vec: Vector<T, 4>) -> Self {
        Self { vec }
    }

    pub fn from_components(x: T, y: T, z: T, w: T) -> Self {
        Self {
            vec: [x, y, z, w].into(),
        }
    }

    /// Returns the `(x, y, z, w)` components as a [`Vector`].
    pub fn into_vec(self) -> Vector<T, 4> {
        self.vec
    }

    /// Returns the conjugate `(-x, -y, -z, w)` of this quaternion.
    ///
    /// For unit quaternions, the conjugate is also the inverse.
    pub fn conjugate(self) -> Self
    where
        T: Number,
    {
        let [x, y, z, w] = self.vec.into_array();
        Self::from_components(-x, -y, -z, w)
    }

    /// Returns the multiplicative inverse of this quaternion, its conjugate divided by its squared
    /// length.
    pub fn inverse(self) -> Self
    where
        T: Number,
    {
        Self {
            vec: self.conjugate().vec * (T::ONE / self.length2()),
        }
    }

    /// Computes the 4-dimensional dot product of `self` and `other`.
    pub fn dot(self, other: Self) -> T
    where
        T: Number,
    {
        self.vec.dot(other.vec)
    }

    /// Returns the squared length of this quaternion.
    ///
    /// If the squared length is not equal to one, multiplying a vector with this quaternion will
    /// scale the vector in addition to rotating it. When using quaternions to model rotations, it
    /// is advisable to ensure that quaternions are always of length one.
    pub fn length2(&self) -> T
    where
        T: Number,
    {
        self.vec.length2()
    }

    /// Returns the length of this quaternion.
    #[doc(alias = "norm", alias = "magnitude")]
    pub fn length(&self) -> T
    where
        T: Real,
    {
        self.vec.length()
    }

    /// Returns a normalized copy of this quaternion (whose length equals one).
    pub fn normalize(self) -> Self
    where
        T: Real,
    {
        Self {
            vec: self.vec.normalize(),
        }
    }
}

fn one_half<T: Number>() -> T {
    T::ONE / (T::ONE + T::ONE)
}

impl<T: Real> Quat<T> {
    /// Creates a quaternion rotating by `radians` around `axis`.
    ///
    /// `axis` does not need to be normalized.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// # use approx::assert_abs_diff_eq;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let q = Quat::from_angle_axis(vec3(0.0, 0.0, 2.0), FRAC_PI_2);
    /// assert_abs_diff_eq!(q.rotate(Vec3d::X), Vec3d::Y, epsilon = 1e-12);
    /// ```
    pub fn from_angle_axis(axis: Vector<T, 3>, radians: T) -> Self {
        let (sin, cos) = (radians * one_half()).sin_cos();
        Self {
            vec: (axis.normalize() * sin).extend(cos),
        }
    }

    /// Creates a quaternion from an axis stored in `xyz` and an angle in radians stored in `w`.
    pub fn from_angle_axis_vec(angle_axis: Vector<T, 4>) -> Self {
        let [x, y, z, angle] = angle_axis.into_array();
        Self::from_angle_axis([x, y, z].into(), angle)
    }

    /// Returns the normalized rotation axis and the rotation angle in radians.
    ///
    /// The angle is `2 * atan2(|xyz|, w)`, in range `[0, 2π]`. A quaternion without imaginary part
    /// does not rotate at all; its axis is reported as the X axis.
    pub fn to_angle_axis(self) -> (Vector<T, 3>, T) {
        let [x, y, z, w] = self.vec.into_array();
        let imag = Vector::from([x, y, z]);
        let imag_len = imag.length();
        let angle = (T::ONE + T::ONE) * imag_len.atan2(w);
        let axis = if imag_len == T::ZERO {
            Vector::<T, 3>::X
        } else {
            imag / imag_len
        };
        (axis, angle)
    }

    /// Like [`Quat::to_angle_axis`], but returns the axis in `xyz` and the angle in `w`.
    pub fn to_angle_axis_vec(self) -> Vector<T, 4> {
        let (axis, angle) = self.to_angle_axis();
        axis.extend(angle)
    }

    pub fn from_rotation_x(radians: T) -> Self {
        let (sin, cos) = (radians * one_half()).sin_cos();
        Self::from_components(sin, T::ZERO, T::ZERO, cos)
    }

    pub fn from_rotation_y(radians: T) -> Self {
        let (sin, cos) = (radians * one_half()).sin_cos();
        Self::from_components(T::ZERO, sin, T::ZERO, cos)
    }

    pub fn from_rotation_z(radians: T) -> Self {
        let (sin, cos) = (radians * one_half()).sin_cos();
        Self::from_components(T::ZERO, T::ZERO, sin, cos)
    }

    /// Creates a quaternion representing a rotation around the X, Y, and Z axis.
    ///
    /// This is `from_rotation_x(x) * from_rotation_y(y) * from_rotation_z(z)`, so the Z rotation is
    /// applied to vectors first.
    #[doc(alias = "euler")]
    pub fn from_rotation_xyz(x: T, y: T, z: T) -> Self {
        Self::from_rotation_x(x) * Self::from_rotation_y(y) * Self::from_rotation_z(z)
    }

    /// Converts this quaternion into a 3x3 rotation matrix.
    ///
    /// `self` is expected to be a unit quaternion; the products are scaled by `2 / |q|`. A zero
    /// quaternion results in the identity matrix.
    pub fn to_rotation_matrix(self) -> Mat3<T> {
        let norm = self.length();
        let two = T::ONE + T::ONE;
        let s = if norm > T::ZERO { two / norm } else { T::ZERO };

        let [x, y, z, w] = self.vec.into_array();
        let (xx, xy, xz) = (s * x * x, s * x * y, s * x * z);
        let (yy, yz, zz) = (s * y * y, s * y * z, s * z * z);
        let (wx, wy, wz) = (s * w * x, s * w * y, s * w * z);
        let one = T::ONE;

        #[rustfmt::skip]
        let mat = Matrix::from_rows([
            [one - yy - zz, xy - wz,       xz + wy],
            [xy + wz,       one - xx - zz, yz - wx],
            [xz - wy,       yz + wx,       one - xx - yy],
        ]);
        mat
    }

    /// Extracts the rotation of a 3x3 rotation matrix as a unit quaternion.
    ///
    /// The branch used depends on the trace and the largest diagonal element, which keeps the
    /// square root argument away from zero.
    pub fn from_rotation_matrix(mat: &Mat3<T>) -> Self {
        let half = one_half::<T>();
        let m = |row: usize, col: usize| mat[(row, col)];
        let trace = mat.trace();

        if trace >= T::ZERO {
            let r = (T::ONE + trace).sqrt();
            let rinv = half / r;
            Self::from_components(
                rinv * (m(2, 1) - m(1, 2)),
                rinv * (m(0, 2) - m(2, 0)),
                rinv * (m(1, 0) - m(0, 1)),
                r * half,
            )
        } else if m(0, 0) >= m(1, 1) && m(0, 0) >= m(2, 2) {
            let r = (T::ONE - m(1, 1) - m(2, 2) + m(0, 0)).sqrt();
            let rinv = half / r;
            Self::from_components(
                r * half,
                rinv * (m(1, 0) + m(0, 1)),
                rinv * (m(2, 0) + m(0, 2)),
                rinv * (m(2, 1) - m(1, 2)),
            )
        } else if m(1, 1) >= m(2, 2) {
            let r = (T::ONE - m(0, 0) - m(2, 2) + m(1, 1)).sqrt();
            let rinv = half / r;
            Self::from_components(
                rinv * (m(1, 0) + m(0, 1)),
                r * half,
                rinv * (m(2, 1) + m(1, 2)),
                rinv * (m(0, 2) - m(2, 0)),
            )
        } else {
            let r = (T::ONE - m(0, 0) - m(1, 1) + m(2, 2)).sqrt();
            let rinv = half / r;
            Self::from_components(
                rinv * (m(2, 0) + m(0, 2)),
                rinv * (m(2, 1) + m(1, 2)),
                r * half,
                rinv * (m(1, 0) - m(0, 1)),
            )
        }
    }

    /// Rotates `point` by this quaternion, computing `q * (point, 0) * conj(q)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let p = vec3(1.0, -2.0, 3.0);
    /// assert_eq!(Quatd::IDENTITY.rotate(p), p);
    /// ```
    pub fn rotate(self, point: Vector<T, 3>) -> Vector<T, 3> {
        let p = Self {
            vec: point.extend(T::ZERO),
        };
        (self * (p * self.conjugate())).vec.truncate()
    }

    /// Spherical linear interpolation between `self` (at `t = 0`) and `other` (at `t = 1`).
    ///
    /// Takes the shorter path by flipping `self` when the quaternions point into opposite
    /// hemispheres. Falls back to linear interpolation when they are nearly parallel.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// # use approx::assert_abs_diff_eq;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let a = Quatd::IDENTITY;
    /// let b = Quat::from_rotation_z(FRAC_PI_2);
    /// let half = a.slerp(b, 0.5);
    /// assert_abs_diff_eq!(half, Quat::from_rotation_z(FRAC_PI_2 / 2.0), epsilon = 1e-12);
    /// ```
    #[doc(alias = "lerp")]
    pub fn slerp(self, other: Self, t: T) -> Self
    where
        T: From<u16>,
    {
        let mut a = self;
        let mut cos_theta = a.dot(other);

        if cos_theta.abs() >= T::ONE {
            return a;
        }

        if cos_theta < T::ZERO {
            a.vec = -a.vec;
            cos_theta = -cos_theta;
        }

        let sin_theta = (T::ONE - cos_theta * cos_theta).sqrt();

        if sin_theta.abs() * T::from(1000u16) < T::ONE {
            return Self {
                vec: a.vec.mix(other.vec, t),
            };
        }

        let angle = cos_theta.acos();
        let q1 = a.vec * ((T::ONE - t) * angle).sin();
        let q2 = other.vec * (t * angle).sin();
        Self {
            vec: (q1 + q2) * (T::ONE / sin_theta),
        }
    }
}

impl<T> Deref for Quat<T> {
    type Target = Vector<T, 4>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.vec
    }
}

impl<T> DerefMut for Quat<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.vec
    }
}

impl<T: fmt::Debug> fmt::Debug for Quat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quat{:?}", self.vec)
    }
}
