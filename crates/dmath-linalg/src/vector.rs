use std::{array, fmt};

use crate::{kernel, Abs, Floor, MinMax, Number, One, Real, Zero};

mod ops;
mod view;

pub use view::{XY, XYZ, XYZW};

/// A 2-dimensional vector.
pub type Vec2<T> = Vector<T, 2>;
/// A 3-dimensional vector.
pub type Vec3<T> = Vector<T, 3>;
/// A 4-dimensional vector.
pub type Vec4<T> = Vector<T, 4>;

/// [`Vec2`] of [`f64`].
pub type Vec2d = Vec2<f64>;
/// [`Vec3`] of [`f64`].
pub type Vec3d = Vec3<f64>;
/// [`Vec4`] of [`f64`].
pub type Vec4d = Vec4<f64>;

pub type Vec2f = Vec2<f32>;
pub type Vec3f = Vec3<f32>;
pub type Vec4f = Vec4<f32>;

/// A column vector of `N` elements of type `T`.
///
/// The elements are stored as a plain `[T; N]` array, so a `&[Vector<T, N>]` can be reinterpreted
/// as a flat `&[T]` (see the [`bytemuck`] impls). Arithmetic on vectors forwards to the
/// element-wise functions in [`kernel`], which operate on exactly that flat representation.
///
/// Vectors of length 2, 3 and 4 expose their elements as the fields `x`, `y`, `z` and `w`; any
/// vector can be indexed like an array.
///
/// # Construction
///
/// - [`vec2`], [`vec3`], [`vec4`] from individual elements, or [`From`] an array.
/// - [`Vector::splat`] and [`Vector::from_fn`].
/// - The constants [`Vector::ZERO`] and, for 2 to 4 dimensions, the unit vectors `X`, `Y`, `Z`
///   and `W`.
///
/// [`kernel`]: crate::kernel
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Vector<T, const N: usize>([T; N]);

unsafe impl<T: bytemuck::Zeroable, const N: usize> bytemuck::Zeroable for Vector<T, N> {}
unsafe impl<T: bytemuck::Pod, const N: usize> bytemuck::Pod for Vector<T, N> {}

impl<T: Zero, const N: usize> Vector<T, N> {
    /// The all-zeroes vector.
    pub const ZERO: Self = Self([T::ZERO; N]);
}

macro_rules! unit_vectors {
    ($n:literal: $($name:ident = [$($elem:ident),+];)+) => {
        impl<T: Zero + One> Vector<T, $n> {
            $(
                #[doc = concat!("The unit vector along the `", stringify!($name), "` axis.")]
                pub const $name: Self = Self([$(T::$elem),+]);
            )+
        }
    };
}

unit_vectors!(2:
    X = [ONE, ZERO];
    Y = [ZERO, ONE];
);
unit_vectors!(3:
    X = [ONE, ZERO, ZERO];
    Y = [ZERO, ONE, ZERO];
    Z = [ZERO, ZERO, ONE];
);
unit_vectors!(4:
    X = [ONE, ZERO, ZERO, ZERO];
    Y = [ZERO, ONE, ZERO, ZERO];
    Z = [ZERO, ZERO, ONE, ZERO];
    W = [ZERO, ZERO, ZERO, ONE];
);

impl<T, const N: usize> Vector<T, N> {
    /// Returns a vector with every element set to `elem`.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(Vector::splat(2), vec3(2, 2, 2));
    /// ```
    #[inline]
    pub fn splat(elem: T) -> Self
    where
        T: Copy,
    {
        Self([elem; N])
    }

    /// Builds a vector by calling `cb` with the index of every element.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(Vector::from_fn(|i| i * i), vec4(0, 1, 4, 9));
    /// ```
    pub fn from_fn<F>(cb: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self(array::from_fn(cb))
    }

    /// Applies `f` to every element.
    pub fn map<F, U>(self, f: F) -> Vector<U, N>
    where
        F: FnMut(T) -> U,
    {
        Vector(self.0.map(f))
    }

    /// Converts the element type, eg. from [`f32`] to [`f64`].
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let v: Vec3d = vec3(1.5f32, 2.0, -1.0).cast();
    /// assert_eq!(v, vec3(1.5, 2.0, -1.0));
    /// ```
    pub fn cast<U>(self) -> Vector<U, N>
    where
        T: Into<U>,
    {
        self.map(Into::into)
    }

    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        &self.0
    }

    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        &mut self.0
    }

    /// Returns the elements as the flat slice that the [`kernel`] functions take.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec3(1, 2, 3).into_array(), [1, 2, 3]);
    /// ```
    #[inline]
    pub fn into_array(self) -> [T; N] {
        self.0
    }

    /// Element-wise minimum.
    ///
    /// Follows [`f64::min`], so a NaN loses against a number:
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let a = vec3(-1.0, 2.0, f64::NAN);
    /// let b = vec3(3.0, f64::NEG_INFINITY, 0.0);
    /// assert_eq!(a.min(b), vec3(-1.0, f64::NEG_INFINITY, 0.0));
    /// ```
    pub fn min(self, other: Self) -> Self
    where
        T: MinMax + Copy,
    {
        Self::from_fn(|i| self.0[i].min(other.0[i]))
    }

    /// Element-wise maximum. NaN is handled as in [`Vector::min`].
    pub fn max(self, other: Self) -> Self
    where
        T: MinMax + Copy,
    {
        Self::from_fn(|i| self.0[i].max(other.0[i]))
    }

    /// Clamps each element between the corresponding elements of `min` and `max`.
    pub fn clamp(self, min: Self, max: Self) -> Self
    where
        T: MinMax + Copy,
    {
        Self::from_fn(|i| self.0[i].clamp(min.0[i], max.0[i]))
    }

    /// Clamps every element into `[min, max]`.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec3(-1.0, 0.5, 7.0).clamp_splat(0.0, 1.0), vec3(0.0, 0.5, 1.0));
    /// ```
    pub fn clamp_splat(self, min: T, max: T) -> Self
    where
        T: MinMax + Copy,
    {
        self.map(|x| x.clamp(min, max))
    }

    pub fn abs(self) -> Self
    where
        T: Abs,
    {
        self.map(T::abs)
    }

    /// Element-wise `x - floor(x)`, which lies in `[0, 1)` also for negative `x`.
    pub fn fract(self) -> Self
    where
        T: Floor,
    {
        self.map(T::fract)
    }

    pub fn floor(self) -> Self
    where
        T: Floor,
    {
        self.map(T::floor)
    }
}

/// Operations for any numeric element type.
impl<T: Number, const N: usize> Vector<T, N> {
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec4(1, 2, 3, 4).sum(), 10);
    /// ```
    pub fn sum(self) -> T {
        kernel::sum(self.as_slice(), N)
    }

    /// The dot product of `self` and `other`.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec3(1, 3, -5).dot(vec3(4, -2, -1)), 3);
    /// ```
    pub fn dot(self, other: Self) -> T {
        kernel::dot(self.as_slice(), other.as_slice(), N)
    }

    /// The squared length, `self.dot(self)`.
    pub fn length2(self) -> T {
        self.dot(self)
    }

    /// The squared distance between the points `self` and `other`.
    pub fn distance2(self, other: Self) -> T {
        (other - self).length2()
    }

    /// Linear interpolation, `self * (1 - t) + other * t`.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec2(0.0, 10.0).mix(vec2(1.0, 20.0), 0.5), vec2(0.5, 15.0));
    /// ```
    #[doc(alias = "lerp")]
    pub fn mix(self, other: Self, t: T) -> Self {
        self * (T::ONE - t) + other * t
    }

    /// Like [`Vector::mix`], with one interpolation factor per element.
    pub fn mix_vec(self, other: Self, t: Self) -> Self {
        self * (Self::splat(T::ONE) - t) + other * t
    }

    /// Per element, `0` where `self` is below `edge` and `1` elsewhere.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec3(0.1, 0.5, 0.9).step(Vector::splat(0.5)), vec3(0.0, 1.0, 1.0));
    /// ```
    pub fn step(self, edge: Self) -> Self {
        Self::from_fn(|i| if self.0[i] < edge.0[i] { T::ZERO } else { T::ONE })
    }

    /// Per element, `1` for positive values, `-1` for negative ones and `0` otherwise.
    ///
    /// Unlike [`f64::signum`], zero (of either sign) and NaN map to `0`.
    pub fn sign(self) -> Self {
        self.map(|x| {
            if x > T::ZERO {
                T::ONE
            } else if x < T::ZERO {
                -T::ONE
            } else {
                T::ZERO
            }
        })
    }

    /// Index of the smallest element, the first one on ties.
    pub fn min_index(&self) -> usize {
        kernel::min_index(self.as_slice(), N)
    }

    /// Index of the largest element, the first one on ties.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec4(3, 9, -1, 9).max_index(), 1);
    /// ```
    pub fn max_index(&self) -> usize {
        kernel::max_index(self.as_slice(), N)
    }
}

/// Operations that need floating-point elements.
impl<T: Real, const N: usize> Vector<T, N> {
    /// The Euclidean length.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec2(3.0, 4.0).length(), 5.0);
    /// ```
    #[doc(alias = "norm")]
    pub fn length(self) -> T {
        self.length2().sqrt()
    }

    /// Scales `self` to unit length.
    ///
    /// The zero vector has no direction, and yields NaN elements.
    pub fn normalize(self) -> Self {
        self / self.length()
    }

    pub fn distance(self, other: Self) -> T {
        (other - self).length()
    }

    /// The L1 norm, the sum of the absolute values.
    pub fn norm_1(self) -> T {
        kernel::norm_1(self.as_slice(), N)
    }

    /// The maximum norm, the largest absolute value.
    pub fn norm_inf(self) -> T {
        kernel::norm_inf(self.as_slice(), N)
    }

    /// The p-norm, `(sum |x|^p)^(1/p)`.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let v = vec3(3.0, -4.0, 0.0);
    /// assert_eq!(v.norm_p(1.0), v.norm_1());
    /// assert!((v.norm_p(2.0) - v.length()).abs() < 1e-12);
    /// ```
    pub fn norm_p(self, p: T) -> T {
        self.abs().map(|x| x.powf(p)).sum().powf(T::ONE / p)
    }

    pub fn ceil(self) -> Self {
        self.map(T::ceil)
    }

    /// Rounds each element to the nearest integer, half-way cases away from zero.
    pub fn round(self) -> Self {
        self.map(T::round)
    }

    /// Element-wise floored modulus, `self - m * floor(self / m)`.
    ///
    /// The result has the sign of `m`:
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec2(5.5, -1.0).modulo(2.0), vec2(1.5, 1.0));
    /// ```
    #[doc(alias = "mod")]
    pub fn modulo(self, m: T) -> Self {
        self.map(|x| x.modulo(m))
    }

    /// Like [`Vector::modulo`], with one modulus per element.
    pub fn modulo_vec(self, m: Self) -> Self {
        Self::from_fn(|i| self.0[i].modulo(m.0[i]))
    }

    /// Converts every element from degrees to radians.
    pub fn to_radians(self) -> Self {
        self.map(T::to_radians)
    }

    pub fn to_degrees(self) -> Self {
        self.map(T::to_degrees)
    }

    /// Returns whether no element of `self` differs from `other` by more than `eps`.
    ///
    /// NaN compares unequal to everything.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// let a = vec2(1.0, 2.0);
    /// assert!(a.equals_eps(vec2(1.05, 1.95), 0.1));
    /// assert!(!a.equals_eps(vec2(1.05, 1.95), 0.01));
    /// ```
    pub fn equals_eps(self, other: Self, eps: T) -> bool {
        kernel::equals_eps(self.as_slice(), other.as_slice(), eps, N)
    }

    /// Like [`Vector::equals_eps`], with one tolerance per element.
    pub fn equals_eps_vec(self, other: Self, eps: Self) -> bool {
        kernel::equals_eps_vec(self.as_slice(), other.as_slice(), eps.as_slice(), N)
    }

    /// Reflects the incident direction `self` off a surface with unit normal `n`.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec3(1.0, -1.0, 0.0).reflect(Vec3d::Y), vec3(1.0, 1.0, 0.0));
    /// ```
    pub fn reflect(self, n: Self) -> Self {
        self - n * (n.dot(self) + n.dot(self))
    }

    /// Refracts the incident direction `self` at a surface with unit normal `n`, where `eta` is
    /// the ratio of the refractive indices.
    ///
    /// Both `self` and `n` should be normalized. Returns the zero vector on total internal
    /// reflection.
    pub fn refract(self, n: Self, eta: T) -> Self {
        let cos_i = n.dot(-self);
        let cos_t2 = T::ONE - eta * eta * (T::ONE - cos_i * cos_i);
        if cos_t2 < T::ZERO {
            return Self::ZERO;
        }
        self * eta + n * (eta * cos_i - cos_t2.sqrt())
    }

    /// Orients the normal `self` to face against the incident direction `i`.
    ///
    /// Returns `self` if `i` and the reference normal `n_ref` point in opposing directions, and
    /// `-self` otherwise.
    pub fn faceforward(self, i: Self, n_ref: Self) -> Self {
        if i.dot(n_ref) < T::ZERO {
            self
        } else {
            -self
        }
    }
}

impl<T> Vector<T, 2> {
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec2(-1.0, 2.0).extend(5.0), vec3(-1.0, 2.0, 5.0));
    /// ```
    pub fn extend(self, z: T) -> Vector<T, 3> {
        let [x, y] = self.0;
        vec3(x, y, z)
    }

    /// The [perpendicular dot product], `x0 * y1 - y0 * x1`.
    ///
    /// This is the Z component of the cross product of both vectors placed in the XY plane.
    ///
    /// [perpendicular dot product]: https://mathworld.wolfram.com/PerpDotProduct.html
    pub fn perp_dot(self, other: Self) -> T
    where
        T: Number,
    {
        self.0[0] * other.0[1] - self.0[1] * other.0[0]
    }
}

impl<T> Vector<T, 3> {
    /// Drops the Z element.
    pub fn truncate(self) -> Vector<T, 2> {
        let [x, y, _] = self.0;
        vec2(x, y)
    }

    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(vec3(-1.0, 2.0, 3.5).extend(1.0), vec4(-1.0, 2.0, 3.5, 1.0));
    /// ```
    pub fn extend(self, w: T) -> Vector<T, 4> {
        let [x, y, z] = self.0;
        vec4(x, y, z, w)
    }

    /// The right-handed cross product `self x other`.
    ///
    /// ```
    /// # use dmath_linalg::*;
    /// assert_eq!(Vec3d::X.cross(Vec3d::Y), Vec3d::Z);
    /// assert_eq!(Vec3d::Y.cross(Vec3d::X), -Vec3d::Z);
    /// ```
    pub fn cross(self, other: Self) -> Self
    where
        T: Number,
    {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        vec3(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// The cross product scaled to unit length.
    ///
    /// Parallel inputs have a zero cross product, which is returned as is.
    pub fn cross_normalized(self, other: Self) -> Self
    where
        T: Real,
    {
        let cross = self.cross(other);
        let length = cross.length();
        if length > T::ZERO {
            cross / length
        } else {
            cross
        }
    }
}

impl<T> Vector<T, 4> {
    /// Drops the W element.
    pub fn truncate(self) -> Vector<T, 3> {
        let [x, y, z, _] = self.0;
        vec3(x, y, z)
    }
}

impl<T: Default, const N: usize> Default for Vector<T, N> {
    #[inline]
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    #[inline]
    fn from(elems: [T; N]) -> Self {
        Self(elems)
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    #[inline]
    fn from(v: Vector<T, N>) -> Self {
        v.0
    }
}

/// Formats as a tuple, eg. `(1.0, 2.0)`.
impl<T: fmt::Debug, const N: usize> fmt::Debug for Vector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .fold(&mut f.debug_tuple(""), |tup, elem| tup.field(elem))
            .finish()
    }
}

impl<T, const N: usize> AsRef<[T]> for Vector<T, N> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const N: usize> AsMut<[T]> for Vector<T, N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.0
    }
}

#[inline]
pub const fn vec2<T>(x: T, y: T) -> Vec2<T> {
    Vector([x, y])
}

#[inline]
pub const fn vec3<T>(x: T, y: T, z: T) -> Vec3<T> {
    Vector([x, y, z])
}

#[inline]
pub const fn vec4<T>(x: T, y: T, z: T, w: T) -> Vec4<T> {
    Vector([x, y, z, w])
}
