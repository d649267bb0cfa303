//! [`approx`] comparisons for vectors, matrices and quaternions.
//!
//! All of them compare element by element, and are equal if every pair of elements is.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{Matrix, Quat, Vector};

/// Exposes the elements of a type as a flat slice, in storage order.
trait Elements<T> {
    fn elements(&self) -> &[T];
}

impl<T, const N: usize> Elements<T> for Vector<T, N> {
    fn elements(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const R: usize, const C: usize> Elements<T> for Matrix<T, R, C> {
    fn elements(&self) -> &[T] {
        self.columns().as_flattened()
    }
}

impl<T> Elements<T> for Quat<T> {
    fn elements(&self) -> &[T] {
        self.as_slice()
    }
}

macro_rules! approx_impls {
    ($ty:ty, [$($generics:tt)*]) => {
        impl<T: AbsDiffEq, $($generics)*> AbsDiffEq for $ty
        where
            T::Epsilon: Copy,
        {
            type Epsilon = T::Epsilon;

            fn default_epsilon() -> Self::Epsilon {
                T::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                self.elements()
                    .iter()
                    .zip(other.elements())
                    .all(|(a, b)| a.abs_diff_eq(b, epsilon))
            }
        }

        impl<T: RelativeEq, $($generics)*> RelativeEq for $ty
        where
            T::Epsilon: Copy,
        {
            fn default_max_relative() -> Self::Epsilon {
                T::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &Self,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                self.elements()
                    .iter()
                    .zip(other.elements())
                    .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
            }
        }

        impl<T: UlpsEq, $($generics)*> UlpsEq for $ty
        where
            T::Epsilon: Copy,
        {
            fn default_max_ulps() -> u32 {
                T::default_max_ulps()
            }

            fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
                self.elements()
                    .iter()
                    .zip(other.elements())
                    .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
            }
        }
    };
}

approx_impls!(Vector<T, N>, [const N: usize]);
approx_impls!(Matrix<T, R, C>, [const R: usize, const C: usize]);
approx_impls!(Quat<T>, []);
