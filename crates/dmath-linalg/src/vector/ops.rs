//! Operator overloads, forwarding to the element-wise [`kernel`] functions.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use super::Vector;
use crate::kernel;

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.as_array()[i]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.as_mut_array()[i]
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Vector<T, N> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_array() == other
    }
}

/// `Vector op Vector` and `Vector op= Vector`, applied per element.
macro_rules! elementwise {
    ($Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident => $kernel:path) => {
        impl<T, const N: usize> $OpAssign for Vector<T, N>
        where
            T: Copy + $Op<Output = T>,
        {
            fn $op_assign(&mut self, rhs: Self) {
                let lhs = *self;
                $kernel(self.as_mut_slice(), lhs.as_slice(), rhs.as_slice(), N);
            }
        }

        impl<T, const N: usize> $Op for Vector<T, N>
        where
            T: Copy + $Op<Output = T>,
        {
            type Output = Self;

            fn $op(mut self, rhs: Self) -> Self {
                self.$op_assign(rhs);
                self
            }
        }
    };
}

elementwise!(Add::add, AddAssign::add_assign => kernel::add);
elementwise!(Sub::sub, SubAssign::sub_assign => kernel::sub);
elementwise!(Mul::mul, MulAssign::mul_assign => kernel::mul);
elementwise!(Div::div, DivAssign::div_assign => kernel::div);

/// `Vector op Scalar` and `Vector op= Scalar`.
// Element-wise `Vector * Vector` rules out a blanket `Mul<U> for Vector<T, N>`, so the scalar is
// always the element type.
macro_rules! scalar {
    ($Op:ident::$op:ident, $OpAssign:ident::$op_assign:ident => $kernel:path) => {
        impl<T, const N: usize> $OpAssign<T> for Vector<T, N>
        where
            T: Copy + $Op<Output = T>,
        {
            fn $op_assign(&mut self, s: T) {
                let lhs = *self;
                $kernel(self.as_mut_slice(), lhs.as_slice(), s, N);
            }
        }

        impl<T, const N: usize> $Op<T> for Vector<T, N>
        where
            T: Copy + $Op<Output = T>,
        {
            type Output = Self;

            fn $op(mut self, s: T) -> Self {
                self.$op_assign(s);
                self
            }
        }
    };
}

scalar!(Mul::mul, MulAssign::mul_assign => kernel::mul_scalar);
scalar!(Div::div, DivAssign::div_assign => kernel::div_scalar);

impl<T, const N: usize> Neg for Vector<T, N>
where
    T: Copy + Neg<Output = T>,
{
    type Output = Self;

    fn neg(self) -> Self {
        let mut out = self;
        kernel::neg(out.as_mut_slice(), self.as_slice(), N);
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::{vec2, vec3, Vec3d};

    #[test]
    fn arithmetic() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(4.0, 5.0, 6.0);
        assert_eq!(a + b, vec3(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3d::splat(3.0));
        assert_eq!(a * b, vec3(4.0, 10.0, 18.0));
        assert_eq!(b / a, vec3(4.0, 2.5, 2.0));
        assert_eq!(a * 2.0, vec3(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, vec3(0.5, 1.0, 1.5));
        assert_eq!(-a, vec3(-1.0, -2.0, -3.0));
    }

    #[test]
    fn assign() {
        let mut v = vec3(1, 2, 3);
        v += vec3(1, 1, 1);
        assert_eq!(v, [2, 3, 4]);
        v -= vec3(2, 2, 2);
        assert_eq!(v, [0, 1, 2]);
        v *= 3;
        assert_eq!(v, [0, 3, 6]);
        v *= vec3(1, 2, 3);
        assert_eq!(v, [0, 6, 18]);
        v /= 2;
        assert_eq!(v, [0, 3, 9]);
        v /= vec3(1, 3, 9);
        assert_eq!(v, [0, 1, 1]);
    }

    #[test]
    fn unsigned_elements() {
        let mut v = vec2(7u8, 200);
        v += vec2(1, 50);
        assert_eq!(v, [8, 250]);
        assert_eq!(v / 2, vec2(4, 125));
    }
}
