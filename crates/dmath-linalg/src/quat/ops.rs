use std::ops::{Mul, MulAssign};

use crate::{Number, Quat, Real, Vector};

/// Hamilton product.
impl<T> Mul for Quat<T>
where
    T: Number,
{
    type Output = Quat<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        let [ax, ay, az, aw] = self.into_vec().into_array();
        let [bx, by, bz, bw] = rhs.into_vec().into_array();

        #[rustfmt::skip]
        let prod = Quat::from_components(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        );
        prod
    }
}

impl<T> MulAssign for Quat<T>
where
    T: Number,
{
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// Rotation of a 3D vector.
impl<T> Mul<Vector<T, 3>> for Quat<T>
where
    T: Real,
{
    type Output = Vector<T, 3>;

    fn mul(self, rhs: Vector<T, 3>) -> Self::Output {
        self.rotate(rhs)
    }
}
