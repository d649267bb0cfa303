//! Rigid transforms.

use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::{Mat3d, Mat4d, Quatd, Vec3d, Vector};

/// A rigid transform: a rotation by [`Pose::orientation`] followed by a translation by
/// [`Pose::position`].
///
/// Composing two poses with `*` yields a pose that applies the right-hand side first, just like
/// multiplying the equivalent [`Mat4d`]s.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// # use approx::assert_abs_diff_eq;
/// use std::f64::consts::FRAC_PI_2;
///
/// let pose = Pose::new(vec3(1.0, 0.0, 0.0), Quat::from_rotation_z(FRAC_PI_2));
/// let p = pose.transform_point(vec3(1.0, 0.0, 0.0));
/// assert_abs_diff_eq!(p, vec3(1.0, 1.0, 0.0), epsilon = 1e-12);
/// assert_abs_diff_eq!(pose.inverse().transform_point(p), vec3(1.0, 0.0, 0.0), epsilon = 1e-12);
/// ```
///
/// Poses serialize as a struct holding the position as 3 numbers and the orientation quaternion
/// as 4 numbers (`x, y, z, w`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3d,
    pub orientation: Quatd,
}

impl Pose {
    /// The pose that leaves every point where it is.
    pub const IDENTITY: Self = Self {
        position: Vector::ZERO,
        orientation: Quatd::IDENTITY,
    };

    pub fn new(position: Vec3d, orientation: Quatd) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Decomposes an affine transform matrix.
    ///
    /// The translation is taken from the last column, and the orientation from the upper-left 3x3
    /// block, which is expected to be a rotation matrix (without scaling or shearing).
    pub fn from_matrix(mat: &Mat4d) -> Self {
        let rotation: Mat3d = mat.upper_left();
        Self {
            position: mat.col(3).truncate(),
            orientation: Quatd::from_rotation_matrix(&rotation),
        }
    }

    /// Converts this pose into an affine transform matrix.
    pub fn to_matrix(&self) -> Mat4d {
        let mut mat = Mat4d::IDENTITY;
        mat.set_upper_left(&self.orientation.to_rotation_matrix());
        mat.set_col(3, self.position.extend(1.0));
        mat
    }

    /// Returns the pose that undoes `self`.
    pub fn inverse(&self) -> Self {
        let orientation = self.orientation.inverse();
        Self {
            position: -orientation.rotate(self.position),
            orientation,
        }
    }

    /// Rotates and then translates `point`.
    pub fn transform_point(&self, point: Vec3d) -> Vec3d {
        self.position + self.orientation.rotate(point)
    }

    /// Rotates `dir`, ignoring the translation.
    pub fn transform_direction(&self, dir: Vec3d) -> Vec3d {
        self.orientation.rotate(dir)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Pose {
        Pose {
            position: self.transform_point(rhs.position),
            orientation: self.orientation * rhs.orientation,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::{vec3, Quat};

    use super::*;

    fn sample() -> Pose {
        Pose::new(
            vec3(0.5, -2.0, 3.0),
            Quat::from_angle_axis(vec3(1.0, 1.0, 0.0), 0.8),
        )
    }

    #[test]
    fn identity() {
        let p = vec3(1.0, 2.0, 3.0);
        assert_eq!(Pose::IDENTITY.transform_point(p), p);
        assert_eq!(Pose::IDENTITY.to_matrix(), Mat4d::IDENTITY);
        assert_eq!(Pose::default(), Pose::IDENTITY);
    }

    #[test]
    fn matrix_roundtrip() {
        let pose = sample();
        let mat = pose.to_matrix();
        let p = vec3(-1.0, 0.25, 4.0);
        assert_abs_diff_eq!(
            (mat * p.extend(1.0)).truncate(),
            pose.transform_point(p),
            epsilon = 1e-12
        );

        let back = Pose::from_matrix(&mat);
        assert_abs_diff_eq!(back.position, pose.position, epsilon = 1e-12);
        assert_abs_diff_eq!(back.orientation, pose.orientation, epsilon = 1e-12);
    }

    #[test]
    fn inverse() {
        let pose = sample();
        let p = vec3(3.0, 1.0, -1.0);
        let there_and_back = pose.inverse().transform_point(pose.transform_point(p));
        assert_abs_diff_eq!(there_and_back, p, epsilon = 1e-12);

        let id = pose * pose.inverse();
        assert_abs_diff_eq!(id.position, Vec3d::ZERO, epsilon = 1e-12);
        assert_abs_diff_eq!(id.orientation, Quatd::IDENTITY, epsilon = 1e-12);

        assert_abs_diff_eq!(
            pose.inverse().to_matrix(),
            pose.to_matrix().invert(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn compose() {
        let a = sample();
        let b = Pose::new(vec3(0.0, 1.0, 0.0), Quat::from_rotation_z(1.2));
        let p = vec3(0.3, 0.6, 0.9);

        let ab = a * b;
        assert_abs_diff_eq!(
            ab.transform_point(p),
            a.transform_point(b.transform_point(p)),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(ab.to_matrix(), a.to_matrix() * b.to_matrix(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            ab.transform_direction(Vec3d::X),
            a.orientation.rotate(b.orientation.rotate(Vec3d::X)),
            epsilon = 1e-12
        );
    }

    #[test]
    fn serde() {
        let pose = Pose::new(vec3(1.0, 2.0, 3.0), Quatd::IDENTITY);
        let json = serde_json::to_string(&pose).unwrap();
        assert_eq!(
            json,
            r#"{"position":[1.0,2.0,3.0],"orientation":[0.0,0.0,0.0,1.0]}"#
        );
        assert_eq!(serde_json::from_str::<Pose>(&json).unwrap(), pose);

        let pose = sample();
        let back: Pose = serde_json::from_str(&serde_json::to_string(&pose).unwrap()).unwrap();
        assert_eq!(back, pose);
    }
}
