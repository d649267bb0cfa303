//! Rotation matrix construction.

use crate::{Mat3d, Mat4d, Matrix, Vec3d, Vec4d};

/// Creates a matrix rotating by `radians` around `axis` (Rodrigues' rotation formula).
///
/// `axis` does not need to be normalized.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// # use approx::assert_abs_diff_eq;
/// use std::f64::consts::FRAC_PI_2;
///
/// let rot = rotation::from_angle_axis(Vec3d::Z, FRAC_PI_2);
/// assert_abs_diff_eq!(rot * Vec3d::X, Vec3d::Y, epsilon = 1e-12);
/// ```
pub fn from_angle_axis(axis: Vec3d, radians: f64) -> Mat3d {
    let (s, c) = radians.sin_cos();
    let axis = axis.normalize();
    let v = axis * (1.0 - c);
    let vs = axis * s;

    // Outer product `axis * v^T`, plus the cosine on the diagonal and the cross product matrix.
    let mut m = Matrix::from_columns([axis * v.x, axis * v.y, axis * v.z]);
    m[(0, 0)] += c;
    m[(1, 1)] += c;
    m[(2, 2)] += c;
    m[(0, 1)] -= vs.z;
    m[(0, 2)] += vs.y;
    m[(1, 0)] += vs.z;
    m[(1, 2)] -= vs.x;
    m[(2, 0)] -= vs.y;
    m[(2, 1)] += vs.x;
    m
}

/// Like [`from_angle_axis`], with the axis stored in `xyz` and the angle in `w`.
pub fn from_angle_axis_vec(angle_axis: Vec4d) -> Mat3d {
    from_angle_axis(angle_axis.truncate(), angle_axis.w)
}

/// Creates a rotation matrix whose Z axis points along `dir_z`.
///
/// The X axis is chosen to be as close to the global X axis as possible. When `dir_z` is nearly
/// parallel to the global X axis, the global Y axis is used as the reference instead.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// # use approx::assert_abs_diff_eq;
/// let rot = rotation::from_dir_z(vec3(0.0, 0.0, 5.0));
/// assert_abs_diff_eq!(rot, Mat3d::IDENTITY, epsilon = 1e-12);
/// ```
pub fn from_dir_z(dir_z: Vec3d) -> Mat3d {
    let z = dir_z.normalize();

    let reference = if z.dot(Vec3d::X).abs() > 0.9 {
        Vec3d::Y
    } else {
        Vec3d::X
    };

    let y = z.cross(reference).normalize();
    let x = y.cross(z);
    Matrix::from_columns([x, y, z])
}

/// Creates a pose matrix located at `start`, with its Z axis pointing along `dir`.
///
/// The rotation part is computed with [`from_dir_z`].
pub fn pose_from_ray(start: Vec3d, dir: Vec3d) -> Mat4d {
    let mut pose = Mat4d::IDENTITY;
    pose.set_upper_left(&from_dir_z(dir));
    pose.set_col(3, start.extend(1.0));
    pose
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;

    use crate::{vec3, Quat};

    use super::*;

    #[test]
    fn angle_axis_matches_quat() {
        let axis = vec3(0.3, -1.0, 2.0);
        for angle in [0.0, 0.4, FRAC_PI_2, PI, -2.5] {
            let m = from_angle_axis(axis, angle);
            let q = Quat::from_angle_axis(axis, angle);
            assert_abs_diff_eq!(m, q.to_rotation_matrix(), epsilon = 1e-12);
            assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-12);
        }

        let v = axis.extend(0.7);
        assert_eq!(from_angle_axis_vec(v), from_angle_axis(axis, 0.7));
    }

    #[test]
    fn angle_axis_keeps_axis() {
        let axis = vec3(1.0, 1.0, 1.0);
        let m = from_angle_axis(axis, 1.234);
        assert_abs_diff_eq!(m * axis, axis, epsilon = 1e-12);
    }

    #[test]
    fn dir_z_is_orthonormal() {
        for dir in [vec3(1.0, 2.0, 3.0), vec3(-4.0, 0.1, 0.0), vec3(0.0, -1.0, 0.0)] {
            let m = from_dir_z(dir);
            assert_abs_diff_eq!(m.col(2), dir.normalize(), epsilon = 1e-12);
            assert_abs_diff_eq!(m.transpose() * m, Mat3d::IDENTITY, epsilon = 1e-12);
            assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn dir_z_reference_fallback() {
        // Y is perpendicular to X, so the X axis of the result stays on the global X axis.
        let m = from_dir_z(Vec3d::Y);
        assert_abs_diff_eq!(m.col(0), Vec3d::X, epsilon = 1e-12);

        // Along X, the Y axis is used as the reference instead.
        let m = from_dir_z(Vec3d::X);
        assert_abs_diff_eq!(m.col(2), Vec3d::X, epsilon = 1e-12);
        assert_abs_diff_eq!(m.col(0), Vec3d::Y, epsilon = 1e-12);
    }

    #[test]
    fn ray_pose() {
        let start = vec3(1.0, 2.0, 3.0);
        let dir = vec3(0.0, 3.0, 4.0);
        let pose = pose_from_ray(start, dir);
        assert_eq!(pose.col(3), start.extend(1.0));

        // Walking along local Z follows the ray.
        let p = pose * vec3(0.0, 0.0, 5.0).extend(1.0);
        assert_abs_diff_eq!(p.truncate(), start + dir, epsilon = 1e-12);
    }
}
