//! Projection and view matrices.
//!
//! All matrices follow the OpenGL conventions: a right-handed view space looking down the negative
//! Z axis, and a clip space whose depth range is `[-1, 1]`.

use crate::{Mat4d, Vec3d};

/// Creates an orthographic projection matrix.
///
/// The box `[left, right] x [bottom, top] x [-near, -far]` is mapped to the unit cube.
pub fn ortho(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Mat4d {
    let rl = 1.0 / (right - left);
    let tb = 1.0 / (top - bottom);
    let fn_ = -1.0 / (far - near);

    let mut m = Mat4d::ZERO;
    m[(0, 0)] = 2.0 * rl;
    m[(1, 1)] = 2.0 * tb;
    m[(2, 2)] = 2.0 * fn_;
    m[(0, 3)] = -(right + left) * rl;
    m[(1, 3)] = -(top + bottom) * tb;
    m[(2, 3)] = (far + near) * fn_;
    m[(3, 3)] = 1.0;
    m
}

/// Creates a perspective projection matrix from the view frustum's extents on the near plane.
pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Mat4d {
    let rl = 1.0 / (right - left);
    let tb = 1.0 / (top - bottom);
    let fn_ = -1.0 / (far - near);
    let nv = 2.0 * near;

    let mut m = Mat4d::ZERO;
    m[(0, 0)] = nv * rl;
    m[(1, 1)] = nv * tb;
    m[(0, 2)] = (right + left) * rl;
    m[(1, 2)] = (top + bottom) * tb;
    m[(2, 2)] = (far + near) * fn_;
    m[(3, 2)] = -1.0;
    m[(2, 3)] = far * nv * fn_;
    m
}

/// Creates a symmetric perspective projection matrix.
///
/// `fovy` is the vertical field of view in radians, `aspect` the ratio of width to height.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// # use approx::assert_abs_diff_eq;
/// let proj = camera::perspective(std::f64::consts::FRAC_PI_2, 1.0, 1.0, 10.0);
///
/// // Points on the near and far plane end up at a depth of -1 and 1.
/// let near = proj * vec4(0.0, 0.0, -1.0, 1.0);
/// let far = proj * vec4(0.0, 0.0, -10.0, 1.0);
/// assert_abs_diff_eq!(near.z / near.w, -1.0, epsilon = 1e-12);
/// assert_abs_diff_eq!(far.z / far.w, 1.0, epsilon = 1e-12);
/// ```
pub fn perspective(fovy: f64, aspect: f64, near: f64, far: f64) -> Mat4d {
    let f = 1.0 / (fovy * 0.5).tan();
    let fn_ = 1.0 / (near - far);

    let mut m = Mat4d::ZERO;
    m[(0, 0)] = f / aspect;
    m[(1, 1)] = f;
    m[(2, 2)] = (near + far) * fn_;
    m[(3, 2)] = -1.0;
    m[(2, 3)] = 2.0 * near * far * fn_;
    m
}

/// Creates a view matrix for a camera at `eye` looking at `center`.
///
/// `up` must not be parallel to the viewing direction.
pub fn look_at(eye: Vec3d, center: Vec3d, up: Vec3d) -> Mat4d {
    let f = (center - eye).normalize();
    let s = f.cross(up).normalize();
    let u = s.cross(f);

    let mut m = Mat4d::IDENTITY;
    m.set_row(0, s.extend(-s.dot(eye)));
    m.set_row(1, u.extend(-u.dot(eye)));
    m.set_row(2, (-f).extend(f.dot(eye)));
    m
}
