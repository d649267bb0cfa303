//! Intersection tests between planes, lines and triangles.
//!
//! Planes are given in Hessian normal form `(nx, ny, nz, d)`: a point `p` lies on the plane when
//! `dot(n, p) + d == 0`, with `n` being of unit length.
//!
//! Configurations that are (nearly) degenerate, like parallel planes or a line running parallel to
//! a plane, yield [`None`]. What counts as "nearly" is controlled by an [`Epsilon`]; the functions
//! without an `_eps` suffix use [`Epsilon::DEFAULT`].

use crate::{Mat3d, Matrix, Vec3d, Vec4d, Vector};

/// Tolerance used to detect degenerate configurations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Epsilon(pub f64);

impl Epsilon {
    pub const DEFAULT: Self = Self(0.01);

    /// Returns whether `value` is too close to zero to divide by.
    pub fn is_negligible(self, value: f64) -> bool {
        value.abs() < self.0
    }

    /// Returns whether `cos`, the cosine of an angle, is close enough to 1 that the angle is
    /// considered to be zero.
    pub fn is_aligned(self, cos: f64) -> bool {
        cos > 1.0 - self.0
    }
}

impl Default for Epsilon {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A line through `pos`, running along `dir`.
///
/// The direction does not have to be normalized. The functions returning a line parameter `t`
/// measure it in multiples of `dir`, so that the point is `pos + dir * t` (see [`Line::at`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<const N: usize> {
    pub pos: Vector<f64, N>,
    pub dir: Vector<f64, N>,
}

/// A line in 2D space.
pub type Line2 = Line<2>;
/// A line in 3D space.
pub type Line3 = Line<3>;

impl<const N: usize> Line<N> {
    pub fn new(pos: Vector<f64, N>, dir: Vector<f64, N>) -> Self {
        Self { pos, dir }
    }

    /// Returns the point `pos + dir * t`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dmath::*;
    /// use dmath::intersection::Line;
    ///
    /// let line = Line::new(vec2(1.0, 1.0), vec2(0.0, 2.0));
    /// assert_eq!(line.at(1.5), vec2(1.0, 4.0));
    /// ```
    pub fn at(&self, t: f64) -> Vector<f64, N> {
        self.pos + self.dir * t
    }
}

/// Computes the line along which two planes intersect.
///
/// The returned line has a normalized direction. Returns [`None`] if the planes are (nearly)
/// parallel.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// # use approx::assert_abs_diff_eq;
/// // The planes `z = 1` and `x = 2` meet in a line parallel to the Y axis.
/// let line = intersection::plane_plane(vec4(0.0, 0.0, 1.0, -1.0), vec4(1.0, 0.0, 0.0, -2.0))
///     .unwrap();
/// assert_abs_diff_eq!(line.pos, vec3(2.0, 0.0, 1.0), epsilon = 1e-12);
/// assert_abs_diff_eq!(line.dir, vec3(0.0, 1.0, 0.0), epsilon = 1e-12);
/// ```
pub fn plane_plane(a: Vec4d, b: Vec4d) -> Option<Line3> {
    plane_plane_eps(a, b, Epsilon::DEFAULT)
}

/// Like [`plane_plane`], with a custom tolerance.
pub fn plane_plane_eps(a: Vec4d, b: Vec4d, eps: Epsilon) -> Option<Line3> {
    let (na, nb) = (a.truncate(), b.truncate());
    if eps.is_aligned(na.dot(nb)) {
        log::trace!("plane_plane: planes {:?} and {:?} are parallel", a, b);
        return None;
    }

    let dir = na.cross(nb).normalize();

    // The point has to lie on both planes, and is chosen to be the closest to the origin along
    // `dir`.
    let system: Mat3d = Matrix::from_rows([na, nb, dir]);
    let rhs = Vector::from([-a.w, -b.w, 0.0]);
    match system.try_invert() {
        Ok(inv) => Some(Line::new(inv * rhs, dir)),
        Err(e) => {
            // Happens for anti-parallel planes, whose cross product vanishes.
            log::trace!("plane_plane: {} ({:?} and {:?})", e, a, b);
            None
        }
    }
}

/// Computes the point at which `line` passes through `plane`.
///
/// Returns [`None`] if the line is (nearly) parallel to the plane.
pub fn plane_line(plane: Vec4d, line: &Line3) -> Option<Vec3d> {
    plane_line_eps(plane, line, Epsilon::DEFAULT)
}

/// Like [`plane_line`], with a custom tolerance.
pub fn plane_line_eps(plane: Vec4d, line: &Line3, eps: Epsilon) -> Option<Vec3d> {
    let normal = plane.truncate();
    let cos = normal.dot(line.dir);
    if eps.is_negligible(cos) {
        log::trace!("plane_line: {:?} is parallel to plane {:?}", line, plane);
        return None;
    }

    let plane_point = normal * -plane.w;
    let w = line.pos - plane_point;
    let t = -normal.dot(w) / cos;
    Some(line.at(t))
}

/// Computes where `line` passes through the triangle `(v0, v1, v2)`, using the Möller-Trumbore
/// algorithm.
///
/// Returns the line parameter `t` of the hit point (see [`Line::at`]), or [`None`] if the line
/// misses the triangle or runs parallel to it.
///
/// If `culling` is `true`, only triangles whose front faces the line are hit. The front face is
/// the one from which `v0`, `v1`, `v2` appear in counter-clockwise order.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// use dmath::intersection::{self, Line};
///
/// let (v0, v1, v2) = (vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
/// let down = Line::new(vec3(0.25, 0.25, 2.0), vec3(0.0, 0.0, -1.0));
/// assert_eq!(intersection::triangle_line(v0, v1, v2, &down, true), Some(2.0));
///
/// let up = Line::new(vec3(0.25, 0.25, 2.0), vec3(0.0, 0.0, 1.0));
/// assert_eq!(intersection::triangle_line(v0, v1, v2, &up, true), None);
/// ```
pub fn triangle_line(v0: Vec3d, v1: Vec3d, v2: Vec3d, line: &Line3, culling: bool) -> Option<f64> {
    triangle_line_eps(v0, v1, v2, line, culling, Epsilon::DEFAULT)
}

/// Like [`triangle_line`], with a custom tolerance.
pub fn triangle_line_eps(
    v0: Vec3d,
    v1: Vec3d,
    v2: Vec3d,
    line: &Line3,
    culling: bool,
    eps: Epsilon,
) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let pvec = line.dir.cross(edge2);
    let det = edge1.dot(pvec);

    let degenerate = if culling {
        det < eps.0
    } else {
        eps.is_negligible(det)
    };
    if degenerate {
        log::trace!("triangle_line: det={} (culling={})", det, culling);
        return None;
    }

    let inv_det = 1.0 / det;

    let tvec = line.pos - v0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = line.dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    Some(edge2.dot(qvec) * inv_det)
}

/// Computes the parameters `(t_a, t_b)` of the points on lines `a` and `b` that are closest to
/// each other.
///
/// For intersecting lines, `a.at(t_a)` and `b.at(t_b)` are the same point. Returns [`None`] if
/// the lines are (nearly) parallel.
///
/// Works for 2D and 3D lines.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// use dmath::intersection::{self, Line};
///
/// let a = Line::new(vec2(0.0, 0.0), vec2(1.0, 0.0));
/// let b = Line::new(vec2(3.0, -1.0), vec2(0.0, 2.0));
/// assert_eq!(intersection::line_line(&a, &b), Some((3.0, 0.5)));
/// ```
pub fn line_line<const N: usize>(a: &Line<N>, b: &Line<N>) -> Option<(f64, f64)> {
    line_line_eps(a, b, Epsilon::DEFAULT)
}

/// Like [`line_line`], with a custom tolerance.
pub fn line_line_eps<const N: usize>(
    a: &Line<N>,
    b: &Line<N>,
    eps: Epsilon,
) -> Option<(f64, f64)> {
    let r = a.pos - b.pos;
    let aa = a.dir.dot(a.dir);
    let ab = a.dir.dot(b.dir);
    let ar = a.dir.dot(r);
    let bb = b.dir.dot(b.dir);
    let br = b.dir.dot(r);

    let denom = aa * bb - ab * ab;
    if eps.is_negligible(denom) {
        log::trace!("line_line: {:?} and {:?} are parallel", a, b);
        return None;
    }

    let t_a = (ab * br - ar * bb) / denom;
    let t_b = (aa * br - ab * ar) / denom;
    Some((t_a, t_b))
}

/// Returns the parameter `t` of the point on `line` that is closest to `point`.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// use dmath::intersection::{self, Line};
///
/// let line = Line::new(vec3(1.0, 0.0, 0.0), vec3(2.0, 0.0, 0.0));
/// assert_eq!(intersection::line_point(&line, vec3(4.0, 7.0, -1.0)), 1.5);
/// ```
pub fn line_point<const N: usize>(line: &Line<N>, point: Vector<f64, N>) -> f64 {
    (point - line.pos).dot(line.dir) / line.dir.dot(line.dir)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::{vec2, vec3, vec4};

    use super::*;

    #[test]
    fn epsilon() {
        assert_eq!(Epsilon::default(), Epsilon(0.01));
        assert!(Epsilon::DEFAULT.is_negligible(-0.005));
        assert!(!Epsilon::DEFAULT.is_negligible(0.02));
        assert!(Epsilon::DEFAULT.is_aligned(0.995));
        assert!(!Epsilon::DEFAULT.is_aligned(0.98));
    }

    #[test]
    fn plane_plane_line_lies_on_both() {
        let a = vec4(0.0, 0.6, 0.8, -2.0);
        let b = vec4(1.0, 0.0, 0.0, 0.5);
        let line = plane_plane(a, b).unwrap();

        assert_abs_diff_eq!(line.dir.length(), 1.0, epsilon = 1e-12);
        for t in [-3.0, 0.0, 2.5] {
            let p = line.at(t);
            assert_abs_diff_eq!(a.truncate().dot(p) + a.w, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(b.truncate().dot(p) + b.w, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn plane_plane_parallel() {
        let a = vec4(0.0, 0.0, 1.0, 0.0);
        assert_eq!(plane_plane(a, vec4(0.0, 0.0, 1.0, -3.0)), None);
        assert_eq!(plane_plane(a, vec4(0.0, 0.0, -1.0, -3.0)), None);

        // Tilted by ~11°.
        let tilted = vec4(0.0, 0.199, 0.98, 0.0);
        assert!(plane_plane(a, tilted).is_some());
        assert_eq!(plane_plane_eps(a, tilted, Epsilon(0.1)), None);
    }

    #[test]
    fn plane_line_hit() {
        let plane = vec4(0.0, 0.0, 1.0, -2.0);
        let line = Line::new(vec3(1.0, 1.0, 0.0), vec3(1.0, 0.0, 1.0));
        let p = plane_line(plane, &line).unwrap();
        assert_abs_diff_eq!(p, vec3(3.0, 1.0, 2.0), epsilon = 1e-12);

        let parallel = Line::new(vec3(1.0, 1.0, 0.0), vec3(1.0, 0.0, 0.005));
        assert_eq!(plane_line(plane, &parallel), None);
        assert!(plane_line_eps(plane, &parallel, Epsilon(0.001)).is_some());
    }

    #[test]
    fn triangle_line_hit_and_miss() {
        let (v0, v1, v2) = (vec3(-1.0, -1.0, 0.0), vec3(1.0, -1.0, 0.0), vec3(0.0, 1.0, 0.0));
        let line = Line::new(vec3(0.1, 0.0, 5.0), vec3(0.0, 0.0, -1.0));

        let t = triangle_line(v0, v1, v2, &line, true).unwrap();
        assert_abs_diff_eq!(line.at(t).z, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t, 5.0, epsilon = 1e-12);

        // Outside of the triangle.
        let outside = Line::new(vec3(2.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0));
        assert_eq!(triangle_line(v0, v1, v2, &outside, false), None);

        // Back face: only hit without culling.
        let reversed = Line::new(vec3(0.1, 0.0, -5.0), vec3(0.0, 0.0, 1.0));
        assert_eq!(triangle_line(v0, v1, v2, &reversed, true), None);
        let t = triangle_line(v0, v1, v2, &reversed, false).unwrap();
        assert_abs_diff_eq!(t, 5.0, epsilon = 1e-12);

        // Parallel to the triangle.
        let grazing = Line::new(vec3(0.0, 0.0, 1.0), vec3(1.0, 0.0, 0.0));
        assert_eq!(triangle_line(v0, v1, v2, &grazing, false), None);
    }

    #[test]
    fn line_line_3d() {
        let a = Line::new(vec3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0));
        let b = Line::new(vec3(2.0, 3.0, 1.0), vec3(0.0, 1.0, 0.0));
        let (ta, tb) = line_line(&a, &b).unwrap();
        assert_abs_diff_eq!(a.at(ta), vec3(2.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(b.at(tb), vec3(2.0, 0.0, 1.0), epsilon = 1e-12);

        let parallel = Line::new(vec3(0.0, 1.0, 0.0), vec3(-2.0, 0.0, 0.0));
        assert_eq!(line_line(&a, &parallel), None);
    }

    #[test]
    fn line_line_2d() {
        let a = Line2::new(vec2(1.0, 1.0), vec2(1.0, 1.0));
        let b = Line2::new(vec2(4.0, 0.0), vec2(-1.0, 1.0));
        let (ta, tb) = line_line(&a, &b).unwrap();
        assert_abs_diff_eq!(a.at(ta), b.at(tb), epsilon = 1e-12);
        assert_abs_diff_eq!(a.at(ta), vec2(2.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn line_point_projection() {
        let line = Line2::new(vec2(0.0, 1.0), vec2(0.0, 4.0));
        assert_eq!(line_point(&line, vec2(5.0, 3.0)), 0.5);
        assert_eq!(line_point(&line, line.pos), 0.0);
    }
}
