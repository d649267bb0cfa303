//! Conversion between the RGB and HSV color models.
//!
//! All components, including the hue, are in range `[0, 1]`. A hue of `0` (or `1`) is red, `1/3`
//! is green and `2/3` is blue.
//!
//! The conversions are branchless: instead of looking up the sector a hue lies in, they blend
//! between candidate results with [`Vector::mix`](crate::Vector::mix) and a step function. The
//! `_unchecked` variants expect their input to already be in range; the others clamp it first.

use crate::{vec3, vec4, Vec3d, Vec4d};

/// Keeps divisions by the chroma and the value finite for black and gray inputs.
const EPSILON: f64 = 1.0e-10;

/// `0` if `x < edge`, `1` otherwise.
fn step(edge: f64, x: f64) -> f64 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// Converts an RGB color to HSV, without clamping the input.
pub fn rgb_to_hsv_unchecked(rgb: Vec3d) -> Vec3d {
    let [r, g, b] = rgb.into_array();

    // Order the blue and green channels, keeping the hue offset of the larger one.
    let bg = vec4(b, g, -1.0, 2.0 / 3.0);
    let gb = vec4(g, b, 0.0, -1.0 / 3.0);
    let p = bg.mix(gb, step(b, g));

    // Bring the red channel into the order. `q.x` ends up being the largest channel.
    let pr = vec4(p.x, p.y, p.w, r);
    let rp = vec4(r, p.y, p.z, p.x);
    let q = pr.mix(rp, step(p.x, r));

    let chroma = q.x - q.w.min(q.y);
    let hue = (q.z + (q.w - q.y) / (6.0 * chroma + EPSILON)).abs();
    let saturation = chroma / (q.x + EPSILON);
    vec3(hue, saturation, q.x)
}

/// Converts an HSV color to RGB, without clamping the input.
///
/// The hue wraps around, so `1.25` is the same hue as `0.25`, and `-0.1` the same as `0.9`.
pub fn hsv_to_rgb_unchecked(hsv: Vec3d) -> Vec3d {
    let [h, s, v] = hsv.into_array();

    let offsets = vec3(h, h + 2.0 / 3.0, h + 1.0 / 3.0).fract();
    let saturated = ((offsets * 6.0 - Vec3d::splat(3.0)).abs() - Vec3d::splat(1.0))
        .clamp_splat(0.0, 1.0);
    Vec3d::splat(1.0).mix(saturated, s) * v
}

/// Converts an RGB color to HSV.
///
/// The RGB components are clamped to `[0, 1]` first.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// # use approx::assert_abs_diff_eq;
/// let hsv = color::rgb_to_hsv(vec3(0.0, 0.5, 1.0));
/// assert_abs_diff_eq!(hsv, vec3(7.0 / 12.0, 1.0, 1.0), epsilon = 1e-9);
/// ```
pub fn rgb_to_hsv(rgb: Vec3d) -> Vec3d {
    rgb_to_hsv_unchecked(rgb.clamp_splat(0.0, 1.0))
}

/// Converts an HSV color to RGB.
///
/// Saturation and value are clamped to `[0, 1]`, while the hue wraps around.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// # use approx::assert_abs_diff_eq;
/// let rgb = color::hsv_to_rgb(vec3(1.0 / 3.0, 2.0, 0.5));
/// assert_abs_diff_eq!(rgb, vec3(0.0, 0.5, 0.0), epsilon = 1e-12);
/// ```
pub fn hsv_to_rgb(hsv: Vec3d) -> Vec3d {
    let [h, s, v] = hsv.into_array();
    hsv_to_rgb_unchecked(vec3(h, s.clamp(0.0, 1.0), v.clamp(0.0, 1.0)))
}

/// Like [`rgb_to_hsv_unchecked`], passing the alpha channel through.
pub fn rgba_to_hsva_unchecked(rgba: Vec4d) -> Vec4d {
    rgb_to_hsv_unchecked(rgba.truncate()).extend(rgba.w)
}

/// Like [`rgb_to_hsv`], passing the alpha channel through.
pub fn rgba_to_hsva(rgba: Vec4d) -> Vec4d {
    rgb_to_hsv(rgba.truncate()).extend(rgba.w)
}

/// Like [`hsv_to_rgb_unchecked`], passing the alpha channel through.
pub fn hsva_to_rgba_unchecked(hsva: Vec4d) -> Vec4d {
    hsv_to_rgb_unchecked(hsva.truncate()).extend(hsva.w)
}

/// Like [`hsv_to_rgb`], passing the alpha channel through.
pub fn hsva_to_rgba(hsva: Vec4d) -> Vec4d {
    hsv_to_rgb(hsva.truncate()).extend(hsva.w)
}
