use approx::assert_abs_diff_eq;
use dmath::{
    color,
    intersection::{self, Line},
    kernel,
    random::Random,
    *,
};

const SEED: u64 = 0x9e3779b97f4a7c15;

fn init_logger() {
    env_logger::builder()
        .filter_module("dmath", log::LevelFilter::Trace)
        .is_test(true)
        .try_init()
        .ok();
}

/// Returns a random, diagonally dominant (and therefore invertible) matrix.
fn invertible<const N: usize>(rng: &mut Random) -> Matrix<f64, N, N> {
    let mut m = Matrix::from_fn(|_, _| rng.range(-1.0, 1.0));
    for i in 0..N {
        m[(i, i)] += 2.0 * N as f64;
    }
    m
}

fn check_identity<const N: usize>(rng: &mut Random) {
    let m = Matrix::<f64, N, N>::from_fn(|_, _| rng.range(-10.0, 10.0));
    let v: Vector<f64, N> = rng.vector_range(-10.0, 10.0);
    let eye = Matrix::<f64, N, N>::IDENTITY;

    assert_eq!(m * eye, m);
    assert_eq!(eye * m, m);
    assert_eq!(eye * v, v);
    assert_eq!(v * eye, v);
}

fn check_transpose<const N: usize>(rng: &mut Random) {
    let m = Matrix::<f64, N, N>::from_fn(|_, _| rng.normal(0.0, 5.0));
    assert_eq!(m.transpose().transpose(), m);

    let mut t = m;
    t.transpose_in_place();
    assert_eq!(t, m.transpose());
    for r in 0..N {
        for c in 0..N {
            assert_eq!(t[(r, c)], m[(c, r)]);
        }
    }
}

fn check_inverse<const N: usize>(rng: &mut Random) {
    let m = invertible::<N>(rng);
    let inv = m.try_invert().unwrap();
    let eye = Matrix::<f64, N, N>::IDENTITY;
    assert_abs_diff_eq!(m * inv, eye, epsilon = 1e-12);
    assert_abs_diff_eq!(inv * m, eye, epsilon = 1e-12);

    let mut singular = m;
    singular.set_col_splat(N - 1, 0.0);
    assert!(singular.try_invert().is_err());
    assert!(Matrix::<f64, N, N>::ZERO.try_invert().is_err());
}

fn check_determinant<const N: usize>(rng: &mut Random) {
    assert_eq!(Matrix::<f64, N, N>::IDENTITY.determinant(), 1.0);

    let m = Matrix::<f64, N, N>::from_fn(|_, _| rng.range(-3.0, 3.0));
    for i in 0..N {
        let mut zero_row = m;
        zero_row.set_row_splat(i, 0.0);
        assert_eq!(zero_row.determinant(), 0.0);

        let mut zero_col = m;
        zero_col.set_col_splat(i, 0.0);
        assert_eq!(zero_col.determinant(), 0.0);
    }
}

fn check_rows_and_columns<const N: usize>(rng: &mut Random) {
    let mut m = Matrix::<f64, N, N>::from_fn(|_, _| rng.uniform());
    for i in 0..N {
        let v: Vector<f64, N> = rng.vector_noise(0.0, 100.0);

        m.set_row(i, v);
        assert_eq!(m.row(i), v);
        m.set_row(i, m.row(i));
        assert_eq!(m.row(i), v);

        m.set_col(i, v);
        assert_eq!(m.col(i), v);
    }
}

fn check_json<const N: usize>(rng: &mut Random) {
    let m = Matrix::<f64, N, N>::from_fn(|_, _| rng.normal(0.0, 1e6));
    assert_eq!(Matrix::<f64, N, N>::from_json_str(&m.to_json_string()).unwrap(), m);

    let v: Vector<f64, N> = rng.vector_normal(0.0, 1e-6);
    assert_eq!(Vector::<f64, N>::from_json_str(&v.to_json_string()).unwrap(), v);

    // The serde impls and the `Json` trait produce the same column-major layout.
    let serde_m = serde_json::to_value(m).unwrap();
    assert_eq!(serde_m, m.to_json());
    assert_eq!(Matrix::<f64, N, N>::from_json(&serde_m).unwrap(), m);
    assert_eq!(serde_json::from_value::<Matrix<f64, N, N>>(m.to_json()).unwrap(), m);

    let serde_v = serde_json::to_value(v).unwrap();
    assert_eq!(serde_v, v.to_json());
    assert_eq!(serde_json::from_value::<Vector<f64, N>>(v.to_json()).unwrap(), v);
}

fn check_all<const N: usize>() {
    let mut rng = Random::with_seed(SEED ^ N as u64);
    for _ in 0..50 {
        check_identity::<N>(&mut rng);
        check_transpose::<N>(&mut rng);
        check_inverse::<N>(&mut rng);
        check_determinant::<N>(&mut rng);
        check_rows_and_columns::<N>(&mut rng);
        check_json::<N>(&mut rng);
    }
}

#[test]
fn matrix_properties_2x2() {
    init_logger();
    check_all::<2>();
}

#[test]
fn matrix_properties_3x3() {
    init_logger();
    check_all::<3>();
}

#[test]
fn matrix_properties_4x4() {
    init_logger();
    check_all::<4>();
}

#[test]
fn inverse_2x2() {
    let m = Mat2d::from_rows([[4.0, 7.0], [2.0, 6.0]]);
    assert_eq!(m.determinant(), 10.0);
    assert_abs_diff_eq!(
        m.invert(),
        Mat2d::from_rows([[0.6, -0.7], [-0.2, 0.4]]),
        epsilon = 1e-15
    );

    // Same scenario through the flat kernel.
    let flat = [4.0, 2.0, 7.0, 6.0];
    assert_eq!(kernel::det(&flat, 2), 10.0);
    let mut inv = [0.0; 4];
    kernel::inv(&mut inv, &flat, 2).unwrap();
    for (got, want) in inv.iter().zip([0.6, -0.2, -0.7, 0.4]) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-15);
    }
}

#[test]
fn inverse_extreme_magnitudes() {
    init_logger();

    // Invertible in exact arithmetic, but the determinant leaves the `f64` range.
    assert!((Mat2d::IDENTITY * 1e200).try_invert().is_err());
    assert!((Mat2d::IDENTITY * 1e-200).try_invert().is_err());
    assert!((Mat3d::IDENTITY * 1e120).try_invert().is_err());
    assert!((Mat4d::IDENTITY * 1e80).try_invert().is_err());
    assert!((Mat4d::IDENTITY * 1e-90).try_invert().is_err());

    let tiny = Mat3d::IDENTITY * 1e-50;
    let inv = tiny.try_invert().unwrap();
    assert_abs_diff_eq!(tiny * inv, Mat3d::IDENTITY, epsilon = 1e-14);
    assert_abs_diff_eq!(inv[(0, 0)] * 1e-50, 1.0, epsilon = 1e-14);

    let mut flat = [0.0; 16];
    flat[0] = 1e100;
    flat[5] = 1e100;
    flat[10] = 1e100;
    flat[15] = 1e100;
    let mut out = [3.0; 16];
    assert!(kernel::inv(&mut out, &flat, 4).is_err());
    assert_eq!(out, [3.0; 16]);
}

#[test]
fn singular_kernel_inverse_leaves_output() {
    let flat = [1.0, 2.0, 2.0, 4.0];
    let mut out = [7.0; 4];
    assert!(kernel::inv(&mut out, &flat, 2).is_err());
    assert_eq!(out, [7.0; 4]);
}

#[test]
fn quat_identity_rotation() {
    let mut rng = Random::with_seed(SEED);
    for _ in 0..100 {
        let p: Vec3d = rng.vector_range(-100.0, 100.0);
        assert_eq!(Quatd::IDENTITY.rotate(p), p);
        assert_eq!(Quatd::IDENTITY.to_rotation_matrix() * p, p);
        assert_eq!(Pose::IDENTITY.transform_point(p), p);
    }
}

#[test]
fn triangle_line() {
    init_logger();
    let v0 = vec3(-1.0, -1.0, 0.0);
    let v1 = vec3(1.0, -1.0, 0.0);
    let v2 = vec3(0.0, 1.0, 0.0);

    let down = Line::new(vec3(0.1, 0.2, 5.0), vec3(0.0, 0.0, -1.0));
    let t = intersection::triangle_line(v0, v1, v2, &down, true).unwrap();
    let hit = down.at(t);
    assert_abs_diff_eq!(hit, vec3(0.1, 0.2, 0.0), epsilon = 1e-12);

    // Back face with culling.
    let up = Line::new(vec3(0.1, 0.2, -5.0), vec3(0.0, 0.0, 1.0));
    assert_eq!(intersection::triangle_line(v0, v1, v2, &up, true), None);
    let t = intersection::triangle_line(v0, v1, v2, &up, false).unwrap();
    assert_abs_diff_eq!(up.at(t).z, 0.0, epsilon = 1e-12);

    // Passes beside the triangle.
    let beside = Line::new(vec3(3.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0));
    assert_eq!(intersection::triangle_line(v0, v1, v2, &beside, false), None);

    // Parallel to its plane.
    let flat = Line::new(vec3(0.0, 0.0, 1.0), vec3(1.0, 0.0, 0.0));
    assert_eq!(intersection::triangle_line(v0, v1, v2, &flat, false), None);
}

#[test]
fn rgb_hsv_roundtrip() {
    let colors = [
        vec3(1.0, 0.0, 0.0),
        vec3(0.0, 1.0, 0.0),
        vec3(0.0, 0.0, 1.0),
        vec3(0.5, 0.5, 0.5),
    ];
    for rgb in colors {
        let hsv = color::rgb_to_hsv(rgb);
        assert_abs_diff_eq!(color::hsv_to_rgb(hsv), rgb, epsilon = 1e-9);
    }

    let mut rng = Random::with_seed(SEED);
    for _ in 0..100 {
        let rgb: Vec3d = rng.vector();
        let back = color::hsv_to_rgb(color::rgb_to_hsv(rgb));
        assert_abs_diff_eq!(back, rgb, epsilon = 1e-9);
    }
}
