//! Prints a few vectors and matrices in the colored text format, then as JSON.

use std::f64::consts::FRAC_PI_3;

use dmath::{camera, io::text, random::Random, Json, Mat4d, Pose, Quatd, Vec3d};
use log::LevelFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter(Some(env!("CARGO_CRATE_NAME")), LevelFilter::Debug)
        .filter(Some("dmath"), LevelFilter::Debug)
        .parse_default_env()
        .init();

    let mut rng = Random::with_seed(42);
    let position: Vec3d = rng.vector_range(-5.0, 5.0);
    let pose = Pose::new(position, Quatd::from_rotation_y(FRAC_PI_3));

    text::println_vector(&position)?;
    text::println_vector(&pose.orientation.into_vec())?;

    let model = pose.to_matrix();
    let proj = camera::perspective(FRAC_PI_3, 16.0 / 9.0, 0.1, 100.0);
    text::println_matrix(&model, false)?;
    let written = text::println_matrix(&(proj * model), true)?;
    log::debug!("wrote {} bytes", written);

    let json = model.to_json_string();
    println!("{}", json);
    let back = Mat4d::from_json_str(&json)?;
    log::info!("JSON round trip exact: {}", back == model);
    Ok(())
}
