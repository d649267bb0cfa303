//! Random scalars and vectors.

use std::f64::consts::TAU;

use crate::Vector;

/// `normal` rejects smaller uniform samples, since their logarithm diverges.
const MIN_NORMAL_SAMPLE: f64 = 1.0e-8;

/// A random number generator producing `f64` scalars and vectors.
///
/// Wraps a [`fastrand::Rng`]. Use [`Random::with_seed`] to get a reproducible sequence.
///
/// # Examples
///
/// ```
/// # use dmath::*;
/// use dmath::random::Random;
///
/// let mut a = Random::with_seed(7);
/// let mut b = Random::with_seed(7);
/// let v: Vec3d = a.vector_range(-1.0, 1.0);
/// assert_eq!(v, b.vector_range(-1.0, 1.0));
/// assert!(v.as_slice().iter().all(|x| (-1.0..1.0).contains(x)));
/// ```
#[derive(Debug, Clone)]
pub struct Random {
    rng: fastrand::Rng,
}

impl Random {
    /// Creates a generator with a random seed.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates a generator that always produces the same sequence for the same `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Returns a uniformly distributed number in range `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.f64()
    }

    /// Returns a uniformly distributed number in range `[a, b)`.
    pub fn range(&mut self, a: f64, b: f64) -> f64 {
        a + (b - a) * self.uniform()
    }

    /// Returns a uniformly distributed number in range `[mean - amplitude, mean + amplitude)`.
    pub fn noise(&mut self, mean: f64, amplitude: f64) -> f64 {
        mean - amplitude + 2.0 * amplitude * self.uniform()
    }

    /// Returns a normally distributed number with the given mean and standard deviation.
    ///
    /// Uses the Box-Muller transform.
    pub fn normal(&mut self, mean: f64, sigma: f64) -> f64 {
        let u1 = loop {
            let u = self.uniform();
            if u > MIN_NORMAL_SAMPLE {
                break u;
            }
        };
        let u2 = self.uniform();
        let magnitude = sigma * (-2.0 * u1.ln()).sqrt();
        mean + magnitude * (TAU * u2).cos()
    }

    /// Returns a vector of [`Random::uniform`] elements.
    pub fn vector<const N: usize>(&mut self) -> Vector<f64, N> {
        Vector::from_fn(|_| self.uniform())
    }

    /// Returns a vector of [`Random::range`] elements, all sharing the same range.
    pub fn vector_range<const N: usize>(&mut self, a: f64, b: f64) -> Vector<f64, N> {
        Vector::from_fn(|_| self.range(a, b))
    }

    /// Returns a vector of [`Random::range`] elements, with a separate range per element.
    pub fn vector_range_vec<const N: usize>(
        &mut self,
        a: Vector<f64, N>,
        b: Vector<f64, N>,
    ) -> Vector<f64, N> {
        Vector::from_fn(|i| self.range(a[i], b[i]))
    }

    /// Returns a vector of [`Random::noise`] elements, all sharing the same parameters.
    pub fn vector_noise<const N: usize>(&mut self, mean: f64, amplitude: f64) -> Vector<f64, N> {
        Vector::from_fn(|_| self.noise(mean, amplitude))
    }

    /// Returns a vector of [`Random::noise`] elements, with separate parameters per element.
    pub fn vector_noise_vec<const N: usize>(
        &mut self,
        mean: Vector<f64, N>,
        amplitude: Vector<f64, N>,
    ) -> Vector<f64, N> {
        Vector::from_fn(|i| self.noise(mean[i], amplitude[i]))
    }

    /// Returns a vector of [`Random::normal`] elements, all sharing the same parameters.
    pub fn vector_normal<const N: usize>(&mut self, mean: f64, sigma: f64) -> Vector<f64, N> {
        Vector::from_fn(|_| self.normal(mean, sigma))
    }

    /// Returns a vector of [`Random::normal`] elements, with separate parameters per element.
    pub fn vector_normal_vec<const N: usize>(
        &mut self,
        mean: Vector<f64, N>,
        sigma: Vector<f64, N>,
    ) -> Vector<f64, N> {
        Vector::from_fn(|i| self.normal(mean[i], sigma[i]))
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}
