//! # Uniform distribution
//!
//! The [uniform distribution](https://en.wikipedia.org/wiki/Continuous_uniform_distribution)
//! is a continuous distributions where all possible outcomes in the interval `[a, b)` have
//! equal likelyhood of happening.
//!

use rand::Rng;
use rand_distr::Distribution as _;

use crate::{
    distribution_trait::Distribution,
    errors::{Result, SimulatorError},
};

pub const PARAMETERS: [&str; 2] = ["a (low)", "b (high)"];

#[derive(Debug, Clone)]
pub struct Uniform {
    /// The minimum value
    a: f64,
    /// The maximum value (excluded)
    b: f64,
    generator: rand::distr::Uniform<f64>,
}

impl Uniform {
    /// Creates a new [uniform distribution](https://en.wikipedia.org/wiki/Continuous_uniform_distribution).
    ///
    ///  - `a` indicates the minimum value.
    ///  - `b` indicates the maximum value.
    ///  - `a < b` must be fulfilled or an error will be returned.
    ///  - `a` and `b` must both be finite values (no `+-inf` or NaNs)
    pub fn new(a: f64, b: f64) -> Result<Uniform> {
        if !a.is_finite() {
            return Err(SimulatorError::invalid_parameter(
                PARAMETERS[0],
                format!("the lower bound must be finite, got {a}"),
            ));
        }
        if !b.is_finite() {
            return Err(SimulatorError::invalid_parameter(
                PARAMETERS[1],
                format!("the upper bound must be finite, got {b}"),
            ));
        }

        if b <= a {
            return Err(SimulatorError::invalid_parameter(
                PARAMETERS[1],
                format!("the upper bound ({b}) must be greater than the lower bound ({a})"),
            ));
        }

        // fails if `b - a` overflows
        let generator: rand::distr::Uniform<f64> = rand::distr::Uniform::new(a, b)
            .map_err(|e| SimulatorError::invalid_parameter(PARAMETERS[1], e.to_string()))?;

        return Ok(Uniform { a, b, generator });
    }

    /// Return `a` (minimum value).
    pub const fn get_a(&self) -> f64 {
        return self.a;
    }

    /// Return `b` (maximum value).
    pub const fn get_b(&self) -> f64 {
        return self.b;
    }
}

impl Distribution for Uniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        return self.generator.sample(rng);
    }

    fn expected_value(&self) -> Option<f64> {
        return Some((self.a + self.b) * 0.5);
    }

    fn variance(&self) -> Option<f64> {
        let width: f64 = self.b - self.a;
        return Some(width * width / 12.0);
    }
}
