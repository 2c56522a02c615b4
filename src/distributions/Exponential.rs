//! # Exponential distribution
//!
//! The [Exponential distribution](https://en.wikipedia.org/wiki/Exponential_distribution)
//! is a continuous distribution very important on statistics that measures
//! the time to the next poission event.
//!
//! A poission event does not have memory. Mathematically, if `e` follows
//! an Exponential distribution and `t_1 < t_2`
//! `P(t_1 < e) = P(t_1 < e | t_2 < e)`
//!
//! Here the distribution is parametrized by its scale `1/lambda` (the mean
//! waiting time) instead of the rate `lambda`.

use rand::Rng;
use rand_distr::Distribution as _;

use crate::{
    distribution_trait::Distribution,
    errors::{Result, SimulatorError},
};

pub const PARAMETERS: [&str; 1] = ["1/λ (scale)"];

/// An [Exponential distribution](https://en.wikipedia.org/wiki/Exponential_distribution).
#[derive(Debug, Clone)]
pub struct Exponential {
    scale: f64,
    generator: rand_distr::Exp<f64>,
}

impl Exponential {
    /// Creates a new [Exponential] distribution. It is required that `0.0 < scale`
    /// (and finite) or an error will be returned.
    pub fn new(scale: f64) -> Result<Exponential> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(SimulatorError::invalid_parameter(
                PARAMETERS[0],
                format!("the scale must be a positive number, got {scale}"),
            ));
        }

        let generator: rand_distr::Exp<f64> = rand_distr::Exp::new(1.0 / scale)
            .map_err(|e| SimulatorError::invalid_parameter(PARAMETERS[0], e.to_string()))?;

        return Ok(Exponential { scale, generator });
    }

    pub fn get_scale(&self) -> f64 {
        return self.scale;
    }

    /// The rate `lambda = 1 / scale`.
    pub fn get_lambda(&self) -> f64 {
        return 1.0 / self.scale;
    }
}

impl Distribution for Exponential {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        return self.generator.sample(rng);
    }

    fn expected_value(&self) -> Option<f64> {
        return Some(self.scale);
    }

    fn variance(&self) -> Option<f64> {
        return Some(self.scale * self.scale);
    }
}
