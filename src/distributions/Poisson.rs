//! # Poisson distribution
//!
//! The [Poisson distribution](https://en.wikipedia.org/wiki/Poisson_distribution)
//! is a discrete distribution that models the number of events that happen
//! in a unit interval when they happen at an average rate `lambda`.
//!
//! Some properties:
//!  - The mean and the variance are both `lambda`.
//!  - The sumation of 2 Poisson distributed random variables is also
//!     Poisson distributed.

use rand::Rng;
use rand_distr::Distribution as _;

use crate::{
    distribution_trait::Distribution,
    errors::{Result, SimulatorError},
};

pub const PARAMETERS: [&str; 1] = ["λ (average number of occurences)"];

#[derive(Debug, Clone)]
pub struct Poisson {
    lambda: f64,
    generator: rand_distr::Poisson<f64>,
}

impl Poisson {
    /// Creates a new [Poisson] distribution. It is required that `0.0 < lambda`
    /// (and finite) or an error will be returned.
    pub fn new(lambda: f64) -> Result<Poisson> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(SimulatorError::invalid_parameter(
                PARAMETERS[0],
                format!("the rate must be a positive number, got {lambda}"),
            ));
        }

        // Also rejects rates too big for the generator.
        let generator: rand_distr::Poisson<f64> = rand_distr::Poisson::new(lambda)
            .map_err(|e| SimulatorError::invalid_parameter(PARAMETERS[0], e.to_string()))?;

        return Ok(Poisson { lambda, generator });
    }

    pub fn get_lambda(&self) -> f64 {
        return self.lambda;
    }
}

impl Distribution for Poisson {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        return self.generator.sample(rng);
    }

    fn expected_value(&self) -> Option<f64> {
        return Some(self.lambda);
    }

    fn variance(&self) -> Option<f64> {
        return Some(self.lambda);
    }
}
