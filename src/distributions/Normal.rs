//! # Normal distribution
//!
//! The [Normal distribution](https://en.wikipedia.org/wiki/Normal_distribution)
//! is one of the most important distributions in statistics because of the
//! [central limit theorem](https://en.wikipedia.org/wiki/Central_limit_theorem)
//! (CLT), wich is a key theorem that says that the sum of `n` random variables
//! of **any** distribution (with finite variance) will tend to be normally
//! distributed as `n` grows.
//!
//! It has 2 parameters: the mean (`μ`) and the standard deviation (`σ`).

use rand::Rng;
use rand_distr::Distribution as _;

use crate::{
    distribution_trait::Distribution,
    errors::{Result, SimulatorError},
};

pub const PARAMETERS: [&str; 2] = ["μ (mean)", "σ (standard deviation)"];

#[derive(Debug, Clone)]
pub struct Normal {
    /// The mean of the distribution
    mean: f64,
    /// The standard deviation of the distribution
    standard_deviation: f64,
    generator: rand_distr::Normal<f64>,
}

impl Normal {
    /// Create a [Normal] distribution.
    ///
    ///  - The `mean` must be finite (No `+-inf` or NaNs)
    ///  - The `standard_deviation` must be finite (No `+-inf` or NaNs)
    ///  - The `standard_deviation` must be stricly greater than `0.0`.
    ///
    /// If those conditions are not fullfiled, an error will be returned.
    pub fn new(mean: f64, standard_deviation: f64) -> Result<Normal> {
        if !mean.is_finite() {
            return Err(SimulatorError::invalid_parameter(
                PARAMETERS[0],
                format!("the mean must be finite, got {mean}"),
            ));
        }
        if !standard_deviation.is_finite() || standard_deviation <= 0.0 {
            return Err(SimulatorError::invalid_parameter(
                PARAMETERS[1],
                format!("the standard deviation must be a positive number, got {standard_deviation}"),
            ));
        }

        let generator: rand_distr::Normal<f64> = rand_distr::Normal::new(mean, standard_deviation)
            .map_err(|e| SimulatorError::invalid_parameter(PARAMETERS[1], e.to_string()))?;

        return Ok(Normal {
            mean,
            standard_deviation,
            generator,
        });
    }

    /// Returns the mean, the first parameter of the normal distribution.
    pub const fn get_mean(&self) -> f64 {
        return self.mean;
    }

    /// Returns the standard deviation, the second parameter of the normal distribution.
    pub const fn get_standard_deviation(&self) -> f64 {
        return self.standard_deviation;
    }
}

impl Distribution for Normal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        return self.generator.sample(rng);
    }

    fn expected_value(&self) -> Option<f64> {
        return Some(self.mean);
    }

    fn variance(&self) -> Option<f64> {
        return Some(self.standard_deviation * self.standard_deviation);
    }
}
