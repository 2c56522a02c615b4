//! # Geometric distribution
//!
//! The [geometric distribution](https://en.wikipedia.org/wiki/Geometric_distribution)
//! is a discrete distribution that represents the number of Bernoulli trials
//! needed to get a success. The support is `{1, 2, 3, ...}`.
//!
//! This distribution *should not be confused* with the **shifted exponential**.
//!

use rand::Rng;
use rand_distr::Distribution as _;

use crate::{
    distribution_trait::Distribution,
    errors::{Result, SimulatorError},
};

pub const PARAMETERS: [&str; 1] = ["p (probability)"];

#[derive(Debug, Clone)]
pub struct Geometric {
    p: f64,
    generator: rand_distr::Geometric,
}

impl Geometric {
    /// Creates a new [Geometric] distribution.
    ///
    ///  - `p` indicates the probability of success.
    ///  - `p` must belong in the interval `(0.0, 1.0]`.
    ///      - Otherwise an error will be returned.
    pub fn new(p: f64) -> Result<Geometric> {
        if !p.is_finite() || p <= 0.0 || 1.0 < p {
            return Err(SimulatorError::invalid_parameter(
                PARAMETERS[0],
                format!("{p} is not a valid probability of success (0 < p <= 1)"),
            ));
        }

        let generator: rand_distr::Geometric = rand_distr::Geometric::new(p)
            .map_err(|e| SimulatorError::invalid_parameter(PARAMETERS[0], e.to_string()))?;

        return Ok(Geometric { p, generator });
    }

    /// Return `p` (probability of success).
    pub fn get_p(&self) -> f64 {
        return self.p;
    }
}

impl Distribution for Geometric {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        // The generator counts the failures before the first success,
        // we count the trials (including the success).
        let failures: u64 = self.generator.sample(rng);
        return failures as f64 + 1.0;
    }

    fn expected_value(&self) -> Option<f64> {
        return Some(1.0 / self.p);
    }

    fn variance(&self) -> Option<f64> {
        return Some((1.0 - self.p) / (self.p * self.p));
    }
}
