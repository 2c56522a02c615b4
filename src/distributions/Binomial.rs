//! The [Binomial distribution](https://en.wikipedia.org/wiki/Binomial_distribution)
//! is the distribution that models the number of successes of `n`
//! Bernoulli trials with success probability `p`.
//!
//! For example, if you want to know how many heads you get in 22 throws of a
//! coin, we can model this as a binomial distribution with parameters
//! `n = 22` and `p = 0.5`.

use rand::Rng;
use rand_distr::Distribution as _;

use crate::{
    distribution_trait::Distribution,
    errors::{Result, SimulatorError},
};

/// Labels of the parameters, in the order they are entered.
pub const PARAMETERS: [&str; 2] = ["n (trials)", "p (probability)"];

#[derive(Debug, Clone)]
pub struct Binomial {
    n: u64,
    p: f64,
    generator: rand_distr::Binomial,
}

impl Binomial {
    /// Creates a new [Binomial distribution](https://en.wikipedia.org/wiki/Binomial_distribution).
    ///
    ///  - `n` indicates the number of trials. It must be at least `1`.
    ///  - `p` indicates the probability of success of each trial.
    ///      - `p` must belong in the interval `[0.0, 1.0]`. Otherwise an error will be returned.
    pub fn new(n: u64, p: f64) -> Result<Binomial> {
        if n == 0 {
            return Err(SimulatorError::invalid_parameter(
                PARAMETERS[0],
                "the number of trials must be a positive integer, got 0",
            ));
        }

        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(SimulatorError::invalid_parameter(
                PARAMETERS[1],
                format!("{p} is not a probability (0 <= p <= 1)"),
            ));
        }

        let generator: rand_distr::Binomial = rand_distr::Binomial::new(n, p)
            .map_err(|e| SimulatorError::invalid_parameter(PARAMETERS[1], e.to_string()))?;

        return Ok(Binomial { n, p, generator });
    }

    /// Return `n` (number of trials).
    pub fn get_n(&self) -> u64 {
        return self.n;
    }

    /// Return `p` (probability of success).
    pub fn get_p(&self) -> f64 {
        return self.p;
    }
}

impl Distribution for Binomial {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        return self.generator.sample(rng) as f64;
    }

    fn expected_value(&self) -> Option<f64> {
        return Some(self.n as f64 * self.p);
    }

    fn variance(&self) -> Option<f64> {
        return Some(self.n as f64 * self.p * (1.0 - self.p));
    }
}
