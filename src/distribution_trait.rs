//! The [Distribution] trait is the common interface of the six distributions
//! the simulator can sample from (see [crate::distributions]).
//!
//! The only required method to draw values is [Distribution::sample]. Every
//! implementor delegates the actual draw to a variate generator of
//! [rand_distr] fed by the given random number generator, so passing a seeded
//! [StdRng](rand::rngs::StdRng) gives reproducible samples.

use rand::Rng;

pub trait Distribution {
    /// Draws a single value.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Draws `n` independent values, in generation order.
    fn sample_multiple<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<f64> {
        let mut ret: Vec<f64> = Vec::with_capacity(n);
        for _ in 0..n {
            ret.push(self.sample(rng));
        }
        return ret;
    }

    /// The theoretical mean of the distribution, if it is defined.
    fn expected_value(&self) -> Option<f64>;

    /// The theoretical variance of the distribution, if it is defined.
    fn variance(&self) -> Option<f64>;
}
