//! Turns a [DistributionSpec] and a sample size into a [Sample].
//!
//! [generate] uses the thread local random number generator; [generate_with]
//! accepts any [Rng] so a seeded one gives reproducible samples.

use rand::Rng;
use tracing::{debug, warn};

use crate::{
    distributions::DistributionSpec,
    errors::{Result, SimulatorError},
    samples::Sample,
};

/// A distribution and how many values to draw from it.
///
/// ```
/// use DistributionSimulator::{distributions::DistributionSpec, sampler::SampleRequest};
///
/// let request: SampleRequest = SampleRequest::builder()
///     .distribution(DistributionSpec::Poisson { lambda: 3.0 })
///     .count(100)
///     .build();
/// assert_eq!(request.generate().unwrap().len(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, bon::Builder)]
pub struct SampleRequest {
    pub distribution: DistributionSpec,
    pub count: usize,
}

impl SampleRequest {
    pub fn generate(&self) -> Result<Sample> {
        return generate(self.distribution, self.count);
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Sample> {
        return generate_with(rng, self.distribution, self.count);
    }
}

/// Draws `count` independent values from `spec` with the thread local
/// random number generator.
///
/// See [generate_with] for the errors.
pub fn generate(spec: DistributionSpec, count: usize) -> Result<Sample> {
    let mut rng: rand::rngs::ThreadRng = rand::rng();
    return generate_with(&mut rng, spec, count);
}

/// Draws `count` independent values from `spec` using `rng`.
///
/// Errors:
///  - [SimulatorError::InvalidSampleSize] if `count == 0`.
///  - [SimulatorError::InvalidParameter] if a parameter is outside the domain
///     of the distribution, or if the parameters are so large that the draws
///     are not finite.
///
/// On error nothing is returned: the result is either a sample of exactly
/// `count` values or an error.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, spec: DistributionSpec, count: usize) -> Result<Sample> {
    if count == 0 {
        return Err(SimulatorError::InvalidSampleSize(
            "the sample size must be a positive integer, got 0".to_string(),
        ));
    }

    debug!(distribution = %spec, count, "generating sample");
    let values: Vec<f64> = spec.sample_multiple(rng, count)?;

    if values.iter().any(|v: &f64| !v.is_finite()) {
        warn!(distribution = %spec, "sample contains non-finite values");
        let labels: &[&str] = spec.kind().parameter_labels();
        return Err(SimulatorError::invalid_parameter(
            labels[labels.len() - 1],
            "the parameters are too large, the sample contains non-finite values",
        ));
    }

    debug_assert_eq!(values.len(), count);
    return Ok(Sample::new(values));
}

/// Parses the raw text of the sample size field.
///
/// Anything that is not a positive integer gives [SimulatorError::InvalidSampleSize].
pub fn parse_sample_size(field: &str) -> Result<usize> {
    let trimmed: &str = field.trim();

    let count: usize = trimmed.parse::<usize>().map_err(|_| {
        SimulatorError::InvalidSampleSize(format!("`{trimmed}` is not a positive integer"))
    })?;

    if count == 0 {
        return Err(SimulatorError::InvalidSampleSize(
            "the sample size must be a positive integer, got 0".to_string(),
        ));
    }

    return Ok(count);
}
