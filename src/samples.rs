//! Collected data is stored in a [Sample], which also allows the computation
//! of the summary statistics shown to the user ([SummaryStatistics]).
//!
//! A [Sample] is immutable: the values stay in generation order and every
//! statistic is computed from scratch from them. Nothing is cached, so two
//! calls to [summarize] on the same sample always agree.

use crate::{
    configuration::STATISTIC_DECIMALS,
    errors::{Result, SimulatorError},
};

/// A finite sequence of observations, in the order they were generated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample {
    data: Vec<f64>,
}

/// The four statistics of a [Sample].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    /// Arithmetic average.
    pub mean: f64,
    /// Middle value of the sorted data (average of the 2 middle values
    /// if the length is even).
    pub median: f64,
    /// **Population** variance (the sum of squared deviations divided by `n`,
    /// not by `n - 1`).
    pub variance: f64,
    /// Square root of the population variance.
    pub standard_deviation: f64,
}

impl Sample {
    /// Creates a new [Sample] that takes ownership of `data`.
    pub fn new(data: Vec<f64>) -> Sample {
        return Sample { data };
    }

    /// Gives a reference to the contained data, in generation order.
    pub fn values(&self) -> &[f64] {
        return &self.data;
    }

    /// Returns the contained data and drops self.
    pub fn into_values(self) -> Vec<f64> {
        return self.data;
    }

    pub fn len(&self) -> usize {
        return self.data.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.data.is_empty();
    }

    /// A sorted copy of the data. The sample itself is not modified.
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted: Vec<f64> = self.data.clone();
        sorted.sort_unstable_by(f64::total_cmp);
        return sorted;
    }

    /// Returns the minimum among the data or `None` if there are 0 samples.
    pub fn minimum(&self) -> Option<f64> {
        return self.data.iter().copied().reduce(f64::min);
    }

    /// Returns the maximum among the data or `None` if there are 0 samples.
    pub fn maximum(&self) -> Option<f64> {
        return self.data.iter().copied().reduce(f64::max);
    }

    /// Computes the sample [mean](https://en.wikipedia.org/wiki/Mean).
    ///
    /// Returns [None] if there are 0 samples.
    pub fn mean(&self) -> Option<f64> {
        let n: usize = self.data.len();
        if n == 0 {
            // No mean for 0 samples.
            return None;
        }

        let sum: f64 = self.data.iter().sum::<f64>();
        if sum.is_finite() {
            return Some(sum / n as f64);
        }

        // The sum of large values can overflow even if the mean does not.
        let inv_n: f64 = 1.0 / n as f64;
        return Some(self.data.iter().map(|&s: &f64| s * inv_n).sum::<f64>());
    }

    /// Computes the [median](https://en.wikipedia.org/wiki/Median).
    ///
    /// Returns [None] if there are 0 samples.
    pub fn median(&self) -> Option<f64> {
        let n: usize = self.data.len();
        if n == 0 {
            return None;
        }

        let sorted: Vec<f64> = self.sorted();
        let half: usize = n / 2;

        if n % 2 == 1 {
            return Some(sorted[half]);
        }

        return Some(sorted[half - 1] * 0.5 + sorted[half] * 0.5);
    }

    /// Computes the population [variance](https://en.wikipedia.org/wiki/Variance)
    /// (divides by `n`).
    ///
    /// Returns [None] if there are 0 samples. A single sample has variance `0.0`.
    pub fn variance(&self) -> Option<f64> {
        let mean: f64 = self.mean()?;
        let n: f64 = self.data.len() as f64;

        // 2 pass algorithm: the deviations are computed once the mean is known
        let mut accumulator: f64 = 0.0;
        for &s in &self.data {
            let centered: f64 = s - mean;
            accumulator += centered * centered;
        }

        return Some(accumulator / n);
    }

    /// Computes the population standard deviation, the square root of
    /// [Sample::variance].
    pub fn standard_deviation(&self) -> Option<f64> {
        return self.variance().map(f64::sqrt);
    }
}

impl From<Vec<f64>> for Sample {
    fn from(data: Vec<f64>) -> Sample {
        return Sample::new(data);
    }
}

impl SummaryStatistics {
    /// The text of each statistic, as shown to the user
    /// (`Mean: 4.000`, `Median: 4.000`...).
    pub fn lines(&self) -> [String; 4] {
        return [
            format!("Mean: {:.*}", STATISTIC_DECIMALS, self.mean),
            format!("Median: {:.*}", STATISTIC_DECIMALS, self.median),
            format!("Variance: {:.*}", STATISTIC_DECIMALS, self.variance),
            format!("Standard Deviation: {:.*}", STATISTIC_DECIMALS, self.standard_deviation),
        ];
    }

    /// The text shown when there are no statistics to show.
    pub fn unavailable_lines() -> [String; 4] {
        return [
            "Mean: N/A".to_string(),
            "Median: N/A".to_string(),
            "Variance: N/A".to_string(),
            "Standard Deviation: N/A".to_string(),
        ];
    }
}

/// Computes the [SummaryStatistics] of `sample`.
///
/// Returns [SimulatorError::EmptySample] if the sample has no values.
pub fn summarize(sample: &Sample) -> Result<SummaryStatistics> {
    let (Some(mean), Some(median), Some(variance)) = (sample.mean(), sample.median(), sample.variance())
    else {
        return Err(SimulatorError::EmptySample);
    };

    return Ok(SummaryStatistics {
        mean,
        median,
        variance,
        standard_deviation: variance.sqrt(),
    });
}
