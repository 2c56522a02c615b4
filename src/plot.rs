//! Plot data derived from a [Sample]: a [Histogram] with a fixed number of
//! bins or an [EmpiricalCdf]. A [Rendering] bundles one of them with the title
//! and axis labels, and is what [render](crate::render) draws and exports.

use std::{fmt, str::FromStr};

use crate::{
    configuration::plot::{MAX_HISTOGRAM_BINS, RELATIVE_PAD},
    distributions::DistributionKind,
    errors::{Result, SimulatorError},
    samples::Sample,
};

/// How a sample is visualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotType {
    #[default]
    Histogram,
    Cdf,
}

impl PlotType {
    pub const ALL: [PlotType; 2] = [PlotType::Histogram, PlotType::Cdf];

    pub const fn name(&self) -> &'static str {
        return match self {
            PlotType::Histogram => "Histogram",
            PlotType::Cdf => "CDF",
        };
    }

    /// Label of the vertical axis.
    pub const fn y_label(&self) -> &'static str {
        return match self {
            PlotType::Histogram => "Frequency",
            PlotType::Cdf => "Probability",
        };
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PlotType {
    type Err = SimulatorError;

    fn from_str(s: &str) -> Result<PlotType> {
        let trimmed: &str = s.trim();
        return match trimmed.to_lowercase().as_str() {
            "histogram" | "hist" => Ok(PlotType::Histogram),
            "cdf" => Ok(PlotType::Cdf),
            _ => Err(SimulatorError::invalid_parameter(
                "Plot Type",
                format!("`{trimmed}` is not a plot type (Histogram or CDF)"),
            )),
        };
    }
}

/// Counts of the values of a sample in equally wide bins.
///
/// The bins cover `[minimum, maximum]` of the sample. Every bin is half open
/// (`[left, right)`) except the last one, which also includes its right edge.
/// If all the values are equal the range is widened to `[v - 0.5, v + 0.5]`
/// (or by `|v| * 1e-9` on each side if that is larger).
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` increasing edges.
    pub edges: Vec<f64>,
    /// One count per bin.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bins `sample` into `bins` bins. `bins` must be in `1..=10_000`.
    pub fn from_sample(sample: &Sample, bins: usize) -> Result<Histogram> {
        if bins == 0 || MAX_HISTOGRAM_BINS < bins {
            return Err(SimulatorError::invalid_parameter(
                "bins",
                format!("the histogram needs between 1 and {MAX_HISTOGRAM_BINS} bins, got {bins}"),
            ));
        }

        let (low, high): (f64, f64) = value_range(sample)?;

        let bins_f64: f64 = bins as f64;
        let width: f64 = (high - low) / bins_f64;

        let mut edges: Vec<f64> = (0..bins).map(|i: usize| low + width * i as f64).collect();
        edges.push(high);

        let mut counts: Vec<u64> = vec![0; bins];
        let inv_width: f64 = 1.0 / width;
        for &v in sample.values() {
            let index: usize = ((v - low) * inv_width).floor() as usize;
            // the maximum (and rounding at the top) belongs to the last bin
            counts[index.min(bins - 1)] += 1;
        }

        return Ok(Histogram { edges, counts });
    }

    pub fn bins(&self) -> usize {
        return self.counts.len();
    }

    /// Number of values counted, equal to the length of the sample.
    pub fn total(&self) -> u64 {
        return self.counts.iter().sum();
    }

    pub fn max_count(&self) -> u64 {
        return self.counts.iter().copied().max().unwrap_or(0);
    }
}

/// The [empirical CDF](https://en.wikipedia.org/wiki/Empirical_distribution_function)
/// of a sample: each sorted value paired with its rank divided by the length.
/// The last point is always at `1.0`.
///
/// The rank is 1-based on purpose: the heights are `1/n, 2/n, ..., 1`, not the
/// `0, 1/n, ..., (n-1)/n` of a 0-based `arange(n) / n`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalCdf {
    /// `(value, cumulative probability)`, sorted by value.
    pub points: Vec<(f64, f64)>,
}

impl EmpiricalCdf {
    pub fn from_sample(sample: &Sample) -> Result<EmpiricalCdf> {
        if sample.is_empty() {
            return Err(SimulatorError::EmptySample);
        }

        let inv_n: f64 = 1.0 / sample.len() as f64;
        let points: Vec<(f64, f64)> = sample
            .sorted()
            .into_iter()
            .enumerate()
            .map(|(i, v)| (v, (i + 1) as f64 * inv_n))
            .collect();

        return Ok(EmpiricalCdf { points });
    }

    /// The corners of the step function, ready to be joined by straight lines.
    ///
    /// Starts at probability `0.0` on the first value and climbs vertically
    /// at each value.
    pub fn steps(&self) -> Vec<(f64, f64)> {
        let mut steps: Vec<(f64, f64)> = Vec::with_capacity(self.points.len() * 2);
        let mut previous: f64 = 0.0;

        for &(x, y) in &self.points {
            steps.push((x, previous));
            steps.push((x, y));
            previous = y;
        }

        return steps;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotData {
    Histogram(Histogram),
    Cdf(EmpiricalCdf),
}

/// Everything needed to draw the plot of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub plot: PlotData,
}

impl Rendering {
    /// Builds the plot of `sample` drawn from a distribution of kind `kind`.
    /// `bins` is only used for histograms.
    ///
    /// Fails with [SimulatorError::InvalidParameter] if the values are spread
    /// so far apart that the width of the axis is not a finite number.
    pub fn new(kind: DistributionKind, plot_type: PlotType, sample: &Sample, bins: usize) -> Result<Rendering> {
        value_range(sample)?;

        let plot: PlotData = match plot_type {
            PlotType::Histogram => PlotData::Histogram(Histogram::from_sample(sample, bins)?),
            PlotType::Cdf => PlotData::Cdf(EmpiricalCdf::from_sample(sample)?),
        };

        return Ok(Rendering {
            title: format!("{} ({})", kind.display_name(), plot_type),
            x_label: "Value".to_string(),
            y_label: plot_type.y_label().to_string(),
            plot,
        });
    }

    pub fn plot_type(&self) -> PlotType {
        return match self.plot {
            PlotData::Histogram(_) => PlotType::Histogram,
            PlotData::Cdf(_) => PlotType::Cdf,
        };
    }

    /// `(min, max)` of the horizontal axis.
    pub fn x_range(&self) -> (f64, f64) {
        return match &self.plot {
            PlotData::Histogram(h) => (h.edges[0], h.edges[h.edges.len() - 1]),
            PlotData::Cdf(cdf) => {
                let first: f64 = cdf.points[0].0;
                let last: f64 = cdf.points[cdf.points.len() - 1].0;
                if first == last { widen_constant(first, 0.5) } else { (first, last) }
            }
        };
    }

    /// `(min, max)` of the vertical axis.
    pub fn y_range(&self) -> (f64, f64) {
        return match &self.plot {
            PlotData::Histogram(h) => (0.0, (h.max_count() as f64).max(1.0)),
            PlotData::Cdf(_) => (0.0, 1.0),
        };
    }
}

/// Widens the degenerate range `[value, value]`. The pad grows with `|value|`
/// so that it is not rounded away.
pub(crate) fn widen_constant(value: f64, minimum_pad: f64) -> (f64, f64) {
    let pad: f64 = minimum_pad.max(value.abs() * RELATIVE_PAD);
    return (value - pad, value + pad);
}

/// The range a plot of `sample` covers on the horizontal axis: `[minimum, maximum]`,
/// widened by [widen_constant] if all the values are equal.
fn value_range(sample: &Sample) -> Result<(f64, f64)> {
    let (Some(low), Some(high)) = (sample.minimum(), sample.maximum()) else {
        return Err(SimulatorError::EmptySample);
    };

    let (low, high): (f64, f64) = if low == high { widen_constant(low, 0.5) } else { (low, high) };

    if !(high - low).is_finite() {
        return Err(SimulatorError::invalid_parameter(
            "Value range",
            format!("the values go from {low:e} to {high:e}, the range is too wide to plot"),
        ));
    }

    return Ok((low, high));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_types_parse() {
        assert_eq!("Histogram".parse::<PlotType>(), Ok(PlotType::Histogram));
        assert_eq!("CDF".parse::<PlotType>(), Ok(PlotType::Cdf));
        assert_eq!(" cdf ".parse::<PlotType>(), Ok(PlotType::Cdf));
        assert!("pie".parse::<PlotType>().is_err());
    }

    #[test]
    fn histogram_counts_every_value() {
        let sample: Sample = Sample::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let histogram: Histogram = Histogram::from_sample(&sample, 5).unwrap();

        assert_eq!(histogram.bins(), 5);
        assert_eq!(histogram.edges, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        // the maximum lands in the last bin
        assert_eq!(histogram.counts, vec![2, 2, 2, 2, 3]);
        assert_eq!(histogram.total(), 11);
    }

    #[test]
    fn constant_sample_histogram() {
        let sample: Sample = Sample::new(vec![3.0; 4]);
        let histogram: Histogram = Histogram::from_sample(&sample, 25).unwrap();
        assert_eq!(histogram.edges[0], 2.5);
        assert_eq!(histogram.edges[25], 3.5);
        assert_eq!(histogram.total(), 4);
    }

    #[test]
    fn histogram_needs_bins_and_data() {
        assert!(Histogram::from_sample(&Sample::new(vec![1.0]), 0).is_err());
        assert_eq!(
            Histogram::from_sample(&Sample::default(), 10),
            Err(SimulatorError::EmptySample)
        );
    }

    #[test]
    fn cdf_is_a_non_decreasing_step_function() {
        let sample: Sample = Sample::new(vec![3.0, 1.0, 2.0, 2.0]);
        let cdf: EmpiricalCdf = EmpiricalCdf::from_sample(&sample).unwrap();

        assert_eq!(cdf.points, vec![(1.0, 0.25), (2.0, 0.5), (2.0, 0.75), (3.0, 1.0)]);
        assert!(cdf.points.windows(2).all(|w| w[0].1 <= w[1].1));
        assert_eq!(cdf.steps()[0], (1.0, 0.0));
        assert_eq!(cdf.steps().len(), 8);
    }

    #[test]
    fn rendering_labels() {
        let sample: Sample = Sample::new(vec![1.0, 2.0, 3.0]);

        let histogram: Rendering =
            Rendering::new(DistributionKind::Normal, PlotType::Histogram, &sample, 25).unwrap();
        assert_eq!(histogram.title, "Normal Distribution (Histogram)");
        assert_eq!(histogram.y_label, "Frequency");
        assert_eq!(histogram.plot_type(), PlotType::Histogram);

        let cdf: Rendering = Rendering::new(DistributionKind::Poisson, PlotType::Cdf, &sample, 25).unwrap();
        assert_eq!(cdf.title, "Poisson Distribution (CDF)");
        assert_eq!(cdf.x_label, "Value");
        assert_eq!(cdf.y_label, "Probability");
        assert_eq!(cdf.x_range(), (1.0, 3.0));
        assert_eq!(cdf.y_range(), (0.0, 1.0));
    }

    #[test]
    fn too_many_bins() {
        let sample: Sample = Sample::new(vec![1.0, 2.0]);
        assert!(Histogram::from_sample(&sample, MAX_HISTOGRAM_BINS).is_ok());
        assert!(matches!(
            Histogram::from_sample(&sample, usize::MAX),
            Err(SimulatorError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn constant_large_values_keep_a_width() {
        let sample: Sample = Sample::new(vec![1e18; 100]);

        let histogram: Histogram = Histogram::from_sample(&sample, 25).unwrap();
        assert!(histogram.edges.iter().all(|e: &f64| e.is_finite()));
        assert!(histogram.edges[0] < 1e18 && 1e18 < histogram.edges[25]);
        assert_eq!(histogram.total(), 100);

        let cdf: Rendering = Rendering::new(DistributionKind::Uniform, PlotType::Cdf, &sample, 25).unwrap();
        let (low, high): (f64, f64) = cdf.x_range();
        assert!(low < 1e18 && 1e18 < high);
    }

    #[test]
    fn overflowing_range_is_rejected() {
        let sample: Sample = Sample::new(vec![-1.5e308, 0.0, 1.5e308]);

        for plot_type in PlotType::ALL {
            assert!(matches!(
                Rendering::new(DistributionKind::Normal, plot_type, &sample, 25),
                Err(SimulatorError::InvalidParameter { .. })
            ));
        }
        assert!(Histogram::from_sample(&sample, 25).is_err());
    }
}
