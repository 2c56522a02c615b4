//! The six distributions the simulator can sample from.
//!
//! Each one lives in its own module and has a checked constructor (`new`) that
//! refuses parameters outside of the domain of the distribution.
//! [DistributionKind] names them and [DistributionSpec] carries the parameters
//! of a single request.

use std::{fmt, str::FromStr};

use rand::Rng;

use crate::{
    distribution_trait::Distribution,
    errors::{Result, SimulatorError},
};

// Discrete
pub mod Binomial;
pub mod Geometric;
pub mod Poisson;

// Continuous
pub mod Exponential;
pub mod Normal;
pub mod Uniform;

/// The kind of a distribution, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionKind {
    Binomial,
    Poisson,
    Geometric,
    Uniform,
    Normal,
    Exponential,
}

impl DistributionKind {
    /// All the supported kinds, in the order they are offered to the user.
    pub const ALL: [DistributionKind; 6] = [
        DistributionKind::Binomial,
        DistributionKind::Poisson,
        DistributionKind::Geometric,
        DistributionKind::Uniform,
        DistributionKind::Normal,
        DistributionKind::Exponential,
    ];

    /// Short name (`"Binomial"`).
    pub const fn name(&self) -> &'static str {
        return match self {
            DistributionKind::Binomial => "Binomial",
            DistributionKind::Poisson => "Poisson",
            DistributionKind::Geometric => "Geometric",
            DistributionKind::Uniform => "Uniform",
            DistributionKind::Normal => "Normal",
            DistributionKind::Exponential => "Exponential",
        };
    }

    /// Name as shown in the distribution selector (`"Binomial Distribution"`).
    pub fn display_name(&self) -> String {
        return format!("{} Distribution", self.name());
    }

    /// The labels of the parameters of this kind, in the order they must be given.
    pub const fn parameter_labels(&self) -> &'static [&'static str] {
        return match self {
            DistributionKind::Binomial => &Binomial::PARAMETERS,
            DistributionKind::Poisson => &Poisson::PARAMETERS,
            DistributionKind::Geometric => &Geometric::PARAMETERS,
            DistributionKind::Uniform => &Uniform::PARAMETERS,
            DistributionKind::Normal => &Normal::PARAMETERS,
            DistributionKind::Exponential => &Exponential::PARAMETERS,
        };
    }

    /// Number of parameters this kind requires.
    pub const fn arity(&self) -> usize {
        return self.parameter_labels().len();
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for DistributionKind {
    type Err = SimulatorError;

    /// Accepts both the selector names (`"Normal Distribution"`) and the short
    /// names (`"normal"`). Case is ignored.
    fn from_str(s: &str) -> Result<DistributionKind> {
        let trimmed: &str = s.trim();
        let lowercase: String = trimmed.to_lowercase();
        let short: &str = lowercase
            .strip_suffix("distribution")
            .map(str::trim_end)
            .unwrap_or(&lowercase);

        return DistributionKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(short))
            .ok_or_else(|| SimulatorError::UnknownDistribution(trimmed.to_string()));
    }
}

/// A distribution together with its parameters.
///
/// The variants carry exactly the parameters their kind needs, so a value of
/// this type can never have a missing or an extra parameter. The domain of the
/// parameters is checked by [DistributionSpec::validate] (and therefore before
/// any sampling).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionSpec {
    Binomial { n: u64, p: f64 },
    Poisson { lambda: f64 },
    Geometric { p: f64 },
    Uniform { a: f64, b: f64 },
    Normal { mean: f64, std_dev: f64 },
    Exponential { scale: f64 },
}

impl DistributionSpec {
    pub const fn kind(&self) -> DistributionKind {
        return match self {
            DistributionSpec::Binomial { .. } => DistributionKind::Binomial,
            DistributionSpec::Poisson { .. } => DistributionKind::Poisson,
            DistributionSpec::Geometric { .. } => DistributionKind::Geometric,
            DistributionSpec::Uniform { .. } => DistributionKind::Uniform,
            DistributionSpec::Normal { .. } => DistributionKind::Normal,
            DistributionSpec::Exponential { .. } => DistributionKind::Exponential,
        };
    }

    /// Builds the spec from the ordered parameter list of `kind`.
    ///
    /// Returns [SimulatorError::InvalidParameter] if a parameter is missing or
    /// if there are more parameters than the kind takes. The domain of the
    /// values is **not** checked here, see [DistributionSpec::validate].
    pub fn from_parameters(kind: DistributionKind, parameters: &[f64]) -> Result<DistributionSpec> {
        let labels: &[&str] = kind.parameter_labels();

        if parameters.len() < labels.len() {
            return Err(SimulatorError::invalid_parameter(
                labels[parameters.len()],
                "the value is missing",
            ));
        }
        if labels.len() < parameters.len() {
            return Err(SimulatorError::invalid_parameter(
                &format!("#{}", labels.len() + 1),
                format!(
                    "the {} takes only {} parameter(s), got {}",
                    kind.display_name(),
                    labels.len(),
                    parameters.len()
                ),
            ));
        }

        let spec: DistributionSpec = match kind {
            DistributionKind::Binomial => DistributionSpec::Binomial {
                n: trials_from_real(parameters[0])?,
                p: parameters[1],
            },
            DistributionKind::Poisson => DistributionSpec::Poisson {
                lambda: parameters[0],
            },
            DistributionKind::Geometric => DistributionSpec::Geometric { p: parameters[0] },
            DistributionKind::Uniform => DistributionSpec::Uniform {
                a: parameters[0],
                b: parameters[1],
            },
            DistributionKind::Normal => DistributionSpec::Normal {
                mean: parameters[0],
                std_dev: parameters[1],
            },
            DistributionKind::Exponential => DistributionSpec::Exponential {
                scale: parameters[0],
            },
        };

        return Ok(spec);
    }

    /// Same as [DistributionSpec::from_parameters] but parses the raw text of
    /// each field first. A field that is not a number gives
    /// [SimulatorError::InvalidParameter] naming that field.
    pub fn from_fields(kind: DistributionKind, fields: &[&str]) -> Result<DistributionSpec> {
        let labels: &[&str] = kind.parameter_labels();
        let mut parameters: Vec<f64> = Vec::with_capacity(fields.len());

        for (i, field) in fields.iter().enumerate() {
            let label: String = labels
                .get(i)
                .map_or_else(|| format!("#{}", i + 1), |l| l.to_string());

            let value: f64 = parse_number(&label, field)?;
            parameters.push(value);
        }

        return DistributionSpec::from_parameters(kind, &parameters);
    }

    /// The parameters in the order they are entered.
    pub fn parameters(&self) -> Vec<f64> {
        return match *self {
            DistributionSpec::Binomial { n, p } => vec![n as f64, p],
            DistributionSpec::Poisson { lambda } => vec![lambda],
            DistributionSpec::Geometric { p } => vec![p],
            DistributionSpec::Uniform { a, b } => vec![a, b],
            DistributionSpec::Normal { mean, std_dev } => vec![mean, std_dev],
            DistributionSpec::Exponential { scale } => vec![scale],
        };
    }

    /// Checks that every parameter belongs to the domain of the distribution.
    pub fn validate(&self) -> Result<()> {
        match *self {
            DistributionSpec::Binomial { n, p } => Binomial::Binomial::new(n, p).map(|_| ()),
            DistributionSpec::Poisson { lambda } => Poisson::Poisson::new(lambda).map(|_| ()),
            DistributionSpec::Geometric { p } => Geometric::Geometric::new(p).map(|_| ()),
            DistributionSpec::Uniform { a, b } => Uniform::Uniform::new(a, b).map(|_| ()),
            DistributionSpec::Normal { mean, std_dev } => Normal::Normal::new(mean, std_dev).map(|_| ()),
            DistributionSpec::Exponential { scale } => Exponential::Exponential::new(scale).map(|_| ()),
        }
    }

    /// Builds the distribution and draws `count` values with `rng`.
    ///
    /// Nothing is drawn if the parameters are invalid.
    pub(crate) fn sample_multiple<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<Vec<f64>> {
        let values: Vec<f64> = match *self {
            DistributionSpec::Binomial { n, p } => Binomial::Binomial::new(n, p)?.sample_multiple(rng, count),
            DistributionSpec::Poisson { lambda } => Poisson::Poisson::new(lambda)?.sample_multiple(rng, count),
            DistributionSpec::Geometric { p } => Geometric::Geometric::new(p)?.sample_multiple(rng, count),
            DistributionSpec::Uniform { a, b } => Uniform::Uniform::new(a, b)?.sample_multiple(rng, count),
            DistributionSpec::Normal { mean, std_dev } => {
                Normal::Normal::new(mean, std_dev)?.sample_multiple(rng, count)
            }
            DistributionSpec::Exponential { scale } => {
                Exponential::Exponential::new(scale)?.sample_multiple(rng, count)
            }
        };

        return Ok(values);
    }
}

impl fmt::Display for DistributionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters: Vec<String> = self
            .kind()
            .parameter_labels()
            .iter()
            .zip(self.parameters())
            .map(|(label, value)| format!("{label} = {value}"))
            .collect();

        write!(f, "{} ({})", self.kind().display_name(), parameters.join(", "))
    }
}

/// Parses the raw text of a numeric field.
pub(crate) fn parse_number(label: &str, field: &str) -> Result<f64> {
    let trimmed: &str = field.trim();
    if trimmed.is_empty() {
        return Err(SimulatorError::invalid_parameter(label, "the value is missing"));
    }

    return trimmed
        .parse::<f64>()
        .map_err(|_| SimulatorError::invalid_parameter(label, format!("`{trimmed}` is not a number")));
}

/// The number of trials of a Binomial comes as a real number from the form.
/// It has to be a positive integer (`10` and `10.0` are fine, `10.5` is not).
fn trials_from_real(n: f64) -> Result<u64> {
    // 2^64, the first value that does not fit in a u64
    const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

    if !n.is_finite() || n < 1.0 || n.fract() != 0.0 || U64_LIMIT <= n {
        return Err(SimulatorError::invalid_parameter(
            Binomial::PARAMETERS[0],
            format!("the number of trials must be a positive integer, got {n}"),
        ));
    }

    return Ok(n as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_from_selector_and_short_names() {
        assert_eq!(
            "Binomial Distribution".parse::<DistributionKind>(),
            Ok(DistributionKind::Binomial)
        );
        assert_eq!("normal".parse::<DistributionKind>(), Ok(DistributionKind::Normal));
        assert_eq!(" EXPONENTIAL ".parse::<DistributionKind>(), Ok(DistributionKind::Exponential));
        assert_eq!(
            "Cauchy Distribution".parse::<DistributionKind>(),
            Err(SimulatorError::UnknownDistribution("Cauchy Distribution".to_string()))
        );
        assert!("".parse::<DistributionKind>().is_err());
    }

    #[test]
    fn display_names_round_trip() {
        for kind in DistributionKind::ALL {
            assert_eq!(kind.display_name().parse::<DistributionKind>(), Ok(kind));
        }
    }

    #[test]
    fn arity_matches_the_kind() {
        assert_eq!(DistributionKind::Binomial.arity(), 2);
        assert_eq!(DistributionKind::Poisson.arity(), 1);
        assert_eq!(DistributionKind::Geometric.arity(), 1);
        assert_eq!(DistributionKind::Uniform.arity(), 2);
        assert_eq!(DistributionKind::Normal.arity(), 2);
        assert_eq!(DistributionKind::Exponential.arity(), 1);
    }

    #[test]
    fn missing_and_extra_parameters_are_rejected() {
        let missing: Result<DistributionSpec> = DistributionSpec::from_parameters(DistributionKind::Normal, &[0.0]);
        assert!(matches!(
            missing,
            Err(SimulatorError::InvalidParameter { ref parameter, .. }) if parameter == "σ (standard deviation)"
        ));

        let extra: Result<DistributionSpec> =
            DistributionSpec::from_parameters(DistributionKind::Poisson, &[1.0, 2.0]);
        assert!(matches!(extra, Err(SimulatorError::InvalidParameter { .. })));
    }

    #[test]
    fn fields_must_be_numeric() {
        let spec: Result<DistributionSpec> = DistributionSpec::from_fields(DistributionKind::Uniform, &["0", "abc"]);
        assert!(matches!(
            spec,
            Err(SimulatorError::InvalidParameter { ref parameter, .. }) if parameter == "b (high)"
        ));

        let spec: Result<DistributionSpec> = DistributionSpec::from_fields(DistributionKind::Uniform, &[" ", "1"]);
        assert!(matches!(spec, Err(SimulatorError::InvalidParameter { .. })));

        let spec: DistributionSpec = DistributionSpec::from_fields(DistributionKind::Binomial, &["10", " 0.25 "])
            .expect("Fields should be valid");
        assert_eq!(spec, DistributionSpec::Binomial { n: 10, p: 0.25 });
    }

    #[test]
    fn binomial_trials_must_be_integers() {
        assert!(DistributionSpec::from_parameters(DistributionKind::Binomial, &[10.0, 0.5]).is_ok());
        assert!(DistributionSpec::from_parameters(DistributionKind::Binomial, &[10.5, 0.5]).is_err());
        assert!(DistributionSpec::from_parameters(DistributionKind::Binomial, &[0.0, 0.5]).is_err());
        assert!(DistributionSpec::from_parameters(DistributionKind::Binomial, &[-3.0, 0.5]).is_err());
    }

    #[test]
    fn validate_checks_the_domain() {
        assert!(DistributionSpec::Binomial { n: 10, p: 1.5 }.validate().is_err());
        assert!(DistributionSpec::Poisson { lambda: 0.0 }.validate().is_err());
        assert!(DistributionSpec::Geometric { p: 0.0 }.validate().is_err());
        assert!(DistributionSpec::Uniform { a: 5.0, b: 2.0 }.validate().is_err());
        assert!(DistributionSpec::Normal { mean: 0.0, std_dev: -1.0 }.validate().is_err());
        assert!(DistributionSpec::Exponential { scale: -1.0 }.validate().is_err());

        assert!(DistributionSpec::Normal { mean: 0.0, std_dev: 1.0 }.validate().is_ok());
    }

    #[test]
    fn display_lists_the_parameters() {
        let spec: DistributionSpec = DistributionSpec::Uniform { a: 0.0, b: 10.0 };
        assert_eq!(spec.to_string(), "Uniform Distribution (a (low) = 0, b (high) = 10)");
    }
}
