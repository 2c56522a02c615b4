//! The thin layer between the user and the library.
//!
//! A [Session] receives the raw text of the form ([FormInput]), calls
//! [generate_with](crate::sampler::generate_with) and
//! [summarize](crate::samples::summarize), builds the [Rendering] and keeps
//! it as the current plot so it can be exported later. Every outcome, good or
//! bad, ends up as a [StatusMessage]: errors never escape this layer.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use rand::Rng;
use tracing::{info, warn};

use crate::{
    distributions::{DistributionKind, DistributionSpec},
    errors::{Result, SimulatorError},
    plot::{PlotType, Rendering},
    render::{self, RenderOptions},
    sampler::{self, SampleRequest},
    samples::{self, Sample, SummaryStatistics},
};

/// The content of the form fields, as typed by the user.
///
/// Only the parameter fields the chosen distribution uses are read:
/// `param2` is ignored for one parameter distributions.
#[derive(Debug, Clone, PartialEq, Default, bon::Builder)]
pub struct FormInput {
    #[builder(into)]
    pub distribution: String,
    #[builder(into, default)]
    pub param1: String,
    #[builder(into, default)]
    pub param2: String,
    #[builder(into)]
    pub sample_size: String,
    #[builder(into, default = PlotType::default().to_string())]
    pub plot_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
}

/// A line of text for the status area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub status: Status,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> StatusMessage {
        return StatusMessage {
            status: Status::Success,
            text: text.into(),
        };
    }

    pub fn error(text: impl Into<String>) -> StatusMessage {
        return StatusMessage {
            status: Status::Error,
            text: text.into(),
        };
    }

    pub fn is_success(&self) -> bool {
        return self.status == Status::Success;
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// What the user sees after pressing "plot".
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOutcome {
    pub message: StatusMessage,
    /// The four statistic lines (`N/A` if the request failed).
    pub statistics: [String; 4],
    pub summary: Option<SummaryStatistics>,
}

pub const PLOT_SUCCESS: &str = "Plot generated successfully!";
pub const EXPORT_SUCCESS: &str = "Plot exported successfully!";

/// Parses the form into a sample request and a plot type.
pub fn parse_form(form: &FormInput) -> Result<(SampleRequest, PlotType)> {
    let kind: DistributionKind = form.distribution.parse()?;

    let fields: [&str; 2] = [&form.param1, &form.param2];
    let spec: DistributionSpec = DistributionSpec::from_fields(kind, &fields[..kind.arity()])?;
    let count: usize = sampler::parse_sample_size(&form.sample_size)?;
    let plot_type: PlotType = form.plot_type.parse()?;

    let request: SampleRequest = SampleRequest::builder().distribution(spec).count(count).build();
    return Ok((request, plot_type));
}

/// Holds the random number generator, the look of the figure and the
/// current plot.
pub struct Session<R: Rng> {
    rng: R,
    options: RenderOptions,
    current: Option<Rendering>,
}

impl Session<rand::rngs::ThreadRng> {
    /// A session that uses the thread local random number generator.
    pub fn new(options: RenderOptions) -> Session<rand::rngs::ThreadRng> {
        return Session::with_rng(rand::rng(), options);
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(rng: R, options: RenderOptions) -> Session<R> {
        return Session {
            rng,
            options,
            current: None,
        };
    }

    /// The plot of the last successful request, if the last request succeeded.
    pub fn current(&self) -> Option<&Rendering> {
        return self.current.as_ref();
    }

    pub fn options(&self) -> &RenderOptions {
        return &self.options;
    }

    /// Handles a press of the "plot" button.
    ///
    /// The previous plot is always discarded. If the request fails, the
    /// message explains why and the statistics read `N/A`.
    pub fn plot(&mut self, form: &FormInput) -> PlotOutcome {
        self.current = None;

        return match self.plot_request(form) {
            Ok((rendering, summary)) => {
                info!(title = %rendering.title, "plot generated");
                self.current = Some(rendering);
                PlotOutcome {
                    message: StatusMessage::success(PLOT_SUCCESS),
                    statistics: summary.lines(),
                    summary: Some(summary),
                }
            }
            Err(e) => {
                warn!(error = %e, "plot request failed");
                PlotOutcome {
                    message: StatusMessage::error(e.to_string()),
                    statistics: SummaryStatistics::unavailable_lines(),
                    summary: None,
                }
            }
        };
    }

    fn plot_request(&mut self, form: &FormInput) -> Result<(Rendering, SummaryStatistics)> {
        let (request, plot_type): (SampleRequest, PlotType) = parse_form(form)?;

        let sample: Sample = request.generate_with(&mut self.rng)?;
        let summary: SummaryStatistics = samples::summarize(&sample)?;
        let rendering: Rendering = Rendering::new(request.distribution.kind(), plot_type, &sample, self.options.bins)?;

        return Ok((rendering, summary));
    }

    /// Handles a press of the "export" button.
    pub fn export(&self, path: &Path) -> StatusMessage {
        let result: Result<PathBuf> = match &self.current {
            Some(rendering) => render::export(rendering, &self.options, path),
            None => Err(SimulatorError::export_failure(path, "there is no plot to export")),
        };

        return match result {
            Ok(written) => StatusMessage::success(format!("{EXPORT_SUCCESS} ({})", written.display())),
            Err(e) => {
                warn!(error = %e, "export failed");
                StatusMessage::error(e.to_string())
            }
        };
    }
}

/// One line of the interactive mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `plot <distribution> <size> <histogram|cdf> <param1> [param2]`
    Plot(FormInput),
    /// `export <path>`
    Export(PathBuf),
    /// `kinds`: lists the distributions and their parameters.
    Kinds,
    Help,
    Quit,
    /// A blank line.
    Nothing,
}

pub const HELP: &str = "\
Commands:
  plot <distribution> <size> <histogram|cdf> <param1> [param2]
  export <path>          (.png or .svg, .png if no extension)
  kinds                  list the distributions and their parameters
  help
  quit";

impl Command {
    /// Parses a line. The error is a message for the user.
    pub fn parse(line: &str) -> std::result::Result<Command, String> {
        let words: Vec<&str> = line.split_whitespace().collect();

        let Some((&first, rest)) = words.split_first() else {
            return Ok(Command::Nothing);
        };

        return match (first.to_lowercase().as_str(), rest) {
            ("plot", [distribution, size, plot_type, params @ ..]) if params.len() <= 2 => {
                let form: FormInput = FormInput::builder()
                    .distribution(*distribution)
                    .sample_size(*size)
                    .plot_type(*plot_type)
                    .param1(params.first().copied().unwrap_or_default())
                    .param2(params.get(1).copied().unwrap_or_default())
                    .build();
                Ok(Command::Plot(form))
            }
            ("plot", _) => Err("usage: plot <distribution> <size> <histogram|cdf> <param1> [param2]".to_string()),
            ("export", [path]) => Ok(Command::Export(PathBuf::from(path))),
            ("export", _) => Err("usage: export <path>".to_string()),
            ("kinds", []) => Ok(Command::Kinds),
            ("help", _) => Ok(Command::Help),
            ("quit" | "exit", _) => Ok(Command::Quit),
            (other, _) => Err(format!("unknown command `{other}`, type `help`")),
        };
    }
}

/// One line per distribution: its name and its parameters.
pub fn describe_kinds() -> Vec<String> {
    return DistributionKind::ALL
        .iter()
        .map(|kind| format!("{:<26}{}", kind.display_name(), kind.parameter_labels().join(", ")))
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn session() -> Session<StdRng> {
        return Session::with_rng(StdRng::seed_from_u64(2024), RenderOptions::default());
    }

    #[test]
    fn successful_plot() {
        let mut session: Session<StdRng> = session();
        let form: FormInput = FormInput::builder()
            .distribution("Normal Distribution")
            .param1("0")
            .param2("1")
            .sample_size("500")
            .build();

        let outcome: PlotOutcome = session.plot(&form);
        assert!(outcome.message.is_success());
        assert_eq!(outcome.message.text, PLOT_SUCCESS);
        assert!(outcome.statistics[0].starts_with("Mean: "));
        assert!(outcome.summary.is_some());
        assert_eq!(
            session.current().map(|r| r.title.as_str()),
            Some("Normal Distribution (Histogram)")
        );
    }

    #[test]
    fn hidden_second_field_is_ignored() {
        let mut session: Session<StdRng> = session();
        let form: FormInput = FormInput::builder()
            .distribution("Poisson Distribution")
            .param1("3")
            .param2("not a number")
            .sample_size("20")
            .plot_type("CDF")
            .build();

        assert!(session.plot(&form).message.is_success());
    }

    #[test]
    fn invalid_input_clears_the_plot() {
        let mut session: Session<StdRng> = session();
        let good: FormInput = FormInput::builder()
            .distribution("Geometric")
            .param1("0.3")
            .sample_size("10")
            .build();
        assert!(session.plot(&good).message.is_success());
        assert!(session.current().is_some());

        let bad: FormInput = FormInput::builder()
            .distribution("Binomial Distribution")
            .param1("10")
            .param2("1.2")
            .sample_size("1")
            .build();
        let outcome: PlotOutcome = session.plot(&bad);

        assert_eq!(outcome.message.status, Status::Error);
        assert!(outcome.message.text.contains("p (probability)"));
        assert_eq!(outcome.statistics, SummaryStatistics::unavailable_lines());
        assert!(session.current().is_none());
    }

    #[test]
    fn export_without_plot() {
        let session: Session<StdRng> = session();
        let message: StatusMessage = session.export(Path::new("plot.png"));
        assert_eq!(message.status, Status::Error);
        assert!(message.text.contains("there is no plot to export"));
    }

    #[test]
    fn form_errors() {
        let unknown: FormInput = FormInput::builder().distribution("Cauchy").param1("1").sample_size("10").build();
        assert!(matches!(parse_form(&unknown), Err(SimulatorError::UnknownDistribution(_))));

        let size: FormInput = FormInput::builder().distribution("Exponential").param1("1").sample_size("ten").build();
        assert!(matches!(parse_form(&size), Err(SimulatorError::InvalidSampleSize(_))));

        let missing: FormInput = FormInput::builder().distribution("Uniform").param1("1").sample_size("10").build();
        assert!(matches!(parse_form(&missing), Err(SimulatorError::InvalidParameter { .. })));
    }

    #[test]
    fn commands() {
        assert_eq!(Command::parse("   "), Ok(Command::Nothing));
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("export out.svg"), Ok(Command::Export(PathBuf::from("out.svg"))));
        assert!(Command::parse("export").is_err());
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("plot normal 100").is_err());

        let Ok(Command::Plot(form)) = Command::parse("plot uniform 4 cdf 0 10") else {
            panic!("expected a plot command");
        };
        assert_eq!(form.distribution, "uniform");
        assert_eq!(form.sample_size, "4");
        assert_eq!(form.plot_type, "cdf");
        assert_eq!((form.param1.as_str(), form.param2.as_str()), ("0", "10"));
    }

    #[test]
    fn kinds_listing() {
        let lines: Vec<String> = describe_kinds();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Binomial Distribution"));
        assert!(lines[0].ends_with("n (trials), p (probability)"));
    }
}
