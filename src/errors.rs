use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while sampling, summarizing or exporting.
///
/// None of the variants is fatal: the [Session](crate::app::Session) turns
/// each one into a status message and waits for the next request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    /// A parameter of the distribution is missing, is not a number or is
    /// outside the domain of the distribution.
    #[error("Invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// The label of the offending parameter (for example `p (probability)`).
        parameter: String,
        /// What is wrong with it.
        reason: String,
    },
    /// The sample size is not a positive integer.
    #[error("Invalid sample size: {0}")]
    InvalidSampleSize(String),
    /// The distribution name is not one of the six supported ones.
    #[error("Unknown distribution: `{0}`")]
    UnknownDistribution(String),
    /// There were not enough samples to do the operation.
    #[error("There were not enough samples to do the operation. The sample is empty. ")]
    EmptySample,
    /// The plot could not be written to disk.
    #[error("Could not export the plot to `{}`: {reason}", path.display())]
    ExportFailure {
        /// The path we attempted to write.
        path: PathBuf,
        /// Why it failed.
        reason: String,
    },
}

impl SimulatorError {
    pub(crate) fn invalid_parameter(parameter: &str, reason: impl Into<String>) -> SimulatorError {
        return SimulatorError::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.into(),
        };
    }

    pub(crate) fn export_failure(path: impl Into<PathBuf>, reason: impl ToString) -> SimulatorError {
        return SimulatorError::ExportFailure {
            path: path.into(),
            reason: reason.to_string(),
        };
    }
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, SimulatorError>;
