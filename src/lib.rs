#![allow(
    non_snake_case,
    clippy::needless_return,
    clippy::assign_op_pattern,
)]

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]
// ^Disable warning "crate `DistributionSimulator` should have a snake case name convert the identifier to snake case: `distribution_simulator`"
// The rest of the names will follow the snake_case convention (except for the distribution modules).

//! # Distribution Simulator
//!
//! Pick a probability distribution, give it parameters and a sample size, draw
//! a random sample, look at it as a histogram or as an empirical CDF and read
//! its summary statistics.
//!
//! The core is 2 pure functions:
//!
//!  - [sampler::generate]: `DistributionSpec` + sample size -> [Sample](samples::Sample)
//!  - [samples::summarize]: `Sample` -> [SummaryStatistics](samples::SummaryStatistics)
//!     (mean, median, population variance and standard deviation)
//!
//! Everything else supports showing the result:
//!
//!  - [plot]: histogram (25 bins by default) and empirical CDF of a sample.
//!  - [render]: draws a plot as SVG and exports it as PNG or SVG.
//!  - [app]: the [Session](app::Session) that turns the raw text of the form
//!     into a plot and 4 lines of statistics, and every error into a message.
//!
//! ## Distributions
//!
//! ### Discrete distributions:
//!
//!  - [x] [Binomial](distributions::Binomial) ([Wiki](https://en.wikipedia.org/wiki/Binomial_distribution))
//!  - [x] [Poisson distribution](distributions::Poisson) ([Wiki](https://en.wikipedia.org/wiki/Poisson_distribution))
//!  - [x] [Geometric distribution](distributions::Geometric) ([Wiki](https://en.wikipedia.org/wiki/Geometric_distribution))
//!
//! ### Continuous distributions:
//!
//!  - [x] [Uniform distribution](distributions::Uniform) ([Wiki](https://en.wikipedia.org/wiki/Continuous_uniform_distribution))
//!  - [x] [Normal distribution](distributions::Normal) ([Wiki](https://en.wikipedia.org/wiki/Normal_distribution))
//!  - [x] [Exponential](distributions::Exponential) ([Wiki](https://en.wikipedia.org/wiki/Exponential_distribution))
//!
//! ```
//! use DistributionSimulator::{distributions::DistributionSpec, sampler, samples};
//!
//! let sample = sampler::generate(DistributionSpec::Normal { mean: 0.0, std_dev: 1.0 }, 1000).unwrap();
//! let statistics = samples::summarize(&sample).unwrap();
//! println!("{}", statistics.lines().join("\n"));
//! ```
//!
//! ***
//!

pub mod app;
pub mod configuration;
pub mod distribution_trait;
pub mod distributions;
pub mod errors;
pub mod plot;
pub mod render;
pub mod sampler;
pub mod samples;

pub use errors::SimulatorError;
pub use sampler::generate;
pub use samples::summarize;
