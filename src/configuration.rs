//! This file contains the default values and other value choices used through the program.
//!
//! The command line front end can override most of them, see
//! [RenderOptions](crate::render::RenderOptions).

/// Values that control how a sample is plotted.
pub mod plot {
    /// The histogram always uses a fixed number of bins. `25` is the value
    /// the simulator has always shown.
    pub const DEFAULT_HISTOGRAM_BINS: usize = 25;

    /// Upper bound of the number of bins a histogram accepts.
    pub const MAX_HISTOGRAM_BINS: usize = 10_000;

    /// The width of the rendered figure in pixels.
    ///
    /// `600` = a 6 inch figure at 100 dpi.
    pub const DEFAULT_FIGURE_WIDTH: u32 = 600;

    /// The height of the rendered figure in pixels.
    pub const DEFAULT_FIGURE_HEIGHT: u32 = 600;

    /// Largest width or height (in pixels) accepted from the command line.
    pub const MAX_FIGURE_SIZE: u32 = 10_000;

    /// Fill color of the histogram bars and of the CDF line (skyblue).
    pub const DEFAULT_FILL_COLOR: &str = "#87ceeb";

    /// Edge color of the histogram bars.
    pub const DEFAULT_EDGE_COLOR: &str = "#000000";

    /// Number of ticks (aprox.) on each axis.
    pub const AXIS_TICKS: usize = 6;

    /// Hard limit on the number of ticks of an axis.
    pub const MAX_AXIS_TICKS: usize = 100;

    /// A range where all the values are equal is widened by
    /// `max(minimum pad, |value| * RELATIVE_PAD)` on each side, so the
    /// padding is not lost to rounding for large values.
    pub const RELATIVE_PAD: f64 = 1e-9;
}

/// Values used when exporting a plot.
pub mod export {
    /// Extension appended to a path that has none.
    pub const DEFAULT_EXTENSION: &str = "png";

    /// Extensions (lowercase) that [export](crate::render::export) knows how to write.
    pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["png", "svg"];
}

/// Number of decimals shown for each summary statistic.
pub const STATISTIC_DECIMALS: usize = 3;
