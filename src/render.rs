//! Draws a [Rendering] as SVG and exports it to an image file.
//!
//! The SVG is written by hand: a white background, the axes with "nice
//! number" ticks, the title and labels, and either the histogram bars or the
//! step line of the empirical CDF. PNG files are rasterized from that SVG
//! with [resvg].

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    configuration::{export, plot},
    errors::{Result, SimulatorError},
    plot::{PlotData, Rendering, widen_constant},
};

/// How the figure looks. Every field has a default (see [crate::configuration]).
///
/// ```
/// use DistributionSimulator::render::RenderOptions;
///
/// let options: RenderOptions = RenderOptions::builder().width(800).bins(40).build();
/// assert_eq!(options.height, 600);
/// ```
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct RenderOptions {
    #[builder(default = plot::DEFAULT_FIGURE_WIDTH)]
    pub width: u32,
    #[builder(default = plot::DEFAULT_FIGURE_HEIGHT)]
    pub height: u32,
    /// Number of bins of the histogram.
    #[builder(default = plot::DEFAULT_HISTOGRAM_BINS)]
    pub bins: usize,
    #[builder(into, default = plot::DEFAULT_FILL_COLOR.to_string())]
    pub fill_color: String,
    #[builder(into, default = plot::DEFAULT_EDGE_COLOR.to_string())]
    pub edge_color: String,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        return RenderOptions::builder().build();
    }
}

/// The image formats [export] can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
}

// Space (in pixels) around the plotting area.
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 25.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const TICK_LENGTH: f64 = 5.0;

/// Maps data coordinates to pixels.
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_axis: Axis,
    y_axis: Axis,
}

/// A linear axis with ticks at "nice" round values.
struct Axis {
    min: f64,
    max: f64,
    ticks: Vec<f64>,
    step: f64,
}

impl Axis {
    fn new(data_min: f64, data_max: f64) -> Axis {
        let (min, max, step): (f64, f64, f64) = nice_range(data_min, data_max, plot::AXIS_TICKS);

        // computed from the index, adding `step` again and again stalls on large values
        let intervals: usize = if 0.0 < step && step.is_finite() {
            ((max - min) / step).round().min((plot::MAX_AXIS_TICKS - 1) as f64) as usize
        } else {
            0
        };
        let ticks: Vec<f64> = (0..=intervals).map(|i: usize| min + i as f64 * step).collect();

        return Axis { min, max, ticks, step };
    }

    /// Position of `v` in `[0, 1]` along the axis.
    fn fraction(&self, v: f64) -> f64 {
        return (v - self.min) / (self.max - self.min);
    }
}

impl Frame {
    fn new(rendering: &Rendering, options: &RenderOptions) -> Frame {
        let (x_min, x_max): (f64, f64) = rendering.x_range();
        let (y_min, y_max): (f64, f64) = rendering.y_range();

        return Frame {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (f64::from(options.width) - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (f64::from(options.height) - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            x_axis: Axis::new(x_min, x_max),
            y_axis: Axis::new(y_min, y_max),
        };
    }

    fn x(&self, v: f64) -> f64 {
        return self.left + self.x_axis.fraction(v) * self.width;
    }

    fn y(&self, v: f64) -> f64 {
        return self.top + (1.0 - self.y_axis.fraction(v)) * self.height;
    }

    fn bottom(&self) -> f64 {
        return self.top + self.height;
    }
}

/// Draws `rendering` as an SVG document.
pub fn to_svg(rendering: &Rendering, options: &RenderOptions) -> String {
    let frame: Frame = Frame::new(rendering, options);
    let mut out: String = String::with_capacity(16 * 1024);

    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = options.width,
        h = options.height,
    ));
    out.push_str(&format!(
        "<rect width=\"{}\" height=\"{}\" fill=\"white\" />\n",
        options.width, options.height
    ));

    match &rendering.plot {
        PlotData::Histogram(histogram) => {
            for (i, &count) in histogram.counts.iter().enumerate() {
                if count == 0 {
                    continue;
                }
                let x0: f64 = frame.x(histogram.edges[i]);
                let x1: f64 = frame.x(histogram.edges[i + 1]);
                let y: f64 = frame.y(count as f64);
                out.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\" />\n",
                    x0,
                    y,
                    (x1 - x0).max(0.0),
                    (frame.bottom() - y).max(0.0),
                    escape_xml(&options.fill_color),
                    escape_xml(&options.edge_color),
                ));
            }
        }
        PlotData::Cdf(cdf) => {
            let points: Vec<String> = cdf
                .steps()
                .into_iter()
                .map(|(x, y)| format!("{:.2},{:.2}", frame.x(x), frame.y(y)))
                .collect();
            out.push_str(&format!(
                "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\" />\n",
                points.join(" "),
                escape_xml(&options.fill_color),
            ));
            write_legend(&mut out, &frame, "CDF", &options.fill_color);
        }
    }

    write_axes(&mut out, &frame, rendering);
    out.push_str("</svg>\n");

    return out;
}

fn write_axes(out: &mut String, frame: &Frame, rendering: &Rendering) {
    let bottom: f64 = frame.bottom();
    let right: f64 = frame.left + frame.width;

    // plot area border
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"black\" stroke-width=\"1\" />\n",
        frame.left, frame.top, frame.width, frame.height
    ));

    for &tick in &frame.x_axis.ticks {
        let x: f64 = frame.x(tick);
        out.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{bottom:.2}\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"black\" stroke-width=\"1\" />\n",
            bottom + TICK_LENGTH
        ));
        write_text(out, x, bottom + TICK_LENGTH + 14.0, "middle", 12.0, &format_tick(tick, frame.x_axis.step));
    }

    for &tick in &frame.y_axis.ticks {
        let y: f64 = frame.y(tick);
        out.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"black\" stroke-width=\"1\" />\n",
            frame.left - TICK_LENGTH,
            frame.left
        ));
        write_text(out, frame.left - TICK_LENGTH - 4.0, y + 4.0, "end", 12.0, &format_tick(tick, frame.y_axis.step));
    }

    let center_x: f64 = (frame.left + right) * 0.5;
    let center_y: f64 = (frame.top + bottom) * 0.5;

    write_text(out, center_x, frame.top * 0.6, "middle", 16.0, &rendering.title);
    write_text(out, center_x, bottom + MARGIN_BOTTOM - 12.0, "middle", 14.0, &rendering.x_label);
    out.push_str(&format!(
        "<text x=\"18\" y=\"{center_y:.2}\" font-family=\"sans-serif\" font-size=\"14\" text-anchor=\"middle\" transform=\"rotate(-90,18,{center_y:.2})\">{}</text>\n",
        escape_xml(&rendering.y_label)
    ));
}

fn write_legend(out: &mut String, frame: &Frame, label: &str, color: &str) {
    let x: f64 = frame.left + 12.0;
    let y: f64 = frame.top + 16.0;
    out.push_str(&format!(
        "<line x1=\"{x:.2}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{}\" stroke-width=\"2\" />\n",
        x + 24.0,
        escape_xml(color)
    ));
    write_text(out, x + 30.0, y + 4.0, "start", 12.0, label);
}

fn write_text(out: &mut String, x: f64, y: f64, anchor: &str, size: f64, content: &str) {
    out.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" font-family=\"sans-serif\" font-size=\"{size:.1}\" text-anchor=\"{anchor}\">{}</text>\n",
        escape_xml(content)
    ));
}

fn escape_xml(s: &str) -> String {
    let mut escaped: String = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    return escaped;
}

/// Widens `[data_min, data_max]` to round values and picks a round step.
///
/// Near the limits of `f64` the round values can overflow; the data range is
/// kept as is in that case.
fn nice_range(data_min: f64, data_max: f64, target_ticks: usize) -> (f64, f64, f64) {
    let (low, high): (f64, f64) = if data_max <= data_min {
        widen_constant(data_min, 1.0)
    } else {
        (data_min, data_max)
    };

    let intervals: f64 = (target_ticks.max(2) - 1) as f64;
    let step: f64 = nice_step((high - low) / intervals);
    let nice_min: f64 = (low / step).floor() * step;
    let nice_max: f64 = (high / step).ceil() * step;

    if !(nice_min.is_finite() && nice_max.is_finite() && nice_min < nice_max) {
        return (low, high, (high - low) / intervals);
    }

    return (nice_min, nice_max, step);
}

fn nice_step(rough: f64) -> f64 {
    let exp: f64 = rough.abs().log10().floor();
    let frac: f64 = rough / 10.0_f64.powf(exp);
    let nice_frac: f64 = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    return nice_frac * 10.0_f64.powf(exp);
}

fn format_tick(value: f64, step: f64) -> String {
    // Avoid "-0"
    let value: f64 = if value.abs() < step * 0.01 { 0.0 } else { value };

    if value != 0.0 && (1e6 <= value.abs() || step < 1e-4) {
        // scientific notation, with enough digits to tell neighbouring ticks apart
        let digits: usize = (value.abs() / step).log10().ceil().clamp(0.0, 15.0) as usize;
        return format!("{value:.digits$e}");
    }

    let decimals: usize = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    return format!("{value:.decimals$}");
}

/// Decides the final path and the format of an export.
///
/// The format comes from the extension (case is ignored). A path without an
/// extension gets the default one (`.png`) appended.
pub fn resolve_export_path(path: &Path) -> Result<(PathBuf, ExportFormat)> {
    if path.file_name().is_none() {
        return Err(SimulatorError::export_failure(path, "the path has no file name"));
    }

    let path: PathBuf = match path.extension() {
        Some(_) => path.to_path_buf(),
        None => path.with_extension(export::DEFAULT_EXTENSION),
    };

    let extension: String = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let format: ExportFormat = match extension.as_str() {
        "png" => ExportFormat::Png,
        "svg" => ExportFormat::Svg,
        other => {
            let reason: String = format!(
                "unsupported format `{other}` (use one of: {})",
                export::SUPPORTED_EXTENSIONS.join(", ")
            );
            return Err(SimulatorError::export_failure(path, reason));
        }
    };

    return Ok((path, format));
}

/// Writes `rendering` to `path` and returns the path actually written.
///
/// See [resolve_export_path] for how the format is chosen. The file is first
/// written next to the destination and then renamed over it, so a failed
/// export never leaves a half written image behind. Every failure is a
/// [SimulatorError::ExportFailure].
pub fn export(rendering: &Rendering, options: &RenderOptions, path: &Path) -> Result<PathBuf> {
    let (path, format): (PathBuf, ExportFormat) = resolve_export_path(path)?;
    debug!(path = %path.display(), ?format, "exporting plot");

    let svg: String = to_svg(rendering, options);
    let bytes: Vec<u8> = match format {
        ExportFormat::Svg => svg.into_bytes(),
        ExportFormat::Png => svg_to_png(&svg).map_err(|reason| SimulatorError::export_failure(&path, reason))?,
    };

    write_whole_file(&path, &bytes).map_err(|e| SimulatorError::export_failure(&path, e))?;

    info!(path = %path.display(), bytes = bytes.len(), "plot exported");
    return Ok(path);
}

fn svg_to_png(svg: &str) -> std::result::Result<Vec<u8>, String> {
    let mut options: resvg::usvg::Options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree: resvg::usvg::Tree = resvg::usvg::Tree::from_str(svg, &options).map_err(|e| e.to_string())?;

    let size: resvg::tiny_skia::IntSize = tree.size().to_int_size();
    let mut pixmap: resvg::tiny_skia::Pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| "failed to create pixmap".to_string())?;

    pixmap.fill(resvg::tiny_skia::Color::WHITE);
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap.as_mut());

    return pixmap.encode_png().map_err(|e| e.to_string());
}

fn write_whole_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file_name: String = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temporary: PathBuf = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&temporary, bytes)?;
    if let Err(e) = fs::rename(&temporary, path) {
        // best effort, the rename error is the one reported
        let _ = fs::remove_file(&temporary);
        return Err(e);
    }

    return Ok(());
}
