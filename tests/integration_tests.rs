use std::{
    fs,
    path::{Path, PathBuf},
};

use rand::{SeedableRng, rngs::StdRng};

use DistributionSimulator::{
    app::{Command, EXPORT_SUCCESS, FormInput, PLOT_SUCCESS, PlotOutcome, Session, StatusMessage},
    distributions::DistributionKind,
    errors::SimulatorError,
    plot::{PlotData, PlotType, Rendering},
    render::{self, RenderOptions},
    samples::Sample,
};

/// A fresh directory under the system temporary directory.
fn scratch_dir(name: &str) -> PathBuf {
    let dir: PathBuf = std::env::temp_dir().join(format!("distribution-simulator-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    return dir;
}

fn session() -> Session<StdRng> {
    return Session::with_rng(StdRng::seed_from_u64(7), RenderOptions::default());
}

fn form(distribution: &str, param1: &str, param2: &str, size: &str, plot_type: &str) -> FormInput {
    return FormInput::builder()
        .distribution(distribution)
        .param1(param1)
        .param2(param2)
        .sample_size(size)
        .plot_type(plot_type)
        .build();
}

fn rendering() -> Rendering {
    let sample: Sample = Sample::new(vec![0.5, 1.5, 1.7, 2.2, 4.0, 4.1]);
    return Rendering::new(DistributionKind::Normal, PlotType::Histogram, &sample, 25).unwrap();
}

fn is_png(path: &Path) -> bool {
    let bytes: Vec<u8> = fs::read(path).unwrap();
    return bytes.starts_with(&[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
}

#[test]
fn plot_then_export() {
    let dir: PathBuf = scratch_dir("plot-then-export");
    let mut session: Session<StdRng> = session();

    let outcome: PlotOutcome = session.plot(&form("Normal Distribution", "0", "1", "500", "Histogram"));
    assert!(outcome.message.is_success());
    assert_eq!(outcome.message.text, PLOT_SUCCESS);
    assert!(outcome.statistics[0].starts_with("Mean: "));
    assert!(outcome.statistics[3].starts_with("Standard Deviation: "));
    assert!(session.current().is_some());

    let message: StatusMessage = session.export(&dir.join("normal.svg"));
    assert!(message.is_success(), "{message}");
    assert!(message.text.starts_with(EXPORT_SUCCESS));

    let svg: String = fs::read_to_string(dir.join("normal.svg")).unwrap();
    assert!(svg.contains("Normal Distribution"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_request_clears_the_plot() {
    let mut session: Session<StdRng> = session();

    assert!(session.plot(&form("Poisson", "3", "", "100", "CDF")).message.is_success());
    assert!(session.current().is_some());

    let outcome: PlotOutcome = session.plot(&form("Binomial", "10", "1.2", "100", "Histogram"));
    assert!(!outcome.message.is_success());
    assert!(outcome.summary.is_none());
    assert_eq!(outcome.statistics[0], "Mean: N/A");
    assert!(session.current().is_none());

    // nothing to export any more
    assert!(!session.export(&std::env::temp_dir().join("never-written.svg")).is_success());
}

#[test]
fn form_errors_become_messages() {
    let mut session: Session<StdRng> = session();

    let cases: [(FormInput, &str); 5] = [
        (form("Cauchy", "0", "1", "100", "Histogram"), "Cauchy"),
        (form("Uniform", "0", "1", "0", "Histogram"), "sample size"),
        (form("Uniform", "0", "1", "ten", "Histogram"), "sample size"),
        (form("Uniform", "zero", "1", "100", "Histogram"), "a (low)"),
        (form("Uniform", "0", "1", "100", "Pie"), "Pie"),
    ];

    for (input, fragment) in cases {
        let outcome: PlotOutcome = session.plot(&input);
        assert!(!outcome.message.is_success());
        assert!(
            outcome.message.text.to_lowercase().contains(&fragment.to_lowercase()),
            "`{}` should mention `{fragment}`",
            outcome.message
        );
    }
}

#[test]
fn cdf_ends_at_one() {
    let mut session: Session<StdRng> = session();
    assert!(session.plot(&form("exponential", "2", "", "300", "cdf")).message.is_success());

    let Some(rendering) = session.current() else {
        panic!("The plot should be kept");
    };

    match &rendering.plot {
        PlotData::Cdf(cdf) => {
            assert_eq!(cdf.points.len(), 300);
            assert_eq!(cdf.points.last().map(|&(_, y)| y), Some(1.0));
            assert!(cdf.points.windows(2).all(|w| w[0].0 <= w[1].0 && w[0].1 < w[1].1));
        }
        PlotData::Histogram(_) => panic!("expected a CDF"),
    }
}

#[test]
fn export_formats() {
    let dir: PathBuf = scratch_dir("export-formats");
    let options: RenderOptions = RenderOptions::default();

    let svg: PathBuf = render::export(&rendering(), &options, &dir.join("plot.svg")).unwrap();
    assert!(fs::read_to_string(&svg).unwrap().starts_with("<svg"));

    let png: PathBuf = render::export(&rendering(), &options, &dir.join("plot.PNG")).unwrap();
    assert!(is_png(&png));

    // no extension: png
    let written: PathBuf = render::export(&rendering(), &options, &dir.join("plot")).unwrap();
    assert_eq!(written, dir.join("plot.png"));
    assert!(is_png(&written));

    // no temporary files left behind
    let mut names: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["plot.PNG", "plot.png", "plot.svg"]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn export_failures() {
    let dir: PathBuf = scratch_dir("export-failures");
    let options: RenderOptions = RenderOptions::default();

    let unsupported = render::export(&rendering(), &options, &dir.join("plot.jpeg"));
    assert!(matches!(unsupported, Err(SimulatorError::ExportFailure { .. })));

    let missing_dir: PathBuf = dir.join("does").join("not").join("exist").join("plot.svg");
    let unwritable = render::export(&rendering(), &options, &missing_dir);
    assert!(matches!(unwritable, Err(SimulatorError::ExportFailure { .. })));

    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn constant_large_sample_exports() {
    let dir: PathBuf = scratch_dir("constant-large-sample");
    let mut session: Session<StdRng> = session();

    // every draw rounds to 1e18
    for plot_type in ["histogram", "cdf"] {
        let outcome: PlotOutcome = session.plot(&form("Normal", "1e18", "1", "100", plot_type));
        assert!(outcome.message.is_success(), "{}", outcome.message);

        for name in ["large.svg", "large.png"] {
            let message: StatusMessage = session.export(&dir.join(format!("{plot_type}-{name}")));
            assert!(message.is_success(), "{message}");
        }

        let svg: String = fs::read_to_string(dir.join(format!("{plot_type}-large.svg"))).unwrap();
        assert!(!svg.contains("NaN") && !svg.contains("inf"));
        assert!(is_png(&dir.join(format!("{plot_type}-large.png"))));
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn tiny_spread_exports() {
    let dir: PathBuf = scratch_dir("tiny-spread");
    let sample: Sample = Sample::new(vec![1.0, 1.0 + f64::EPSILON, 1.0 + 2.0 * f64::EPSILON]);

    for plot_type in PlotType::ALL {
        let rendering: Rendering = Rendering::new(DistributionKind::Uniform, plot_type, &sample, 25).unwrap();
        let path: PathBuf = render::export(&rendering, &RenderOptions::default(), &dir.join(plot_type.name())).unwrap();
        assert!(is_png(&path));
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn huge_spread_is_reported() {
    let sample: Sample = Sample::new(vec![-1.5e308, 1.5e308]);
    for plot_type in PlotType::ALL {
        assert!(matches!(
            Rendering::new(DistributionKind::Normal, plot_type, &sample, 25),
            Err(SimulatorError::InvalidParameter { .. })
        ));
    }

    // either the draws overflow or their range does, both end up as a message
    let dir: PathBuf = scratch_dir("huge-spread");
    let mut session: Session<StdRng> = session();
    for size in ["2", "3", "100"] {
        for plot_type in ["histogram", "cdf"] {
            let outcome: PlotOutcome = session.plot(&form("Normal", "0", "1e308", size, plot_type));
            let message: StatusMessage = session.export(&dir.join("huge.svg"));

            if outcome.message.is_success() {
                assert!(message.is_success(), "{message}");
            } else {
                assert_eq!(outcome.statistics[0], "Mean: N/A");
                assert!(!message.is_success());
            }
        }
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn interactive_commands() {
    let Ok(Command::Plot(input)) = Command::parse("plot normal 200 cdf 0 1") else {
        panic!("should be a plot command");
    };
    assert_eq!(input, form("normal", "0", "1", "200", "cdf"));

    let mut session: Session<StdRng> = session();
    assert!(session.plot(&input).message.is_success());

    assert_eq!(
        Command::parse("export out/plot.svg"),
        Ok(Command::Export(PathBuf::from("out/plot.svg")))
    );
    assert_eq!(Command::parse("   "), Ok(Command::Nothing));
    assert_eq!(Command::parse("QUIT"), Ok(Command::Quit));
    assert!(Command::parse("plot normal").is_err());
    assert!(Command::parse("draw").is_err());
}
