use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::{Parser, builder::RangedU64ValueParser};
use rand::{SeedableRng, rngs::StdRng};
use tracing::Level;

use DistributionSimulator::{
    app::{self, Command, FormInput, PlotOutcome, Session, StatusMessage},
    configuration::plot,
    render::RenderOptions,
};

#[derive(Parser)]
#[command(version, about, allow_negative_numbers = true)]
struct Cli {
    #[arg(help = "Distribution: Binomial, Poisson, Geometric, Uniform, Normal or Exponential")]
    distribution: Option<String>,

    #[arg(help = "First parameter of the distribution (see `--kinds`)")]
    param1: Option<String>,

    #[arg(help = "Second parameter of the distribution, if it has one")]
    param2: Option<String>,

    #[arg(short = 'n', long = "size", default_value = "1000", help = "Sample size")]
    size: String,

    #[arg(short, long = "plot", default_value = "Histogram", help = "Plot type: Histogram or CDF")]
    plot_type: String,

    #[arg(short = 'o', long, help = "Export the plot to this file (.png or .svg)")]
    export: Option<PathBuf>,

    #[arg(long, help = "Seed of the random number generator, for reproducible samples")]
    seed: Option<u64>,

    #[arg(
        long,
        default_value_t = plot::DEFAULT_HISTOGRAM_BINS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=plot::MAX_HISTOGRAM_BINS as u64),
        help = "Number of bins of the histogram"
    )]
    bins: usize,

    #[arg(
        long,
        default_value_t = plot::DEFAULT_FIGURE_WIDTH,
        value_parser = RangedU64ValueParser::<u32>::new().range(1..=u64::from(plot::MAX_FIGURE_SIZE)),
        help = "Width of the exported figure in pixels"
    )]
    width: u32,

    #[arg(
        long,
        default_value_t = plot::DEFAULT_FIGURE_HEIGHT,
        value_parser = RangedU64ValueParser::<u32>::new().range(1..=u64::from(plot::MAX_FIGURE_SIZE)),
        help = "Height of the exported figure in pixels"
    )]
    height: u32,

    #[arg(long, help = "List the distributions and their parameters")]
    kinds: bool,

    #[arg(short, long, help = "Read requests from the standard input, one per line")]
    interactive: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "More logging (-v, -vv, -vvv)")]
    verbose: u8,
}

fn init_logging(verbosity: u8) {
    let level: Level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_kinds() {
    for line in app::describe_kinds() {
        println!("{line}");
    }
}

fn print_outcome(outcome: &PlotOutcome) {
    print_status(&outcome.message);
    for line in &outcome.statistics {
        println!("{line}");
    }
}

fn print_status(message: &StatusMessage) {
    if message.is_success() {
        println!("{message}");
    } else {
        println!("error: {message}");
    }
}

fn interactive(session: &mut Session<StdRng>) -> ExitCode {
    println!("{}", app::HELP);

    let stdin: io::Stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        // the prompt is cosmetic
        let _ = io::stdout().flush();

        let line: String = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("error: could not read the input: {e}");
                return ExitCode::FAILURE;
            }
            None => return ExitCode::SUCCESS,
        };

        match Command::parse(&line) {
            Ok(Command::Plot(form)) => print_outcome(&session.plot(&form)),
            Ok(Command::Export(path)) => print_status(&session.export(&path)),
            Ok(Command::Kinds) => print_kinds(),
            Ok(Command::Help) => println!("{}", app::HELP),
            Ok(Command::Quit) => return ExitCode::SUCCESS,
            Ok(Command::Nothing) => {}
            Err(message) => println!("error: {message}"),
        }
    }
}

fn main() -> ExitCode {
    let cli: Cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.kinds {
        print_kinds();
        return ExitCode::SUCCESS;
    }

    let options: RenderOptions = RenderOptions::builder()
        .width(cli.width)
        .height(cli.height)
        .bins(cli.bins)
        .build();

    let rng: StdRng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session: Session<StdRng> = Session::with_rng(rng, options);

    if cli.interactive {
        return interactive(&mut session);
    }

    let Some(distribution) = cli.distribution else {
        eprintln!("error: no distribution given (or use --interactive). Available distributions:");
        print_kinds();
        return ExitCode::FAILURE;
    };

    let form: FormInput = FormInput::builder()
        .distribution(distribution)
        .param1(cli.param1.unwrap_or_default())
        .param2(cli.param2.unwrap_or_default())
        .sample_size(cli.size)
        .plot_type(cli.plot_type)
        .build();

    let outcome: PlotOutcome = session.plot(&form);
    print_outcome(&outcome);
    if !outcome.message.is_success() {
        return ExitCode::FAILURE;
    }

    if let Some(path) = cli.export {
        let message: StatusMessage = session.export(&path);
        print_status(&message);
        if !message.is_success() {
            return ExitCode::FAILURE;
        }
    }

    return ExitCode::SUCCESS;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut full: Vec<&str> = vec!["distribution-simulator", "normal", "0", "1"];
        full.extend_from_slice(args);
        return Cli::try_parse_from(full);
    }

    #[test]
    fn defaults() {
        let cli: Cli = parse(&[]).unwrap();
        assert_eq!(cli.bins, plot::DEFAULT_HISTOGRAM_BINS);
        assert_eq!((cli.width, cli.height), (600, 600));
        assert_eq!(cli.size, "1000");
    }

    #[test]
    fn negative_parameters_are_not_flags() {
        let cli: Cli = Cli::try_parse_from(["distribution-simulator", "uniform", "-3", "-1"]).unwrap();
        assert_eq!(cli.param1.as_deref(), Some("-3"));
        assert_eq!(cli.param2.as_deref(), Some("-1"));
    }

    #[test]
    fn bins_and_figure_size_are_bounded() {
        assert_eq!(parse(&["--bins", "10000"]).unwrap().bins, 10_000);
        assert!(parse(&["--bins", "0"]).is_err());
        assert!(parse(&["--bins", "10001"]).is_err());
        assert!(parse(&["--bins", "18446744073709551615"]).is_err());

        assert!(parse(&["--width", "0"]).is_err());
        assert!(parse(&["--height", "4294967295"]).is_err());
        assert_eq!(parse(&["--width", "800"]).unwrap().width, 800);
    }
}
