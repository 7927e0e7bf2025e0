//! connector-footprints: generate KiCad footprints for through-hole connectors
//!
//! Reads the global style and series configuration, runs the selected
//! generators and writes `.pretty` libraries to the output directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use connector_footprints::config;
use connector_footprints::driver::{select_generators, Driver, FailurePolicy};
use connector_footprints::kicad::LibraryWriter;

/// Parametric KiCad footprint generator for through-hole connectors.
///
/// Style and naming rules are read from two JSON files; the series file is
/// merged over the global one.
#[derive(Parser, Debug)]
#[command(name = "connector-footprints")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the global style configuration
    #[arg(long, value_name = "FILE")]
    global_config: Option<PathBuf>,

    /// Path to the series configuration
    #[arg(long, value_name = "FILE")]
    series_config: Option<PathBuf>,

    /// Directory the .pretty libraries are written to
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Only generate this series (repeatable)
    #[arg(short, long = "series", value_name = "NAME")]
    series: Vec<String>,

    /// Use rectangular pin-1 pads for KiCad 4
    #[arg(long)]
    kicad4_compatible: bool,

    /// Stop at the first footprint that fails
    #[arg(long)]
    fail_fast: bool,

    /// List the available series and exit
    #[arg(long)]
    list: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the footprint generator.
fn main() -> ExitCode {
    let args = Args::parse();

    if args.list {
        for generator in connector_footprints::series::all_generators() {
            let variants = generator.variants();
            println!("{:<20} {} variants", generator.name(), variants.len());
        }
        return ExitCode::SUCCESS;
    }

    // Load configuration
    let mut cfg = match config::load_configuration(args.global_config.as_deref(), args.series_config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            if args.global_config.is_none() || args.series_config.is_none() {
                if let Some(dir) = config::default_config_dir() {
                    eprintln!("\nExpected global.json and series.json in: {}", dir.display());
                    eprintln!("Create them based on config/global.json and config/series.json");
                }
            }
            return ExitCode::FAILURE;
        }
    };
    cfg.kicad4_compatible |= args.kicad4_compatible;

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        output = %args.output_dir.display(),
        "Starting connector-footprints"
    );

    let generators = match select_generators(&args.series) {
        Ok(generators) => generators,
        Err(e) => {
            error!(error = %e, "Invalid series selection");
            return ExitCode::FAILURE;
        }
    };

    let policy = if args.fail_fast {
        FailurePolicy::Abort
    } else {
        FailurePolicy::Continue
    };
    let driver = Driver::new(&cfg, LibraryWriter::new(&args.output_dir)).with_policy(policy);
    let report = driver.run(&generators);

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        for failure in &report.failures {
            eprintln!("{} ({}): {}", failure.generator, failure.variant, failure.error);
        }
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn verbosity_overrides_config_level() {
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
        assert_eq!(get_log_level(2, false, "error"), Level::DEBUG);
        assert_eq!(get_log_level(3, true, "trace"), Level::ERROR);
    }

    #[test]
    fn series_filter_is_repeatable() {
        let args = Args::parse_from(["connector-footprints", "--series", "molex_cgrid", "-s", "molex_sl", "-vv"]);
        assert_eq!(args.series, ["molex_cgrid", "molex_sl"]);
        assert_eq!(args.verbose, 2);
        assert!(!args.fail_fast);
    }
}
