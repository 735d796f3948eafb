//! verbump - propagate a release version into project metadata files
//!
//! Without a version argument it prints the current version read from the
//! package files. With one, it rewrites every bump file and runs the
//! post-bump script.

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use verbump::bump::{BumpOptions, Bumper};
use verbump::cli::CliArgs;
use verbump::config::Config;
use verbump::error::{AppError, BumpError};
use verbump::output::{create_formatter, OutputConfig};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Handle version flag
    if args.print_version {
        println!("verbump {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_logging(args.log_level());

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, honoring RUST_LOG over the CLI verbosity
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = Config::load(&args.path, args.config.as_deref()).map_err(AppError::from)?;
    let bumper = Bumper::new(&args.path, config);

    let output_config = OutputConfig::from_cli(
        args.json,
        args.diff,
        args.verbose,
        args.quiet,
        args.use_color(),
    );
    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();

    let Some(new_version) = args.new_version.as_deref() else {
        let current = bumper.current_version().map_err(AppError::from)?;
        formatter.format_current(&current, &mut stdout)?;
        stdout.flush()?;
        return Ok(ExitCode::SUCCESS);
    };

    let options = BumpOptions {
        dry_run: args.dry_run,
        strict: args.strict,
        run_script: !args.no_script,
    };
    let report = bumper.run(new_version, options).map_err(AppError::from)?;

    formatter.format_report(&report, &mut stdout)?;
    stdout.flush()?;

    if let Some(script) = report.script.as_ref().filter(|_| report.script_failed()) {
        if !script.stderr.is_empty() {
            eprintln!("{}", script.stderr.trim_end());
        }
        let err = BumpError::script_failed(&script.command, "non-zero exit status");
        return Err(AppError::from(err).into());
    }

    Ok(ExitCode::SUCCESS)
}
