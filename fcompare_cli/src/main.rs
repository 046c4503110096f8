mod report;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fcompare_common::{load_config, AppConfig, DiffAlgorithm, FcompareError};
use fcompare_core::ComparisonEngine;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Exit status when the files match (or `--exit-code` is off)
const EXIT_SAME: i32 = 0;
/// Exit status when the files differ and `--exit-code` is on
const EXIT_DIFFERENT: i32 = 1;
/// Exit status for errors
const EXIT_TROUBLE: i32 = 2;

#[derive(Parser)]
#[command(name = "fcompare")]
#[command(author = "FCompare Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Compare two files (text, PDF, DOCX, CSV or binary) and print line differences", long_about = None)]
struct Cli {
    /// Left (original) file
    left: PathBuf,

    /// Right (changed) file
    right: PathBuf,

    /// Alignment algorithm for extracted lines
    #[arg(short, long, value_enum)]
    algorithm: Option<AlgorithmArg>,

    /// Keep line terminators on plain-text lines (CRLF vs LF shows up as a change)
    #[arg(long)]
    keep_line_endings: bool,

    /// Field delimiter for CSV files
    #[arg(long)]
    csv_delimiter: Option<char>,

    /// Output the result as JSON
    #[arg(long)]
    json: bool,

    /// Disable ANSI colors in output
    #[arg(long)]
    no_color: bool,

    /// Exit with 1 when the files differ and 2 on errors
    #[arg(long)]
    exit_code: bool,

    /// Configuration file (defaults to fcompare.toml in the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    Lcs,
    Myers,
    Patience,
}

impl From<AlgorithmArg> for DiffAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Lcs => DiffAlgorithm::Lcs,
            AlgorithmArg::Myers => DiffAlgorithm::Myers,
            AlgorithmArg::Patience => DiffAlgorithm::Patience,
        }
    }
}

fn main() {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("Comparison failed: {:#}", e);
            EXIT_TROUBLE
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let loaded = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    if loaded.exists {
        if let Some(path) = &loaded.path {
            debug!("Loaded configuration from {}", path.display());
        }
    }
    let config = apply_overrides(loaded.config, cli)?;

    let engine = ComparisonEngine::from_config(&config);

    let result = match engine.compare(&cli.left, &cli.right) {
        Ok(result) => result,
        Err(e @ (FcompareError::NotFound(_) | FcompareError::NotAFile(_))) => {
            report_input_error(cli, &e)?;
            return Ok(if config.exit_code { EXIT_TROUBLE } else { EXIT_SAME });
        }
        Err(e) => return Err(e.into()),
    };

    if cli.json {
        let report = report::build_json_report(&cli.left, &cli.right, &result);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let use_color = config.color && !cli.no_color && std::io::stdout().is_terminal();
        for line in report::render(&result, use_color) {
            println!("{line}");
        }
    }

    Ok(exit_status(config.exit_code, result.is_different()))
}

fn apply_overrides(mut config: AppConfig, cli: &Cli) -> anyhow::Result<AppConfig> {
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm.into();
    }
    if cli.keep_line_endings {
        config.normalize_line_endings = false;
    }
    if let Some(delimiter) = cli.csv_delimiter {
        config.csv_delimiter = delimiter;
    }
    if cli.no_color {
        config.color = false;
    }
    if cli.exit_code {
        config.exit_code = true;
    }
    config.validate()?;
    Ok(config)
}

fn report_input_error(cli: &Cli, err: &FcompareError) -> anyhow::Result<()> {
    if cli.json {
        let report = report::JsonError {
            left: cli.left.to_string_lossy().to_string(),
            right: cli.right.to_string_lossy().to_string(),
            error: err.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match err {
        FcompareError::NotFound(path) => {
            println!("{}", report::MISSING_FILES);
            println!("  Missing: {}", path.display());
        }
        other => println!("Error: {other}"),
    }
    Ok(())
}

fn exit_status(exit_code: bool, different: bool) -> i32 {
    match (exit_code, different) {
        (true, true) => EXIT_DIFFERENT,
        _ => EXIT_SAME,
    }
}
