//! LoopScout CLI - pick the loops of normalized programs worth parallelizing.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use loopscout_core::ast::Program;
use loopscout_core::{run_pass, Config, LibraryModel, SelectLoopsPass, SelectionReport};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loopscout")]
#[command(author, version, about = "Select loops worth parallelizing", long_about = None)]
struct Cli {
    /// Normalized programs to analyze (`.json`, anything else is read as YAML)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Additional recognized calls (`Type.method`, `Type.*` or `function`)
    #[arg(long = "recognize", value_name = "PATTERN")]
    recognize: Vec<String>,

    /// Arrays whose index expressions are listed for interesting loops
    #[arg(long, value_delimiter = ',', value_name = "NAME")]
    arrays: Vec<String>,

    /// Maximum direct branch statements a loop may contain
    #[arg(long, value_name = "N")]
    max_branches: Option<usize>,

    /// Recognize calls to methods declared in the analyzed program
    #[arg(long)]
    local_methods: bool,

    /// Start from an empty library model instead of the built-in one
    #[arg(long)]
    no_defaults: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = effective_config(&cli)?;
    let model = LibraryModel::from_config(&config.library).context("invalid library model")?;

    info!("analyzing {} input(s)", cli.inputs.len());
    let reports = cli
        .inputs
        .par_iter()
        .map(|path| analyze(path, &config, &model, &cli.arrays))
        .collect::<Result<Vec<_>>>()?;

    match cli.format {
        Format::Text => {
            let multiple = reports.len() > 1;
            for (path, report) in cli.inputs.iter().zip(&reports) {
                if multiple {
                    println!("== {} ==", path.display());
                }
                println!("{}", report);
            }
        }
        Format::Json => {
            let entries: Vec<serde_json::Value> = cli
                .inputs
                .iter()
                .zip(&reports)
                .map(|(path, report)| {
                    serde_json::json!({
                        "input": path.display().to_string(),
                        "report": report,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

/// The config file, if any, with command-line overrides applied.
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    config.library.recognized.extend(cli.recognize.iter().cloned());
    if cli.local_methods {
        config.library.recognize_local_methods = true;
    }
    if cli.no_defaults {
        config.library.include_defaults = false;
    }
    if let Some(max) = cli.max_branches {
        config.selection.max_direct_branches = max;
    }
    debug!("effective config: {:?}", config);
    Ok(config)
}

fn analyze(
    path: &Path,
    config: &Config,
    model: &LibraryModel,
    arrays: &[String],
) -> Result<SelectionReport> {
    let mut program =
        Program::load(path).with_context(|| format!("failed to load {}", path.display()))?;
    program.renumber();

    let local_model;
    let model = if config.library.recognize_local_methods {
        local_model = model.clone().with_local_methods(&program);
        &local_model
    } else {
        model
    };

    let mut pass = SelectLoopsPass::with_config(model, config.selection.clone());
    let analysis = run_pass(&mut pass, &program);
    debug!(
        "{}: {} of {} loop(s) interesting",
        path.display(),
        analysis.interesting_loops().count(),
        analysis.len()
    );

    SelectionReport::build_with_indexes(&program, &analysis, arrays)
        .with_context(|| format!("failed to build report for {}", path.display()))
}
