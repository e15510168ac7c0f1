mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod rules;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use crate::input::overrides::UserOverrides;
use crate::input::{InputError, load_overrides, load_profile, load_report_text};
use crate::pipeline::run_pipeline;
use crate::pipeline::stage1_extract::run_stage1;
use crate::pipeline::stage6_report::write_reports;
use crate::report::ReportBundle;
use crate::report::json::render_record_json;
use crate::rules::RuleSet;

#[derive(Debug, Parser)]
#[command(
    name = "kira-liverqc",
    version,
    about = "Liver fibrosis risk scores (FLI, FIB-4, APRI, NFS) from lab report text"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract, score and write summary.json, scores.tsv and report.txt.
    Run(RunArgs),
    /// Print the record extracted from the text as JSON.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Report text; several files are read as consecutive pages.
    #[arg(long = "input", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// JSON file of user-entered values that override extraction.
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// TOML scoring profile; unspecified keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct ExtractArgs {
    #[arg(long = "input", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// TOML scoring profile; only its assumed units affect extraction.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("failed to compile extraction rules: {0}")]
    Rules(#[from] regex::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli.command) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), RunError> {
    match command {
        Command::Run(args) => run_scoring(&args),
        Command::Extract(args) => run_extract(&args),
    }
}

fn run_scoring(args: &RunArgs) -> Result<(), RunError> {
    let profile = load_profile(args.config.as_deref())?;
    let overrides = match &args.overrides {
        Some(path) => load_overrides(path)?,
        None => UserOverrides::default(),
    };
    let text = load_report_text(&args.inputs)?;
    let rules = RuleSet::builtin()?;
    info!(rules = rules.len(), "extraction rules compiled");

    let output = run_pipeline(&text, &overrides, &rules, &profile);
    let bundle = ReportBundle {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        record: output.record,
        scores: output.scores,
        composite: output.composite,
        diagnostics: output.diagnostics,
        rejected_overrides: output.rejected_overrides,
    };
    write_reports(&bundle, &args.out)?;
    Ok(())
}

fn run_extract(args: &ExtractArgs) -> Result<(), RunError> {
    let profile = load_profile(args.config.as_deref())?;
    let text = load_report_text(&args.inputs)?;
    let rules = RuleSet::builtin()?;
    let stage1 = run_stage1(&text, &rules, &profile.units);
    let json = render_record_json(&stage1.record, &stage1.diagnostics)
        .map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
