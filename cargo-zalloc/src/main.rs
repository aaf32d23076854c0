// ZALLOC - cargo-zalloc
// Module: Command Line Interface
// SW-REQ-ID: REQ_CLI_001
//
// Copyright (c) 2024 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! cargo-zalloc - steady-state allocation audit
//!
//! Lists the scenario catalog and runs it against the counting allocator
//! installed below. Exit status is 0 when every selected scenario passes, 1
//! when any scenario mismatches or is inconclusive, and 2 when the audit
//! could not run at all.

use std::{
    env,
    ffi::OsString,
    io,
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use zalloc_probe::{CountingAllocator, MeasurementContext, Probe, Strategy};
use zalloc_test_registry::{
    reporting,
    Catalog,
    RunOptions,
    Runner,
    ScenarioGroup,
    SuiteConfig,
};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

const EXIT_FAILED: u8 = 1;
const EXIT_FATAL: u8 = 2;

/// Steady-state allocation audit
#[derive(Parser, Debug)]
#[command(name = "cargo-zalloc")]
#[command(
    version,
    about = "Check which collection idioms allocate once warmed up",
    long_about = "
Check which collection idioms allocate once warmed up

Usage:
  cargo-zalloc <COMMAND>        # Direct usage
  cargo zalloc <COMMAND>        # As Cargo subcommand

Examples:
  cargo zalloc list --group iteration
  cargo zalloc run
  cargo zalloc run --filter hashmap --strategy differential --repetitions 200
  cargo zalloc run --config zalloc.toml --output json

Logging:
  RUST_LOG          Filter directives (default: warn, debug with --verbose)
  RUST_LOG_FORMAT   pretty (default), compact or json
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for listings and reports
    #[arg(long, global = true, value_enum, default_value = "human")]
    output: OutputFormatArg,

    /// Show every scenario in reports and enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Available output formats
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormatArg {
    /// Human-readable format with colors (default)
    Human,
    /// JSON for tooling
    Json,
}

/// Measurement strategies
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StrategyArg {
    /// Live-heap delta across many repetitions
    Differential,
    /// One execution under an allocation check
    SingleShot,
}

impl From<StrategyArg> for Strategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Differential => Strategy::Differential,
            StrategyArg::SingleShot => Strategy::SingleShot,
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// List catalog scenarios
    List {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Run catalog scenarios and compare verdicts
    Run(RunArgs),
}

/// Scenario selection shared by both subcommands
#[derive(Args, Debug, Clone, Default)]
struct SelectionArgs {
    /// Only scenarios whose name contains this text
    #[arg(long)]
    filter: Option<String>,

    /// Only scenarios of this group (e.g. insertion, keyed-lookup)
    #[arg(long)]
    group: Option<ScenarioGroup>,
}

#[derive(Args, Debug, Clone, Default)]
struct RunArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Strategy for every scenario without a per-scenario override
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Measured executions for the differential strategy
    #[arg(long)]
    repetitions: Option<u32>,

    /// Collect again after the measured loop
    #[arg(long)]
    collect_after: bool,

    /// Unmeasured executions before measuring
    #[arg(long)]
    warmup_rounds: Option<u32>,

    /// Suite configuration file (TOML)
    #[arg(long, env = "ZALLOC_CONFIG")]
    config: Option<PathBuf>,
}

impl RunArgs {
    /// Configuration file contents with command line flags layered on top
    fn suite_config(&self) -> Result<SuiteConfig> {
        let mut config = match &self.config {
            Some(path) => SuiteConfig::load_from_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => SuiteConfig::default(),
        };

        if let Some(repetitions) = self.repetitions {
            config.probe.repetitions = repetitions;
        }
        if self.collect_after {
            config.probe.collect_after = true;
        }
        if let Some(warmup_rounds) = self.warmup_rounds {
            config.probe.warmup_rounds = warmup_rounds;
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    fn run_options(&self, config: &SuiteConfig) -> RunOptions {
        let mut options = config.run_options();
        options.name_filter = self.selection.filter.clone();
        options.group_filter = self.selection.group;
        options.strategy_override = self.strategy.map(Strategy::from);
        options
    }
}

/// Parse command line arguments, handling both `cargo-zalloc` and
/// `cargo zalloc` patterns
fn parse_args() -> Cli {
    Cli::parse_from(normalize_args(env::args_os()))
}

/// Drop the subcommand name Cargo passes when invoked as `cargo zalloc`
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut args: Vec<OsString> = args.into_iter().collect();
    if args.get(1).is_some_and(|arg| arg == "zalloc") {
        args.remove(1);
    }
    args
}

/// Initialize the tracing system for logging
fn initialize_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let format = env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);

    match format.as_str() {
        "json" => subscriber.json().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.pretty().init(),
    }
}

fn cmd_list(selection: &SelectionArgs, output: OutputFormatArg) -> Result<bool> {
    let catalog = Catalog::global().context("Failed to build the scenario catalog")?;
    let scenarios = catalog.select(selection.filter.as_deref(), selection.group);
    let rendered = match output {
        OutputFormatArg::Human => reporting::format_listing_human(scenarios),
        OutputFormatArg::Json => {
            reporting::format_listing_json(scenarios).context("Failed to render listing")?
        },
    };
    print!("{rendered}");
    if output == OutputFormatArg::Json {
        println!();
    }
    Ok(true)
}

fn cmd_run(args: &RunArgs, output: OutputFormatArg, verbose: bool) -> Result<bool> {
    let config = args.suite_config()?;
    let catalog = Catalog::global().context("Failed to build the scenario catalog")?;
    config
        .check_against(catalog)
        .context("Configuration does not match the catalog")?;
    let options = args.run_options(&config);

    let context = MeasurementContext::init().context("Allocation counting is unavailable")?;
    let probe = Probe::new(&context, config.probe).context("Invalid probe configuration")?;
    let report = Runner::new(catalog, probe).run(&options).context("Audit aborted")?;
    context.teardown();

    match output {
        OutputFormatArg::Human => print!("{}", reporting::format_report_human(&report, verbose)),
        OutputFormatArg::Json => {
            println!("{}", reporting::format_report_json(&report).context("Failed to render report")?);
        },
    }
    Ok(report.is_success())
}

fn execute(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::List { selection } => cmd_list(selection, cli.output),
        Commands::Run(args) => cmd_run(args, cli.output, cli.verbose),
    }
}

fn main() -> ExitCode {
    let cli = parse_args();
    initialize_tracing(cli.verbose);

    match execute(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILED),
        Err(e) => {
            eprintln!("{} {e:#}", "error:".bright_red());
            ExitCode::from(EXIT_FATAL)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn run_args(args: &[&str]) -> RunArgs {
        match parse(args).command {
            Commands::Run(run) => run,
            Commands::List { .. } => panic!("expected the run subcommand"),
        }
    }

    #[test]
    fn test_cargo_subcommand_name_is_dropped() {
        let args = normalize_args(["cargo-zalloc", "zalloc", "list"].map(OsString::from));
        assert_eq!(args, ["cargo-zalloc", "list"].map(OsString::from));

        let args = normalize_args(["cargo-zalloc", "run"].map(OsString::from));
        assert_eq!(args, ["cargo-zalloc", "run"].map(OsString::from));
    }

    #[test]
    fn test_list_flags() {
        let cli = parse(&["cargo-zalloc", "list", "--group", "keyed-lookup", "--output", "json"]);
        assert_eq!(cli.output, OutputFormatArg::Json);
        let Commands::List { selection } = cli.command else {
            panic!("expected the list subcommand");
        };
        assert_eq!(selection.group, Some(ScenarioGroup::KeyedLookup));
        assert!(selection.filter.is_none());
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        assert!(Cli::try_parse_from(["cargo-zalloc", "list", "--group", "sorting"]).is_err());
    }

    #[test]
    fn test_run_flags_override_defaults() {
        let args = run_args(&[
            "cargo-zalloc",
            "run",
            "--strategy",
            "single-shot",
            "--repetitions",
            "25",
            "--collect-after",
            "--warmup-rounds",
            "3",
        ]);
        let config = args.suite_config().unwrap();
        assert_eq!(config.probe.repetitions, 25);
        assert!(config.probe.collect_after);
        assert_eq!(config.probe.warmup_rounds, 3);

        let options = args.run_options(&config);
        assert_eq!(options.strategy_override, Some(Strategy::SingleShot));
    }

    #[test]
    fn test_zero_repetitions_flag_is_invalid() {
        let args = run_args(&["cargo-zalloc", "run", "--repetitions", "0"]);
        assert!(args.suite_config().is_err());
    }

    #[test]
    fn test_selection_reaches_run_options() {
        let args = run_args(&["cargo-zalloc", "run", "--filter", "vec", "--group", "insertion"]);
        let options = args.run_options(&SuiteConfig::default());
        assert_eq!(options.name_filter.as_deref(), Some("vec"));
        assert_eq!(options.group_filter, Some(ScenarioGroup::Insertion));
        assert!(options.strategy_override.is_none());
    }
}
