use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::logger::RunnerLogger;

mod build;
mod config;
mod logger;
mod path;
mod regs;
mod simulate;

// —————————————————————————————— CLI Parsing ——————————————————————————————— //

#[derive(Parser)]
struct CliArgs {
    #[command(subcommand)]
    command: Subcommands,
    #[arg(short, long, action, global = true)]
    verbose: bool,
    #[arg(long, global = true)]
    /// Path to the configuration file to use
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Subcommands {
    /// Simulate the Fibonacci demo on the host and print the port writes
    Run(RunArgs),
    /// Simulate the Fibonacci demo and verify its output
    Check(CheckArgs),
    /// Print the system coprocessor register map
    Regs(RegsArgs),
    /// Build the Fibonacci demo for the STORM Core
    Build(BuildArgs),
}

#[derive(Args)]
pub struct RunArgs {
    #[arg(short, long)]
    /// Number of values to emit after the initial clear
    emissions: Option<usize>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(short, long)]
    /// Number of ticks to simulate before checking the loop is still running
    ticks: Option<usize>,
}

#[derive(Args)]
pub struct RegsArgs {
    /// Register or bit name to look up, the whole map is printed if absent
    name: Option<String>,
}

#[derive(Args)]
pub struct BuildArgs {
    #[arg(long, action)]
    /// Build in release mode, regardless of the configuration
    release: bool,
}

// —————————————————————————————— Entry Point ——————————————————————————————— //

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let cfg = match config::read_config(&args.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            // The logger is not configured yet, install a default one to report the error
            RunnerLogger::init(log::LevelFilter::Info, false).ok();
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let level = match resolve_log_level(args.verbose, &cfg) {
        Ok(level) => level,
        Err(err) => {
            RunnerLogger::init(log::LevelFilter::Info, false).ok();
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    RunnerLogger::init(level, cfg.log.color.unwrap_or(true)).ok();

    match args.command {
        Subcommands::Run(args) => simulate::run(&args, &cfg),
        Subcommands::Check(args) => simulate::check(&args, &cfg),
        Subcommands::Regs(args) => regs::regs(&args),
        Subcommands::Build(args) => build::build(&args, &cfg),
    }
}

/// Log level: `--verbose` enables everything, otherwise the configured level applies.
fn resolve_log_level(verbose: bool, cfg: &config::Config) -> Result<log::LevelFilter, String> {
    if verbose {
        Ok(log::LevelFilter::Trace)
    } else {
        cfg.log.level_filter()
    }
}
