use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod exec;
mod orchestrator;
mod platform;
mod steps;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(verbose_requested(&args.command));

    match &args.command {
        Command::Init(args) => workflow::run_init(args),
        Command::Plan(args) => workflow::run_plan(args),
        Command::Check(args) => workflow::run_check(args),
        Command::Run(args) => workflow::run_run(args),
    }
}

fn verbose_requested(command: &Command) -> bool {
    match command {
        Command::Init(_) => false,
        Command::Plan(args) => args.verbose,
        Command::Check(args) => args.verbose,
        Command::Run(args) => args.verbose,
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
/// `RIGUP_LOG` overrides the level chosen by `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "rigup=debug" } else { "rigup=info" };
    let filter =
        EnvFilter::try_from_env("RIGUP_LOG").unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
