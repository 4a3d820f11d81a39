//! CLI argument parsing for the onboarding workflow.
//!
//! The CLI is intentionally thin: each subcommand maps to one workflow
//! driver, so policy lives with the steps and the orchestrator instead of
//! in argument handling.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint for the onboarding workflow.
///
/// Keeping a single `RootArgs` type makes command routing obvious and avoids
/// hidden defaults in subcommand constructors.
#[derive(Parser, Debug)]
#[command(
    name = "rigup",
    version,
    about = "Developer machine onboarding checklist",
    after_help = "Commands:\n  init       Write a starter config to edit\n  plan       List the onboarding steps for this machine\n  check      Probe every step read-only and report machine state\n  run        Execute the checklist, stopping at the first failure\n\nExamples:\n  rigup init\n  rigup plan --json\n  rigup check\n  rigup run --dry-run\n  rigup run",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level workflow commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Init(InitArgs),
    Plan(PlanArgs),
    Check(CheckArgs),
    Run(RunArgs),
}

/// Init command inputs for writing a starter config.
#[derive(Parser, Debug)]
#[command(about = "Write a starter onboarding config")]
pub struct InitArgs {
    /// Config path (defaults to the per-user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

/// Plan command inputs for listing the checklist.
#[derive(Parser, Debug)]
#[command(about = "List the onboarding steps for this machine")]
pub struct PlanArgs {
    /// Config path (defaults to the per-user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,

    /// Emit a verbose transcript of the workflow
    #[arg(long)]
    pub verbose: bool,
}

/// Check command inputs for the read-only machine survey.
#[derive(Parser, Debug)]
#[command(about = "Probe every step and report machine state without changing it")]
pub struct CheckArgs {
    /// Config path (defaults to the per-user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,

    /// Emit a verbose transcript of the workflow
    #[arg(long)]
    pub verbose: bool,
}

/// Run command inputs for executing the checklist.
#[derive(Parser, Debug)]
#[command(about = "Execute the onboarding checklist")]
pub struct RunArgs {
    /// Config path (defaults to the per-user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Probe each step and report what would run, executing nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Emit a verbose transcript of the workflow
    #[arg(long)]
    pub verbose: bool,
}
