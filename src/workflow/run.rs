//! Workflow run step.
//!
//! Run hands the assembled checklist to the orchestrator, which owns the
//! stop-on-failure protocol and the end-of-run summary.
use super::ChecklistContext;
use crate::cli::RunArgs;
use crate::orchestrator::{ConsoleInteraction, ExecutionOptions, Orchestrator};
use anyhow::Result;

/// Run the onboarding checklist, stopping at the first failure.
pub(crate) fn run_run(args: &RunArgs) -> Result<()> {
    let ctx = ChecklistContext::load(args.config.as_deref())?;
    let options = ExecutionOptions {
        dry_run: args.dry_run,
        verbose: args.verbose,
    };
    let title = ctx.title();
    let interaction = ConsoleInteraction::new();
    let mut orchestrator = Orchestrator::new(&interaction, options, &title, ctx.steps);
    match orchestrator.execute() {
        Ok(()) => Ok(()),
        Err(error) => {
            tracing::error!(step = error.step(), "onboarding stopped");
            Err(error.into())
        }
    }
}
