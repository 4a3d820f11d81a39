//! Workflow check step.
//!
//! Check probes every step without stopping at the first problem, so the
//! operator sees the whole machine state in one pass. Unlike `run`, nothing
//! here mutates the machine, and a step whose probe fails does not prevent
//! the remaining probes from running. The command reports state rather than
//! judging it, so it exits zero even when rows are pending or errored.
use super::ChecklistContext;
use crate::cli::CheckArgs;
use crate::orchestrator::{ExecutionOptions, StepContext};
use anyhow::{Context, Result};
use serde::Serialize;

const CHECK_SCHEMA_VERSION: u32 = 1;

/// Machine-readable shape behind `check --json`.
#[derive(Serialize)]
struct CheckSummary {
    schema_version: u32,
    platform: &'static str,
    title: String,
    steps: Vec<CheckEntry>,
    configured: usize,
    pending: usize,
    errors: usize,
}

#[derive(Serialize)]
struct CheckEntry {
    step: String,
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the check step, probing each step and printing a survey.
pub(crate) fn run_check(args: &CheckArgs) -> Result<()> {
    let mut ctx = ChecklistContext::load(args.config.as_deref())?;
    let step_ctx = StepContext {
        options: ExecutionOptions {
            dry_run: true,
            verbose: args.verbose,
        },
    };

    let mut entries = Vec::with_capacity(ctx.steps.len());
    for step in &mut ctx.steps {
        let description = step.description().to_string();
        let entry = match step.should_execute(&step_ctx) {
            Ok(false) => CheckEntry {
                step: description,
                state: "configured",
                error: None,
            },
            Ok(true) => CheckEntry {
                step: description,
                state: "pending",
                error: None,
            },
            Err(error) => CheckEntry {
                step: description,
                state: "error",
                error: Some(format!("{error:#}")),
            },
        };
        entries.push(entry);
    }
    let (configured, pending, errors) = tally(&entries);

    if args.json {
        let summary = CheckSummary {
            schema_version: CHECK_SCHEMA_VERSION,
            platform: ctx.platform.label(),
            title: ctx.title(),
            steps: entries,
            configured,
            pending,
            errors,
        };
        let text = serde_json::to_string_pretty(&summary).context("serialize check summary")?;
        println!("{text}");
    } else {
        for line in survey_lines(&ctx.title(), &entries) {
            println!("{line}");
        }
        println!(
            "checked {} steps: {configured} configured, {pending} pending, {errors} errors",
            entries.len()
        );
    }
    Ok(())
}

fn tally(entries: &[CheckEntry]) -> (usize, usize, usize) {
    let configured = entries.iter().filter(|e| e.state == "configured").count();
    let pending = entries.iter().filter(|e| e.state == "pending").count();
    let errors = entries.iter().filter(|e| e.state == "error").count();
    (configured, pending, errors)
}

/// Align step names in one column so states line up underneath the title.
fn survey_lines(title: &str, entries: &[CheckEntry]) -> Vec<String> {
    let width = entries.iter().map(|e| e.step.len()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(title.to_string());
    for entry in entries {
        let state = match entry.error.as_deref() {
            Some(message) => format!("{} ({message})", entry.state),
            None => entry.state.to_string(),
        };
        lines.push(format!("  {:<width$}  {state}", entry.step));
    }
    lines
}
