//! Workflow plan step.
//!
//! Plan lists the checklist for this platform without probing the machine,
//! so it is safe to run anywhere and cheap enough to run often.
use super::ChecklistContext;
use crate::cli::PlanArgs;
use anyhow::{Context, Result};
use serde::Serialize;

const PLAN_SCHEMA_VERSION: u32 = 1;

/// Machine-readable shape behind `plan --json`.
#[derive(Serialize)]
struct PlanSummary {
    schema_version: u32,
    platform: &'static str,
    title: String,
    steps: Vec<String>,
}

/// Run the plan step and print the checklist.
pub(crate) fn run_plan(args: &PlanArgs) -> Result<()> {
    let ctx = ChecklistContext::load(args.config.as_deref())?;
    let steps: Vec<String> = ctx
        .steps
        .iter()
        .map(|step| step.description().to_string())
        .collect();

    if args.json {
        let summary = PlanSummary {
            schema_version: PLAN_SCHEMA_VERSION,
            platform: ctx.platform.label(),
            title: ctx.title(),
            steps,
        };
        let text = serde_json::to_string_pretty(&summary).context("serialize plan summary")?;
        println!("{text}");
        return Ok(());
    }

    println!("{}", ctx.title());
    for (index, description) in steps.iter().enumerate() {
        println!("{:>4} | {description}", index + 1);
    }
    Ok(())
}
