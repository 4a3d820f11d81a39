//! Workflow drivers behind the CLI commands.
//!
//! Each driver is intentionally small so the CLI can remain thin: load the
//! config, assemble the checklist for this platform, then either list it,
//! survey it, or hand it to the orchestrator.
mod check;
mod context;
mod init;
mod plan;
mod run;

pub(crate) use check::run_check;
pub(crate) use context::{resolve_config_path, ChecklistContext};
pub(crate) use init::run_init;
pub(crate) use plan::run_plan;
pub(crate) use run::run_run;
