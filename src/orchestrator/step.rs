//! The step capability contract.
use anyhow::Result;

/// Execution flags fixed for the lifetime of one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionOptions {
    pub dry_run: bool,
    pub verbose: bool,
}

/// Read-only context threaded through every step call.
///
/// Steps receive the same context for their check and execute pair; anything
/// a run-wide concern needs to hand to steps (today the execution flags) goes
/// through here rather than through step constructors.
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    pub options: ExecutionOptions,
}

/// One idempotent unit of onboarding work.
///
/// A step exposes a stable description, an idempotency probe, and an action.
/// The driver always calls `should_execute` immediately before a conditional
/// `execute` on the same instance and never interleaves other steps between
/// the two, so a step may cache probe results in an `Option` field for reuse
/// by `execute`. Such a cache must be cleared at the start of each
/// `should_execute` call; it is per-instance memoization, not shared state.
pub trait Step {
    /// Stable human-readable name, used verbatim in progress and summary
    /// output. Effectively a key; must not change over the step's lifetime.
    fn description(&self) -> &str;

    /// Probe whether work remains.
    ///
    /// `Ok(true)` means the target condition is not yet satisfied, `Ok(false)`
    /// means the system is already configured. `Err` means the probe itself
    /// could not complete, which the driver reports as a distinct failure mode
    /// from "probe ran and found work needed". Must not mutate the target
    /// system and must be safe to call repeatedly.
    fn should_execute(&mut self, ctx: &StepContext) -> Result<bool>;

    /// Perform the step's side effect.
    ///
    /// Only invoked when `should_execute` returned `Ok(true)` and dry run is
    /// not active.
    fn execute(&mut self, ctx: &StepContext) -> Result<()>;
}
