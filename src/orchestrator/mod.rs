//! Sequential onboarding orchestrator.
//!
//! The orchestrator drives a fixed ordered list of steps through one run:
//! probe each step, execute the ones that need work (unless dry run), record
//! an outcome per step, and stop at the first failure. The summary is always
//! rendered before a failure propagates, so the user sees every attempted
//! step even when the run as a whole fails. There is no reordering, retry,
//! or parallelism; steps run strictly one at a time.

mod error;
mod interaction;
mod result;
mod step;

pub use error::OrchestrationError;
pub use interaction::{ConsoleInteraction, UserInteraction};
pub use result::{SkipReason, StepResult, StepStatus};
pub use step::{ExecutionOptions, Step, StepContext};

/// Internal outcome of running one step through its check/execute pair.
enum StepOutcome {
    Executed,
    Skipped(SkipReason),
    CheckFailed(anyhow::Error),
    ExecFailed(anyhow::Error),
}

/// Drives an ordered step list through the run protocol.
pub struct Orchestrator<'a> {
    interaction: &'a dyn UserInteraction,
    options: ExecutionOptions,
    title: String,
    steps: Vec<Box<dyn Step>>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        interaction: &'a dyn UserInteraction,
        options: ExecutionOptions,
        title: &str,
        steps: Vec<Box<dyn Step>>,
    ) -> Self {
        Self {
            interaction,
            options,
            title: title.to_string(),
            steps,
        }
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// An empty step list is valid and succeeds with an empty summary. On
    /// failure the captured [`OrchestrationError`] is returned only after the
    /// summary has been rendered.
    pub fn execute(&mut self) -> Result<(), OrchestrationError> {
        self.interaction
            .announce_start(&self.title, self.steps.len());
        let ctx = StepContext {
            options: self.options,
        };
        let mut results = Vec::with_capacity(self.steps.len());
        let mut failure = None;

        for step in &mut self.steps {
            let description = step.description().to_string();
            self.interaction.announce_check(&description);
            match run_step(step.as_mut(), &description, self.interaction, &ctx) {
                StepOutcome::Executed => {
                    self.interaction.announce_step_succeeded(&description);
                    results.push(StepResult::executed(&description));
                }
                StepOutcome::Skipped(reason) => {
                    match reason {
                        SkipReason::AlreadyConfigured => {
                            self.interaction.announce_already_configured(&description);
                        }
                        SkipReason::DryRun => {
                            self.interaction.announce_dry_run_skip(&description);
                        }
                    }
                    results.push(StepResult::skipped(&description, reason));
                }
                StepOutcome::CheckFailed(cause) => {
                    self.interaction
                        .announce_step_failed(&description, &format!("check failed: {cause:#}"));
                    results.push(StepResult::failed(&description, &cause));
                    failure = Some(OrchestrationError::Check {
                        step: description,
                        cause,
                    });
                    break;
                }
                StepOutcome::ExecFailed(cause) => {
                    self.interaction
                        .announce_step_failed(&description, &format!("{cause:#}"));
                    results.push(StepResult::failed(&description, &cause));
                    failure = Some(OrchestrationError::Execute {
                        step: description,
                        cause,
                    });
                    break;
                }
            }
        }

        self.interaction.render_summary(&results);
        match failure {
            Some(error) => Err(error),
            None => {
                self.interaction
                    .announce_overall_success(&self.success_message());
                Ok(())
            }
        }
    }

    fn success_message(&self) -> String {
        if self.options.dry_run {
            format!("{} dry run complete (no changes made)", self.title)
        } else {
            format!("{} complete", self.title)
        }
    }
}

/// Check one step and conditionally execute it.
///
/// The dry-run decision lives here: the probe still runs so the would-be
/// action can be reported, but `execute` is never reached.
fn run_step(
    step: &mut dyn Step,
    description: &str,
    interaction: &dyn UserInteraction,
    ctx: &StepContext,
) -> StepOutcome {
    match step.should_execute(ctx) {
        Err(cause) => StepOutcome::CheckFailed(cause),
        Ok(false) => StepOutcome::Skipped(SkipReason::AlreadyConfigured),
        Ok(true) if ctx.options.dry_run => StepOutcome::Skipped(SkipReason::DryRun),
        Ok(true) => {
            interaction.announce_running(description);
            match step.execute(ctx) {
                Ok(()) => StepOutcome::Executed,
                Err(cause) => StepOutcome::ExecFailed(cause),
            }
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
