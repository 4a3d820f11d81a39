//! Rendering surface the run loop reports through.
use super::{StepResult, StepStatus};

/// Progress and summary callbacks consumed by the run loop.
///
/// All methods are one-way notifications. Implementations must not fail;
/// rendering problems are the implementation's own concern, never the run's.
pub trait UserInteraction {
    fn announce_start(&self, title: &str, step_count: usize);
    fn announce_check(&self, description: &str);
    fn announce_already_configured(&self, description: &str);
    fn announce_dry_run_skip(&self, description: &str);
    fn announce_running(&self, description: &str);
    fn announce_step_succeeded(&self, description: &str);
    fn announce_step_failed(&self, description: &str, message: &str);
    /// One-shot call at end of run with every attempted step, in order.
    fn render_summary(&self, results: &[StepResult]);
    fn announce_overall_success(&self, message: &str);
}

/// Console renderer: progress lines on stderr, one line per event.
///
/// Stdout stays reserved for machine-readable command output.
#[derive(Debug, Default)]
pub struct ConsoleInteraction;

impl ConsoleInteraction {
    pub fn new() -> Self {
        Self
    }
}

impl UserInteraction for ConsoleInteraction {
    fn announce_start(&self, title: &str, step_count: usize) {
        eprintln!("{title}: {step_count} steps");
    }

    fn announce_check(&self, description: &str) {
        eprintln!("check: {description}");
    }

    fn announce_already_configured(&self, description: &str) {
        eprintln!("{}", skip_line(description, "already configured"));
    }

    fn announce_dry_run_skip(&self, description: &str) {
        eprintln!("{}", skip_line(description, "dry run"));
    }

    fn announce_running(&self, description: &str) {
        eprintln!("  run: {description}");
    }

    fn announce_step_succeeded(&self, description: &str) {
        eprintln!("  done: {description}");
    }

    fn announce_step_failed(&self, description: &str, message: &str) {
        eprintln!("{}", fail_line(description, message));
    }

    fn render_summary(&self, results: &[StepResult]) {
        for line in summary_lines(results) {
            eprintln!("{line}");
        }
    }

    fn announce_overall_success(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Skip and failure lines name the step; subprocess output shares the stream.
fn skip_line(description: &str, reason: &str) -> String {
    format!("  skip: {description} ({reason})")
}

fn fail_line(description: &str, message: &str) -> String {
    format!("  fail: {description}: {message}")
}

/// Render the summary as aligned name/outcome rows under a header.
fn summary_lines(results: &[StepResult]) -> Vec<String> {
    let mut lines = vec!["summary:".to_string()];
    let width = results
        .iter()
        .map(|result| result.step_name().len())
        .max()
        .unwrap_or(0);
    for result in results {
        let outcome = match result.status() {
            StepStatus::Executed => "executed".to_string(),
            StepStatus::Skipped => {
                format!("skipped ({})", result.skip_reason().unwrap_or(""))
            }
            StepStatus::Failed => {
                format!("failed ({})", result.failure().unwrap_or(""))
            }
        };
        lines.push(format!("  {:<width$}  {outcome}", result.step_name()));
    }
    lines
}
