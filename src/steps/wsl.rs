//! Windows Subsystem for Linux enablement.
//!
//! `wsl.exe` writes UTF-16LE to pipes, which arrives here as ASCII text with
//! interleaved NUL bytes; the probe strips those before parsing. The step is
//! satisfied once `wsl --status` reports a default distribution.
use crate::exec;
use crate::orchestrator::{Step, StepContext};
use anyhow::{anyhow, Result};

/// Enables WSL and its default distribution via `wsl --install`.
pub struct EnableWslStep;

impl EnableWslStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnableWslStep {
    fn default() -> Self {
        Self::new()
    }
}

impl Step for EnableWslStep {
    fn description(&self) -> &str {
        "Enable Windows Subsystem for Linux"
    }

    fn should_execute(&mut self, _ctx: &StepContext) -> Result<bool> {
        if exec::find_on_path("wsl")?.is_none() {
            return Err(anyhow!(
                "wsl.exe not found on PATH; this Windows build cannot run `wsl --install`"
            ));
        }
        let output = exec::run_captured(&exec::argv(&["wsl", "--status"]))?;
        let status = clean_console_text(&output.stdout);
        if output.success && has_default_distribution(&status) {
            tracing::debug!("WSL reports a default distribution");
            return Ok(false);
        }
        Ok(true)
    }

    fn execute(&mut self, ctx: &StepContext) -> Result<()> {
        let argv = exec::argv(&["wsl", "--install"]);
        exec::announce_exec(&argv, ctx.options.verbose);
        exec::run_checked(&argv, "enable WSL")?;
        tracing::info!("WSL install started; a reboot may be required to finish");
        Ok(())
    }
}

/// Strip the NUL and carriage-return bytes UTF-16 console output leaves
/// behind after lossy UTF-8 conversion.
fn clean_console_text(raw: &str) -> String {
    raw.chars().filter(|ch| *ch != '\0' && *ch != '\r').collect()
}

/// True when the status output names a default distribution.
fn has_default_distribution(status: &str) -> bool {
    status
        .lines()
        .any(|line| line.trim_start().starts_with("Default Distribution"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::ExecutionOptions;

    #[test]
    fn check_fails_when_the_launcher_is_missing() {
        // Hosts with a real launcher take the status path instead.
        if exec::find_on_path("wsl").expect("PATH lookup runs").is_some() {
            return;
        }
        let ctx = StepContext {
            options: ExecutionOptions::default(),
        };
        let mut step = EnableWslStep::new();
        let err = step.should_execute(&ctx).unwrap_err();
        assert!(err.to_string().contains("wsl.exe"));
    }

    #[test]
    fn clean_console_text_strips_utf16_artifacts() {
        // What UTF-16LE console output looks like after lossy UTF-8 reading.
        let raw: String = "Default Version: 2\r\n"
            .chars()
            .flat_map(|ch| [ch, '\0'])
            .collect();
        assert_eq!(clean_console_text(&raw), "Default Version: 2\n");
    }

    #[test]
    fn default_distribution_line_satisfies_the_probe() {
        let ready = "Default Distribution: Ubuntu\nDefault Version: 2\n";
        assert!(has_default_distribution(ready));

        let feature_only = "Default Version: 2\n";
        assert!(!has_default_distribution(feature_only));

        assert!(!has_default_distribution(""));
    }
}
