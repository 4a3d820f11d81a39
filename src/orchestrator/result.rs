//! Per-step outcome records.

/// Outcome classification for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Executed,
    Skipped,
    Failed,
}

/// Why a step was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyConfigured,
    DryRun,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::AlreadyConfigured => "Already configured",
            SkipReason::DryRun => "Dry run",
        }
    }
}

/// Immutable record of a single step's outcome.
///
/// Fields are private so the constructors are the only way to build one: a
/// skip reason exists exactly when the status is `Skipped`, and a failure
/// message exactly when the status is `Failed`.
#[derive(Debug, Clone)]
pub struct StepResult {
    step_name: String,
    status: StepStatus,
    skip_reason: Option<SkipReason>,
    failure: Option<String>,
}

impl StepResult {
    pub fn executed(step_name: &str) -> Self {
        Self {
            step_name: step_name.to_string(),
            status: StepStatus::Executed,
            skip_reason: None,
            failure: None,
        }
    }

    pub fn skipped(step_name: &str, reason: SkipReason) -> Self {
        Self {
            step_name: step_name.to_string(),
            status: StepStatus::Skipped,
            skip_reason: Some(reason),
            failure: None,
        }
    }

    pub fn failed(step_name: &str, cause: &anyhow::Error) -> Self {
        Self {
            step_name: step_name.to_string(),
            status: StepStatus::Failed,
            skip_reason: None,
            failure: Some(format!("{cause:#}")),
        }
    }

    pub fn step_name(&self) -> &str {
        &self.step_name
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }

    pub fn skip_reason(&self) -> Option<&'static str> {
        self.skip_reason.map(SkipReason::as_str)
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn constructors_enforce_field_pairing() {
        let executed = StepResult::executed("Install Git");
        assert_eq!(executed.status(), StepStatus::Executed);
        assert!(executed.skip_reason().is_none());
        assert!(executed.failure().is_none());

        let skipped = StepResult::skipped("Install Git", SkipReason::AlreadyConfigured);
        assert_eq!(skipped.status(), StepStatus::Skipped);
        assert_eq!(skipped.skip_reason(), Some("Already configured"));
        assert!(skipped.failure().is_none());

        let dry = StepResult::skipped("Install Git", SkipReason::DryRun);
        assert_eq!(dry.skip_reason(), Some("Dry run"));

        let failed = StepResult::failed("Install Git", &anyhow!("winget exited 1"));
        assert_eq!(failed.status(), StepStatus::Failed);
        assert!(failed.skip_reason().is_none());
        assert_eq!(failed.failure(), Some("winget exited 1"));
    }

    #[test]
    fn failure_message_renders_full_cause_chain() {
        let cause = anyhow!("spawn winget").context("install Git");
        let failed = StepResult::failed("Install Git", &cause);
        assert_eq!(failed.failure(), Some("install Git: spawn winget"));
    }
}
