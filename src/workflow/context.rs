use crate::config::{default_config_path, load_config, validate_config};
use crate::orchestrator::Step;
use crate::platform::Platform;
use crate::steps::{checklist_title, onboarding_steps};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// A validated config turned into the step list for this machine.
///
/// Every command except `init` starts here, so config errors surface the
/// same way no matter which command hit them first.
pub(crate) struct ChecklistContext {
    pub(crate) platform: Platform,
    pub(crate) steps: Vec<Box<dyn Step>>,
}

impl ChecklistContext {
    pub(crate) fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = resolve_config_path(config_override)?;
        let config = load_config(&config_path)?;
        validate_config(&config)?;
        let platform = Platform::detect()?;
        let steps = onboarding_steps(platform, &config)?;
        tracing::debug!(
            config = %config_path.display(),
            platform = platform.label(),
            steps = steps.len(),
            "assembled checklist"
        );
        Ok(Self { platform, steps })
    }

    pub(crate) fn title(&self) -> String {
        checklist_title(self.platform)
    }
}

/// Explicit `--config` wins; otherwise the per-user default location.
pub(crate) fn resolve_config_path(config_override: Option<&Path>) -> Result<PathBuf> {
    match config_override {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}
