//! Global git configuration steps: identity and credential helper.
//!
//! Both steps converge `git config --global` on the values in the onboarding
//! config: keys that already match are left alone, keys that are unset or
//! differ are written. The config is the source of truth.
use crate::exec;
use crate::orchestrator::{Step, StepContext};
use crate::platform::Platform;
use anyhow::{anyhow, Result};

/// Read one key from global git config.
///
/// `Ok(None)` when the key is unset (`git config --get` exits 1 with no
/// output); any other non-zero exit is a real probe failure.
fn read_global(key: &str) -> Result<Option<String>> {
    let output = exec::run_captured(&exec::argv(&["git", "config", "--global", "--get", key]))?;
    if output.success {
        let value = output.stdout.trim();
        if value.is_empty() {
            return Ok(None);
        }
        return Ok(Some(value.to_string()));
    }
    match output.code {
        Some(1) => Ok(None),
        _ => Err(anyhow!(
            "git config --get {key} failed: {}",
            output.error_excerpt()
        )),
    }
}

fn write_global(key: &str, value: &str, verbose: bool) -> Result<()> {
    let argv = exec::argv(&["git", "config", "--global", key, value]);
    exec::announce_exec(&argv, verbose);
    exec::run_checked(&argv, &format!("set {key}"))?;
    Ok(())
}

fn git_on_path() -> Result<bool> {
    Ok(exec::find_on_path("git")?.is_some())
}

/// Sets `user.name` and `user.email` where the global config differs.
///
/// The probe caches which keys need writing so `execute` does not re-read the
/// config; the cache is cleared at the start of every probe.
pub struct GitIdentityStep {
    user_name: Option<String>,
    user_email: Option<String>,
    pending: Option<Vec<(&'static str, String)>>,
}

impl GitIdentityStep {
    pub fn new(user_name: Option<String>, user_email: Option<String>) -> Self {
        Self {
            user_name,
            user_email,
            pending: None,
        }
    }

    fn desired(&self) -> Vec<(&'static str, String)> {
        let mut desired = Vec::new();
        if let Some(name) = &self.user_name {
            desired.push(("user.name", name.clone()));
        }
        if let Some(email) = &self.user_email {
            desired.push(("user.email", email.clone()));
        }
        desired
    }
}

impl Step for GitIdentityStep {
    fn description(&self) -> &str {
        "Configure Git identity"
    }

    fn should_execute(&mut self, _ctx: &StepContext) -> Result<bool> {
        self.pending = None;
        let desired = self.desired();
        if !git_on_path()? {
            // Nothing can be configured yet; the install step runs first.
            self.pending = Some(desired);
            return Ok(true);
        }
        let mut pending = Vec::new();
        for (key, value) in desired {
            if read_global(key)?.as_deref() == Some(value.as_str()) {
                tracing::debug!(key, "already matches");
            } else {
                pending.push((key, value));
            }
        }
        let needs_work = !pending.is_empty();
        self.pending = Some(pending);
        Ok(needs_work)
    }

    fn execute(&mut self, ctx: &StepContext) -> Result<()> {
        let pending = self
            .pending
            .take()
            .ok_or_else(|| anyhow!("identity probe did not run"))?;
        for (key, value) in &pending {
            write_global(key, value, ctx.options.verbose)?;
            tracing::info!(key, "configured");
        }
        Ok(())
    }
}

/// Sets `credential.helper` to the configured value or the platform default.
pub struct CredentialHelperStep {
    helper: String,
}

impl CredentialHelperStep {
    pub fn new(platform: Platform, override_helper: Option<&str>) -> Self {
        let helper = match override_helper {
            Some(helper) => helper.to_string(),
            None => default_helper(platform).to_string(),
        };
        Self { helper }
    }
}

fn default_helper(platform: Platform) -> &'static str {
    match platform {
        Platform::Windows => "manager",
        Platform::MacOs => "osxkeychain",
        Platform::Linux => "cache --timeout=3600",
    }
}

impl Step for CredentialHelperStep {
    fn description(&self) -> &str {
        "Configure Git credential helper"
    }

    fn should_execute(&mut self, _ctx: &StepContext) -> Result<bool> {
        if !git_on_path()? {
            return Ok(true);
        }
        Ok(read_global("credential.helper")?.as_deref() != Some(self.helper.as_str()))
    }

    fn execute(&mut self, ctx: &StepContext) -> Result<()> {
        write_global("credential.helper", &self.helper, ctx.options.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_step_tracks_only_configured_fields() {
        let both = GitIdentityStep::new(
            Some("Ada Lovelace".to_string()),
            Some("ada@example.com".to_string()),
        );
        let desired = both.desired();
        assert_eq!(desired.len(), 2);
        assert_eq!(desired[0].0, "user.name");
        assert_eq!(desired[1].0, "user.email");

        let name_only = GitIdentityStep::new(Some("Ada Lovelace".to_string()), None);
        let desired = name_only.desired();
        assert_eq!(desired.len(), 1);
        assert_eq!(desired[0], ("user.name", "Ada Lovelace".to_string()));
    }

    #[test]
    fn credential_helper_defaults_follow_the_platform() {
        assert_eq!(default_helper(Platform::Windows), "manager");
        assert_eq!(default_helper(Platform::MacOs), "osxkeychain");
        assert_eq!(default_helper(Platform::Linux), "cache --timeout=3600");
    }

    #[test]
    fn configured_helper_replaces_the_platform_default() {
        let step = CredentialHelperStep::new(Platform::Linux, Some("store"));
        assert_eq!(step.helper, "store");

        let step = CredentialHelperStep::new(Platform::Linux, None);
        assert_eq!(step.helper, "cache --timeout=3600");
    }
}
