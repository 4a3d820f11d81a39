//! Onboarding configuration helpers.
//!
//! The config is user-owned JSON under the platform config directory. `rigup
//! init` writes a stub with every editable field visible; the other commands
//! load and validate it before assembling the checklist.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Repository the final onboarding step clones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    pub url: String,
    /// Clone destination; defaults to `~/src/<repo-name>` when omitted.
    #[serde(default)]
    pub destination: Option<String>,
}

/// User-editable description of what a finished workstation looks like.
///
/// Every field except `schema_version` may be omitted; steps that depend on an
/// absent field are simply not assembled. Absent fields still serialize (as
/// `null` or empty) so a freshly written config doubles as a field reference
/// for hand editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OnboardingConfig {
    pub schema_version: u32,
    #[serde(default)]
    pub git_user_name: Option<String>,
    #[serde(default)]
    pub git_user_email: Option<String>,
    /// Git credential helper to configure; omitted means the platform default.
    #[serde(default)]
    pub git_credential_helper: Option<String>,
    #[serde(default)]
    pub repository: Option<RepositoryConfig>,
    /// VS Code extension identifiers (`publisher.name`) that must be present.
    #[serde(default)]
    pub vscode_extensions: Vec<String>,
    /// Top-level entries merged into the user's VS Code `settings.json`.
    #[serde(default)]
    pub vscode_settings: serde_json::Map<String, serde_json::Value>,
    /// Replacement install command lines keyed by tool name (`git`, `code`,
    /// `docker`), parsed with shell quoting rules.
    #[serde(default)]
    pub install_overrides: BTreeMap<String, String>,
}

/// Build the empty config used when a machine is first initialized.
pub fn default_config() -> OnboardingConfig {
    OnboardingConfig {
        schema_version: CONFIG_SCHEMA_VERSION,
        git_user_name: None,
        git_user_email: None,
        git_credential_helper: None,
        repository: None,
        vscode_extensions: Vec::new(),
        vscode_settings: serde_json::Map::new(),
        install_overrides: BTreeMap::new(),
    }
}

/// Default path of the config file: `<config dir>/rigup/config.json`.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| anyhow!("no config directory for this user"))?;
    Ok(base.join("rigup").join("config.json"))
}

/// Load the onboarding config from `path`.
pub fn load_config(path: &Path) -> Result<OnboardingConfig> {
    let bytes = fs::read(path).with_context(|| {
        format!(
            "read config {} (run `rigup init` to create it)",
            path.display()
        )
    })?;
    let config: OnboardingConfig =
        serde_json::from_slice(&bytes).context("parse onboarding config JSON")?;
    Ok(config)
}

/// Persist a config to disk in a stable JSON format.
pub fn write_config(path: &Path, config: &OnboardingConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(config).context("serialize onboarding config")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Validate config schema and user-provided values.
pub fn validate_config(config: &OnboardingConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if let Some(name) = config.git_user_name.as_deref() {
        if name.trim().is_empty() {
            return Err(anyhow!("git_user_name must be non-empty when set"));
        }
    }
    if let Some(email) = config.git_user_email.as_deref() {
        if !email.contains('@') {
            return Err(anyhow!("git_user_email must contain '@' (got {email:?})"));
        }
    }
    if let Some(helper) = config.git_credential_helper.as_deref() {
        if helper.trim().is_empty() {
            return Err(anyhow!("git_credential_helper must be non-empty when set"));
        }
    }
    if let Some(repo) = config.repository.as_ref() {
        if repo.url.trim().is_empty() {
            return Err(anyhow!("repository.url must be non-empty"));
        }
    }
    for extension in &config.vscode_extensions {
        if extension.trim().is_empty() {
            return Err(anyhow!("vscode_extensions entries must be non-empty"));
        }
    }
    for (tool, line) in &config.install_overrides {
        let argv = shell_words::split(line)
            .with_context(|| format!("parse install override for {tool}"))?;
        if argv.is_empty() {
            return Err(anyhow!("install override for {tool} must be non-empty"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
