//! VS Code extension and settings steps.
use crate::exec;
use crate::orchestrator::{Step, StepContext};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Installs required extensions that `code --list-extensions` does not show.
///
/// Extension identifiers compare case-insensitively, matching how the
/// marketplace treats them. The probe caches the missing set for `execute`.
pub struct VsCodeExtensionsStep {
    required: Vec<String>,
    missing: Option<Vec<String>>,
}

impl VsCodeExtensionsStep {
    pub fn new(required: Vec<String>) -> Self {
        Self {
            required,
            missing: None,
        }
    }
}

impl Step for VsCodeExtensionsStep {
    fn description(&self) -> &str {
        "Install VS Code extensions"
    }

    fn should_execute(&mut self, _ctx: &StepContext) -> Result<bool> {
        self.missing = None;
        if exec::find_on_path("code")?.is_none() {
            // The editor install step runs first; everything is missing.
            self.missing = Some(self.required.clone());
            return Ok(true);
        }
        let output = exec::run_checked(
            &exec::argv(&["code", "--list-extensions"]),
            "list VS Code extensions",
        )?;
        let missing = missing_extensions(&self.required, &output.stdout);
        let needs_work = !missing.is_empty();
        self.missing = Some(missing);
        Ok(needs_work)
    }

    fn execute(&mut self, ctx: &StepContext) -> Result<()> {
        let missing = self
            .missing
            .take()
            .ok_or_else(|| anyhow!("extension probe did not run"))?;
        for extension in &missing {
            let argv = exec::argv(&["code", "--install-extension", extension.as_str()]);
            exec::announce_exec(&argv, ctx.options.verbose);
            exec::run_checked(&argv, &format!("install extension {extension}"))?;
            tracing::info!(extension = %extension, "installed");
        }
        Ok(())
    }
}

/// Required extensions absent from a `code --list-extensions` listing,
/// in required order.
fn missing_extensions(required: &[String], installed_raw: &str) -> Vec<String> {
    let installed: Vec<String> = installed_raw
        .lines()
        .map(|line| line.trim().to_ascii_lowercase())
        .filter(|line| !line.is_empty())
        .collect();
    required
        .iter()
        .filter(|extension| !installed.contains(&extension.to_ascii_lowercase()))
        .cloned()
        .collect()
}

/// Outcome of comparing desired settings entries against `settings.json`.
#[derive(Debug)]
enum SettingsMerge {
    UpToDate,
    Update(String),
}

/// Merges managed entries into the user's `settings.json`.
///
/// The merge is shallow: each managed top-level key is set to its desired
/// value, everything else in the file is preserved untouched. A file that
/// exists but cannot be parsed fails the probe rather than being clobbered.
pub struct VsCodeSettingsStep {
    desired: serde_json::Map<String, serde_json::Value>,
    settings_path: PathBuf,
    pending: Option<String>,
}

impl VsCodeSettingsStep {
    pub fn new(
        desired: serde_json::Map<String, serde_json::Value>,
        settings_path: PathBuf,
    ) -> Self {
        Self {
            desired,
            settings_path,
            pending: None,
        }
    }
}

impl Step for VsCodeSettingsStep {
    fn description(&self) -> &str {
        "Apply VS Code settings"
    }

    fn should_execute(&mut self, _ctx: &StepContext) -> Result<bool> {
        self.pending = None;
        let existing = match fs::read_to_string(&self.settings_path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("read settings {}", self.settings_path.display())
                })
            }
        };
        match merge_settings(existing.as_deref(), &self.desired)
            .with_context(|| format!("merge settings {}", self.settings_path.display()))?
        {
            SettingsMerge::UpToDate => Ok(false),
            SettingsMerge::Update(text) => {
                self.pending = Some(text);
                Ok(true)
            }
        }
    }

    fn execute(&mut self, _ctx: &StepContext) -> Result<()> {
        let text = self
            .pending
            .take()
            .ok_or_else(|| anyhow!("settings probe did not run"))?;
        let parent = self
            .settings_path
            .parent()
            .ok_or_else(|| anyhow!("settings path has no parent directory"))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("create settings dir {}", parent.display()))?;
        let mut staged = tempfile::NamedTempFile::new_in(parent)
            .context("create settings temp file")?;
        staged
            .write_all(text.as_bytes())
            .context("write settings temp file")?;
        staged
            .persist(&self.settings_path)
            .with_context(|| format!("replace {}", self.settings_path.display()))?;
        tracing::info!(path = %self.settings_path.display(), "settings updated");
        Ok(())
    }
}

fn merge_settings(
    existing: Option<&str>,
    desired: &serde_json::Map<String, serde_json::Value>,
) -> Result<SettingsMerge> {
    let mut object = match existing {
        None => serde_json::Map::new(),
        Some(text) => {
            let value: serde_json::Value =
                serde_json::from_str(text).context("parse settings JSON")?;
            match value {
                serde_json::Value::Object(object) => object,
                other => {
                    return Err(anyhow!(
                        "settings JSON must be an object, found {}",
                        json_type_name(&other)
                    ))
                }
            }
        }
    };

    let up_to_date = desired
        .iter()
        .all(|(key, value)| object.get(key) == Some(value));
    if existing.is_some() && up_to_date {
        return Ok(SettingsMerge::UpToDate);
    }

    for (key, value) in desired {
        object.insert(key.clone(), value.clone());
    }
    let mut text = serde_json::to_string_pretty(&serde_json::Value::Object(object))
        .context("serialize settings JSON")?;
    text.push('\n');
    Ok(SettingsMerge::Update(text))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
