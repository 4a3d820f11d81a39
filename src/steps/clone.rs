//! Team repository clone step.
use crate::exec;
use crate::orchestrator::{Step, StepContext};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Clones the configured repository unless the destination already holds one.
///
/// The probe is pure filesystem inspection: a destination with a `.git` entry
/// is satisfied, a missing or empty destination needs work, and anything else
/// at the destination is a probe failure so nothing gets overwritten.
pub struct CloneRepoStep {
    url: String,
    destination: PathBuf,
}

impl CloneRepoStep {
    pub fn new(url: &str, destination: Option<&str>, home: &Path) -> Result<Self> {
        let destination = match destination {
            Some(raw) => expand_home(raw, home),
            None => {
                let name = repo_name_from_url(url)
                    .ok_or_else(|| anyhow!("cannot derive a directory name from {url:?}"))?;
                home.join("src").join(name)
            }
        };
        Ok(Self {
            url: url.to_string(),
            destination,
        })
    }
}

impl Step for CloneRepoStep {
    fn description(&self) -> &str {
        "Clone team repository"
    }

    fn should_execute(&mut self, _ctx: &StepContext) -> Result<bool> {
        if self.destination.join(".git").exists() {
            tracing::debug!(destination = %self.destination.display(), "repository present");
            return Ok(false);
        }
        if !self.destination.exists() {
            return Ok(true);
        }
        let mut entries = self
            .destination
            .read_dir()
            .with_context(|| format!("inspect {}", self.destination.display()))?;
        if entries.next().is_none() {
            return Ok(true);
        }
        Err(anyhow!(
            "{} exists and is not a git repository; move it aside or change repository.destination",
            self.destination.display()
        ))
    }

    fn execute(&mut self, ctx: &StepContext) -> Result<()> {
        if let Some(parent) = self.destination.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let destination = self.destination.display().to_string();
        let argv = exec::argv(&["git", "clone", self.url.as_str(), destination.as_str()]);
        exec::announce_exec(&argv, ctx.options.verbose);
        exec::run_checked(&argv, &format!("clone {}", self.url))?;
        tracing::info!(url = %self.url, destination = %destination, "cloned");
        Ok(())
    }
}

/// Last path segment of a repository URL without its `.git` suffix.
///
/// Handles both URL-style (`https://host/team/app.git`) and scp-style
/// (`git@host:team/app.git`) remotes.
fn repo_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let after_slash = trimmed.rsplit('/').next()?;
    let name = after_slash.rsplit(':').next()?;
    let name = name.strip_suffix(".git").unwrap_or(name);
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// Expand a leading `~` against the user's home directory.
fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        return home.join(rest);
    }
    PathBuf::from(raw)
}
