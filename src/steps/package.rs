//! Package-manager install steps.
//!
//! One step type covers Git, VS Code, and Docker: probe PATH for the tool's
//! binary, and when absent run the platform package manager (winget, brew, or
//! apt-get). The install command line can be replaced per tool through the
//! config's `install_overrides`.
use crate::exec;
use crate::orchestrator::{Step, StepContext};
use crate::platform::{self, Platform};
use anyhow::{bail, Context, Result};

/// Static description of one installable tool.
pub struct PackageSpec {
    pub display_name: &'static str,
    /// Binary probed on PATH to decide whether work remains.
    pub binary: &'static str,
    windows_install: &'static [&'static str],
    macos_install: &'static [&'static str],
    linux_install: &'static [&'static str],
}

pub const GIT: PackageSpec = PackageSpec {
    display_name: "Install Git",
    binary: "git",
    windows_install: &[
        "winget",
        "install",
        "--exact",
        "--id",
        "Git.Git",
        "--silent",
        "--accept-package-agreements",
        "--accept-source-agreements",
    ],
    macos_install: &["brew", "install", "git"],
    linux_install: &["apt-get", "install", "-y", "git"],
};

pub const VSCODE: PackageSpec = PackageSpec {
    display_name: "Install Visual Studio Code",
    binary: "code",
    windows_install: &[
        "winget",
        "install",
        "--exact",
        "--id",
        "Microsoft.VisualStudioCode",
        "--silent",
        "--accept-package-agreements",
        "--accept-source-agreements",
    ],
    macos_install: &["brew", "install", "--cask", "visual-studio-code"],
    linux_install: &["apt-get", "install", "-y", "code"],
};

pub const DOCKER: PackageSpec = PackageSpec {
    display_name: "Install Docker",
    binary: "docker",
    windows_install: &[
        "winget",
        "install",
        "--exact",
        "--id",
        "Docker.DockerDesktop",
        "--silent",
        "--accept-package-agreements",
        "--accept-source-agreements",
    ],
    macos_install: &["brew", "install", "--cask", "docker"],
    linux_install: &["apt-get", "install", "-y", "docker.io"],
};

impl PackageSpec {
    /// Default install argv for `platform`.
    ///
    /// apt-get runs under sudo unless the process is already root; winget and
    /// brew elevate themselves.
    fn install_argv(&self, platform: Platform, as_root: bool) -> Vec<String> {
        let base = match platform {
            Platform::Windows => self.windows_install,
            Platform::MacOs => self.macos_install,
            Platform::Linux => self.linux_install,
        };
        let mut argv = exec::argv(base);
        if platform == Platform::Linux && !as_root {
            argv.insert(0, "sudo".to_string());
        }
        argv
    }
}

/// Installs one tool through the platform package manager.
#[derive(Debug)]
pub struct PackageInstallStep {
    display_name: String,
    binary: String,
    install_argv: Vec<String>,
}

impl PackageInstallStep {
    pub fn new(spec: &PackageSpec, platform: Platform, override_line: Option<&str>) -> Result<Self> {
        let install_argv = match override_line {
            Some(line) => shell_words::split(line)
                .with_context(|| format!("parse install override for {}", spec.binary))?,
            None => spec.install_argv(platform, platform::running_as_root()),
        };
        Ok(Self {
            display_name: spec.display_name.to_string(),
            binary: spec.binary.to_string(),
            install_argv,
        })
    }
}

impl Step for PackageInstallStep {
    fn description(&self) -> &str {
        &self.display_name
    }

    fn should_execute(&mut self, _ctx: &StepContext) -> Result<bool> {
        match exec::find_on_path(&self.binary)? {
            Some(path) => {
                tracing::debug!(binary = %self.binary, path = %path.display(), "already on PATH");
                Ok(false)
            }
            None => Ok(true),
        }
    }

    fn execute(&mut self, ctx: &StepContext) -> Result<()> {
        exec::announce_exec(&self.install_argv, ctx.options.verbose);
        exec::run_checked(&self.install_argv, &format!("install {}", self.binary))?;
        match exec::find_on_path(&self.binary)? {
            Some(path) => {
                let version = exec::run_captured(&exec::argv(&[self.binary.as_str(), "--version"]))
                    .ok()
                    .and_then(|output| exec::sniff_version(&output.stdout));
                tracing::info!(
                    binary = %self.binary,
                    path = %path.display(),
                    version = version.as_deref().unwrap_or("unknown"),
                    "installed"
                );
                Ok(())
            }
            None => bail!(
                "{} installed but still not on PATH; open a new terminal and re-run",
                self.binary
            ),
        }
    }
}

#[cfg(test)]
#[path = "package_tests.rs"]
mod tests;
