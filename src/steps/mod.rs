//! Step implementations and per-platform checklist assembly.
//!
//! The run loop is generic; everything platform-specific happens here, once,
//! when the ordered step list is built. Steps that depend on an absent config
//! field are left out instead of being assembled as no-ops.

mod clone;
mod git_config;
mod package;
mod vscode;
mod wsl;

pub use clone::CloneRepoStep;
pub use git_config::{CredentialHelperStep, GitIdentityStep};
pub use package::PackageInstallStep;
pub use vscode::{VsCodeExtensionsStep, VsCodeSettingsStep};
pub use wsl::EnableWslStep;

use crate::config::OnboardingConfig;
use crate::orchestrator::Step;
use crate::platform::{self, Platform};
use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Title line for a run on `platform`.
pub fn checklist_title(platform: Platform) -> String {
    format!("workstation onboarding ({})", platform.label())
}

/// Build the ordered step list for `platform` from the config.
pub fn onboarding_steps(
    platform: Platform,
    config: &OnboardingConfig,
) -> Result<Vec<Box<dyn Step>>> {
    assemble(platform, config, platform::is_wsl_guest())
}

/// Order matters: tools are installed before anything configures them, and
/// WSL precedes Docker because Docker Desktop runs on the WSL backend. Inside
/// a WSL guest the Docker step is left out; the engine comes from Docker
/// Desktop on the Windows host.
fn assemble(
    platform: Platform,
    config: &OnboardingConfig,
    wsl_guest: bool,
) -> Result<Vec<Box<dyn Step>>> {
    let mut steps: Vec<Box<dyn Step>> = Vec::new();

    steps.push(Box::new(PackageInstallStep::new(
        &package::GIT,
        platform,
        install_override(config, package::GIT.binary),
    )?));
    steps.push(Box::new(PackageInstallStep::new(
        &package::VSCODE,
        platform,
        install_override(config, package::VSCODE.binary),
    )?));
    if platform == Platform::Windows {
        steps.push(Box::new(EnableWslStep::new()));
    }
    if platform == Platform::Linux && wsl_guest {
        tracing::debug!("wsl guest, docker comes from the Windows host");
    } else {
        steps.push(Box::new(PackageInstallStep::new(
            &package::DOCKER,
            platform,
            install_override(config, package::DOCKER.binary),
        )?));
    }

    if config.git_user_name.is_some() || config.git_user_email.is_some() {
        steps.push(Box::new(GitIdentityStep::new(
            config.git_user_name.clone(),
            config.git_user_email.clone(),
        )));
    }
    steps.push(Box::new(CredentialHelperStep::new(
        platform,
        config.git_credential_helper.as_deref(),
    )));

    if !config.vscode_extensions.is_empty() {
        steps.push(Box::new(VsCodeExtensionsStep::new(
            config.vscode_extensions.clone(),
        )));
    }
    if !config.vscode_settings.is_empty() {
        steps.push(Box::new(VsCodeSettingsStep::new(
            config.vscode_settings.clone(),
            default_settings_path()?,
        )));
    }

    if let Some(repo) = &config.repository {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("no home directory for this user"))?;
        steps.push(Box::new(CloneRepoStep::new(
            &repo.url,
            repo.destination.as_deref(),
            &home,
        )?));
    }

    Ok(steps)
}

fn install_override<'a>(config: &'a OnboardingConfig, binary: &str) -> Option<&'a str> {
    config.install_overrides.get(binary).map(String::as_str)
}

/// VS Code user settings location: `<config dir>/Code/User/settings.json`.
fn default_settings_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| anyhow!("no config directory for this user"))?;
    Ok(base.join("Code").join("User").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_config, RepositoryConfig};

    fn full_config() -> OnboardingConfig {
        let mut config = default_config();
        config.git_user_name = Some("Ada Lovelace".to_string());
        config.git_user_email = Some("ada@example.com".to_string());
        config.repository = Some(RepositoryConfig {
            url: "https://example.com/team/app.git".to_string(),
            destination: Some("~/src/app".to_string()),
        });
        config
            .vscode_extensions
            .push("rust-lang.rust-analyzer".to_string());
        config.vscode_settings.insert(
            "editor.formatOnSave".to_string(),
            serde_json::Value::Bool(true),
        );
        config
    }

    fn names(steps: &[Box<dyn Step>]) -> Vec<&str> {
        steps.iter().map(|step| step.description()).collect()
    }

    #[test]
    fn windows_checklist_includes_wsl_before_docker() {
        let steps = assemble(Platform::Windows, &full_config(), false).expect("assemble");
        assert_eq!(
            names(&steps),
            vec![
                "Install Git",
                "Install Visual Studio Code",
                "Enable Windows Subsystem for Linux",
                "Install Docker",
                "Configure Git identity",
                "Configure Git credential helper",
                "Install VS Code extensions",
                "Apply VS Code settings",
                "Clone team repository",
            ]
        );
    }

    #[test]
    fn unix_checklists_have_no_wsl_step() {
        for platform in [Platform::MacOs, Platform::Linux] {
            let steps = assemble(platform, &full_config(), false).expect("assemble");
            assert!(!names(&steps)
                .iter()
                .any(|name| name.contains("Windows Subsystem")));
        }
    }

    #[test]
    fn wsl_guest_checklist_leaves_docker_to_the_host() {
        let steps = assemble(Platform::Linux, &default_config(), true).expect("assemble");
        assert!(!names(&steps).contains(&"Install Docker"));

        let steps = assemble(Platform::Linux, &default_config(), false).expect("assemble");
        assert!(names(&steps).contains(&"Install Docker"));
    }

    #[test]
    fn minimal_config_assembles_installs_and_credential_helper_only() {
        let steps = assemble(Platform::Linux, &default_config(), false).expect("assemble");
        assert_eq!(
            names(&steps),
            vec![
                "Install Git",
                "Install Visual Studio Code",
                "Install Docker",
                "Configure Git credential helper",
            ]
        );
    }

    #[test]
    fn identity_step_appears_with_either_identity_field() {
        let mut config = default_config();
        config.git_user_email = Some("ada@example.com".to_string());
        let steps = assemble(Platform::Linux, &config, false).expect("assemble");
        assert!(names(&steps).contains(&"Configure Git identity"));
    }
}
