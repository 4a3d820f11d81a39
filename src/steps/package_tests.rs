use super::{PackageInstallStep, DOCKER, GIT, VSCODE};
use crate::orchestrator::{ExecutionOptions, Step, StepContext};
use crate::platform::Platform;

fn ctx() -> StepContext {
    StepContext {
        options: ExecutionOptions::default(),
    }
}

#[test]
fn default_install_commands_match_platform() {
    let windows = GIT.install_argv(Platform::Windows, false);
    assert_eq!(windows[0], "winget");
    assert!(windows.contains(&"Git.Git".to_string()));

    let macos = VSCODE.install_argv(Platform::MacOs, false);
    assert_eq!(
        macos,
        vec!["brew", "install", "--cask", "visual-studio-code"]
    );

    let linux = DOCKER.install_argv(Platform::Linux, false);
    assert_eq!(
        linux,
        vec!["sudo", "apt-get", "install", "-y", "docker.io"]
    );
}

#[test]
fn root_skips_the_sudo_prefix() {
    let as_root = GIT.install_argv(Platform::Linux, true);
    assert_eq!(as_root, vec!["apt-get", "install", "-y", "git"]);
    let as_user = GIT.install_argv(Platform::Linux, false);
    assert_eq!(as_user[0], "sudo");
}

#[test]
fn override_replaces_the_default_command() {
    let step = PackageInstallStep::new(
        &GIT,
        Platform::Linux,
        Some("dnf install -y 'git'"),
    )
    .expect("override parses");
    assert_eq!(step.install_argv, vec!["dnf", "install", "-y", "git"]);

    let err = PackageInstallStep::new(&GIT, Platform::Linux, Some("unbalanced 'quote"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("install override"));
}

#[test]
fn check_skips_when_binary_is_on_path() {
    // `sh` is on PATH in any unix test environment.
    #[cfg(unix)]
    {
        let spec = super::PackageSpec {
            display_name: "Install sh",
            binary: "sh",
            windows_install: &[],
            macos_install: &[],
            linux_install: &[],
        };
        let mut step =
            PackageInstallStep::new(&spec, Platform::Linux, None).expect("construct step");
        let needs_work = step.should_execute(&ctx()).expect("probe runs");
        assert!(!needs_work);
    }
}

#[test]
fn check_reports_work_for_a_missing_binary() {
    let spec = super::PackageSpec {
        display_name: "Install nonexistent tool",
        binary: "rigup-no-such-binary-on-path",
        windows_install: &[],
        macos_install: &[],
        linux_install: &[],
    };
    let mut step = PackageInstallStep::new(&spec, Platform::Linux, None).expect("construct step");
    let needs_work = step.should_execute(&ctx()).expect("probe runs");
    assert!(needs_work);
}
