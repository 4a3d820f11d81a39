//! Host platform detection.
//!
//! Step assembly branches on the platform exactly once, when the checklist is
//! built. Everything downstream works with an already-resolved [`Platform`].

use anyhow::{bail, Result};

/// Operating systems the onboarding checklist knows how to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Detect the platform this process is running on.
    pub fn detect() -> Result<Self> {
        if cfg!(target_os = "windows") {
            Ok(Platform::Windows)
        } else if cfg!(target_os = "macos") {
            Ok(Platform::MacOs)
        } else if cfg!(target_os = "linux") {
            Ok(Platform::Linux)
        } else {
            bail!("unsupported platform: {}", std::env::consts::OS);
        }
    }

    /// Stable lowercase name used in logs and JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
        }
    }
}

/// Whether the current process already has root privileges.
///
/// Package installs on Linux go through sudo unless we are root; on other
/// platforms the answer is irrelevant and reported as false.
pub fn running_as_root() -> bool {
    #[cfg(unix)]
    {
        // Safety: geteuid has no preconditions and cannot fail.
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Whether this Linux system is a WSL guest.
///
/// WSL kernels identify themselves in `/proc/version`; a plain Linux box
/// does not. Always false off Linux.
pub fn is_wsl_guest() -> bool {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/proc/version")
            .map(|version| microsoft_kernel(&version))
            .unwrap_or(false)
    }
    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn microsoft_kernel(version: &str) -> bool {
    version.to_ascii_lowercase().contains("microsoft")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_matches_compile_target() {
        let platform = Platform::detect().expect("supported test platform");
        if cfg!(target_os = "linux") {
            assert_eq!(platform, Platform::Linux);
        }
        assert!(!platform.label().is_empty());
    }

    #[test]
    fn wsl_kernels_are_recognized() {
        assert!(microsoft_kernel(
            "Linux version 5.15.167.4-microsoft-standard-WSL2 (root@build) ..."
        ));
        assert!(microsoft_kernel(
            "Linux version 4.4.0-19041-Microsoft (Microsoft@Microsoft.com) ..."
        ));
        assert!(!microsoft_kernel(
            "Linux version 6.8.0-41-generic (buildd@lcy02-amd64-100) ..."
        ));
    }
}
