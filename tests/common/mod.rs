//! Helpers shared by the CLI integration tests.
use std::path::Path;
use std::process::{Command, Output};

/// Run the built binary with `args` and capture everything.
pub fn rigup(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rigup"))
        .args(args)
        .output()
        .expect("run rigup")
}

/// Write a starter config at `path` and return the path as an argument string.
pub fn init_config(path: &Path) -> String {
    let path_arg = path.to_str().expect("utf-8 path").to_string();
    let output = rigup(&["init", "--config", &path_arg]);
    assert!(
        output.status.success(),
        "init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    path_arg
}
