//! Captured subprocess execution and PATH probing.
//!
//! Onboarding steps are thin wrappers over external tools (package managers,
//! git, the VS Code CLI). This module gives them one way to run a command,
//! capture its output, and log timing, so the steps themselves stay
//! declarative.

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Longest error excerpt quoted back from a failed command.
const MAX_ERROR_EXCERPT_BYTES: usize = 400;

/// Outcome of one captured command invocation.
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Short quote of what the command said, preferring stderr.
    ///
    /// Long output keeps its tail; tools print the actual error last.
    pub fn error_excerpt(&self) -> String {
        let stderr = self.stderr.trim();
        let text = if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        };
        if text.is_empty() {
            return "(no output)".to_string();
        }
        tail_chars(text, MAX_ERROR_EXCERPT_BYTES)
    }
}

/// Render an argv for logs and failure messages.
pub fn render_command(argv: &[String]) -> String {
    shell_words::join(argv)
}

/// Build an owned argv from string literals.
pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| (*part).to_string()).collect()
}

/// Run an argv and capture stdout/stderr.
///
/// A command that could not be spawned is an `Err`; a command that ran and
/// exited non-zero is reported through the returned [`CommandOutput`] so
/// callers can decide what a non-zero exit means for them.
pub fn run_captured(argv: &[String]) -> Result<CommandOutput> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("empty command"))?;

    let start = Instant::now();
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("spawn {program}"))?;
    let elapsed_ms = start.elapsed().as_millis();

    let result = CommandOutput {
        success: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    };

    tracing::debug!(
        command = %render_command(argv),
        elapsed_ms,
        exit_code = ?result.code,
        "command finished"
    );

    Ok(result)
}

/// Run an argv and fail unless it exited zero.
///
/// `action` names what was being attempted so the error reads as one line:
/// "install git failed (exit 1): ...".
pub fn run_checked(argv: &[String], action: &str) -> Result<CommandOutput> {
    let output = run_captured(argv)?;
    if !output.success {
        let exit = match output.code {
            Some(code) => format!("exit {code}"),
            None => "terminated by signal".to_string(),
        };
        return Err(anyhow!(
            "{action} failed ({exit}): {}",
            output.error_excerpt()
        ));
    }
    Ok(output)
}

/// Locate a binary on PATH.
///
/// `Ok(Some(path))` when found, `Ok(None)` when the lookup completed and found
/// nothing, `Err` when the lookup itself could not run (this distinction is
/// what lets the orchestrator separate "work needed" from "probe broken").
pub fn find_on_path(binary: &str) -> Result<Option<PathBuf>> {
    match which::which(binary) {
        Ok(path) => Ok(Some(path)),
        Err(which::Error::CannotFindBinaryPath) => Ok(None),
        Err(err) => Err(anyhow!("PATH lookup for {binary} failed: {err}")),
    }
}

/// First dotted version number in a tool's `--version` output, if any.
pub fn sniff_version(text: &str) -> Option<String> {
    let version = Regex::new(r"\d+\.\d+(?:\.\d+)*").expect("regex for version numbers");
    version.find(text).map(|m| m.as_str().to_string())
}

/// Print a mutating command on stderr before it runs.
///
/// Steps call this from `execute` for commands that change the machine;
/// check-phase commands stay quiet.
pub fn announce_exec(argv: &[String], verbose: bool) {
    if verbose {
        eprintln!("{}", exec_line(argv));
    }
}

fn exec_line(argv: &[String]) -> String {
    format!("  exec: {}", render_command(argv))
}

fn tail_chars(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }
    let mut start = text.len() - max_bytes;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &text[start..])
}
