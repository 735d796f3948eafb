//! Lifecycle script execution
//!
//! The post-bump script (for example a changelog formatter) runs through the
//! platform shell in the project root once every bump file has been written.

use serde::Serialize;
use std::path::Path;
use std::process::{Command, Output};

/// Result of running a lifecycle script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptResult {
    /// The command line that was executed
    pub command: String,
    /// Whether the command exited successfully
    pub success: bool,
    /// Standard output from the command
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    /// Standard error from the command
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

impl ScriptResult {
    /// Create a successful script result
    pub fn success(command: impl Into<String>, stdout: String, stderr: String) -> Self {
        Self {
            command: command.into(),
            success: true,
            stdout,
            stderr,
        }
    }

    /// Create a failed script result
    pub fn failure(command: impl Into<String>, stdout: String, stderr: String) -> Self {
        Self {
            command: command.into(),
            success: false,
            stdout,
            stderr,
        }
    }
}

/// Trait for running lifecycle scripts
pub trait ScriptRunner {
    /// Run `command` with `working_dir` as the current directory
    fn run(&self, command: &str, working_dir: &Path) -> ScriptResult;
}

/// Runner that executes commands through the system shell
#[derive(Debug, Default)]
pub struct SystemShell;

impl SystemShell {
    /// Create a new system shell runner
    pub fn new() -> Self {
        Self
    }

    fn spawn(&self, command: &str, working_dir: &Path) -> std::io::Result<Output> {
        if command.trim().is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Empty command",
            ));
        }

        let (shell, flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        Command::new(shell)
            .arg(flag)
            .arg(command)
            .current_dir(working_dir)
            .output()
    }
}

impl ScriptRunner for SystemShell {
    fn run(&self, command: &str, working_dir: &Path) -> ScriptResult {
        tracing::info!("running post-bump script: {}", command);

        match self.spawn(command, working_dir) {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();
                if output.status.success() {
                    ScriptResult::success(command, stdout, stderr)
                } else {
                    tracing::warn!("post-bump script exited with {}", output.status);
                    ScriptResult::failure(command, stdout, stderr)
                }
            }
            Err(e) => {
                tracing::warn!("failed to start post-bump script: {}", e);
                ScriptResult::failure(command, String::new(), e.to_string())
            }
        }
    }
}
