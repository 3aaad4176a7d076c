//! External command runner
//!
//! Every shell-out (apt-get, git, config-get, the launcher) goes through
//! [`CommandRunner`] so the hook driver can be exercised with a fake.

use crate::error::{HookError, Result};
use std::process::Stdio;
use tokio::process::Command;

/// Captured result of a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    pub fn failure(stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            success: false,
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// stdout and stderr as one lossy string
    pub fn combined(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&self.stderr));
        text
    }
}

/// Capability to run a named external command
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run with inherited stdio; a non-zero exit is an error
    async fn run(&self, program: &str, args: &[&str]) -> Result<()>;

    /// Run and capture output; the caller decides what a failure means
    async fn output(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runs commands on the host with `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        let command = command_line(program, args);
        tracing::debug!("Running: {}", command);

        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| HookError::CommandFailed {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(HookError::CommandFailed {
                command,
                message: status.to_string(),
            });
        }
        Ok(())
    }

    async fn output(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let command = command_line(program, args);
        tracing::debug!("Running: {}", command);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| HookError::CommandFailed {
                command,
                message: e.to_string(),
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// `program arg1 arg2` for logs and errors
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
