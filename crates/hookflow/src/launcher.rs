//! discourse_docker の launcher スクリプト呼び出し

use crate::error::{HookError, Result};
use crate::runner::CommandRunner;
use std::fmt;
use std::path::PathBuf;

/// launcher に渡す動詞
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherVerb {
    Bootstrap,
    Start,
    Restart,
    Rebuild,
}

impl LauncherVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Start => "start",
            Self::Restart => "restart",
            Self::Rebuild => "rebuild",
        }
    }
}

impl fmt::Display for LauncherVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `bash <base_dir>/launcher <verb> <app>`
#[derive(Debug, Clone)]
pub struct Launcher {
    script: PathBuf,
    app_name: String,
}

impl Launcher {
    pub fn new(script: impl Into<PathBuf>, app_name: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            app_name: app_name.into(),
        }
    }

    pub async fn invoke<R: CommandRunner>(&self, runner: &R, verb: LauncherVerb) -> Result<()> {
        tracing::info!("launcher {} {}", verb, self.app_name);
        let script = self.script.to_string_lossy();
        runner
            .run("bash", &[&*script, verb.as_str(), self.app_name.as_str()])
            .await
            .map_err(|e| match e {
                HookError::CommandFailed { command, message } => HookError::CommandFailed {
                    command,
                    message: format!("launcher {verb} に失敗しました: {message}"),
                },
                other => other,
            })
    }
}
