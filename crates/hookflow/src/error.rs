use hookflow_config::ConfigError;
use hookflow_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("不明なフックです: {0:?}")]
    UnknownHook(String),

    #[error("コマンドの実行に失敗しました: {command}\n理由: {message}")]
    CommandFailed { command: String, message: String },

    #[error("IO エラー: {path}\n理由: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl HookError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HookError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, HookError>;
