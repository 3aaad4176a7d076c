use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "設定ファイルが見つかりません: {0}\n\nヒント:\n  • HOOKFLOW_CONFIG_PATH 環境変数のパスを確認してください"
    )]
    ConfigFileNotFound(PathBuf),

    #[error("設定ファイルのパースに失敗しました: {path}\n理由: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("無効な設定: {0}")]
    Invalid(String),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
