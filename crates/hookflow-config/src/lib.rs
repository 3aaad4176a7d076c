pub mod error;

pub use error::*;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "HOOKFLOW_CONFIG_PATH";
pub const BASE_DIR_ENV: &str = "HOOKFLOW_BASE_DIR";
pub const APP_NAME_ENV: &str = "HOOKFLOW_APP_NAME";

const CONFIG_CANDIDATES: [&str; 2] = ["hookflow.yml", ".hookflow.yml"];

/// フックの実行時設定
///
/// 相対パスはすべて `base_dir` からの相対として解決する。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HookConfig {
    /// discourse_docker を clone するディレクトリ
    pub base_dir: PathBuf,
    pub repository_url: String,
    /// launcher に渡すコンテナ名
    pub app_name: String,
    pub sample_path: PathBuf,
    pub descriptor_path: PathBuf,
    /// install 時に open-port するポート
    pub public_port: u16,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("/var/discourse"),
            repository_url: "https://github.com/discourse/discourse_docker.git".to_string(),
            app_name: "app".to_string(),
            sample_path: PathBuf::from("samples/standalone.yml"),
            descriptor_path: PathBuf::from("containers/app.yml"),
            public_port: 80,
        }
    }
}

impl HookConfig {
    /// 設定を読み込む
    ///
    /// 優先順位（後勝ち）:
    /// 1. デフォルト値
    /// 2. 設定ファイル（HOOKFLOW_CONFIG_PATH、またはカレントディレクトリの hookflow.yml / .hookflow.yml）
    /// 3. 環境変数 HOOKFLOW_BASE_DIR / HOOKFLOW_APP_NAME
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file()? {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// YAML ファイルから読み込む（環境変数は適用しない）
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!("設定ファイルを読み込みました: {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var(BASE_DIR_ENV) {
            self.base_dir = PathBuf::from(dir);
        }
        if let Ok(name) = std::env::var(APP_NAME_ENV) {
            self.app_name = name;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_name.trim().is_empty() {
            return Err(ConfigError::Invalid("app_name が空です".to_string()));
        }
        if self.repository_url.trim().is_empty() {
            return Err(ConfigError::Invalid("repository_url が空です".to_string()));
        }
        Ok(())
    }

    pub fn descriptor_file(&self) -> PathBuf {
        self.base_dir.join(&self.descriptor_path)
    }

    pub fn sample_file(&self) -> PathBuf {
        self.base_dir.join(&self.sample_path)
    }

    pub fn launcher_script(&self) -> PathBuf {
        self.base_dir.join("launcher")
    }

    /// clone 済みかどうかの判定に使う
    pub fn git_dir(&self) -> PathBuf {
        self.base_dir.join(".git")
    }
}

/// 設定ファイルを探す
///
/// HOOKFLOW_CONFIG_PATH が指定されていてファイルが無い場合はエラー。
/// 何も見つからなければ None（デフォルト設定を使う）。
pub fn find_config_file() -> Result<Option<PathBuf>> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.is_file() {
            return Ok(Some(path));
        }
        return Err(ConfigError::ConfigFileNotFound(path));
    }

    let current_dir = std::env::current_dir()?;
    Ok(CONFIG_CANDIDATES
        .iter()
        .map(|name| current_dir.join(name))
        .find(|path| path.is_file()))
}
