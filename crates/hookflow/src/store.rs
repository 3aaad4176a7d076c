//! ディスクリプタの保存先（app.yml）
//!
//! 書き込みは同じディレクトリの一時ファイルに全量を書き、fsync してから
//! rename する。途中で落ちても app.yml が半端な状態になることはない。
//! app.yml には SMTP パスワードが入るので、既存ファイルのパーミッションを
//! 一時ファイルに引き継ぐ。

use crate::error::{HookError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct DescriptorStore {
    path: PathBuf,
}

impl DescriptorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.path)
            .await
            .map_err(|e| HookError::io(&self.path, e))
    }

    pub async fn write(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| HookError::io(parent, e))?;
                tracing::debug!("Created descriptor directory: {}", parent.display());
            }
        }

        let tmp = self.temp_path();
        self.write_temp(&tmp, bytes)
            .await
            .map_err(|e| HookError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| HookError::io(&self.path, e))?;

        tracing::debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    async fn write_temp(&self, tmp: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(tmp).await?;
        // 中身を書く前に権限を絞る
        if let Ok(metadata) = fs::metadata(&self.path).await {
            file.set_permissions(metadata.permissions()).await?;
        }
        file.write_all(bytes).await?;
        file.sync_all().await
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "descriptor".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}
