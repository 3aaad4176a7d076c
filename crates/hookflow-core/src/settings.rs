//! オペレーター設定（`config-get --format json` の出力）
//!
//! 各フィールドは「指定あり / なし」を `Option` で区別する。
//! 指定のないフィールドはディスクリプタに一切影響しない。

use crate::document::Value;
use crate::error::Result;
use serde::Deserialize;

pub const DEVELOPER_EMAILS: &str = "DISCOURSE_DEVELOPER_EMAILS";
pub const SMTP_ADDRESS: &str = "DISCOURSE_SMTP_ADDRESS";
pub const SMTP_PORT: &str = "DISCOURSE_SMTP_PORT";
pub const SMTP_USER_NAME: &str = "DISCOURSE_SMTP_USER_NAME";
pub const SMTP_PASSWORD: &str = "DISCOURSE_SMTP_PASSWORD";
pub const HOSTNAME: &str = "DISCOURSE_HOSTNAME";
pub const UNICORN_WORKERS: &str = "UNICORN_WORKERS";
pub const CDN_URL: &str = "DISCOURSE_CDN_URL";

/// 型付きのオペレーター設定
///
/// JSON の `null` は未指定として扱う。未知のキーは無視する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// カンマ区切りのメールアドレス（そのまま保存する）
    #[serde(rename = "DISCOURSE_DEVELOPER_EMAILS")]
    pub developer_emails: Option<String>,
    #[serde(rename = "DISCOURSE_SMTP_ADDRESS")]
    pub smtp_address: Option<String>,
    #[serde(rename = "DISCOURSE_SMTP_PORT")]
    pub smtp_port: Option<u16>,
    #[serde(rename = "DISCOURSE_SMTP_USER_NAME")]
    pub smtp_user_name: Option<String>,
    #[serde(rename = "DISCOURSE_SMTP_PASSWORD")]
    pub smtp_password: Option<String>,
    #[serde(rename = "DISCOURSE_HOSTNAME")]
    pub hostname: Option<String>,
    #[serde(rename = "UNICORN_WORKERS")]
    pub unicorn_workers: Option<u32>,
    #[serde(rename = "DISCOURSE_CDN_URL")]
    pub cdn_url: Option<String>,
}

impl Settings {
    /// 指定されているフィールドを (キー, 値) の組で返す
    pub fn entries(&self) -> Vec<(&'static str, Value)> {
        let strings = [
            (DEVELOPER_EMAILS, &self.developer_emails),
            (SMTP_ADDRESS, &self.smtp_address),
            (SMTP_USER_NAME, &self.smtp_user_name),
            (SMTP_PASSWORD, &self.smtp_password),
            (HOSTNAME, &self.hostname),
            (CDN_URL, &self.cdn_url),
        ];

        let mut entries: Vec<(&'static str, Value)> = strings
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, Value::from(v))))
            .collect();

        if let Some(port) = self.smtp_port {
            entries.push((SMTP_PORT, port.into()));
        }
        if let Some(workers) = self.unicorn_workers {
            entries.push((UNICORN_WORKERS, workers.into()));
        }

        entries
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// 設定 JSON をパース
///
/// 空の出力は「設定なし」であり、エラーではない。
pub fn parse_settings(bytes: &[u8]) -> Result<Settings> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Settings::default());
    }
    Ok(serde_json::from_slice(bytes)?)
}
