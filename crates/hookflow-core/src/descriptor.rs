//! デプロイメントディスクリプタ（containers/app.yml）

use crate::document::{Mapping, Value};
use crate::emit;
use crate::error::{CoreError, Result};

/// 環境変数を保持するセクションのキー
pub const ENV_SECTION: &str = "env";

/// パース済みのディスクリプタ
///
/// ルートは常にマッピング。キーの順序は元のファイルのまま保持される。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptor {
    root: Mapping,
}

impl Descriptor {
    pub fn from_root(root: Mapping) -> Self {
        Self { root }
    }

    /// YAML のバイト列をパース
    ///
    /// 空のファイルは空のマッピングとして扱う。
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let raw: serde_yaml::Value = serde_yaml::from_slice(bytes)?;
        match Value::from_yaml(raw)? {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            other => Err(CoreError::DescriptorFormat(format!(
                "ルートはマッピングである必要があります（{}）",
                other.kind()
            ))),
        }
    }

    /// 正規化された YAML のバイト列に変換
    pub fn to_bytes(&self) -> Vec<u8> {
        emit::to_yaml_string(&self.root).into_bytes()
    }

    /// 書き込む前に、バイト列がこのディスクリプタとして読み戻せるか確かめる
    pub fn verify_rendered(&self, bytes: &[u8]) -> Result<()> {
        let reparsed = Self::parse(bytes).map_err(|e| {
            CoreError::DescriptorFormat(format!("出力した YAML を読み戻せません: {e}"))
        })?;
        if reparsed != *self {
            return Err(CoreError::DescriptorFormat(
                "出力した YAML を読み戻すと内容が変わります".to_string(),
            ));
        }
        Ok(())
    }

    pub fn root(&self) -> &Mapping {
        &self.root
    }

    pub fn into_root(self) -> Mapping {
        self.root
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// env セクション（マッピングでなければ None）
    pub fn environment(&self) -> Option<&Mapping> {
        self.get(ENV_SECTION).and_then(Value::as_mapping)
    }
}
