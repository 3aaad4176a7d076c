//! ディスクリプタ文書のデータモデル
//!
//! app.yml はスキーマを持たないため、順序付きのタグ付きユニオンとして保持する。
//! 未知のキーもそのまま往復できることが前提。

use crate::error::{CoreError, Result};
use indexmap::IndexMap;

/// 挿入順を保持するマッピング
pub type Mapping = IndexMap<String, Value>;

/// 文書の値
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Mapping),
}

// 浮動小数点はビット列で比べる。`.nan` も読み戻した値と等しくなる
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// エラーメッセージ用の型名
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// serde_yaml の値から変換
    ///
    /// スカラーのキーは文字列化する。タグ付きの値、コレクションをキーに
    /// 持つマッピング、文字列化して重複するキー（`1` と `"1"` など）は
    /// エラーにする。
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self> {
        use serde_yaml::Value as Yaml;

        Ok(match value {
            Yaml::Null => Self::Null,
            Yaml::Bool(b) => Self::Bool(b),
            Yaml::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if n.is_u64() {
                    return Err(CoreError::DescriptorFormat(format!(
                        "整数が範囲外です: {n}"
                    )));
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Yaml::String(s) => Self::String(s),
            Yaml::Sequence(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::from_yaml)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Yaml::Mapping(map) => {
                let mut out = Mapping::with_capacity(map.len());
                for (key, value) in map {
                    let key = yaml_key(key)?;
                    if out.contains_key(&key) {
                        return Err(CoreError::DescriptorFormat(format!(
                            "文字列化するとキーが重複します: {key}"
                        )));
                    }
                    out.insert(key, Self::from_yaml(value)?);
                }
                Self::Mapping(out)
            }
            Yaml::Tagged(tagged) => {
                return Err(CoreError::DescriptorFormat(format!(
                    "タグ付きの値には対応していません: {}",
                    tagged.tag
                )));
            }
        })
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        _ => Err(CoreError::DescriptorFormat(
            "マッピングのキーにはスカラー値のみ使用できます".to_string(),
        )),
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<u16> for Value {
    fn from(i: u16) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Self::Mapping(m)
    }
}
