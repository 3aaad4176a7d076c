//! 設定のマージ
//!
//! 指定された設定だけを env セクションに上書きする。env 以外のキーには
//! 触れない。同じ設定で何度マージしても結果は変わらない。

use crate::descriptor::{Descriptor, ENV_SECTION};
use crate::document::{Mapping, Value};
use crate::error::{CoreError, Result};
use crate::settings::Settings;

/// env セクションが無い場合の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvPolicy {
    /// 存在しなければエラー（config-changed）
    Require,
    /// 存在しないか null なら空のマッピングを作る（install）
    CreateMissing,
}

/// 設定をディスクリプタにマージ
pub fn merge(descriptor: Descriptor, settings: &Settings, policy: EnvPolicy) -> Result<Descriptor> {
    let mut root = descriptor.into_root();
    let env = environment_mut(&mut root, policy)?;

    for (key, value) in settings.entries() {
        tracing::debug!("env.{} を更新", key);
        env.insert(key.to_string(), value);
    }

    Ok(Descriptor::from_root(root))
}

fn environment_mut(root: &mut Mapping, policy: EnvPolicy) -> Result<&mut Mapping> {
    let create = match root.get(ENV_SECTION) {
        Some(Value::Mapping(_)) => false,
        None | Some(Value::Null) if policy == EnvPolicy::CreateMissing => true,
        None => return Err(shape_error("missing")),
        Some(other) => return Err(shape_error(other.kind())),
    };

    if create {
        tracing::info!("'{}' セクションが無いため作成します", ENV_SECTION);
        root.insert(ENV_SECTION.to_string(), Value::Mapping(Mapping::new()));
    }

    match root.get_mut(ENV_SECTION) {
        Some(Value::Mapping(env)) => Ok(env),
        _ => Err(shape_error("missing")),
    }
}

fn shape_error(found: &'static str) -> CoreError {
    CoreError::DescriptorShape {
        section: ENV_SECTION,
        found,
    }
}
