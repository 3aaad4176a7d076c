//! hookflow コア
//!
//! Discourse の app.yml（デプロイメントディスクリプタ）を扱う純粋なロジック。
//!
//! - **document**: 順序付きの文書モデル
//! - **descriptor / emit**: YAML のパースと正規化出力
//! - **settings**: オペレーター設定のパース
//! - **merge**: env セクションへの上書き
//! - **change**: バイト比較による変更検出
//!
//! I/O は一切行わない。

pub mod change;
pub mod descriptor;
pub mod document;
pub mod emit;
pub mod error;
pub mod merge;
pub mod settings;

pub use change::*;
pub use descriptor::*;
pub use document::*;
pub use error::*;
pub use merge::*;
pub use settings::{Settings, parse_settings};
