//! hookflow: Discourse のライフサイクルフック
//!
//! ホストが呼び出すフック（install / config-changed など）を実行する。
//!
//! # 概要
//!
//! - **install**: Docker と discourse_docker を用意し、サンプルから app.yml を生成して起動
//! - **config-changed**: オペレーター設定を app.yml の env にマージし、変化があれば再起動
//!
//! マージと変更検出のロジックは `hookflow-core` にある。このクレートは
//! コマンド実行とファイル I/O を担当する。

pub mod error;
pub mod hooks;
pub mod launcher;
pub mod provision;
pub mod runner;
pub mod store;

pub use error::*;
pub use hooks::{Hook, HookDriver, HookOutcome};
pub use launcher::{Launcher, LauncherVerb};
pub use provision::ProvisionPaths;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use store::DescriptorStore;
