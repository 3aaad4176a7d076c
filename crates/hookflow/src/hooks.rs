//! フックの実行
//!
//! install と config-changed のワークフローを組み立てる。外部コマンドは
//! すべて注入された [`CommandRunner`] 経由で実行する。

use crate::error::{HookError, Result};
use crate::launcher::{Launcher, LauncherVerb};
use crate::provision::{self, ProvisionPaths};
use crate::runner::CommandRunner;
use crate::store::DescriptorStore;
use hookflow_config::HookConfig;
use hookflow_core::{Descriptor, EnvPolicy, merge, parse_settings, render_change};
use std::fmt;
use std::str::FromStr;

/// サンプルのメールホスト。bootstrap がこれを見つけると止まるので差し替える
const PLACEHOLDER_MAIL_HOST: &str = "smtp.example.com";
const STUB_MAIL_HOST: &str = "foo.example.com";

const SETTINGS_COMMAND: &str = "config-get";
const SETTINGS_ARGS: [&str; 2] = ["--format", "json"];

/// ホストから呼ばれるフック
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Install,
    ConfigChanged,
    Start,
    UpgradeCharm,
    Stop,
}

impl Hook {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::ConfigChanged => "config-changed",
            Self::Start => "start",
            Self::UpgradeCharm => "upgrade-charm",
            Self::Stop => "stop",
        }
    }
}

impl FromStr for Hook {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "install" => Ok(Self::Install),
            "config-changed" => Ok(Self::ConfigChanged),
            "start" => Ok(Self::Start),
            "upgrade-charm" => Ok(Self::UpgradeCharm),
            "stop" => Ok(Self::Stop),
            other => Err(HookError::UnknownHook(other.to_string())),
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// フックの実行結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Ignored,
    Installed,
    /// 設定に変化なし。再起動していない
    Unchanged,
    /// 設定を書き換えて再起動した
    Restarted,
}

pub struct HookDriver<R> {
    config: HookConfig,
    runner: R,
    store: DescriptorStore,
    launcher: Launcher,
    provision_paths: ProvisionPaths,
}

impl<R: CommandRunner> HookDriver<R> {
    pub fn new(config: HookConfig, runner: R) -> Self {
        let store = DescriptorStore::new(config.descriptor_file());
        let launcher = Launcher::new(config.launcher_script(), config.app_name.clone());
        Self {
            config,
            runner,
            store,
            launcher,
            provision_paths: ProvisionPaths::default(),
        }
    }

    pub fn with_provision_paths(mut self, paths: ProvisionPaths) -> Self {
        self.provision_paths = paths;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub async fn run(&self, hook: Hook) -> Result<HookOutcome> {
        match hook {
            Hook::Install => {
                self.install().await?;
                Ok(HookOutcome::Installed)
            }
            Hook::ConfigChanged => self.config_changed().await,
            ignored => {
                tracing::info!("Ignoring hook: {}", ignored);
                Ok(HookOutcome::Ignored)
            }
        }
    }

    /// 設定を反映し、変化があれば launcher restart
    pub async fn config_changed(&self) -> Result<HookOutcome> {
        if !self.write_new_config(EnvPolicy::Require).await? {
            tracing::info!("No config changes detected.");
            return Ok(HookOutcome::Unchanged);
        }

        tracing::info!("Config changes detected. Restarting discourse...");
        self.launcher
            .invoke(&self.runner, LauncherVerb::Restart)
            .await?;
        Ok(HookOutcome::Restarted)
    }

    pub async fn install(&self) -> Result<()> {
        tracing::info!("Installing Discourse.");

        provision::install_docker(&self.runner, &self.provision_paths).await?;

        tracing::info!("Installing git...");
        provision::apt_install(&self.runner, "git").await?;

        self.clone_repository().await?;
        self.write_initial_descriptor().await?;

        // デプロイ時に指定された設定をここで反映する
        self.write_new_config(EnvPolicy::CreateMissing).await?;

        self.open_port().await?;

        tracing::info!("Bootstrapping discourse...");
        self.launcher
            .invoke(&self.runner, LauncherVerb::Bootstrap)
            .await?;

        tracing::info!("Starting discourse...");
        self.launcher
            .invoke(&self.runner, LauncherVerb::Start)
            .await?;

        tracing::info!("Finished installing discourse.");
        Ok(())
    }

    /// オペレーター設定をディスクリプタにマージして保存
    ///
    /// 内容が変わって書き込んだ場合だけ true を返す。設定が一つも無ければ
    /// ディスクリプタは読みもしない。
    pub async fn write_new_config(&self, policy: EnvPolicy) -> Result<bool> {
        let blob = self.fetch_settings().await?;
        let settings = parse_settings(&blob)?;
        if settings.is_empty() {
            tracing::info!("No config set.");
            return Ok(false);
        }

        tracing::info!("Updating config.");
        let original = self.store.read().await?;
        let descriptor = Descriptor::parse(&original)?;
        let merged = merge(descriptor, &settings, policy)?;

        match render_change(&original, &merged) {
            Some(bytes) => {
                merged.verify_rendered(&bytes)?;
                self.store.write(&bytes).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn fetch_settings(&self) -> Result<Vec<u8>> {
        let output = self
            .runner
            .output(SETTINGS_COMMAND, &SETTINGS_ARGS)
            .await?;

        if !output.success {
            return Err(HookError::CommandFailed {
                command: format!("{} {}", SETTINGS_COMMAND, SETTINGS_ARGS.join(" ")),
                message: output.combined(),
            });
        }
        Ok(output.stdout)
    }

    async fn clone_repository(&self) -> Result<()> {
        let base_dir = &self.config.base_dir;
        tracing::info!("Creating discourse directory...");
        tokio::fs::create_dir_all(base_dir)
            .await
            .map_err(|e| HookError::io(base_dir, e))?;

        if self.config.git_dir().exists() {
            tracing::info!("Discourse exists, no need to git clone.");
            return Ok(());
        }

        tracing::info!("Git cloning discourse...");
        let target = base_dir.to_string_lossy();
        self.runner
            .run("git", &["clone", self.config.repository_url.as_str(), &*target])
            .await
    }

    /// サンプルから app.yml を作る
    ///
    /// 一度パースして出力し直すので、以降の config-changed と同じ書式になる。
    async fn write_initial_descriptor(&self) -> Result<()> {
        let sample_path = self.config.sample_file();
        tracing::info!("Copying {} to {}...", sample_path.display(), self.store.path().display());

        let sample = tokio::fs::read_to_string(&sample_path)
            .await
            .map_err(|e| HookError::io(&sample_path, e))?;
        let sample = sample.replace(PLACEHOLDER_MAIL_HOST, STUB_MAIL_HOST);

        let descriptor = Descriptor::parse(sample.as_bytes())?;
        let bytes = descriptor.to_bytes();
        descriptor.verify_rendered(&bytes)?;
        self.store.write(&bytes).await
    }

    async fn open_port(&self) -> Result<()> {
        let port = self.config.public_port.to_string();
        let output = self.runner.output("open-port", &[port.as_str()]).await?;

        // 既に開いている場合のエラーは無視する
        if !output.success && !output.combined().contains("due to conflict") {
            return Err(HookError::CommandFailed {
                command: format!("open-port {port}"),
                message: output.combined(),
            });
        }
        Ok(())
    }
}
