use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use hookflow::{Hook, HookDriver, HookOutcome, SystemRunner};
use hookflow_config::HookConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hooks")]
#[command(about = "Discourse をコンテナでデプロイするライフサイクルフック", long_about = None)]
#[command(version)]
struct Cli {
    /// 実行するフック（省略時は実行ファイル名: install, config-changed, ...）
    hook: Option<String>,
    /// discourse_docker のディレクトリ
    #[arg(long, env = "HOOKFLOW_BASE_DIR")]
    base_dir: Option<PathBuf>,
    /// launcher に渡すコンテナ名
    #[arg(long, env = "HOOKFLOW_APP_NAME")]
    app_name: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout はフックの出力として使われるので、ログは stderr へ
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let hook_name = match cli.hook {
        Some(name) => name,
        None => invoked_name().context("フック名を判定できません")?,
    };
    let hook: Hook = hook_name.parse()?;

    let mut config = HookConfig::load()?;
    if let Some(base_dir) = cli.base_dir {
        config.base_dir = base_dir;
    }
    if let Some(app_name) = cli.app_name {
        config.app_name = app_name;
    }
    config.validate()?;

    let driver = HookDriver::new(config, SystemRunner);
    let outcome = driver.run(hook).await?;

    let summary = match outcome {
        HookOutcome::Ignored => format!("{} フックは何もしません", hook).as_str().yellow(),
        HookOutcome::Installed => "✓ Discourse をインストールしました".green(),
        HookOutcome::Unchanged => "✓ 設定に変更はありません".green(),
        HookOutcome::Restarted => "✓ 設定を更新して再起動しました".green(),
    };
    println!("{}", summary);

    Ok(())
}

/// フックはシンボリックリンク名で呼ばれる
fn invoked_name() -> Option<String> {
    let arg0 = std::env::args_os().next()?;
    Path::new(&arg0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}
