//! Host provisioning for install
//!
//! Plain pass-through to apt and friends. No version checks and no retries:
//! the first failing command aborts the hook.

use crate::error::{HookError, Result};
use crate::runner::CommandRunner;
use std::path::PathBuf;
use tokio::fs;

const DOCKER_KEYSERVER: &str = "hkp://keyserver.ubuntu.com:80";
const DOCKER_KEY_ID: &str = "36A1D7869245C8950F966E92D8576A8BA88D21E9";
const DOCKER_APT_SOURCE: &str = "deb https://get.docker.io/ubuntu docker main";

/// Host paths touched while provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionPaths {
    /// apt source list for the docker repository
    pub docker_list: PathBuf,
    /// packaged docker binary
    pub docker_binary: PathBuf,
    /// symlink created so `docker` is on PATH
    pub docker_link: PathBuf,
}

impl Default for ProvisionPaths {
    fn default() -> Self {
        Self {
            docker_list: PathBuf::from("/etc/apt/sources.list.d/docker.list"),
            docker_binary: PathBuf::from("/usr/bin/docker.io"),
            docker_link: PathBuf::from("/usr/local/bin/docker"),
        }
    }
}

/// Install the container runtime
pub async fn install_docker<R: CommandRunner>(runner: &R, paths: &ProvisionPaths) -> Result<()> {
    tracing::info!("Adding docker key...");
    runner
        .run(
            "apt-key",
            &["adv", "--keyserver", DOCKER_KEYSERVER, "--recv-keys", DOCKER_KEY_ID],
        )
        .await?;

    tracing::info!("Writing docker deb list...");
    fs::write(&paths.docker_list, DOCKER_APT_SOURCE)
        .await
        .map_err(|e| HookError::io(&paths.docker_list, e))?;

    tracing::info!("Calling apt-get update...");
    runner.run("apt-get", &["update"]).await?;

    install_kernel_extras(runner).await?;

    tracing::info!("Installing apt-transport-https...");
    apt_install(runner, "apt-transport-https").await?;

    tracing::info!("Installing docker...");
    apt_install(runner, "lxc-docker").await?;

    link_docker(paths).await
}

/// aufs lives in linux-image-extra for the running kernel
async fn install_kernel_extras<R: CommandRunner>(runner: &R) -> Result<()> {
    let uname = runner.output("uname", &["-r"]).await?;
    if !uname.success {
        return Err(HookError::CommandFailed {
            command: "uname -r".to_string(),
            message: uname.combined(),
        });
    }

    let release = String::from_utf8_lossy(&uname.stdout).trim().to_string();
    let package = format!("linux-image-extra-{release}");
    tracing::info!("Installing {}...", package);
    apt_install(runner, &package).await
}

async fn link_docker(paths: &ProvisionPaths) -> Result<()> {
    if fs::read_link(&paths.docker_link).await.is_ok() {
        tracing::debug!("docker symlink already exists: {}", paths.docker_link.display());
        return Ok(());
    }

    tracing::info!("Symlinking docker...");
    fs::symlink(&paths.docker_binary, &paths.docker_link)
        .await
        .map_err(|e| HookError::io(&paths.docker_link, e))
}

pub async fn apt_install<R: CommandRunner>(runner: &R, package: &str) -> Result<()> {
    runner.run("apt-get", &["install", "-y", package]).await
}
