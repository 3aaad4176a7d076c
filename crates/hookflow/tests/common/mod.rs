use hookflow::runner::command_line;
use hookflow::{CommandOutput, CommandRunner, HookDriver, HookError, ProvisionPaths, Result};
use hookflow_config::HookConfig;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub const SAMPLE: &str = r#"
templates:
  - "templates/postgres.template.yml"
  - "templates/web.template.yml"
expose:
  - "80:80"
  - "2222:22"
params:
  db_default_text_search_config: "pg_catalog.english"
env:
  LANG: en_US.UTF-8
  DISCOURSE_DEVELOPER_EMAILS: 'me@example.com'
  DISCOURSE_HOSTNAME: 'discourse.example.com'
  DISCOURSE_SMTP_ADDRESS: smtp.example.com
volumes:
  - volume:
      host: /var/discourse/shared
      guest: /shared
run:
  - exec: echo "Beginning of custom commands"
"#;

/// 呼び出されたコマンドを記録するだけのランナー
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<String>>,
    outputs: HashMap<String, CommandOutput>,
    failing: Vec<String>,
}

#[allow(dead_code)]
impl RecordingRunner {
    pub fn with_settings(json: &str) -> Self {
        Self::default()
            .respond("config-get", CommandOutput::success(json))
            .respond("uname", CommandOutput::success("3.13.0-24-generic\n"))
    }

    pub fn respond(mut self, program: &str, output: CommandOutput) -> Self {
        self.outputs.insert(program.to_string(), output);
        self
    }

    /// 指定した接頭辞で始まるコマンドを失敗させる
    pub fn fail_on(mut self, prefix: &str) -> Self {
        self.failing.push(prefix.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn launcher_verbs(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter(|call| call.starts_with("bash "))
            .filter_map(|call| call.split_whitespace().nth(2).map(str::to_string))
            .collect()
    }

    fn record(&self, program: &str, args: &[&str]) -> String {
        let line = command_line(program, args);
        self.calls.lock().unwrap().push(line.clone());
        line
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        let line = self.record(program, args);
        if self.failing.iter().any(|prefix| line.starts_with(prefix.as_str())) {
            return Err(HookError::CommandFailed {
                command: line,
                message: "exit status: 1".to_string(),
            });
        }
        Ok(())
    }

    async fn output(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.record(program, args);
        Ok(self
            .outputs
            .get(program)
            .cloned()
            .unwrap_or_else(|| CommandOutput::success(Vec::new())))
    }
}

/// 一時ディレクトリ上の discourse_docker
pub struct TestSite {
    pub root: TempDir,
}

#[allow(dead_code)]
impl TestSite {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn base_dir(&self) -> PathBuf {
        self.root.path().join("discourse")
    }

    pub fn config(&self) -> HookConfig {
        HookConfig {
            base_dir: self.base_dir(),
            ..Default::default()
        }
    }

    pub fn provision_paths(&self) -> ProvisionPaths {
        ProvisionPaths {
            docker_list: self.root.path().join("docker.list"),
            docker_binary: self.root.path().join("docker.io"),
            docker_link: self.root.path().join("docker"),
        }
    }

    pub fn driver(&self, runner: RecordingRunner) -> HookDriver<RecordingRunner> {
        HookDriver::new(self.config(), runner).with_provision_paths(self.provision_paths())
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.config().descriptor_file()
    }

    pub fn write_descriptor(&self, content: &[u8]) {
        write_file(&self.descriptor_path(), content);
    }

    pub fn read_descriptor(&self) -> Vec<u8> {
        fs::read(self.descriptor_path()).unwrap()
    }

    pub fn write_sample(&self, content: &str) {
        write_file(&self.config().sample_file(), content.as_bytes());
    }

    pub fn mark_cloned(&self) {
        fs::create_dir_all(self.config().git_dir()).unwrap();
    }
}

fn write_file(path: &Path, content: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}
