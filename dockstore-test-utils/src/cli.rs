//! In-process invocation of the Dockstore CLI.
//!
//! [`CliHarness`] writes a config file pointing at the webservice stand-in and
//! calls [`dockstore::cli::run`] directly, collecting everything the CLI prints.

use std::path::{Path, PathBuf};

use dockstore::error::ExitCode;
use tempfile::TempDir;

use crate::error::TestError;

/// Output written by CLI invocations, accumulated until cleared.
#[derive(Debug, Default)]
pub struct OutputCapture {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl OutputCapture {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    pub fn clear(&mut self) {
        self.stdout.clear();
        self.stderr.clear();
    }
}

/// Settings written to the generated config file.
#[derive(Debug, Clone, Default)]
pub struct CliSettings {
    pub server_url: String,
    pub token: Option<String>,
    pub webhook_url: Option<String>,
    pub cwl_runner: Option<String>,
    pub wdl_runner: Option<String>,
    pub singularity: bool,
}

impl CliSettings {
    fn render(&self) -> String {
        let mut config = format!("server-url = {}\n", self.server_url);
        if let Some(token) = &self.token {
            config.push_str(&format!("token = {token}\n"));
        }

        if let Some(webhook_url) = &self.webhook_url {
            config.push_str(&format!("\n[notifications]\nwebhook-url = {webhook_url}\n"));
        }

        if self.cwl_runner.is_some() || self.wdl_runner.is_some() || self.singularity {
            config.push_str("\n[dockstore-launcher]\n");
            if let Some(runner) = &self.cwl_runner {
                config.push_str(&format!("cwlrunner = {runner}\n"));
            }
            if let Some(runner) = &self.wdl_runner {
                config.push_str(&format!("wdlrunner = {runner}\n"));
            }
            if self.singularity {
                config.push_str("singularity = true\n");
            }
        }

        config
    }
}

pub struct CliHarness {
    dir: TempDir,
    pub settings: CliSettings,
    pub output: OutputCapture,
}

impl CliHarness {
    /// Creates a harness whose config targets `server_url` and authenticates with `token`.
    pub fn new(server_url: impl Into<String>, token: Option<&str>) -> Result<Self, TestError> {
        Ok(Self {
            dir: tempfile::tempdir()?,
            settings: CliSettings {
                server_url: server_url.into(),
                token: token.map(str::to_string),
                ..Default::default()
            },
            output: OutputCapture::default(),
        })
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Scratch directory for parameter files and local descriptors.
    pub fn work_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to a file in the work directory and returns its path.
    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf, TestError> {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Runs `dockstore --config <generated> <args...>` and returns its exit code
    ///
    /// The config file is rewritten from [`CliSettings`] before every run, so
    /// settings changed between runs take effect.
    ///
    /// # Returns
    /// - `Ok(i32)` - The exit code; output is appended to [`Self::output`]
    /// - `Err(TestError::IoError)` - The config file could not be written
    pub async fn run(&mut self, args: &[&str]) -> Result<i32, TestError> {
        let config_path = self.config_path();
        std::fs::write(&config_path, self.settings.render())?;

        let mut argv = vec![
            "dockstore".to_string(),
            "--config".to_string(),
            config_path.display().to_string(),
        ];
        argv.extend(args.iter().map(|arg| arg.to_string()));

        tracing::debug!(args = ?args, "Running CLI");

        let code = dockstore::cli::run(argv, &mut self.output.stdout, &mut self.output.stderr).await;

        Ok(code)
    }

    /// Runs the CLI and panics, showing its output, unless it exits with `expected`.
    pub async fn run_expect(&mut self, args: &[&str], expected: ExitCode) -> Result<(), TestError> {
        let code = self.run(args).await?;
        assert_exit(code, expected, &self.output);
        Ok(())
    }
}

/// Panics with the captured output unless `code` is `expected`.
pub fn assert_exit(code: i32, expected: ExitCode, output: &OutputCapture) {
    assert_eq!(
        code,
        expected.code(),
        "expected exit code {} ({:?}), got {}\n--- stdout ---\n{}\n--- stderr ---\n{}",
        expected.code(),
        expected,
        code,
        output.stdout(),
        output.stderr()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_optional_sections() {
        let settings = CliSettings {
            server_url: "http://127.0.0.1:8080".to_string(),
            token: Some("abc".to_string()),
            webhook_url: Some("http://127.0.0.1:9000/hook".to_string()),
            cwl_runner: Some("echo".to_string()),
            wdl_runner: None,
            singularity: true,
        };

        let config = dockstore::config::Config::parse(&settings.render()).unwrap();

        assert_eq!(config.server_url, "http://127.0.0.1:8080");
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.webhook_url.as_deref(), Some("http://127.0.0.1:9000/hook"));
        assert_eq!(config.launcher.cwl_runner, "echo");
        assert!(config.launcher.singularity);
    }

    #[tokio::test]
    async fn help_goes_to_stdout() -> Result<(), TestError> {
        let mut cli = CliHarness::new("http://127.0.0.1:1", None)?;

        let code = cli.run(&["--help"]).await?;

        assert_exit(code, ExitCode::Success, &cli.output);
        assert!(cli.output.stdout().contains("Usage"));
        assert!(cli.output.stderr().is_empty());

        cli.output.clear();
        assert!(cli.output.stdout().is_empty());

        Ok(())
    }
}
