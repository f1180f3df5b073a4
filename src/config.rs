//! CLI configuration file.
//!
//! The config file is INI-style. Global keys configure the webservice connection;
//! sections configure optional features:
//!
//! ```text
//! server-url = https://dockstore.org/api
//! token = 0123456789abcdef
//!
//! [notifications]
//! webhook-url = https://hooks.slack.com/services/...
//!
//! [dockstore-launcher]
//! cwlrunner = cwltool
//! singularity = true
//!
//! [plugins]
//! enabled = dockstore-file-s3-plugin, dockstore-file-synapse-plugin
//! ```

use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::ConfigError;

static DEFAULT_CWL_RUNNER: &str = "cwltool";
static DEFAULT_WDL_RUNNER: &str = "cromwell";

/// Settings for the workflow engines invoked by `launch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Command used to run CWL descriptors, possibly with extra arguments.
    pub cwl_runner: String,
    /// Command used to run WDL descriptors, possibly with extra arguments.
    pub wdl_runner: String,
    /// Run containers with Singularity instead of Docker.
    pub singularity: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            cwl_runner: DEFAULT_CWL_RUNNER.to_string(),
            wdl_runner: DEFAULT_WDL_RUNNER.to_string(),
            singularity: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the Dockstore webservice, without a trailing slash.
    pub server_url: String,
    /// Dockstore API token; only authenticated commands require it.
    pub token: Option<String>,
    /// Webhook notified when a launch starts and finishes.
    pub webhook_url: Option<String>,
    pub launcher: LauncherConfig,
    /// Names of enabled file provisioning plugins.
    pub plugins: Vec<String>,
}

impl Config {
    /// Location of the config file when `--config` is not given: `~/.dockstore/config`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(".dockstore").join("config"))
            .ok_or(ConfigError::NoHomeDirectory)
    }

    /// Loads and validates the config file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_ini(&ini)
    }

    /// Parses config file contents.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(contents).map_err(|e| ConfigError::Malformed {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })?;

        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let general = ini.general_section();

        let server_url = non_empty(general.get("server-url"))
            .ok_or(ConfigError::MissingKey("server-url"))?;
        if !server_url.starts_with("http://") && !server_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "server-url",
                reason: format!("{server_url:?} is not an http(s) URL"),
            });
        }

        let token = non_empty(general.get("token"));

        let webhook_url = ini
            .section(Some("notifications"))
            .and_then(|section| non_empty(section.get("webhook-url")));

        let mut launcher = LauncherConfig::default();
        if let Some(section) = ini.section(Some("dockstore-launcher")) {
            if let Some(runner) = non_empty(section.get("cwlrunner")) {
                launcher.cwl_runner = runner;
            }
            if let Some(runner) = non_empty(section.get("wdlrunner")) {
                launcher.wdl_runner = runner;
            }
            if let Some(value) = non_empty(section.get("singularity")) {
                launcher.singularity = parse_bool("singularity", &value)?;
            }
        }

        let plugins = ini
            .section(Some("plugins"))
            .and_then(|section| section.get("enabled"))
            .map(|enabled| {
                enabled
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            token,
            webhook_url,
            launcher,
            plugins,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key,
            reason: format!("{other:?} is not a boolean"),
        }),
    }
}
