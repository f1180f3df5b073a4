use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find a config file at {0}, please create one or pass --config")]
    MissingFile(PathBuf),
    #[error("Could not determine the home directory to locate the default config file")]
    NoHomeDirectory,
    #[error("Could not parse config file {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
    #[error("Config file is missing the required key {0:?}")]
    MissingKey(&'static str),
    #[error("Invalid value for config key {key:?}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
