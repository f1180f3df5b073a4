//! Error types for the Dockstore CLI.
//!
//! Every failure a command can produce is an [`Error`] variant, and every variant
//! maps to exactly one [`ExitCode`]. Commands never exit the process themselves.

pub mod config;
pub mod exit;

use thiserror::Error;

pub use self::{config::ConfigError, exit::ExitCode};

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file missing or invalid.
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Invalid input detected before any request is made.
    #[error("{0}")]
    ClientError(String),
    /// The webservice answered with a non-success status.
    #[error("The Dockstore API returned {status}: {message}")]
    ApiError { status: u16, message: String },
    /// The webservice could not be reached at all.
    #[error("Could not connect to the Dockstore webservice at {url}: {source}")]
    ConnectionError {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The requested entry, version or local file does not exist.
    #[error("{0}")]
    EntryNotFound(String),
    /// Local file access failed, or a remote file could not be downloaded.
    #[error("{message}")]
    IoError {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
    /// The request was valid but the command has nothing to do or cannot proceed.
    #[error("{0}")]
    CommandError(String),
    /// An external runner (cwltool, cromwell, ...) exited unsuccessfully.
    #[error("{0}")]
    RunnerError(String),
    /// Unexpected HTTP client error, such as an undecodable response body.
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    YamlError(#[from] serde_yaml::Error),
}

impl Error {
    /// Creates an I/O error carrying the underlying cause.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Whether the webservice reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// The exit code category reported to the shell for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::ConfigError(_) => ExitCode::ClientError,
            Self::ClientError(_) => ExitCode::ClientError,
            Self::ApiError { .. } => ExitCode::ApiError,
            Self::ConnectionError { .. } => ExitCode::ConnectionError,
            Self::EntryNotFound(_) => ExitCode::EntryNotFound,
            Self::IoError { .. } => ExitCode::IoError,
            Self::CommandError(_) => ExitCode::CommandError,
            Self::RunnerError(_) => ExitCode::GenericError,
            Self::ReqwestError(_) => ExitCode::GenericError,
            Self::JsonError(_) => ExitCode::GenericError,
            Self::YamlError(_) => ExitCode::GenericError,
        }
    }
}
