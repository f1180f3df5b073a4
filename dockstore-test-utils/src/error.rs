use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    /// A fixture migration failed; the database is left partially seeded.
    #[error("Fixture migration {version:?} failed: {source}")]
    MigrationFailed {
        version: String,
        #[source]
        source: sea_orm::DbErr,
    },
    /// Database connections were still checked out after the leak check window.
    #[error("{active} database connection(s) still active after {attempts} checks")]
    ConnectionLeak { active: u32, attempts: u32 },
    #[error("Condition not met after {attempts} attempts, {interval:?} apart: {description}")]
    PollTimeout {
        description: String,
        attempts: u32,
        interval: Duration,
    },
    /// No cached access token exists for the refresh token.
    #[error("No cached token at {0}")]
    TokenCacheMiss(PathBuf),
}
