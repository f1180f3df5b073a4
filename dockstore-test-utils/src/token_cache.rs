//! Read-only cache of OAuth tokens keyed by refresh token.
//!
//! Tests that need a Bitbucket token look it up here instead of calling
//! Bitbucket's token endpoint. Entries are JSON files named after the SHA-256
//! hex digest of the refresh token; the harness never writes them.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::TestError;

/// A cached token response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CachedToken {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TokenCache {
    dir: PathBuf,
}

impl TokenCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File an entry for `refresh_token` is stored in, whether or not it exists.
    pub fn path_for(&self, refresh_token: &str) -> PathBuf {
        let digest = Sha256::digest(refresh_token.as_bytes());
        let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();

        self.dir.join(format!("{hex}.json"))
    }

    /// Reads the cached token for `refresh_token`
    ///
    /// # Returns
    /// - `Ok(Some(CachedToken))` - The entry exists
    /// - `Ok(None)` - No entry for this refresh token
    /// - `Err(TestError::JsonError)` - The entry is not a token response
    /// - `Err(TestError::IoError)` - The entry exists but could not be read
    pub fn lookup(&self, refresh_token: &str) -> Result<Option<CachedToken>, TestError> {
        let path = self.path_for(refresh_token);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "Token cache miss");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }
}
