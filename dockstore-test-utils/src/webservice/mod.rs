//! In-process stand-in for the Dockstore webservice.
//!
//! The CLI under test talks to it over real HTTP. It serves the seeded database
//! through controller, service and repository layers, and reaches GitHub and
//! Google only through the simulations it is pointed at.

pub mod controller;
pub mod data;
pub mod error;
pub mod router;
pub mod service;
pub mod state;
pub mod upstream;

use std::net::SocketAddr;

use sea_orm::DatabaseConnection;
use tokio::{net::TcpListener, task::JoinHandle};

use crate::error::TestError;

use self::{
    state::WebserviceState,
    upstream::{github::GitHubClient, google::GoogleClient},
};

/// A running webservice bound to an ephemeral localhost port.
///
/// The server task is aborted when the value is dropped.
pub struct TestWebservice {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestWebservice {
    /// Starts serving `db` on `127.0.0.1:0`
    ///
    /// # Arguments
    /// - `db` - Seeded database connection shared with the test
    /// - `github_url` - Base URL of the GitHub simulation
    /// - `google_url` - Base URL of the Google simulation
    ///
    /// # Returns
    /// - `Ok(TestWebservice)` - The server is accepting connections
    /// - `Err(TestError::IoError)` - No local port could be bound
    pub async fn start(
        db: DatabaseConnection,
        github_url: &str,
        google_url: &str,
    ) -> Result<Self, TestError> {
        let http = reqwest::Client::new();
        let state = WebserviceState {
            db,
            github: GitHubClient::new(http.clone(), github_url),
            google: GoogleClient::new(http, google_url),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router::routes().with_state(state);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Webservice stand-in stopped: {}", e);
            }
        });

        tracing::debug!(%addr, "Started webservice stand-in");

        Ok(Self { addr, handle })
    }

    /// Base URL for the CLI's `server-url` setting.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestWebservice {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
