//! Integration test harness for the Dockstore CLI.
//!
//! Tests build a [`TestContext`] with [`TestBuilder`]: a database reset to a
//! known fixture set, simulated GitHub and Google services, an in-process
//! webservice stand-in serving the database over HTTP, and a CLI harness
//! configured against it.
//!
//! ```ignore
//! use dockstore_test_utils::prelude::*;
//!
//! #[tokio::test]
//! async fn publishes_tool() -> Result<(), TestError> {
//!     let mut test = TestBuilder::new().build().await?;
//!
//!     test.cli
//!         .run_expect(&["tool", "publish", "--entry", "quay.io/dockstoretestuser/quayandgithub"], ExitCode::Success)
//!         .await?;
//!
//!     test.assert_no_leaked_connections().await
//! }
//! ```

pub mod builder;
pub mod cli;
pub mod constant;
pub mod context;
pub mod database;
pub mod error;
pub mod fixtures;
pub mod leak;
pub mod poll;
pub mod token_cache;
pub mod webservice;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use dockstore::error::ExitCode;
    pub use migration::FixtureSet;

    pub use crate::{
        cli::{assert_exit, CliHarness, OutputCapture},
        constant::*,
        fixtures::github::{hello_dockstore_workflow, GitHubRepository},
        poll::poll_until,
        token_cache::TokenCache,
        TestBuilder, TestContext, TestError,
    };
}

/// Installs a test-friendly tracing subscriber once per process.
///
/// Filtering follows `RUST_LOG`; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
