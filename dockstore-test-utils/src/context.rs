//! Running test environment returned by [`TestBuilder`](crate::TestBuilder).

use sea_orm::{DatabaseConnection, FromQueryResult, Statement};

use crate::{
    cli::CliHarness,
    error::TestError,
    fixtures::{github::GitHubSimulation, google::GoogleSimulation},
    leak,
    webservice::TestWebservice,
};

#[derive(Debug, FromQueryResult)]
struct Count {
    count: i64,
}

/// Test environment: seeded database, simulations, webservice and CLI.
///
/// ```ignore
/// let mut test = TestBuilder::new().build().await?;
///
/// test.cli.run_expect(&["tool", "publish", "--entry", "quay.io/dockstoretestuser/quayandgithub"], ExitCode::Success).await?;
/// assert_eq!(test.count("SELECT COUNT(*) AS count FROM tool WHERE is_published").await?, 3);
///
/// test.assert_mocks();
/// test.assert_no_leaked_connections().await?;
/// ```
pub struct TestContext {
    /// Connection pool shared with the webservice stand-in
    pub db: DatabaseConnection,
    pub github: GitHubSimulation,
    pub google: GoogleSimulation,
    pub webservice: TestWebservice,
    /// CLI configured with `user1`'s token against the webservice
    pub cli: CliHarness,
}

impl TestContext {
    /// Runs a `SELECT COUNT(*) AS count ...` query and returns the count.
    pub async fn count(&self, sql: &str) -> Result<i64, TestError> {
        let row = Count::find_by_statement(Statement::from_string(
            self.db.get_database_backend(),
            sql,
        ))
        .one(&self.db)
        .await?;

        Ok(row.map(|row| row.count).unwrap_or_default())
    }

    /// Assert all simulated endpoints were called as expected.
    pub fn assert_mocks(&self) {
        self.github.assert_mocks();
        self.google.assert_mocks();
    }

    pub async fn assert_no_leaked_connections(&self) -> Result<(), TestError> {
        leak::assert_no_leaked_connections(&self.db).await
    }
}
