//! Declarative setup of a test environment.
//!
//! Configuration methods only queue work; [`TestBuilder::build`] resets the
//! database, starts the simulations and the webservice and applies everything
//! in order.

use migration::FixtureSet;
use mockito::{Mock, ServerGuard};

use crate::{
    cli::CliHarness,
    constant::{BITBUCKET_USERNAME, USER1_TOKEN},
    context::TestContext,
    database,
    error::TestError,
    fixtures::{
        github::{GitHubRepository, GitHubSimulation},
        google::GoogleSimulation,
    },
    token_cache::TokenCache,
    webservice::{
        data::{user::BITBUCKET_TOKEN_SOURCE, UserRepository},
        TestWebservice,
    },
};

type GitHubSetup = Box<dyn FnOnce(&mut GitHubSimulation)>;
type GoogleSetup = Box<dyn FnOnce(&mut GoogleSimulation)>;

/// Builder for a [`TestContext`].
pub struct TestBuilder {
    fixture_set: FixtureSet,
    github_setups: Vec<GitHubSetup>,
    google_setups: Vec<GoogleSetup>,
    // (user_id, refresh_token, cache)
    bitbucket_tokens: Vec<(i32, String, TokenCache)>,
    cli_token: Option<String>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a new TestBuilder seeding the public fixtures, with the CLI logged in as `user1`.
    pub fn new() -> Self {
        Self {
            fixture_set: FixtureSet::Public,
            github_setups: Vec::new(),
            google_setups: Vec::new(),
            bitbucket_tokens: Vec::new(),
            cli_token: Some(USER1_TOKEN.to_string()),
        }
    }

    pub fn with_fixture_set(mut self, fixture_set: FixtureSet) -> Self {
        self.fixture_set = fixture_set;
        self
    }

    /// Token the CLI authenticates with; `None` runs the CLI anonymously.
    pub fn with_cli_token(mut self, token: Option<&str>) -> Self {
        self.cli_token = token.map(str::to_string);
        self
    }

    /// Simulate `GET /user` for the fixture GitHub token.
    pub fn with_github_user(mut self, login: &str, expected_requests: usize) -> Self {
        let login = login.to_string();
        self.github_setups.push(Box::new(move |github| {
            github.mock_user(&login, expected_requests);
        }));
        self
    }

    pub fn with_github_organizations(mut self, logins: &[&str], expected_requests: usize) -> Self {
        let logins: Vec<String> = logins.iter().map(|login| login.to_string()).collect();
        self.github_setups.push(Box::new(move |github| {
            let logins: Vec<&str> = logins.iter().map(String::as_str).collect();
            github.mock_organizations(&logins, expected_requests);
        }));
        self
    }

    pub fn with_github_user_repositories(
        mut self,
        repositories: Vec<GitHubRepository>,
        expected_requests: usize,
    ) -> Self {
        self.github_setups.push(Box::new(move |github| {
            github.mock_user_repositories(&repositories, expected_requests);
        }));
        self
    }

    /// Simulate everything a workflow refresh reads from `repository`
    ///
    /// # Arguments
    /// - `repository` - Repository with its refs and files
    /// - `expected_refreshes` - How many refreshes of the workflow the test performs
    pub fn with_github_repository(
        mut self,
        repository: GitHubRepository,
        expected_refreshes: usize,
    ) -> Self {
        self.github_setups.push(Box::new(move |github| {
            github.mock_repository(&repository, expected_refreshes);
        }));
        self
    }

    pub fn with_github_token_exchange(mut self, code: &str, expected_requests: usize) -> Self {
        let code = code.to_string();
        self.github_setups.push(Box::new(move |github| {
            github.mock_token_exchange(&code, expected_requests);
        }));
        self
    }

    /// Simulate a complete Google login for `email` using authorization `code`.
    pub fn with_google_login(mut self, code: &str, email: &str) -> Self {
        let code = code.to_string();
        let email = email.to_string();
        self.google_setups.push(Box::new(move |google| {
            google
                .mock_token_exchange(&code, 1)
                .mock_valid_token_info(&email, 1)
                .mock_user_info(&email, 1);
        }));
        self
    }

    /// Register a custom rule on the GitHub simulation.
    ///
    /// ```ignore
    /// let test = TestBuilder::new()
    ///     .with_github_endpoint(|server| {
    ///         server.mock("GET", "/rate_limit").with_status(200).create()
    ///     })
    ///     .build()
    ///     .await?;
    /// ```
    pub fn with_github_endpoint<F>(mut self, mock_fn: F) -> Self
    where
        F: FnOnce(&mut ServerGuard) -> Mock + 'static,
    {
        self.github_setups.push(Box::new(move |github| {
            let mock = mock_fn(github.server());
            github.push(mock);
        }));
        self
    }

    pub fn with_google_endpoint<F>(mut self, mock_fn: F) -> Self
    where
        F: FnOnce(&mut ServerGuard) -> Mock + 'static,
    {
        self.google_setups.push(Box::new(move |google| {
            let mock = mock_fn(google.server());
            google.push(mock);
        }));
        self
    }

    /// Store the cached Bitbucket access token for `refresh_token` on `user_id`
    ///
    /// The lookup happens in [`Self::build`], which fails with
    /// [`TestError::TokenCacheMiss`] when the cache has no entry.
    pub fn with_bitbucket_token(
        mut self,
        user_id: i32,
        refresh_token: &str,
        cache: &TokenCache,
    ) -> Self {
        self.bitbucket_tokens
            .push((user_id, refresh_token.to_string(), cache.clone()));
        self
    }

    /// Build the test environment
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Seeded database, running simulations and webservice
    /// - `Err(TestError::MigrationFailed)` - A fixture migration failed
    /// - `Err(TestError::TokenCacheMiss)` - A queued Bitbucket token is not cached
    /// - `Err(TestError::DbErr)` - Connecting to or writing the database failed
    /// - `Err(TestError::IoError)` - The webservice or CLI could not be set up
    pub async fn build(self) -> Result<TestContext, TestError> {
        crate::init_tracing();

        let db = database::connect().await?;
        database::reset_database(&db, self.fixture_set).await?;

        let user_repository = UserRepository::new(&db);
        for (user_id, refresh_token, cache) in self.bitbucket_tokens {
            let cached = cache
                .lookup(&refresh_token)?
                .ok_or_else(|| TestError::TokenCacheMiss(cache.path_for(&refresh_token)))?;

            user_repository
                .upsert_token(
                    user_id,
                    BITBUCKET_TOKEN_SOURCE,
                    &cached.access_token,
                    Some(cached.refresh_token),
                    BITBUCKET_USERNAME,
                )
                .await?;
        }

        let mut github = GitHubSimulation::start().await;
        for setup in self.github_setups {
            setup(&mut github);
        }

        let mut google = GoogleSimulation::start().await;
        for setup in self.google_setups {
            setup(&mut google);
        }

        let webservice = TestWebservice::start(db.clone(), &github.url(), &google.url()).await?;
        let cli = CliHarness::new(webservice.url(), self.cli_token.as_deref())?;

        Ok(TestContext {
            db,
            github,
            google,
            webservice,
            cli,
        })
    }
}
