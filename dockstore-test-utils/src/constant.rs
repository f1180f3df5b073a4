//! Fixed values shared by the harness, the fixture migrations and the tests.
//!
//! None of these are real credentials.

/// Dockstore token of `user1`, seeded by every fixture set.
pub static USER1_TOKEN: &str = "iamafakedockstoretoken";

/// Dockstore token of `user2`.
pub static USER2_TOKEN: &str = "iamafakedockstoretoken2";

/// GitHub token stored for `user1`; the GitHub simulation expects it.
pub static GITHUB_TOKEN: &str = "fakeGitHubToken";

/// GitHub login linked to `user1`.
pub static GITHUB_USERNAME: &str = "DockstoreTestUser2";

/// OAuth application credentials the webservice stand-in presents upstream.
pub static GITHUB_CLIENT_ID: &str = "github_client_id";
pub static GITHUB_CLIENT_SECRET: &str = "github_client_secret";
pub static GOOGLE_CLIENT_ID: &str = "google_client_id.apps.googleusercontent.com";
pub static GOOGLE_CLIENT_SECRET: &str = "google_client_secret";

/// Redirect URI sent with OAuth code exchanges.
pub static OAUTH_REDIRECT_URI: &str = "http://localhost:8080/auth/callback";

/// Number of times the connection leak check samples the pool.
pub const LEAK_CHECK_ATTEMPTS: u32 = 10;

/// Pause between connection leak samples, in milliseconds.
pub const LEAK_CHECK_INTERVAL_MS: u64 = 500;

/// Database used when `DATABASE_URL` is not set.
pub static SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Bitbucket account name stored with cached Bitbucket tokens.
pub static BITBUCKET_USERNAME: &str = "DockstoreTestUser";
