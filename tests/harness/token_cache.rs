//! Tests for seeding Bitbucket tokens from the token cache.

use super::*;

static REFRESH_TOKEN: &str = "bitbucketRefreshToken";

/// Tests that a cached token is stored for the user.
///
/// Expected: Ok with one Bitbucket token row for `user1`
#[tokio::test]
async fn cached_bitbucket_token_is_stored() -> Result<(), TestError> {
    let dir = tempfile::tempdir()?;
    let cache = TokenCache::new(dir.path());
    std::fs::write(
        cache.path_for(REFRESH_TOKEN),
        r#"{"access_token":"bitbucketAccessToken","refresh_token":"bitbucketRefreshToken","expires_in":7200,"token_type":"bearer"}"#,
    )?;

    let test = TestBuilder::new()
        .with_bitbucket_token(1, REFRESH_TOKEN, &cache)
        .build()
        .await?;

    assert_eq!(
        test.count(
            "SELECT COUNT(*) AS count FROM token \
             WHERE user_id = 1 AND token_source = 'bitbucket.org' \
             AND content = 'bitbucketAccessToken' AND refresh_token = 'bitbucketRefreshToken'"
        )
        .await?,
        1
    );

    test.assert_no_leaked_connections().await
}

/// Tests building with a refresh token that is not cached.
///
/// Expected: Err with TokenCacheMiss naming the expected file
#[tokio::test]
async fn uncached_bitbucket_token_fails_build() -> Result<(), TestError> {
    let dir = tempfile::tempdir()?;
    let cache = TokenCache::new(dir.path());

    let result = TestBuilder::new()
        .with_bitbucket_token(1, REFRESH_TOKEN, &cache)
        .build()
        .await;

    match result {
        Err(TestError::TokenCacheMiss(path)) => assert_eq!(path, cache.path_for(REFRESH_TOKEN)),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("build succeeded without a cached token"),
    }

    Ok(())
}
