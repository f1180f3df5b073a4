//! Tests for configuration and connection failures.

use super::*;

/// Tests running an authenticated command without a config file.
///
/// Expected: CLIENT_ERROR
#[tokio::test]
async fn missing_config_is_client_error() -> Result<(), TestError> {
    let dir = tempfile::tempdir()?;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = dockstore::cli::run(
        [
            "dockstore".to_string(),
            "--config".to_string(),
            dir.path().join("config").display().to_string(),
            "tool".to_string(),
            "list".to_string(),
        ],
        &mut stdout,
        &mut stderr,
    )
    .await;

    assert_eq!(code, ExitCode::ClientError.code());
    assert!(!stderr.is_empty());

    Ok(())
}

/// Tests a config pointing at a port nothing listens on.
///
/// Expected: CONNECTION_ERROR
#[tokio::test]
async fn unreachable_server_is_connection_error() -> Result<(), TestError> {
    let mut cli = CliHarness::new("http://127.0.0.1:1", Some(USER1_TOKEN))?;

    cli.run_expect(&["tool", "list"], ExitCode::ConnectionError)
        .await?;

    Ok(())
}

/// Tests authenticated commands without a token in the config.
///
/// Expected: Ok with CLIENT_ERROR
#[tokio::test]
async fn missing_token_is_client_error() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_cli_token(None).build().await?;

    test.cli
        .run_expect(&["tool", "list"], ExitCode::ClientError)
        .await?;

    Ok(())
}

/// Tests a token the webservice does not know.
///
/// Expected: Ok with API_ERROR
#[tokio::test]
async fn unknown_token_is_api_error() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_cli_token(Some("notarealtoken"))
        .build()
        .await?;

    test.cli
        .run_expect(&["tool", "list"], ExitCode::ApiError)
        .await?;

    Ok(())
}

/// Tests that anonymous commands work without a token.
///
/// Expected: Ok with SUCCESS
#[tokio::test]
async fn search_works_anonymously() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_cli_token(None).build().await?;

    test.cli
        .run_expect(&["tool", "search", "--pattern", "public"], ExitCode::Success)
        .await?;
    assert!(test.cli.output.stdout().contains("publictool"));

    Ok(())
}

/// Tests unknown subcommands.
///
/// Expected: CLIENT_ERROR with usage on stderr
#[tokio::test]
async fn unknown_subcommand_is_client_error() -> Result<(), TestError> {
    let mut cli = CliHarness::new("http://127.0.0.1:1", None)?;

    let code = cli.run(&["tool", "frobnicate"]).await?;

    assert_exit(code, ExitCode::ClientError, &cli.output);
    assert!(cli.output.stdout().is_empty());
    assert!(!cli.output.stderr().is_empty());

    Ok(())
}
