use dockstore::model::user::TokenDto;
use sea_orm::DatabaseConnection;

use crate::{
    constant::GOOGLE_CLIENT_ID,
    webservice::{
        data::{
            user::{GITHUB_TOKEN_SOURCE, GOOGLE_TOKEN_SOURCE},
            UserRepository,
        },
        error::Error,
        upstream::{github::GitHubClient, google::GoogleClient},
    },
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

fn token_dto(token: entity::token::Model) -> TokenDto {
    TokenDto {
        id: token.id,
        user_id: token.user_id,
        token_source: token.token_source,
        content: token.content,
        username: token.username,
    }
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Links a GitHub account to `user` through the OAuth code flow
    ///
    /// # Arguments
    /// - `code` - Authorization code returned by GitHub's consent screen
    /// - `user` - Dockstore user to link the account to
    /// - `github` - GitHub client
    ///
    /// # Returns
    /// - `Ok(TokenDto)` - The stored GitHub token
    /// - `Err(Error::Upstream)` - Token exchange or user lookup failed
    pub async fn link_github(
        &self,
        code: &str,
        user: &entity::enduser::Model,
        github: &GitHubClient,
    ) -> Result<TokenDto, Error> {
        let access_token = github.exchange_code(code).await?;
        let github_user = github.get_user(&access_token.access_token).await?;

        tracing::debug!(user = %user.username, login = %github_user.login, "Linking GitHub account");

        let token = UserRepository::new(self.db)
            .upsert_token(
                user.id,
                GITHUB_TOKEN_SOURCE,
                &access_token.access_token,
                None,
                &github_user.login,
            )
            .await?;

        Ok(token_dto(token))
    }

    /// Logs in with Google, creating a user for the Google account if needed
    ///
    /// When `user` is given the Google account is linked to it instead. Tokens
    /// issued to another OAuth client are rejected.
    ///
    /// # Returns
    /// - `Ok(TokenDto)` - The stored Google token
    /// - `Err(Error::Unauthorized)` - The token was issued to another client
    /// - `Err(Error::Upstream)` - A Google request failed
    pub async fn login_google(
        &self,
        code: &str,
        redirect_uri: Option<&str>,
        user: Option<&entity::enduser::Model>,
        google: &GoogleClient,
    ) -> Result<TokenDto, Error> {
        let tokens = google.exchange_code(code, redirect_uri).await?;

        let info = google.token_info(&tokens.access_token).await?;
        if info.audience != GOOGLE_CLIENT_ID {
            return Err(Error::Unauthorized(
                "Google token was issued to another client".to_string(),
            ));
        }

        let profile = google.user_info(&tokens.access_token).await?;
        let user_repository = UserRepository::new(self.db);

        let user = match user {
            Some(user) => user.clone(),
            None => match user_repository.get_by_username(&profile.email).await? {
                Some(user) => user,
                None => user_repository.create(&profile.email).await?,
            },
        };

        let token = user_repository
            .upsert_token(
                user.id,
                GOOGLE_TOKEN_SOURCE,
                &tokens.access_token,
                tokens.refresh_token,
                &profile.email,
            )
            .await?;

        Ok(token_dto(token))
    }
}
