use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub static DOCKSTORE_TOKEN_SOURCE: &str = "dockstore";
pub static GITHUB_TOKEN_SOURCE: &str = "github.com";
pub static GOOGLE_TOKEN_SOURCE: &str = "google.com";
pub static BITBUCKET_TOKEN_SOURCE: &str = "bitbucket.org";

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<entity::enduser::Model>, DbErr> {
        entity::prelude::Enduser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::enduser::Model>, DbErr> {
        entity::prelude::Enduser::find()
            .filter(entity::enduser::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    pub async fn create(&self, username: &str) -> Result<entity::enduser::Model, DbErr> {
        let user = entity::enduser::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            is_admin: ActiveValue::Set(false),
            avatar_url: ActiveValue::Set(None),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    /// Finds the owner of a Dockstore API token
    pub async fn get_by_dockstore_token(
        &self,
        token: &str,
    ) -> Result<Option<entity::enduser::Model>, DbErr> {
        let Some(token) = entity::prelude::Token::find()
            .filter(entity::token::Column::TokenSource.eq(DOCKSTORE_TOKEN_SOURCE))
            .filter(entity::token::Column::Content.eq(token))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        self.get_by_id(token.user_id).await
    }

    pub async fn get_token(
        &self,
        user_id: i32,
        token_source: &str,
    ) -> Result<Option<entity::token::Model>, DbErr> {
        entity::prelude::Token::find()
            .filter(entity::token::Column::UserId.eq(user_id))
            .filter(entity::token::Column::TokenSource.eq(token_source))
            .one(self.db)
            .await
    }

    /// Stores a token, replacing any previous token of the same source for the user
    pub async fn upsert_token(
        &self,
        user_id: i32,
        token_source: &str,
        content: &str,
        refresh_token: Option<String>,
        username: &str,
    ) -> Result<entity::token::Model, DbErr> {
        match self.get_token(user_id, token_source).await? {
            Some(existing) => {
                let mut token: entity::token::ActiveModel = existing.into();
                token.content = ActiveValue::Set(content.to_string());
                token.refresh_token = ActiveValue::Set(refresh_token);
                token.username = ActiveValue::Set(username.to_string());
                token.update(self.db).await
            }
            None => {
                let token = entity::token::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    token_source: ActiveValue::Set(token_source.to_string()),
                    content: ActiveValue::Set(content.to_string()),
                    refresh_token: ActiveValue::Set(refresh_token),
                    username: ActiveValue::Set(username.to_string()),
                    ..Default::default()
                };
                token.insert(self.db).await
            }
        }
    }
}
