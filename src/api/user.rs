use crate::{error::Error, model::user::UserDto};

use super::ApiClient;

impl ApiClient {
    /// The user owning the configured token.
    pub async fn get_user(&self) -> Result<UserDto, Error> {
        self.require_token()?;
        self.get("/users/user").await
    }
}
