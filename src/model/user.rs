use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub is_admin: bool,
}

/// A token issued by, or stored for, an external identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDto {
    pub id: i32,
    pub user_id: i32,
    pub token_source: String,
    pub content: String,
    pub username: String,
}

/// Body of the OAuth code exchange endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthCodeRequest {
    pub code: String,
    #[serde(default)]
    pub redirect_uri: Option<String>,
}

/// A source control repository visible to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDto {
    pub path: String,
    pub registered: bool,
}
