use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Request body for publishing or unpublishing an entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub publish: bool,
}

/// A descriptor file as served by the GA4GH TRS descriptor endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorDto {
    pub content: String,
    pub url: String,
}
