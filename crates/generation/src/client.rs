use async_trait::async_trait;
use bytes::Bytes;
use campaign_core::CampaignResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in a chat completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The external text and image generation service.
///
/// Implementations report every failure (auth, quota, network, malformed
/// response) as `CampaignError::Generation`.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Run a chat completion and return the primary text of the reply.
    async fn complete(&self, messages: &[ChatMessage]) -> CampaignResult<String>;

    /// Synthesize one image and return a downloadable reference to it.
    async fn generate_image(&self, prompt: &str) -> CampaignResult<String>;

    /// Fetch the image behind a reference returned by `generate_image`.
    async fn download_image(&self, url: &str) -> CampaignResult<Bytes>;
}
