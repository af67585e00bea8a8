//! A scripted generative client for tests.

use async_trait::async_trait;
use bytes::Bytes;
use campaign_core::{CampaignError, CampaignResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::client::{ChatMessage, GenerativeClient, Role};

/// Answers every request locally. Text replies echo the user prompt with a
/// call counter, so repeated calls differ; image replies are numbered URLs.
#[derive(Default)]
pub struct ScriptedClient {
    calls: AtomicUsize,
    fail_after: Option<usize>,
    fail_images: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Succeed for the first `n` calls, then fail every call after.
    pub fn failing_after(n: usize) -> Self {
        Self {
            fail_after: Some(n),
            ..Self::default()
        }
    }

    /// Text succeeds, image generation always fails.
    pub fn failing_images() -> Self {
        Self {
            fail_images: true,
            ..Self::default()
        }
    }

    /// Every user prompt or image prompt received, in arrival order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self, prompt: &str) -> CampaignResult<usize> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        match self.fail_after {
            Some(limit) if n > limit => Err(CampaignError::Generation(format!(
                "scripted failure on call {n}"
            ))),
            _ => Ok(n),
        }
    }
}

#[async_trait]
impl GenerativeClient for ScriptedClient {
    async fn complete(&self, messages: &[ChatMessage]) -> CampaignResult<String> {
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("");
        let n = self.record(prompt)?;
        Ok(format!("\n  [{n}] {prompt}  \n"))
    }

    async fn generate_image(&self, prompt: &str) -> CampaignResult<String> {
        let n = self.record(prompt)?;
        if self.fail_images {
            return Err(CampaignError::Generation("scripted image failure".to_string()));
        }
        Ok(format!("https://images.example.com/generated/{n}.png"))
    }

    async fn download_image(&self, url: &str) -> CampaignResult<Bytes> {
        if self.fail_images {
            return Err(CampaignError::Generation("scripted download failure".to_string()));
        }
        Ok(Bytes::from(format!("image:{url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_echo_last_user_message() {
        let client = ScriptedClient::new();
        let reply = client
            .complete(&[ChatMessage::system("sys"), ChatMessage::user("hello")])
            .await
            .unwrap();
        assert!(reply.contains("hello"));
        assert!(!reply.contains("sys"));
        assert_eq!(client.prompts(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_failing_after_limit() {
        let client = ScriptedClient::failing_after(1);
        assert!(client.generate_image("one").await.is_ok());
        let err = client.generate_image("two").await.unwrap_err();
        assert!(matches!(err, CampaignError::Generation(_)));
        assert_eq!(client.call_count(), 2);
    }
}
