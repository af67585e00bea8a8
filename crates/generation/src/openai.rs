//! OpenAI-compatible chat completion and image generation client.

use async_trait::async_trait;
use bytes::Bytes;
use campaign_core::config::GenerationConfig;
use campaign_core::{CampaignError, CampaignResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::client::{ChatMessage, GenerativeClient};

pub struct OpenAiClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    text_model: String,
    image_model: String,
    image_size: String,
}

impl OpenAiClient {
    pub fn new(config: &GenerationConfig, api_key: String) -> CampaignResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CampaignError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            image_size: config.image_size.clone(),
        })
    }

    /// Build a client from config, resolving the key from the environment.
    pub fn from_config(config: &GenerationConfig) -> CampaignResult<Self> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            CampaignError::Config(format!(
                "no generative API key found. Set {} or generation.api_key.",
                campaign_core::config::API_KEY_ENV
            ))
        })?;
        Self::new(config, api_key)
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> CampaignResult<R> {
        let url = format!("{}{}", self.api_base, path);
        debug!(url = %url, "Calling generative API");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            warn!(status = %status, "Generative API returned an error");
            return Err(CampaignError::Generation(format!(
                "API error ({status}): {text}"
            )));
        }

        resp.json::<R>().await.map_err(|e| {
            CampaignError::Generation(format!("failed to decode API response: {e}"))
        })
    }
}

fn transport_error(e: reqwest::Error) -> CampaignError {
    CampaignError::Generation(format!("request failed: {e}"))
}

#[async_trait]
impl GenerativeClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> CampaignResult<String> {
        let body = ChatRequest {
            model: &self.text_model,
            messages,
        };
        let resp: ChatResponse = self.post("/chat/completions", &body).await?;

        if let Some(usage) = resp.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        resp.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CampaignError::Generation("chat completion returned no text".to_string()))
    }

    async fn generate_image(&self, prompt: &str) -> CampaignResult<String> {
        let body = ImageRequest {
            model: &self.image_model,
            prompt,
            n: 1,
            size: &self.image_size,
        };
        let resp: ImageResponse = self.post("/images/generations", &body).await?;

        resp.data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or_else(|| CampaignError::Generation("image generation returned no url".to_string()))
    }

    async fn download_image(&self, url: &str) -> CampaignResult<Bytes> {
        let resp = self.http.get(url).send().await.map_err(transport_error)?;
        if !resp.status().is_success() {
            return Err(CampaignError::Generation(format!(
                "image download failed ({})",
                resp.status()
            )));
        }
        resp.bytes().await.map_err(transport_error)
    }
}

// --- API types ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_shape() {
        let messages = vec![
            ChatMessage::system("You are a marketing expert."),
            ChatMessage::user("Suggest a tagline"),
        ];
        let body = ChatRequest {
            model: "gpt-4",
            messages: &messages,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Suggest a tagline");
    }

    #[test]
    fn test_image_request_shape() {
        let body = ImageRequest {
            model: "dall-e-3",
            prompt: "a poster",
            n: 1,
            size: "1024x1024",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["n"], 1);
        assert_eq!(json["size"], "1024x1024");
    }

    #[test]
    fn test_chat_response_without_usage_parses() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  Hello  "}}]}"#,
        )
        .unwrap();
        assert!(resp.usage.is_none());
        assert_eq!(resp.choices[0].message.content.as_deref(), Some("  Hello  "));
    }

    #[test]
    fn test_explicit_key_builds_client() {
        let config = GenerationConfig {
            api_base: "http://localhost:1234/v1/".to_string(),
            ..GenerationConfig::default()
        };
        let client = OpenAiClient::new(&config, "sk-test".to_string()).unwrap();
        assert_eq!(client.api_base, "http://localhost:1234/v1");
    }

    /// Serve `status` and `body` on both endpoints and return a client aimed at it.
    async fn stub_client(status: u16, body: &'static str) -> OpenAiClient {
        use axum::http::{header, StatusCode};
        use axum::routing::post;

        let status = StatusCode::from_u16(status).unwrap();
        let reply =
            move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) };
        let app = axum::Router::new()
            .route("/v1/chat/completions", post(reply))
            .route("/v1/images/generations", post(reply));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = GenerationConfig {
            api_base: format!("http://{addr}/v1"),
            ..GenerationConfig::default()
        };
        OpenAiClient::new(&config, "sk-test".to_string()).unwrap()
    }

    fn generation_message(result: CampaignResult<String>) -> String {
        match result {
            Err(CampaignError::Generation(msg)) => msg,
            other => panic!("expected a generation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_returns_text() {
        let client = stub_client(
            200,
            r#"{"choices": [{"message": {"role": "assistant", "content": "Sun's out!"}}]}"#,
        )
        .await;
        let text = client.complete(&[ChatMessage::user("tagline")]).await.unwrap();
        assert_eq!(text, "Sun's out!");
    }

    #[tokio::test]
    async fn test_error_status_includes_status_and_body() {
        let client = stub_client(429, r#"{"error": "rate limited"}"#).await;

        let msg = generation_message(client.complete(&[ChatMessage::user("tagline")]).await);
        assert!(msg.contains("429 Too Many Requests"), "message was {msg:?}");
        assert!(msg.contains("rate limited"), "message was {msg:?}");

        let msg = generation_message(client.generate_image("a poster").await);
        assert!(msg.contains("429"), "message was {msg:?}");
    }

    #[tokio::test]
    async fn test_empty_choices_is_generation_error() {
        let client = stub_client(200, r#"{"choices": []}"#).await;
        generation_message(client.complete(&[ChatMessage::user("tagline")]).await);
    }

    #[tokio::test]
    async fn test_null_content_is_generation_error() {
        let client = stub_client(200, r#"{"choices": [{"message": {"content": null}}]}"#).await;
        generation_message(client.complete(&[ChatMessage::user("tagline")]).await);
    }

    #[tokio::test]
    async fn test_missing_image_url_is_generation_error() {
        for body in [r#"{"data": []}"#, r#"{"data": [{}]}"#] {
            let client = stub_client(200, body).await;
            generation_message(client.generate_image("a poster").await);
        }
    }

    #[tokio::test]
    async fn test_undecodable_body_is_generation_error() {
        let client = stub_client(200, "not json").await;
        let msg = generation_message(client.generate_image("a poster").await);
        assert!(msg.contains("decode"), "message was {msg:?}");
    }

    #[tokio::test]
    async fn test_connection_refused_is_generation_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = GenerationConfig {
            api_base: format!("http://{addr}/v1"),
            ..GenerationConfig::default()
        };
        let client = OpenAiClient::new(&config, "sk-test".to_string()).unwrap();
        let msg = generation_message(client.complete(&[ChatMessage::user("tagline")]).await);
        assert!(msg.starts_with("request failed"), "message was {msg:?}");
    }
}
