//! The five staged calls, over HTTP or in-process.

use async_trait::async_trait;
use campaign_core::{
    BrandKitUpdate, Campaign, CampaignError, CampaignId, CampaignResult, CreateCampaignRequest,
    GeneratedContent, GeneratedVisual,
};
use campaign_management::ManagementState;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// A logo file chosen by the user.
#[derive(Debug, Clone)]
pub struct LogoUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl LogoUpload {
    /// Best-effort content type from the file extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            "webp" => "image/webp",
            _ => "application/octet-stream",
        }
    }
}

#[async_trait]
pub trait BrandingBackend: Send + Sync {
    async fn create_campaign(&self, req: CreateCampaignRequest) -> CampaignResult<Campaign>;
    async fn upload_logo(&self, id: CampaignId, logo: LogoUpload) -> CampaignResult<Campaign>;
    async fn update_brand_kit(
        &self,
        id: CampaignId,
        update: BrandKitUpdate,
    ) -> CampaignResult<Campaign>;
    async fn generate_content(&self, id: CampaignId) -> CampaignResult<GeneratedContent>;
    async fn generate_visual(&self, id: CampaignId) -> CampaignResult<GeneratedVisual>;
}

// ─── HTTP ──────────────────────────────────────────────────────────────────

/// Talks to a running `brandkit serve` instance.
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> CampaignResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CampaignError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(
        id: Option<CampaignId>,
        result: reqwest::Result<reqwest::Response>,
    ) -> CampaignResult<T> {
        let resp = result.map_err(|e| CampaignError::Backend(e.to_string()))?;
        let status = resp.status();
        debug!(status = %status, url = %resp.url(), "Backend responded");

        if status == reqwest::StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(CampaignError::NotFound(id));
            }
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CampaignError::Backend(format!("{status}: {text}")));
        }
        resp.json::<T>()
            .await
            .map_err(|e| CampaignError::Backend(format!("invalid response body: {e}")))
    }
}

#[async_trait]
impl BrandingBackend for HttpBackend {
    async fn create_campaign(&self, req: CreateCampaignRequest) -> CampaignResult<Campaign> {
        let result = self.http.post(self.url("/campaigns/")).json(&req).send().await;
        Self::read(None, result).await
    }

    async fn upload_logo(&self, id: CampaignId, logo: LogoUpload) -> CampaignResult<Campaign> {
        let mime = logo.mime_type();
        let part = reqwest::multipart::Part::bytes(logo.bytes)
            .file_name(logo.filename)
            .mime_str(mime)
            .map_err(|e| CampaignError::InvalidUpload(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let result = self
            .http
            .post(self.url(&format!("/campaigns/{id}/upload_logo")))
            .multipart(form)
            .send()
            .await;
        Self::read(Some(id), result).await
    }

    async fn update_brand_kit(
        &self,
        id: CampaignId,
        update: BrandKitUpdate,
    ) -> CampaignResult<Campaign> {
        let result = self
            .http
            .put(self.url(&format!("/campaigns/{id}/brand_kit")))
            .json(&update)
            .send()
            .await;
        Self::read(Some(id), result).await
    }

    async fn generate_content(&self, id: CampaignId) -> CampaignResult<GeneratedContent> {
        let result = self
            .http
            .post(self.url(&format!("/campaigns/{id}/generate_content")))
            .send()
            .await;
        Self::read(Some(id), result).await
    }

    async fn generate_visual(&self, id: CampaignId) -> CampaignResult<GeneratedVisual> {
        let result = self
            .http
            .post(self.url(&format!("/campaigns/{id}/generate_visual")))
            .send()
            .await;
        Self::read(Some(id), result).await
    }
}

// ─── In-process ────────────────────────────────────────────────────────────

/// Calls the store and pipeline directly, without a server.
pub struct LocalBackend {
    state: ManagementState,
}

impl LocalBackend {
    pub fn new(state: ManagementState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl BrandingBackend for LocalBackend {
    async fn create_campaign(&self, req: CreateCampaignRequest) -> CampaignResult<Campaign> {
        Ok(self.state.store.create(req))
    }

    async fn upload_logo(&self, id: CampaignId, logo: LogoUpload) -> CampaignResult<Campaign> {
        if !self.state.store.contains(id) {
            return Err(CampaignError::NotFound(id));
        }
        let path = self.state.logos.store(id, &logo.filename, &logo.bytes).await?;
        self.state.store.set_logo(id, path.to_string_lossy().into_owned())
    }

    async fn update_brand_kit(
        &self,
        id: CampaignId,
        update: BrandKitUpdate,
    ) -> CampaignResult<Campaign> {
        self.state.store.update_brand_kit(id, update)
    }

    async fn generate_content(&self, id: CampaignId) -> CampaignResult<GeneratedContent> {
        let campaign = self.state.store.get(id)?;
        self.state.pipeline.generate_content(&campaign).await
    }

    async fn generate_visual(&self, id: CampaignId) -> CampaignResult<GeneratedVisual> {
        let campaign = self.state.store.get(id)?;
        self.state.pipeline.generate_visual(&campaign).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_mime_type_from_extension() {
        let logo = |name: &str| LogoUpload {
            filename: name.to_string(),
            bytes: Vec::new(),
        };
        assert_eq!(logo("logo.PNG").mime_type(), "image/png");
        assert_eq!(logo("logo.jpeg").mime_type(), "image/jpeg");
        assert_eq!(logo("uploaded_logo").mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_http_backend_trims_base_url() {
        let backend = HttpBackend::new("http://127.0.0.1:8002/", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.url("/campaigns/1"), "http://127.0.0.1:8002/campaigns/1");
    }
}
