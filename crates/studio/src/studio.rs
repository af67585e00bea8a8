//! The staged branding flow: create → logo → brand colors → content → visual.

use campaign_core::{BrandKitUpdate, CampaignId, CreateCampaignRequest};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::backend::{BrandingBackend, LogoUpload};

pub const MSG_SUCCESS: &str = "Branding generated!";
pub const MSG_CREATE_FAILED: &str = "Failed to create campaign.";
pub const MSG_CONTENT_FAILED: &str = "Failed to generate content.";

/// Inputs gathered from the user for one run.
#[derive(Debug, Clone, Default)]
pub struct BrandingRequest {
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<LogoUpload>,
    pub brand_colors: Option<String>,
}

/// Everything shown to the user after a run. Failed stages leave their
/// fields empty and set `message` to a fixed explanation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrandingOutcome {
    pub message: String,
    pub campaign_id: Option<CampaignId>,
    pub social_post: String,
    pub ad_copy: String,
    pub email_campaign: String,
    pub tagline: String,
    pub product_description: String,
    pub image_url: Option<String>,
    pub prompt: String,
    pub logo_url: Option<String>,
}

impl BrandingOutcome {
    fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn succeeded(&self) -> bool {
        self.message == MSG_SUCCESS
    }
}

pub struct BrandingStudio {
    backend: Arc<dyn BrandingBackend>,
}

impl BrandingStudio {
    pub fn new(backend: Arc<dyn BrandingBackend>) -> Self {
        Self { backend }
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn run(&self, request: BrandingRequest) -> BrandingOutcome {
        info!("Starting branding generation");

        let campaign = match self
            .backend
            .create_campaign(CreateCampaignRequest {
                name: request.name,
                description: request.description,
                ..CreateCampaignRequest::default()
            })
            .await
        {
            Ok(campaign) => campaign,
            Err(e) => {
                warn!(error = %e, "Campaign creation failed");
                return BrandingOutcome::failed(MSG_CREATE_FAILED);
            }
        };
        let id = campaign.id;

        let mut logo_url = None;
        if let Some(logo) = request.logo {
            match self.backend.upload_logo(id, logo).await {
                Ok(updated) => logo_url = updated.logo_url,
                Err(e) => {
                    warn!(campaign_id = id, error = %e, "Logo upload failed");
                    return BrandingOutcome {
                        campaign_id: Some(id),
                        ..BrandingOutcome::failed(format!("Failed to upload logo: {e}"))
                    };
                }
            }
        }

        if let Some(colors) = request.brand_colors.filter(|c| !c.trim().is_empty()) {
            let update = BrandKitUpdate {
                logo_url: None,
                brand_colors: Some(colors),
            };
            // A failed color update does not stop generation.
            if let Err(e) = self.backend.update_brand_kit(id, update).await {
                warn!(campaign_id = id, error = %e, "Brand kit update failed");
            }
        }

        let content = match self.backend.generate_content(id).await {
            Ok(content) => content,
            Err(e) => {
                warn!(campaign_id = id, error = %e, "Content generation failed");
                return BrandingOutcome {
                    campaign_id: Some(id),
                    logo_url,
                    ..BrandingOutcome::failed(MSG_CONTENT_FAILED)
                };
            }
        };

        let (image_url, prompt) = match self.backend.generate_visual(id).await {
            Ok(visual) => (Some(visual.image_url), visual.prompt),
            Err(e) => {
                warn!(campaign_id = id, error = %e, "Visual generation failed");
                (None, String::new())
            }
        };

        info!(campaign_id = id, "Branding generation complete");
        BrandingOutcome {
            message: MSG_SUCCESS.to_string(),
            campaign_id: Some(id),
            social_post: content.social_post,
            ad_copy: content.ad_copy,
            email_campaign: content.email_campaign,
            tagline: content.tagline,
            product_description: content.product_description,
            image_url,
            prompt,
            logo_url,
        }
    }
}
