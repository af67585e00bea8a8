//! Campaign → marketing copy and visual.

use campaign_core::{Campaign, CampaignResult, GeneratedContent, GeneratedVisual};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::client::{ChatMessage, GenerativeClient};
use crate::prompts::{self, ContentKind};

pub struct GenerationPipeline {
    client: Arc<dyn GenerativeClient>,
    system_prompt: String,
}

impl GenerationPipeline {
    pub fn new(client: Arc<dyn GenerativeClient>, system_prompt: impl Into<String>) -> Self {
        Self {
            client,
            system_prompt: system_prompt.into(),
        }
    }

    /// Generate all five copy formats.
    ///
    /// The five calls run concurrently and fail fast: the first error is
    /// returned and the other in-flight calls are dropped.
    #[instrument(skip(self, campaign), fields(campaign_id = campaign.id))]
    pub async fn generate_content(&self, campaign: &Campaign) -> CampaignResult<GeneratedContent> {
        metrics::counter!("generation.content.requests").increment(1);

        let (social_post, ad_copy, email_campaign, tagline, product_description) = tokio::try_join!(
            self.ask(ContentKind::SocialPost, campaign),
            self.ask(ContentKind::AdCopy, campaign),
            self.ask(ContentKind::EmailCampaign, campaign),
            self.ask(ContentKind::Tagline, campaign),
            self.ask(ContentKind::ProductDescription, campaign),
        )
        .inspect_err(|_| metrics::counter!("generation.content.failures").increment(1))?;

        info!("Generated campaign content");
        Ok(GeneratedContent {
            social_post,
            ad_copy,
            email_campaign,
            tagline,
            product_description,
        })
    }

    #[instrument(skip(self, campaign), fields(campaign_id = campaign.id))]
    pub async fn generate_visual(&self, campaign: &Campaign) -> CampaignResult<GeneratedVisual> {
        metrics::counter!("generation.visual.requests").increment(1);

        let prompt = prompts::visual_prompt(campaign);
        let image_url = self
            .client
            .generate_image(&prompt)
            .await
            .inspect_err(|_| metrics::counter!("generation.visual.failures").increment(1))?;

        info!("Generated campaign visual");
        Ok(GeneratedVisual { image_url, prompt })
    }

    async fn ask(&self, kind: ContentKind, campaign: &Campaign) -> CampaignResult<String> {
        let messages = [
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(prompts::content_prompt(kind, campaign)),
        ];
        let text = self.client.complete(&messages).await?;
        tracing::debug!(kind = kind.as_str(), chars = text.len(), "Content call returned");
        Ok(text.trim().to_string())
    }
}
