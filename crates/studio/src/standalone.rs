//! One-shot campaign generation with no stored campaign.

use bytes::Bytes;
use campaign_core::CampaignResult;
use campaign_generation::{ChatMessage, GenerativeClient};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

const SYSTEM_PROMPT: &str = "You are a marketing expert helping to create campaign content.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageStyle {
    #[default]
    Modern,
    Vintage,
    Minimalist,
    Bold,
    Professional,
}

impl ImageStyle {
    pub const ALL: [ImageStyle; 5] = [
        ImageStyle::Modern,
        ImageStyle::Vintage,
        ImageStyle::Minimalist,
        ImageStyle::Bold,
        ImageStyle::Professional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Modern => "Modern",
            ImageStyle::Vintage => "Vintage",
            ImageStyle::Minimalist => "Minimalist",
            ImageStyle::Bold => "Bold",
            ImageStyle::Professional => "Professional",
        }
    }
}

impl fmt::Display for ImageStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown image style {s:?}"))
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuickBrief {
    pub description: String,
    pub brand_name: String,
    pub brand_colors: String,
    pub image_style: ImageStyle,
}

impl QuickBrief {
    pub fn content_prompt(&self) -> String {
        format!(
            "Create a marketing campaign based on the following description:\n\
             Description: {}\n\
             Brand Name: {}\n\
             Brand Colors: {}\n\
             Image Style: {}\n\
             \n\
             Please provide:\n\
             1. A catchy headline\n\
             2. A brief marketing copy\n\
             3. Key visual elements to include",
            self.description, self.brand_name, self.brand_colors, self.image_style
        )
    }

    pub fn image_prompt(&self) -> String {
        format!(
            "{} for {}. Use brand colors: {}. Style: {}. High quality, professional marketing visual.",
            self.description, self.brand_name, self.brand_colors, self.image_style
        )
    }
}

/// What the user sees. On failure `content` is `Error: <message>` and
/// there is no image.
#[derive(Debug, Clone)]
pub struct QuickOutput {
    pub content: String,
    pub image_url: Option<String>,
    pub image: Option<Bytes>,
}

pub struct QuickCampaign {
    client: Arc<dyn GenerativeClient>,
    fetch_image: bool,
}

impl QuickCampaign {
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self {
            client,
            fetch_image: true,
        }
    }

    /// Skip downloading the generated image; only its URL is returned.
    pub fn without_download(mut self) -> Self {
        self.fetch_image = false;
        self
    }

    #[instrument(skip(self, brief), fields(brand = %brief.brand_name))]
    pub async fn run(&self, brief: &QuickBrief) -> QuickOutput {
        match self.generate(brief).await {
            Ok(output) => {
                info!("Quick campaign generated");
                output
            }
            Err(e) => {
                warn!(error = %e, "Quick campaign failed");
                QuickOutput {
                    content: format!("Error: {e}"),
                    image_url: None,
                    image: None,
                }
            }
        }
    }

    async fn generate(&self, brief: &QuickBrief) -> CampaignResult<QuickOutput> {
        let content = self
            .client
            .complete(&[
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(brief.content_prompt()),
            ])
            .await?;

        let image_url = self.client.generate_image(&brief.image_prompt()).await?;
        let image = if self.fetch_image {
            Some(self.client.download_image(&image_url).await?)
        } else {
            None
        };

        Ok(QuickOutput {
            content,
            image_url: Some(image_url),
            image,
        })
    }
}
