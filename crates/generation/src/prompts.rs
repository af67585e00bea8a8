//! Fixed prompt templates. Name and description are interpolated verbatim.

use campaign_core::Campaign;

/// The five copy formats produced for every campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    SocialPost,
    AdCopy,
    EmailCampaign,
    Tagline,
    ProductDescription,
}

impl ContentKind {
    pub const ALL: [ContentKind; 5] = [
        ContentKind::SocialPost,
        ContentKind::AdCopy,
        ContentKind::EmailCampaign,
        ContentKind::Tagline,
        ContentKind::ProductDescription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::SocialPost => "social_post",
            ContentKind::AdCopy => "ad_copy",
            ContentKind::EmailCampaign => "email_campaign",
            ContentKind::Tagline => "tagline",
            ContentKind::ProductDescription => "product_description",
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            ContentKind::SocialPost => "Write a catchy social media post",
            ContentKind::AdCopy => "Write a short ad copy",
            ContentKind::EmailCampaign => "Write a marketing email",
            ContentKind::Tagline => "Suggest a tagline",
            ContentKind::ProductDescription => "Write a product description",
        }
    }
}

pub fn content_prompt(kind: ContentKind, campaign: &Campaign) -> String {
    format!(
        "{} for a campaign called '{}'. Description: {}",
        kind.instruction(),
        campaign.name,
        campaign.description_or_empty()
    )
}

pub fn visual_prompt(campaign: &Campaign) -> String {
    format!(
        "Create a professional marketing visual for a campaign called '{}'. Description: {}. Use a clean, modern style.",
        campaign.name,
        campaign.description_or_empty()
    )
}
