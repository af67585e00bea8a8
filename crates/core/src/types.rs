//! Campaign records and generation results shared by every crate.

use serde::{Deserialize, Serialize};

pub type CampaignId = u64;

/// A stored campaign. Only the brand kit fields change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub brand_colors: Option<String>,
}

impl Campaign {
    /// Description as used in prompts; absent becomes empty.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub brand_colors: Option<String>,
}

impl CreateCampaignRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Partial update of the brand kit. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandKitUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_colors: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub social_post: String,
    pub ad_copy: String,
    pub email_campaign: String,
    pub tagline: String,
    pub product_description: String,
}

impl GeneratedContent {
    /// All five fields in a fixed order.
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            ("social_post", &self.social_post),
            ("ad_copy", &self.ad_copy),
            ("email_campaign", &self.email_campaign),
            ("tagline", &self.tagline),
            ("product_description", &self.product_description),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVisual {
    pub image_url: String,
    pub prompt: String,
}
