pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{CampaignError, CampaignResult};
pub use types::{
    BrandKitUpdate, Campaign, CampaignId, CreateCampaignRequest, GeneratedContent, GeneratedVisual,
};
