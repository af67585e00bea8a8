//! In-memory campaign store backed by DashMap.
//!
//! Ids come from an atomic counter, so concurrent creators never share an
//! id. Updates to one record are serialized by the map's shard lock.

use campaign_core::{
    BrandKitUpdate, Campaign, CampaignError, CampaignId, CampaignResult, CreateCampaignRequest,
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

pub struct CampaignStore {
    campaigns: DashMap<CampaignId, Campaign>,
    next_id: AtomicU64,
}

impl Default for CampaignStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignStore {
    pub fn new() -> Self {
        info!("Campaign store initialized (in-memory)");
        Self {
            campaigns: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn create(&self, req: CreateCampaignRequest) -> Campaign {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let campaign = Campaign {
            id,
            name: req.name,
            description: req.description,
            logo_url: req.logo_url,
            brand_colors: req.brand_colors,
        };
        self.campaigns.insert(id, campaign.clone());
        info!(campaign_id = id, name = %campaign.name, "Campaign created");
        campaign
    }

    pub fn get(&self, id: CampaignId) -> CampaignResult<Campaign> {
        self.campaigns
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or(CampaignError::NotFound(id))
    }

    pub fn update_brand_kit(
        &self,
        id: CampaignId,
        update: BrandKitUpdate,
    ) -> CampaignResult<Campaign> {
        let mut entry = self
            .campaigns
            .get_mut(&id)
            .ok_or(CampaignError::NotFound(id))?;
        let c = entry.value_mut();
        if let Some(logo_url) = update.logo_url {
            c.logo_url = Some(logo_url);
        }
        if let Some(brand_colors) = update.brand_colors {
            c.brand_colors = Some(brand_colors);
        }
        debug!(campaign_id = id, "Brand kit updated");
        Ok(c.clone())
    }

    pub fn set_logo(&self, id: CampaignId, logo_url: String) -> CampaignResult<Campaign> {
        self.update_brand_kit(
            id,
            BrandKitUpdate {
                logo_url: Some(logo_url),
                brand_colors: None,
            },
        )
    }

    pub fn contains(&self, id: CampaignId) -> bool {
        self.campaigns.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}
