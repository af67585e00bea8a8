use thiserror::Error;

use crate::types::CampaignId;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Campaign not found")]
    NotFound(CampaignId),

    #[error("Generation service error: {0}")]
    Generation(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Backend request failed: {0}")]
    Backend(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl CampaignError {
    /// Stable machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            CampaignError::NotFound(_) => "campaign_not_found",
            CampaignError::Generation(_) => "generation_failed",
            CampaignError::InvalidUpload(_) => "invalid_upload",
            CampaignError::Backend(_) => "backend_error",
            CampaignError::Config(_) => "configuration_error",
            CampaignError::Serialization(_) => "serialization_error",
            CampaignError::Io(_) => "io_error",
            CampaignError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_is_fixed() {
        assert_eq!(CampaignError::NotFound(9999).to_string(), "Campaign not found");
        assert_eq!(CampaignError::NotFound(1).code(), "campaign_not_found");
    }

    #[test]
    fn test_generation_error_carries_detail() {
        let err = CampaignError::Generation("quota exceeded".to_string());
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(err.code(), "generation_failed");
    }
}
