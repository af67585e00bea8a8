//! Axum REST handlers for the campaign API.

use crate::store::CampaignStore;
use crate::uploads::{LogoStorage, DEFAULT_LOGO_NAME};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campaign_core::{
    BrandKitUpdate, Campaign, CampaignError, CampaignId, CreateCampaignRequest, GeneratedContent,
    GeneratedVisual,
};
use campaign_generation::GenerationPipeline;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

/// Shared management state.
#[derive(Clone)]
pub struct ManagementState {
    pub store: Arc<CampaignStore>,
    pub pipeline: Arc<GenerationPipeline>,
    pub logos: Arc<LogoStorage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Maps the error taxonomy onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub CampaignError);

impl From<CampaignError> for ApiError {
    fn from(err: CampaignError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CampaignError::NotFound(_) => StatusCode::NOT_FOUND,
            CampaignError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            CampaignError::Generation(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            CampaignError::NotFound(_)
            | CampaignError::InvalidUpload(_)
            | CampaignError::Generation(_) => self.0.to_string(),
            other => {
                error!(error = %other, "Request failed");
                "Internal processing error".to_string()
            }
        };
        if status == StatusCode::BAD_GATEWAY {
            warn!(error = %self.0, "Generation request failed");
            metrics::counter!("management.generation_errors").increment(1);
        }
        let body = ErrorResponse {
            error: self.0.code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

// ─── Campaigns ─────────────────────────────────────────────────────────────

/// POST /campaigns/
pub async fn create_campaign(
    State(state): State<ManagementState>,
    Json(req): Json<CreateCampaignRequest>,
) -> Json<Campaign> {
    let campaign = state.store.create(req);
    metrics::counter!("management.campaigns.created").increment(1);
    Json(campaign)
}

/// GET /campaigns/:id
pub async fn get_campaign(
    State(state): State<ManagementState>,
    Path(id): Path<CampaignId>,
) -> Result<Json<Campaign>, ApiError> {
    Ok(Json(state.store.get(id)?))
}

/// PUT /campaigns/:id/brand_kit
pub async fn update_brand_kit(
    State(state): State<ManagementState>,
    Path(id): Path<CampaignId>,
    Json(update): Json<BrandKitUpdate>,
) -> Result<Json<Campaign>, ApiError> {
    let campaign = state.store.update_brand_kit(id, update)?;
    metrics::counter!("management.brand_kits.updated").increment(1);
    Ok(Json(campaign))
}

/// POST /campaigns/:id/upload_logo: Multipart form with a `file` field.
pub async fn upload_logo(
    State(state): State<ManagementState>,
    Path(id): Path<CampaignId>,
    mut multipart: Multipart,
) -> Result<Json<Campaign>, ApiError> {
    if !state.store.contains(id) {
        return Err(CampaignError::NotFound(id).into());
    }

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CampaignError::InvalidUpload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or(DEFAULT_LOGO_NAME).to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| CampaignError::InvalidUpload(e.to_string()))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) = upload.ok_or_else(|| {
        CampaignError::InvalidUpload("missing multipart field 'file'".to_string())
    })?;

    let path = state.logos.store(id, &filename, &bytes).await?;
    let campaign = state.store.set_logo(id, path.to_string_lossy().into_owned())?;
    metrics::counter!("management.logos.uploaded").increment(1);
    Ok(Json(campaign))
}

// ─── Generation ────────────────────────────────────────────────────────────

/// POST /campaigns/:id/generate_content
pub async fn generate_content(
    State(state): State<ManagementState>,
    Path(id): Path<CampaignId>,
) -> Result<Json<GeneratedContent>, ApiError> {
    let campaign = state.store.get(id)?;
    Ok(Json(state.pipeline.generate_content(&campaign).await?))
}

/// POST /campaigns/:id/generate_visual
pub async fn generate_visual(
    State(state): State<ManagementState>,
    Path(id): Path<CampaignId>,
) -> Result<Json<GeneratedVisual>, ApiError> {
    let campaign = state.store.get(id)?;
    Ok(Json(state.pipeline.generate_visual(&campaign).await?))
}
