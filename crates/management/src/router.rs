//! Campaign API router: mounts the campaign endpoints at the root.

use crate::handlers::{self, ManagementState};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

/// Multipart framing allowance on top of the logo size limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the campaign router. Merge it into the main app.
pub fn management_router(state: ManagementState) -> Router {
    let upload_limit = state.logos.max_bytes() + MULTIPART_OVERHEAD;

    Router::new()
        .route("/campaigns", post(handlers::create_campaign))
        .route("/campaigns/", post(handlers::create_campaign))
        .route("/campaigns/:id", get(handlers::get_campaign))
        .route("/campaigns/:id/brand_kit", put(handlers::update_brand_kit))
        .route(
            "/campaigns/:id/upload_logo",
            post(handlers::upload_logo).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/campaigns/:id/generate_content", post(handlers::generate_content))
        .route("/campaigns/:id/generate_visual", post(handlers::generate_visual))
        .with_state(state)
}
