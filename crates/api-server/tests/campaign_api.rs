//! HTTP-level tests for the campaign API, driven through the full router
//! with a scripted generative client.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use campaign_api::ApiServer;
use campaign_core::AppConfig;
use campaign_generation::{GenerationPipeline, ScriptedClient};
use campaign_management::{CampaignStore, LogoStorage, ManagementState};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "brandkit-test-boundary";

fn app(client: Arc<ScriptedClient>, logo_dir: &Path) -> Router {
    let state = ManagementState {
        store: Arc::new(CampaignStore::new()),
        pipeline: Arc::new(GenerationPipeline::new(client, "You are a marketing expert.")),
        logos: Arc::new(LogoStorage::new(logo_dir, 1024 * 1024)),
    };
    ApiServer::new(AppConfig::default(), state).router()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

fn multipart_request(uri: &str, field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn root_returns_banner() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(ScriptedClient::new()), dir.path());

    let (status, body) = send(&app, empty_request("GET", "/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "AI Branding Tool Minimal Backend is running!");
}

#[tokio::test]
async fn summer_sale_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(ScriptedClient::new()), dir.path());

    let (status, campaign) = send(
        &app,
        json_request(
            "POST",
            "/campaigns/",
            json!({"name": "Summer Sale", "description": "20% off all items"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = campaign["id"].as_u64().unwrap();
    assert!(campaign["logo_url"].is_null());
    assert!(campaign["brand_colors"].is_null());

    let (status, content) =
        send(&app, empty_request("POST", &format!("/campaigns/{id}/generate_content"))).await;
    assert_eq!(status, StatusCode::OK);
    for field in ["social_post", "ad_copy", "email_campaign", "tagline", "product_description"] {
        let text = content[field].as_str().unwrap();
        assert!(!text.is_empty(), "{field} was empty");
    }

    let (status, visual) =
        send(&app, empty_request("POST", &format!("/campaigns/{id}/generate_visual"))).await;
    assert_eq!(status, StatusCode::OK);
    let prompt = visual["prompt"].as_str().unwrap();
    assert!(prompt.contains("Summer Sale"));
    assert!(prompt.contains("20% off all items"));
    assert!(visual["image_url"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn ids_increase_across_creations() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(ScriptedClient::new()), dir.path());

    let (_, first) = send(&app, json_request("POST", "/campaigns", json!({"name": "A"}))).await;
    let (_, second) = send(&app, json_request("POST", "/campaigns/", json!({"name": "B"}))).await;
    assert!(second["id"].as_u64().unwrap() > first["id"].as_u64().unwrap());

    let (status, fetched) = send(&app, empty_request("GET", &format!("/campaigns/{}", first["id"]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "A");
}

#[tokio::test]
async fn unknown_campaign_is_not_found_on_every_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(ScriptedClient::new()), dir.path());

    let requests = vec![
        empty_request("GET", "/campaigns/9999"),
        json_request("PUT", "/campaigns/9999/brand_kit", json!({"brand_colors": "#000"})),
        multipart_request("/campaigns/9999/upload_logo", "file", "logo.png", b"png"),
        empty_request("POST", "/campaigns/9999/generate_content"),
        empty_request("POST", "/campaigns/9999/generate_visual"),
    ];

    for req in requests {
        let uri = req.uri().to_string();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["message"], "Campaign not found", "{uri}");
        assert_eq!(body["error"], "campaign_not_found", "{uri}");
    }
    assert!(!dir.path().join("campaign_9999_logo.png").exists());
}

#[tokio::test]
async fn brand_kit_update_is_partial() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(ScriptedClient::new()), dir.path());

    let (_, campaign) = send(
        &app,
        json_request(
            "POST",
            "/campaigns/",
            json!({"name": "Summer Sale", "logo_url": "https://cdn.example.com/logo.png"}),
        ),
    )
    .await;
    let id = campaign["id"].as_u64().unwrap();

    let (status, updated) = send(
        &app,
        json_request("PUT", &format!("/campaigns/{id}/brand_kit"), json!({"brand_colors": "#FF0000"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["brand_colors"], "#FF0000");
    assert_eq!(updated["logo_url"], "https://cdn.example.com/logo.png");
    assert_eq!(updated["name"], "Summer Sale");
}

#[tokio::test]
async fn upload_logo_stores_sanitized_file() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(ScriptedClient::new()), dir.path());

    let (_, campaign) = send(&app, json_request("POST", "/campaigns/", json!({"name": "Logo Test"}))).await;
    let id = campaign["id"].as_u64().unwrap();

    let (status, updated) = send(
        &app,
        multipart_request(&format!("/campaigns/{id}/upload_logo"), "file", "../../my logo.png", b"\x89PNG"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let expected = dir.path().join(format!("campaign_{id}_my_logo.png"));
    assert_eq!(updated["logo_url"], expected.to_string_lossy().into_owned());
    assert_eq!(std::fs::read(&expected).unwrap(), b"\x89PNG");
}

#[tokio::test]
async fn upload_without_file_field_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(ScriptedClient::new()), dir.path());

    let (_, campaign) = send(&app, json_request("POST", "/campaigns/", json!({"name": "Logo Test"}))).await;
    let id = campaign["id"].as_u64().unwrap();

    let (status, body) = send(
        &app,
        multipart_request(&format!("/campaigns/{id}/upload_logo"), "image", "logo.png", b"png"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_upload");
}

#[tokio::test]
async fn generation_failure_is_bad_gateway() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(ScriptedClient::failing_after(0)), dir.path());

    let (_, campaign) = send(&app, json_request("POST", "/campaigns/", json!({"name": "Summer Sale"}))).await;
    let id = campaign["id"].as_u64().unwrap();

    let (status, body) =
        send(&app, empty_request("POST", &format!("/campaigns/{id}/generate_content"))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "generation_failed");
}

#[tokio::test]
async fn health_reports_campaign_count() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(Arc::new(ScriptedClient::new()), dir.path());

    send(&app, json_request("POST", "/campaigns/", json!({"name": "One"}))).await;
    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["campaigns"], 1);
}
