//! API routes for fractd.

use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use fracture_common::api::{AnalysisQuery, AnalysisResponse, HealthResponse};
use fracture_common::chat::{ChatRequest, ChatResponse, ChatTurn};
use fracture_common::types::{AnalysisRecord, BoneType};
use fracture_common::validate;
use fracture_common::VERSION;

use crate::chatbot;
use crate::engine;
use crate::state::AppState;

type AppStateArc = Arc<AppState>;

pub fn analysis_routes() -> Router<AppStateArc> {
    Router::new().route("/api/analysis", post(run_analysis).get(query_analysis))
}

pub fn chatbot_routes() -> Router<AppStateArc> {
    Router::new().route("/api/chatbot/", post(chat))
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health))
}

/// Parsed multipart upload for `POST /api/analysis`.
#[derive(Default)]
struct UploadForm {
    image: Option<Vec<u8>>,
    image_name: Option<String>,
    user_name: Option<String>,
    user_type: Option<String>,
}

async fn read_upload(mut multipart: Multipart) -> Result<UploadForm, (StatusCode, String)> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "image" => {
                if form.image_name.is_none() {
                    form.image_name = field.file_name().map(|n| n.to_string());
                }
                let bytes = field.bytes().await.map_err(|e| {
                    (StatusCode::BAD_REQUEST, format!("Failed to read image: {}", e))
                })?;
                form.image = Some(bytes.to_vec());
            }
            "image_name" => {
                form.image_name = Some(text_field(field).await?);
            }
            "user_name" => {
                form.user_name = Some(text_field(field).await?);
            }
            "user_type" => {
                form.user_type = Some(text_field(field).await?);
            }
            other => {
                warn!("Ignoring unknown multipart field: {}", other);
            }
        }
    }

    Ok(form)
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, (StatusCode, String)> {
    field
        .text()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Invalid form field: {}", e)))
}

async fn run_analysis(
    State(state): State<AppStateArc>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AnalysisResponse>), (StatusCode, String)> {
    let form = read_upload(multipart).await?;

    let image = form
        .image
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "Missing image field".to_string()))?;
    let image_name = form.image_name.unwrap_or_else(|| "upload".to_string());

    if let Err(e) = validate::validate_upload(&image_name, image.len() as u64) {
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    info!("Analyzing upload: {} ({} bytes)", image_name, image.len());

    let mut inner = state.state.write().await;
    let response = engine::analyze(&image, &image_name, &state.config.engine, &mut inner.cache);

    let record = AnalysisRecord {
        id: Uuid::new_v4().to_string(),
        image_name,
        image_hash: response.image_hash.clone(),
        uploaded_at: Utc::now(),
        user_name: form.user_name,
        user_type: form.user_type,
        bone_type: BoneType::parse(&response.bone_type).unwrap_or(BoneType::Wrist),
        fracture_detected: response.fracture_detected,
        confidence: response.confidence,
        location: response.location.clone(),
        recommendations: response.recommendations.clone(),
        reference_case: response.reference_case.clone(),
    };
    inner.record_analysis(record);

    Ok((StatusCode::CREATED, Json(response)))
}

/// History queries: latest by hash, else latest by name, else the most
/// recent page. A miss on a specific identifier is an empty object, not
/// an error.
async fn query_analysis(
    State(state): State<AppStateArc>,
    Query(query): Query<AnalysisQuery>,
) -> Json<serde_json::Value> {
    let inner = state.state.read().await;

    if let Some(hash) = query.image_hash.as_deref() {
        return match inner.latest_by_hash(hash) {
            Some(record) => Json(serde_json::to_value(record).unwrap_or_default()),
            None => Json(serde_json::json!({})),
        };
    }
    if let Some(name) = query.image_name.as_deref() {
        return match inner.latest_by_name(name) {
            Some(record) => Json(serde_json::to_value(record).unwrap_or_default()),
            None => Json(serde_json::json!({})),
        };
    }

    let recent = inner.recent(state.config.history_page_size);
    Json(serde_json::to_value(recent).unwrap_or_default())
}

async fn chat(
    State(state): State<AppStateArc>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<serde_json::Value>)> {
    if request.message.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Message is required" })),
        ));
    }

    let response = chatbot::respond(&request.message);

    let mut inner = state.state.write().await;
    inner.record_chat(ChatTurn::new(request.message, response.clone()));

    Ok(Json(ChatResponse { response }))
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
