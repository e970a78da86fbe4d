//! HTTP routes.
//!
//! - `POST /api/assessments` evaluate and record a profile (201)
//! - `GET  /api/assessments?limit=N` the caller's recent records
//! - `GET  /api/crops` the active catalog
//! - `GET  /health`

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::service::{AssessmentRequest, AssessmentService};
use crate::store::Assessment;

/// Header carrying the caller's identity. Authentication happens upstream.
pub const OWNER_HEADER: &str = "x-owner-id";
pub const ANONYMOUS_OWNER: &str = "anonymous";

pub type AppState = Arc<AssessmentService>;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Catalog entry as listed by `GET /api/crops`
#[derive(Debug, Serialize, Deserialize)]
pub struct CropSummary {
    pub name: String,
    pub description: String,
    pub benefits: Vec<String>,
}

pub fn create_router(service: AssessmentService) -> Router {
    let state: AppState = Arc::new(service);

    Router::new()
        .route(
            "/api/assessments",
            get(list_assessments).post(create_assessment),
        )
        .route("/api/crops", get(list_crops))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn owner_id(headers: &HeaderMap) -> String {
    headers
        .get(OWNER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_OWNER)
        .to_string()
}

async fn create_assessment(
    State(service): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AssessmentRequest>,
) -> Result<(StatusCode, Json<Assessment>), ApiError> {
    let owner = owner_id(&headers);
    let assessment = service.create_assessment(&owner, request)?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

async fn list_assessments(
    State(service): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Assessment>>, ApiError> {
    let owner = owner_id(&headers);
    let assessments = service.recent_assessments(&owner, query.limit)?;
    Ok(Json(assessments))
}

async fn list_crops(State(service): State<AppState>) -> Json<Vec<CropSummary>> {
    let crops = service
        .engine()
        .rules()
        .iter()
        .map(|rule| CropSummary {
            name: rule.name.to_string(),
            description: rule.description.to_string(),
            benefits: rule.benefits.iter().map(|b| b.to_string()).collect(),
        })
        .collect();
    Json(crops)
}

async fn health(State(service): State<AppState>) -> Json<Value> {
    let engine = service.engine();
    Json(json!({
        "status": "ok",
        "catalog": engine.variant(),
        "crops": engine.rules().len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_owner_id_defaults_to_anonymous() {
        let mut headers = HeaderMap::new();
        assert_eq!(owner_id(&headers), "anonymous");

        headers.insert(OWNER_HEADER, HeaderValue::from_static("   "));
        assert_eq!(owner_id(&headers), "anonymous");

        headers.insert(OWNER_HEADER, HeaderValue::from_static(" field-42 "));
        assert_eq!(owner_id(&headers), "field-42");
    }
}
