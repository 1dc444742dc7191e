use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::EnrichedRecord,
    routes::AppState,
    services::recommendations,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub recommendations: Vec<EnrichedRecord>,
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload?;
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        title = %request.title,
        "Processing recommendation request"
    );

    let candidates = recommendations::recommend(
        &state.artifacts,
        &request.title,
        state.recommendation_count,
    )?;

    let external_refs: Vec<u64> = candidates.iter().map(|c| c.external_ref).collect();
    let records = state.enricher.enrich(&external_refs).await;

    tracing::info!(
        request_id = %request_id,
        recommendations = records.len(),
        "Recommendations completed"
    );

    Ok(Json(RecommendationResponse {
        title: request.title,
        recommendations: records,
    }))
}
