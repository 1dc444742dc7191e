use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{models::CatalogEntry, routes::AppState, services::title_search};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
    limit: Option<usize>,
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<CatalogEntry>> {
    let titles = title_search::search_titles(&state.artifacts.catalog, &params.q, params.limit)
        .into_iter()
        .cloned()
        .collect();
    Json(titles)
}
