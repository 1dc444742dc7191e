use crate::{
    error::{AppError, AppResult},
    models::CatalogEntry,
    store::Artifacts,
};

/// Finds the `count` movies most similar to `title`
///
/// The title must match a catalog entry exactly (case-sensitive). Candidates
/// are ranked by descending similarity, ties keeping catalog order, and the
/// queried movie itself is always skipped.
pub fn recommend(artifacts: &Artifacts, title: &str, count: usize) -> AppResult<Vec<CatalogEntry>> {
    let position = artifacts
        .catalog
        .position_of(title)
        .ok_or_else(|| AppError::NotFound(format!("Movie '{}' not found in catalog", title)))?;

    let scores = artifacts.similarity.row(position).ok_or_else(|| {
        AppError::Internal(format!("No similarity row for catalog position {}", position))
    })?;

    let mut ranked: Vec<usize> = (0..scores.len()).collect();
    // sort_by is stable, so equal scores stay in catalog order
    ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let recommendations: Vec<CatalogEntry> = ranked
        .into_iter()
        .filter(|&candidate| candidate != position)
        .take(count)
        .filter_map(|candidate| artifacts.catalog.get(candidate).cloned())
        .collect();

    tracing::debug!(
        title = %title,
        position,
        results = recommendations.len(),
        "Ranked similar movies"
    );

    Ok(recommendations)
}
