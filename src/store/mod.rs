use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::CatalogEntry,
};

pub mod catalog;
pub mod similarity;

pub use catalog::CatalogStore;
pub use similarity::SimilarityMatrix;

/// Precomputed catalog and similarity index, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub catalog: CatalogStore,
    pub similarity: SimilarityMatrix,
}

impl Artifacts {
    /// Pairs a catalog with its matrix, checking that their dimensions agree
    pub fn new(
        catalog: CatalogStore,
        similarity: SimilarityMatrix,
        validate_similarity: bool,
    ) -> AppResult<Self> {
        if similarity.dim() != catalog.len() {
            return Err(AppError::Configuration(format!(
                "Similarity matrix dimension {} does not match catalog size {}",
                similarity.dim(),
                catalog.len()
            )));
        }
        if validate_similarity {
            similarity.validate()?;
        }

        Ok(Self {
            catalog,
            similarity,
        })
    }

    /// Loads both artifacts from JSON files
    pub async fn load(
        catalog_path: &Path,
        similarity_path: &Path,
        validate_similarity: bool,
    ) -> AppResult<Self> {
        let entries: Vec<CatalogEntry> = read_json(catalog_path).await?;
        let rows: Vec<Vec<f64>> = read_json(similarity_path).await?;

        let artifacts = Self::new(
            CatalogStore::new(entries),
            SimilarityMatrix::from_rows(rows)?,
            validate_similarity,
        )?;

        tracing::info!(
            catalog = %catalog_path.display(),
            similarity = %similarity_path.display(),
            movies = artifacts.catalog.len(),
            "Loaded recommendation artifacts"
        );

        Ok(artifacts)
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::Configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&raw).map_err(|e| {
        AppError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
    })
}
