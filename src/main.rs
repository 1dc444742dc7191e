use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use reelmatch_api::{
    config::Config,
    routes::{create_router, AppState},
    services::{EnrichmentSettings, Enricher, TmdbProvider},
    store::Artifacts,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("reelmatch_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Artifacts are loaded exactly once, before any request can be served
    let artifacts = Artifacts::load(
        &config.catalog_path,
        &config.similarity_path,
        config.validate_similarity,
    )
    .await?;

    let provider = Arc::new(TmdbProvider::from_config(&config));
    let enricher = Enricher::new(provider, EnrichmentSettings::from_config(&config));

    let state = Arc::new(AppState {
        artifacts: Arc::new(artifacts),
        enricher,
        recommendation_count: config.recommendation_count,
    });

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
