use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;

use reelmatch_api::{
    error::FetchError,
    models::{
        CatalogEntry, TmdbGenre, TmdbMovieDetails, TmdbWatchProvider, TmdbRegionProviders,
        TmdbWatchProviders,
    },
    routes::{create_router, AppState},
    services::{EnrichmentSettings, Enricher, MetadataProvider},
    store::{Artifacts, CatalogStore, SimilarityMatrix},
};

/// Serves canned metadata; external ref 1003 fails its details call
struct StubProvider;

#[async_trait::async_trait]
impl MetadataProvider for StubProvider {
    async fn fetch_details(&self, external_ref: u64) -> Result<TmdbMovieDetails, FetchError> {
        if external_ref == 1003 {
            return Err(FetchError::Status(500));
        }
        Ok(TmdbMovieDetails {
            title: Some(format!("Movie {}", external_ref)),
            genres: vec![TmdbGenre {
                name: "Drama".to_string(),
            }],
            poster_path: Some(format!("/{}.jpg", external_ref)),
            overview: None,
            homepage: None,
            release_date: Some("2001-05-04".to_string()),
        })
    }

    async fn fetch_watch_providers(
        &self,
        _external_ref: u64,
    ) -> Result<TmdbWatchProviders, FetchError> {
        Ok(TmdbWatchProviders {
            results: HashMap::from([(
                "US".to_string(),
                TmdbRegionProviders {
                    flatrate: vec![TmdbWatchProvider {
                        provider_name: Some("Netflix".to_string()),
                        logo_path: None,
                    }],
                    ..Default::default()
                },
            )]),
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

const TITLES: [&str; 10] = [
    "Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta", "Eta", "Theta", "Iota", "Kappa",
];

fn create_test_server() -> TestServer {
    let entries = TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| CatalogEntry {
            id: i as u64,
            title: title.to_string(),
            external_ref: 1000 + i as u64,
        })
        .collect();

    // Similarity decays with catalog distance
    let n = TITLES.len();
    let rows = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| 1.0 / (1 + i.abs_diff(j)) as f64)
                .collect()
        })
        .collect();

    let artifacts = Artifacts::new(
        CatalogStore::new(entries),
        SimilarityMatrix::from_rows(rows).unwrap(),
        true,
    )
    .unwrap();

    let settings = EnrichmentSettings {
        poster_base_url: "https://img.test/w500".to_string(),
        logo_base_url: "https://img.test/w45".to_string(),
        site_url: "https://site.test".to_string(),
        region: "US".to_string(),
        max_workers: 4,
    };

    let state = Arc::new(AppState {
        artifacts: Arc::new(artifacts),
        enricher: Enricher::new(Arc::new(StubProvider), settings),
        recommendation_count: 7,
    });

    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_title_search() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/titles/search")
        .add_query_param("q", "ETA")
        .await;
    response.assert_status_ok();

    let titles: Vec<serde_json::Value> = response.json();
    let names: Vec<&str> = titles.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Beta", "Zeta", "Eta", "Theta"]);
}

#[tokio::test]
async fn test_title_search_without_query_returns_catalog() {
    let server = create_test_server();

    let response = server.get("/api/v1/titles/search").await;
    response.assert_status_ok();
    let titles: Vec<serde_json::Value> = response.json();
    assert_eq!(titles.len(), TITLES.len());
}

#[tokio::test]
async fn test_recommendations_flow() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "Alpha" }))
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Alpha");

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 7);

    // Nearest neighbours of Alpha are Beta (1001), Gamma (1002), Delta (1003), ...
    assert_eq!(recommendations[0]["title"], "Movie 1001");
    assert_eq!(recommendations[0]["release_year"], "2001");
    assert_eq!(recommendations[0]["poster_url"], "https://img.test/w500/1001.jpg");
    assert_eq!(
        recommendations[0]["homepage_url"],
        "https://site.test/movie/1001"
    );
    assert_eq!(recommendations[0]["overview"], "No description available.");
    assert!(recommendations[0].get("error").is_none());

    // Delta's details call fails but keeps its slot and providers
    assert_eq!(recommendations[2]["error"], "Failed to fetch movie data.");
    assert_eq!(recommendations[2]["title"], "");
    assert_eq!(
        recommendations[2]["providers_html"],
        " <b>Netflix</b> (Flatrate)"
    );

    assert_eq!(recommendations[6]["title"], "Movie 1007");
}

#[tokio::test]
async fn test_recommendations_unknown_title() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "alpha" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("alpha"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let id = "6f1c1d3e-2b1a-4c4e-9a53-0a7d8a1f2b3c";

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;

    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let server = create_test_server();
    let response = server.get("/health").await;

    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_recommendations_blank_title_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "title": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "Title cannot be empty");
}

#[tokio::test]
async fn test_recommendations_malformed_body_is_bad_request() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "name": "Alpha" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());

    let response = server
        .post("/api/v1/recommendations")
        .text("not json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
}
