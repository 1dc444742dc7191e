use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key, sent as the `api_key` query parameter
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Public TMDB site, used for canonical movie links
    #[serde(default = "default_tmdb_site_url")]
    pub tmdb_site_url: String,

    /// Image base prepended to poster paths
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Image base prepended to provider logo paths
    #[serde(default = "default_logo_base_url")]
    pub logo_base_url: String,

    /// Language requested for movie details
    #[serde(default = "default_language")]
    pub language: String,

    /// Region code used to scope watch-provider availability
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default = "default_details_timeout_secs")]
    pub details_timeout_secs: u64,

    #[serde(default = "default_providers_timeout_secs")]
    pub providers_timeout_secs: u64,

    /// Upper bound on concurrent enrichment workers
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Number of recommendations returned per request
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Path to the precomputed catalog (JSON array of entries)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Path to the precomputed similarity matrix (JSON array of rows)
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,

    /// Check matrix symmetry and diagonal maxima at load time
    #[serde(default = "default_validate_similarity")]
    pub validate_similarity: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_site_url() -> String {
    "https://www.themoviedb.org".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_logo_base_url() -> String {
    "https://image.tmdb.org/t/p/w45".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_region() -> String {
    "US".to_string()
}

fn default_details_timeout_secs() -> u64 {
    6
}

fn default_providers_timeout_secs() -> u64 {
    5
}

fn default_max_workers() -> usize {
    8
}

fn default_recommendation_count() -> usize {
    7
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/catalog.json")
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from("data/similarity.json")
}

fn default_validate_similarity() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn details_timeout(&self) -> Duration {
        Duration::from_secs(self.details_timeout_secs)
    }

    pub fn providers_timeout(&self) -> Duration {
        Duration::from_secs(self.providers_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
