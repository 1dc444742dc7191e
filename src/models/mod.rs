use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display};

/// One movie in the precomputed catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Internal catalog identifier
    pub id: u64,
    /// Display title, matched exactly by the recommendation lookup
    pub title: String,
    /// Identifier used to query the metadata API
    pub external_ref: u64,
}

/// Display-ready result for one recommended movie
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnrichedRecord {
    pub title: String,
    pub poster_url: String,
    /// Genre names joined with ", "
    pub genres: String,
    pub overview: String,
    pub homepage_url: String,
    pub release_year: String,
    pub canonical_link: String,
    /// Pre-rendered "where to watch" fragment
    pub providers_html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EnrichedRecord {
    /// Record for a failed details fetch: only `error` and `providers_html` are set
    pub fn failed(message: impl Into<String>, providers_html: String) -> Self {
        Self {
            providers_html,
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Watch-provider category, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderCategory {
    /// Subscription streaming
    Flatrate,
    Rent,
    Buy,
}

impl ProviderCategory {
    pub const ALL: [ProviderCategory; 3] = [
        ProviderCategory::Flatrate,
        ProviderCategory::Rent,
        ProviderCategory::Buy,
    ];

    /// Label shown next to the provider name
    pub fn label(&self) -> &'static str {
        match self {
            ProviderCategory::Flatrate => "Flatrate",
            ProviderCategory::Rent => "Rent",
            ProviderCategory::Buy => "Buy",
        }
    }
}

impl Display for ProviderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw `/movie/{id}` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

/// Raw `/movie/{id}/watch/providers` response, keyed by region code
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbWatchProviders {
    #[serde(default)]
    pub results: HashMap<String, TmdbRegionProviders>,
}

impl TmdbWatchProviders {
    pub fn region(&self, code: &str) -> Option<&TmdbRegionProviders> {
        self.results.get(code)
    }
}

/// Providers available in one region
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbRegionProviders {
    #[serde(default)]
    pub flatrate: Vec<TmdbWatchProvider>,
    #[serde(default)]
    pub rent: Vec<TmdbWatchProvider>,
    #[serde(default)]
    pub buy: Vec<TmdbWatchProvider>,
}

impl TmdbRegionProviders {
    pub fn category(&self, category: ProviderCategory) -> &[TmdbWatchProvider] {
        match category {
            ProviderCategory::Flatrate => &self.flatrate,
            ProviderCategory::Rent => &self.rent,
            ProviderCategory::Buy => &self.buy,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbWatchProvider {
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub logo_path: Option<String>,
}
