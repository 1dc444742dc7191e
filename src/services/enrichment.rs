use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::{
    config::Config,
    error::FetchError,
    models::{EnrichedRecord, ProviderCategory, TmdbMovieDetails, TmdbWatchProviders},
    services::providers::MetadataProvider,
};

pub const DETAILS_FAILED: &str = "Failed to fetch movie data.";
pub const NO_PROVIDER_INFO: &str = "No info";
pub const NO_STREAMING_INFO: &str = "No streaming info";
pub const NO_OVERVIEW: &str = "No description available.";
pub const UNKNOWN_YEAR: &str = "Unknown";

/// Fixed URL bases and region used to render records
#[derive(Debug, Clone)]
pub struct EnrichmentSettings {
    pub poster_base_url: String,
    pub logo_base_url: String,
    pub site_url: String,
    pub region: String,
    pub max_workers: usize,
}

impl EnrichmentSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            poster_base_url: config.poster_base_url.trim_end_matches('/').to_string(),
            logo_base_url: config.logo_base_url.trim_end_matches('/').to_string(),
            site_url: config.tmdb_site_url.trim_end_matches('/').to_string(),
            region: config.region.clone(),
            max_workers: config.max_workers,
        }
    }

    fn canonical_link(&self, external_ref: u64) -> String {
        format!("{}/movie/{}", self.site_url, external_ref)
    }
}

/// Concurrent metadata fan-out for recommended movies
#[derive(Clone)]
pub struct Enricher {
    provider: Arc<dyn MetadataProvider>,
    settings: Arc<EnrichmentSettings>,
}

impl Enricher {
    pub fn new(provider: Arc<dyn MetadataProvider>, settings: EnrichmentSettings) -> Self {
        Self {
            provider,
            settings: Arc::new(settings),
        }
    }

    /// Builds one record per external reference, in input order
    ///
    /// Per-movie work runs on a bounded pool of tokio tasks and completes in
    /// any order; each task carries its input index so the output can be
    /// reassembled. Fetch failures become inline record errors and never abort
    /// the batch.
    pub async fn enrich(&self, external_refs: &[u64]) -> Vec<EnrichedRecord> {
        if external_refs.is_empty() {
            return Vec::new();
        }

        let workers = self.settings.max_workers.clamp(1, external_refs.len());
        tracing::info!(
            movies = external_refs.len(),
            workers,
            provider = self.provider.name(),
            "Enriching recommendations"
        );

        let mut slots: Vec<Option<EnrichedRecord>> = vec![None; external_refs.len()];

        let mut completed = stream::iter(external_refs.iter().copied().enumerate())
            .map(|(index, external_ref)| {
                let provider = Arc::clone(&self.provider);
                let settings = Arc::clone(&self.settings);
                tokio::spawn(async move {
                    let record = enrich_one(provider.as_ref(), &settings, external_ref).await;
                    (index, record)
                })
            })
            .buffer_unordered(workers);

        while let Some(joined) = completed.next().await {
            match joined {
                Ok((index, record)) => slots[index] = Some(record),
                Err(e) => tracing::error!(error = %e, "Enrichment task join error"),
            }
        }

        let records: Vec<EnrichedRecord> = slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    EnrichedRecord::failed(DETAILS_FAILED, NO_PROVIDER_INFO.to_string())
                })
            })
            .collect();

        let failures = records.iter().filter(|r| r.is_error()).count();
        if failures > 0 {
            tracing::warn!(
                success_count = records.len() - failures,
                error_count = failures,
                "Partial enrichment failure"
            );
        }

        records
    }
}

/// Runs both lookups for one movie and merges them into a record
async fn enrich_one(
    provider: &dyn MetadataProvider,
    settings: &EnrichmentSettings,
    external_ref: u64,
) -> EnrichedRecord {
    let (details, providers) = tokio::join!(
        provider.fetch_details(external_ref),
        provider.fetch_watch_providers(external_ref)
    );

    let providers_html = render_providers(settings, external_ref, providers);

    match details {
        Ok(details) => {
            let mut record = build_record(settings, external_ref, details);
            record.providers_html = providers_html;
            record
        }
        Err(e) => {
            tracing::warn!(external_ref, error = %e, "Details fetch failed");
            EnrichedRecord::failed(DETAILS_FAILED, providers_html)
        }
    }
}

fn build_record(
    settings: &EnrichmentSettings,
    external_ref: u64,
    details: TmdbMovieDetails,
) -> EnrichedRecord {
    let canonical_link = settings.canonical_link(external_ref);

    let poster_url = match details.poster_path.as_deref() {
        Some(path) if !path.is_empty() => format!("{}{}", settings.poster_base_url, path),
        _ => String::new(),
    };

    let genres = details
        .genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let homepage_url = details
        .homepage
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| canonical_link.clone());

    let release_year: String = details
        .release_date
        .as_deref()
        .unwrap_or_default()
        .chars()
        .take(4)
        .collect();

    EnrichedRecord {
        title: details.title.unwrap_or_default(),
        poster_url,
        genres,
        overview: details.overview.unwrap_or_else(|| NO_OVERVIEW.to_string()),
        homepage_url,
        release_year: if release_year.is_empty() {
            UNKNOWN_YEAR.to_string()
        } else {
            release_year
        },
        canonical_link,
        providers_html: String::new(),
        error: None,
    }
}

fn render_providers(
    settings: &EnrichmentSettings,
    external_ref: u64,
    providers: Result<TmdbWatchProviders, FetchError>,
) -> String {
    let providers = match providers {
        Ok(providers) => providers,
        Err(e) => {
            tracing::warn!(external_ref, error = %e, "Watch providers fetch failed");
            return NO_PROVIDER_INFO.to_string();
        }
    };

    let Some(region) = providers.region(&settings.region) else {
        return NO_STREAMING_INFO.to_string();
    };

    let mut fragments = Vec::new();
    for category in ProviderCategory::ALL {
        for provider in region.category(category) {
            let Some(name) = provider.provider_name.as_deref() else {
                continue;
            };
            let logo_html = match provider.logo_path.as_deref() {
                Some(logo) if !logo.is_empty() => format!(
                    "<img src='{}{}' style='vertical-align:middle;margin-right:3px;' alt='{}'>",
                    settings.logo_base_url, logo, name
                ),
                _ => String::new(),
            };
            fragments.push(format!("{} <b>{}</b> ({})", logo_html, name, category));
        }
    }

    if fragments.is_empty() {
        NO_STREAMING_INFO.to_string()
    } else {
        fragments.join("<br>")
    }
}
