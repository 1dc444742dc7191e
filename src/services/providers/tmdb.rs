/// TMDB v3 metadata provider
///
/// API Flow:
/// 1. Details: /movie/{id} → title, genres, poster, overview, homepage, release date
/// 2. Providers: /movie/{id}/watch/providers → per-region flatrate/rent/buy lists
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::FetchError,
    models::{TmdbMovieDetails, TmdbWatchProviders},
    services::providers::MetadataProvider,
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
    details_timeout: Duration,
    providers_timeout: Duration,
}

impl TmdbProvider {
    pub fn new(
        api_key: String,
        api_url: String,
        language: String,
        details_timeout: Duration,
        providers_timeout: Duration,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
            details_timeout,
            providers_timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.language.clone(),
            config.details_timeout(),
            config.providers_timeout(),
        )
    }

    fn details_url(&self, external_ref: u64) -> String {
        format!("{}/movie/{}", self.api_url, external_ref)
    }

    fn providers_url(&self, external_ref: u64) -> String {
        format!("{}/movie/{}/watch/providers", self.api_url, external_ref)
    }

    /// Issues a single GET and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<T, FetchError> {
        let response = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::from_reqwest(e, timeout))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_details(&self, external_ref: u64) -> Result<TmdbMovieDetails, FetchError> {
        let details: TmdbMovieDetails = self
            .get_json(
                &self.details_url(external_ref),
                &[("language", self.language.as_str())],
                self.details_timeout,
            )
            .await?;

        tracing::debug!(
            external_ref,
            provider = self.name(),
            "Movie details fetched"
        );

        Ok(details)
    }

    async fn fetch_watch_providers(
        &self,
        external_ref: u64,
    ) -> Result<TmdbWatchProviders, FetchError> {
        let providers: TmdbWatchProviders = self
            .get_json(
                &self.providers_url(external_ref),
                &[],
                self.providers_timeout,
            )
            .await?;

        tracing::debug!(
            external_ref,
            regions = providers.results.len(),
            provider = self.name(),
            "Watch providers fetched"
        );

        Ok(providers)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
