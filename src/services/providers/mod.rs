/// Movie metadata provider abstraction
///
/// The enricher only needs two lookups per movie: descriptive details and
/// regional watch-provider availability. Keeping them behind a trait lets the
/// TMDB client be swapped for a stub in tests.
use crate::{
    error::FetchError,
    models::{TmdbMovieDetails, TmdbWatchProviders},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Each call is attempted exactly once and carries its own timeout. Errors are
/// returned as values; callers decide how to degrade.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch descriptive details for a movie by its external reference
    async fn fetch_details(&self, external_ref: u64) -> Result<TmdbMovieDetails, FetchError>;

    /// Fetch watch-provider availability for a movie
    async fn fetch_watch_providers(
        &self,
        external_ref: u64,
    ) -> Result<TmdbWatchProviders, FetchError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
