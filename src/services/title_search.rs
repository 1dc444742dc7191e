use crate::{models::CatalogEntry, store::CatalogStore};

/// Filters catalog titles for the selection step
///
/// Matches are case-insensitive plain substrings, which is looser than the
/// exact lookup `recommend` performs. An empty query returns every title.
pub fn search_titles<'a>(
    catalog: &'a CatalogStore,
    query: &str,
    limit: Option<usize>,
) -> Vec<&'a CatalogEntry> {
    let needle = query.trim().to_lowercase();

    catalog
        .entries()
        .iter()
        .filter(|entry| needle.is_empty() || entry.title.to_lowercase().contains(&needle))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}
