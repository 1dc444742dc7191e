use crate::models::CatalogEntry;

/// In-memory movie catalog, row order aligned with the similarity matrix
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
}

impl CatalogStore {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a matrix row/column position
    pub fn get(&self, position: usize) -> Option<&CatalogEntry> {
        self.entries.get(position)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Row position of the first entry whose title equals `title` exactly
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.title == title)
    }
}
