use std::path::Path;

use seedkit_database::{Document, MongoDbObject, StoreError};
use serde::{Deserialize, Serialize};

use crate::error::SeedError;
use crate::selection::distinct_names;

/// Documents to insert into one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedEntry {
    #[serde(alias = "model")]
    pub collection: String,
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl SeedEntry {
    pub fn new(collection: impl Into<String>, documents: Vec<Document>) -> Self {
        Self { collection: collection.into(), documents }
    }

    /// Serializes typed models into an entry for their collection.
    pub fn from_models<T: MongoDbObject>(models: &[T]) -> Result<Self, StoreError> {
        Ok(Self::new(T::COLLECTION_NAME, T::to_documents(models)?))
    }
}

/// An ordered list of seed entries. Several entries may name the same
/// collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedRequest {
    entries: Vec<SeedEntry>,
}

impl SeedRequest {
    pub fn new(entries: Vec<SeedEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: SeedEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    pub fn entries(&self) -> &[SeedEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SeedEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct collection names in first-seen order.
    pub fn collection_names(&self) -> Vec<String> {
        distinct_names(self.entries.iter().map(|entry| &entry.collection))
    }

    pub fn document_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.documents.len()).sum()
    }

    /// Parses a JSON array of `{"model": ..., "documents": [...]}` entries.
    /// `collection` is accepted in place of `model`.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let seed_file_error = |reason: String| SeedError::SeedFile { path: path.to_path_buf(), reason };

        let raw = std::fs::read_to_string(path).map_err(|e| seed_file_error(e.to_string()))?;
        Self::from_json_str(&raw).map_err(|e| seed_file_error(e.to_string()))
    }
}

impl From<Vec<SeedEntry>> for SeedRequest {
    fn from(entries: Vec<SeedEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<SeedEntry> for SeedRequest {
    fn from_iter<I: IntoIterator<Item = SeedEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
