use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{self, Document};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] bson::ser::Error),
    #[error("could not connect to the document store: {0}")]
    Connection(String),
    #[error("{0}")]
    Backend(String),
}

/// Bulk operations on one named collection.
#[async_trait]
pub trait CollectionHandle: Send + Sync {
    /// Removes every document in the collection, returning how many were deleted.
    async fn delete_all(&self) -> Result<u64, StoreError>;

    /// Inserts all `documents` in one request, returning how many were inserted.
    /// An empty batch succeeds without touching the store.
    async fn create_many(&self, documents: Vec<Document>) -> Result<usize, StoreError>;
}

/// Read-only mapping from collection name to its handle.
pub trait SchemaRegistry: Send + Sync {
    /// All names that `get` resolves.
    fn registered_names(&self) -> BTreeSet<String>;

    fn get(&self, name: &str) -> Option<Arc<dyn CollectionHandle>>;

    fn is_registered(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// An open session against a document store.
#[async_trait]
pub trait Connection: Send + Sync {
    fn registry(&self) -> &dyn SchemaRegistry;

    /// Closes the underlying client. Handles obtained earlier stop working.
    async fn close(&self);
}
