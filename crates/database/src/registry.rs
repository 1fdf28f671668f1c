use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::store::{CollectionHandle, Connection, SchemaRegistry};

/// In-process registry of collection handles, keyed by collection name.
///
/// A bare `Registry` is also a `Connection` whose `close` does nothing, which
/// lets backends without a client lifecycle be attached directly.
#[derive(Clone, Default)]
pub struct Registry {
    handles: BTreeMap<String, Arc<dyn CollectionHandle>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handle` under `name`, replacing any previous handle for that name.
    pub fn register(&mut self, name: impl Into<String>, handle: Arc<dyn CollectionHandle>) -> &mut Self {
        self.handles.insert(name.into(), handle);
        self
    }

    pub fn with(mut self, name: impl Into<String>, handle: Arc<dyn CollectionHandle>) -> Self {
        self.register(name, handle);
        self
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("collections", &self.handles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaRegistry for Registry {
    fn registered_names(&self) -> BTreeSet<String> {
        self.handles.keys().cloned().collect()
    }

    fn get(&self, name: &str) -> Option<Arc<dyn CollectionHandle>> {
        self.handles.get(name).cloned()
    }
}

#[async_trait]
impl Connection for Registry {
    fn registry(&self) -> &dyn SchemaRegistry {
        self
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;
    use mongodb::bson::Document;

    struct NoopCollection;

    #[async_trait]
    impl CollectionHandle for NoopCollection {
        async fn delete_all(&self) -> Result<u64, StoreError> {
            Ok(0)
        }

        async fn create_many(&self, documents: Vec<Document>) -> Result<usize, StoreError> {
            Ok(documents.len())
        }
    }

    #[test]
    fn test_registered_names_are_sorted_and_unique() {
        let registry = Registry::new()
            .with("Post", Arc::new(NoopCollection))
            .with("User", Arc::new(NoopCollection))
            .with("Post", Arc::new(NoopCollection));

        let names: Vec<String> = registry.registered_names().into_iter().collect();
        assert_eq!(names, vec!["Post".to_string(), "User".to_string()]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_get_unknown_name_is_none() {
        let registry = Registry::new().with("User", Arc::new(NoopCollection));

        assert!(registry.is_registered("User"));
        assert!(!registry.is_registered("user"));
        assert!(registry.get("Ghost").is_none());
    }
}
