use async_trait::async_trait;
use mongodb::bson::{self, doc, Document};
use mongodb::{Collection, Database};
use serde::Serialize;

use crate::store::{CollectionHandle, StoreError};

/// A typed document that lives in a fixed collection.
pub trait MongoDbObject: Sized + Serialize + Send + Sync {
    const COLLECTION_NAME: &'static str;

    fn to_document(&self) -> Result<Document, StoreError> {
        Ok(bson::to_document(self)?)
    }

    fn to_documents(objs: &[Self]) -> Result<Vec<Document>, StoreError> {
        objs.iter().map(Self::to_document).collect()
    }
}

/// Expands to the collection names of the listed `MongoDbObject` types.
///
/// ```rust,ignore
/// let names = collection_names![User, Post];
/// let conn = MongoConnection::open(&uri, "dev", names).await?;
/// ```
#[macro_export]
macro_rules! collection_names {
    ($($model:ty),* $(,)?) => {
        vec![$(<$model as $crate::MongoDbObject>::COLLECTION_NAME),*]
    };
}

#[derive(Clone, Debug)]
pub struct MongoCollection {
    col: Collection<Document>,
}

impl MongoCollection {
    pub fn new(db: &Database, name: &str) -> Self {
        Self { col: db.collection::<Document>(name) }
    }

    pub fn name(&self) -> &str {
        self.col.name()
    }
}

#[async_trait]
impl CollectionHandle for MongoCollection {
    async fn delete_all(&self) -> Result<u64, StoreError> {
        let res = self.col.delete_many(doc! {}, None).await?;
        Ok(res.deleted_count)
    }

    async fn create_many(&self, documents: Vec<Document>) -> Result<usize, StoreError> {
        // the driver rejects an empty insert_many
        if documents.is_empty() {
            return Ok(0);
        }
        let res = self.col.insert_many(documents, None).await?;
        Ok(res.inserted_ids.len())
    }
}
