use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::{error, info};

use crate::db_object::{MongoCollection, MongoDbObject};
use crate::registry::Registry;
use crate::store::{Connection, SchemaRegistry, StoreError};

/// A MongoDB client, its database and the registry of collections that may be
/// cleared or seeded through it.
pub struct MongoConnection {
    client: Client,
    db: Database,
    registry: Registry,
}

impl MongoConnection {
    /// Connects to `uri`, pings `db_name` and registers `collections`.
    pub async fn open<I, S>(uri: &str, db_name: &str, collections: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let client = Client::with_uri_str(uri).await.map_err(|e| {
            error!("Could not connect to MongoDB: {}", e);
            StoreError::Connection(e.to_string())
        })?;
        let db = client.database(db_name);

        // with_uri_str is lazy, the ping is what reaches the server
        db.run_command(doc! { "ping": 1 }, None).await.map_err(|e| {
            error!("Could not reach MongoDB database {}: {}", db_name, e);
            StoreError::Connection(e.to_string())
        })?;

        let mut conn = Self { client, db, registry: Registry::new() };
        for name in collections {
            conn.register_collection(name.as_ref());
        }
        info!(db = db_name, collections = conn.registry.len(), "Connected to MongoDB");
        Ok(conn)
    }

    pub fn register_collection(&mut self, name: &str) -> &mut Self {
        let handle = MongoCollection::new(&self.db, name);
        self.registry.register(name, std::sync::Arc::new(handle));
        self
    }

    pub fn register<T: MongoDbObject>(&mut self) -> &mut Self {
        self.register_collection(T::COLLECTION_NAME)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl Connection for MongoConnection {
    fn registry(&self) -> &dyn SchemaRegistry {
        &self.registry
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB connection closed");
    }
}
