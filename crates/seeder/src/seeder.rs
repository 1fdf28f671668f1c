use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use seedkit_database::{CollectionHandle, Connection, MongoConnection, SchemaRegistry};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tracing::{error, info, warn};

use crate::barrier::CompletionBarrier;
use crate::error::SeedError;
use crate::seed_data::SeedRequest;
use crate::selection::CollectionSelection;
use crate::validate::validate;

/// Clears and seeds the collections of one connection.
///
/// Each `clear`/`populate` call validates its collection names, spawns one
/// request per collection (clear) or per entry (populate) on the current tokio
/// runtime and joins them on a barrier of its own. Calls may overlap freely.
///
/// The `*_with` forms return validation problems synchronously and then invoke
/// `on_done` exactly once with the combined outcome of the dispatched
/// requests. The async forms wait for that outcome.
#[derive(Default)]
pub struct Seeder {
    connection: RwLock<Option<Arc<dyn Connection>>>,
}

impl Seeder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `connection` for subsequent calls. A previous connection is
    /// replaced without being closed.
    pub fn attach(&self, connection: Arc<dyn Connection>) {
        let mut slot = self.connection.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            warn!("Seeder already connected, replacing the connection");
        }
        *slot = Some(connection);
    }

    /// Opens a MongoDB connection and registers `collections` on it.
    pub async fn connect_mongodb<I, S>(&self, uri: &str, db_name: &str, collections: I) -> Result<(), SeedError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let connection = MongoConnection::open(uri, db_name, collections)
            .await
            .map_err(SeedError::Connection)?;
        self.attach(Arc::new(connection));
        info!("Successfully initialized seeder");
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.connection.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Closes the connection if there is one.
    pub async fn disconnect(&self) {
        let connection = self.connection.write().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(connection) = connection {
            connection.close().await;
        }
    }

    /// Names the current registry resolves, empty when disconnected.
    pub fn registered_names(&self) -> Vec<String> {
        match self.current() {
            Ok(connection) => connection.registry().registered_names().into_iter().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn current(&self) -> Result<Arc<dyn Connection>, SeedError> {
        self.connection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(SeedError::NotConnected)
    }

    /// Deletes every document of each selected collection.
    pub fn clear_with<F>(&self, selection: impl Into<CollectionSelection>, on_done: F) -> Result<(), SeedError>
    where
        F: FnOnce(Result<(), SeedError>) + Send + 'static,
    {
        let connection = self.current()?;
        let names = selection.into().distinct();
        let handles = resolve(connection.registry(), &names)?;
        let runtime = Handle::try_current().map_err(|_| SeedError::NoRuntime)?;

        let barrier = CompletionBarrier::new(names.iter().cloned(), on_done);
        for (name, handle) in handles {
            let ticket = barrier.ticket(name.clone());
            runtime.spawn(async move {
                let outcome = handle.delete_all().await;
                match &outcome {
                    Ok(deleted) => info!(deleted, "{} collection cleared", name),
                    Err(e) => error!("Failed to clear {} collection: {}", name, e),
                }
                ticket.complete(outcome.map(|_| ()));
            });
        }
        Ok(())
    }

    pub async fn clear(&self, selection: impl Into<CollectionSelection>) -> Result<(), SeedError> {
        let (tx, rx) = oneshot::channel();
        self.clear_with(selection, move |res| {
            let _ = tx.send(res);
        })?;
        rx.await.unwrap_or(Err(SeedError::Abandoned))
    }

    /// Inserts every entry's documents into its collection, one bulk insert per
    /// entry. A collection completes only after all of its entries reported.
    pub fn populate_with<F>(&self, request: impl Into<SeedRequest>, on_done: F) -> Result<(), SeedError>
    where
        F: FnOnce(Result<(), SeedError>) + Send + 'static,
    {
        let connection = self.current()?;
        let request = request.into();
        let names = request.collection_names();
        let handles: HashMap<String, Arc<dyn CollectionHandle>> =
            resolve(connection.registry(), &names)?.into_iter().collect();
        let runtime = Handle::try_current().map_err(|_| SeedError::NoRuntime)?;

        let entries = request.into_entries();
        let barrier = CompletionBarrier::new(entries.iter().map(|entry| entry.collection.clone()), on_done);
        for entry in entries {
            let ticket = barrier.ticket(entry.collection.clone());
            // resolve covered every name; a dropped ticket reports a failure anyway
            let Some(handle) = handles.get(&entry.collection).cloned() else {
                continue;
            };
            runtime.spawn(async move {
                let outcome = handle.create_many(entry.documents).await;
                match &outcome {
                    Ok(created) => info!(created, "Successfully created documents for {} model", entry.collection),
                    Err(e) => error!("Failed to create documents for {} model: {}", entry.collection, e),
                }
                ticket.complete(outcome.map(|_| ()));
            });
        }
        Ok(())
    }

    pub async fn populate(&self, request: impl Into<SeedRequest>) -> Result<(), SeedError> {
        let (tx, rx) = oneshot::channel();
        self.populate_with(request, move |res| {
            let _ = tx.send(res);
        })?;
        rx.await.unwrap_or(Err(SeedError::Abandoned))
    }

    /// Clears the collections named by `request`, then populates them.
    /// Nothing is inserted if the clear fails.
    pub async fn reset(&self, request: impl Into<SeedRequest>) -> Result<(), SeedError> {
        let request = request.into();
        self.clear(request.collection_names()).await?;
        self.populate(request).await
    }
}

/// Validates `names` and looks up their handles, in the same order.
fn resolve(
    registry: &dyn SchemaRegistry,
    names: &[String],
) -> Result<Vec<(String, Arc<dyn CollectionHandle>)>, SeedError> {
    validate(registry, names).inspect_err(|e| error!("Error: {}", e))?;
    names
        .iter()
        .map(|name| {
            registry
                .get(name)
                .map(|handle| (name.clone(), handle))
                .ok_or_else(|| SeedError::UnregisteredNames(vec![name.clone()]))
        })
        .collect()
}
