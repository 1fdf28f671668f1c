#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use seedkit_database::{CollectionHandle, Document, Registry, StoreError};
use seedkit_seeder::{SeedError, Seeder};
use tokio::sync::{mpsc, Semaphore};

/// In-memory collection. Optionally fails every request, or holds each
/// request until a permit is added to its gate.
#[derive(Default)]
pub struct MemoryCollection {
    docs: Mutex<Vec<Document>>,
    fail_with: Option<String>,
    gate: Option<Arc<Semaphore>>,
    creates: AtomicUsize,
    deletes: AtomicUsize,
}

impl MemoryCollection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_documents(docs: Vec<Document>) -> Arc<Self> {
        Arc::new(Self { docs: Mutex::new(docs), ..Default::default() })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self { fail_with: Some(message.to_string()), ..Default::default() })
    }

    pub fn gated() -> (Arc<Self>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let collection = Arc::new(Self { gate: Some(Arc::clone(&gate)), ..Default::default() });
        (collection, gate)
    }

    pub fn documents(&self) -> Vec<Document> {
        self.docs.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match &self.fail_with {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CollectionHandle for MemoryCollection {
    async fn delete_all(&self) -> Result<u64, StoreError> {
        self.wait_for_gate().await;
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let mut docs = self.docs.lock().unwrap();
        let deleted = docs.len() as u64;
        docs.clear();
        Ok(deleted)
    }

    async fn create_many(&self, documents: Vec<Document>) -> Result<usize, StoreError> {
        self.wait_for_gate().await;
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        let created = documents.len();
        self.docs.lock().unwrap().extend(documents);
        Ok(created)
    }
}

pub fn seeder_with(collections: &[(&str, &Arc<MemoryCollection>)]) -> Seeder {
    let mut registry = Registry::new();
    for (name, collection) in collections {
        let handle: Arc<dyn CollectionHandle> = Arc::clone(collection) as Arc<dyn CollectionHandle>;
        registry.register(*name, handle);
    }
    let seeder = Seeder::new();
    seeder.attach(Arc::new(registry));
    seeder
}

pub type Outcomes = mpsc::UnboundedReceiver<Result<(), SeedError>>;

/// A completion callback that forwards every invocation to the returned receiver.
pub fn callback() -> (impl FnOnce(Result<(), SeedError>) + Send + 'static, Outcomes) {
    let (tx, rx) = mpsc::unbounded_channel();
    (move |res| {
        let _ = tx.send(res);
    }, rx)
}

pub async fn next_outcome(rx: &mut Outcomes) -> Result<(), SeedError> {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("completion callback was not invoked")
        .expect("completion callback dropped")
}

/// Gives in-flight requests time to run, then checks the callback stayed quiet.
pub async fn assert_no_outcome(rx: &mut Outcomes) {
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err(), "completion callback fired unexpectedly");
}

pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached");
}
