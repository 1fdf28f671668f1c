mod db;
mod db_object;
mod env;
mod registry;
mod store;

pub use db::MongoConnection;
pub use db_object::{MongoCollection, MongoDbObject};
pub use env::MongoDbEnv;
pub use registry::Registry;
pub use store::{CollectionHandle, Connection, SchemaRegistry, StoreError};

pub use mongodb::bson::{self, doc, Document};
