mod barrier;
mod error;
mod seed_data;
mod seeder;
mod selection;
mod validate;

pub use barrier::{CompletionBarrier, OnDone, Ticket};
pub use error::{SeedError, StoreFailure};
pub use seed_data::{SeedEntry, SeedRequest};
pub use seeder::Seeder;
pub use selection::CollectionSelection;
pub use validate::validate;
