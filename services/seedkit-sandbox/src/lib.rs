use anyhow::{bail, Result};
use seedkit_common::EnvVars;
use seedkit_database::MongoDbEnv;
use seedkit_seeder::Seeder;

/// Loads `.env` and the MongoDB settings, then connects a seeder.
///
/// `collections` adds to the names from `SEEDKIT_COLLECTIONS`; the union is
/// the registry every clear/populate is validated against.
pub async fn connect_from_env(collections: &[String]) -> Result<Seeder> {
    dotenv::dotenv().ok();
    let mut env = MongoDbEnv::load()?;
    for name in collections {
        if !env.collections.contains(name) {
            env.collections.push(name.clone());
        }
    }
    if env.collections.is_empty() {
        bail!("No collections registered, set SEEDKIT_COLLECTIONS or pass --collections");
    }

    let seeder = Seeder::new();
    seeder.connect_mongodb(&env.mongodb_uri, &env.db_name, &env.collections).await?;
    Ok(seeder)
}
