use anyhow::Result;

use seedkit_common::{optional_env_var, required_env_var, EnvVars};

pub const DEFAULT_DB_NAME: &str = "seedkit";

pub struct MongoDbEnv {
    pub mongodb_uri: String,
    pub db_name: String,
    /// Collections the registry knows about, from `SEEDKIT_COLLECTIONS`.
    pub collections: Vec<String>,
}

impl MongoDbEnv {
    pub fn parse_collections(raw: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

impl EnvVars for MongoDbEnv {
    fn load() -> Result<Self> {
        Ok(Self {
            mongodb_uri: required_env_var("MONGODB_URI")?,
            db_name: optional_env_var("MONGODB_DB_NAME")
                .unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            collections: optional_env_var("SEEDKIT_COLLECTIONS")
                .map(|raw| Self::parse_collections(&raw))
                .unwrap_or_default(),
        })
    }

    fn get_env_var(&self, key: &str) -> Option<String> {
        match key {
            "MONGODB_URI" => Some(self.mongodb_uri.clone()),
            "MONGODB_DB_NAME" => Some(self.db_name.clone()),
            "SEEDKIT_COLLECTIONS" => Some(self.collections.join(",")),
            _ => None,
        }
    }
}
