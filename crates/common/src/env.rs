use anyhow::{anyhow, Result};

pub trait EnvVars: Sized {
    fn load() -> Result<Self>;
    fn get_env_var(&self, key: &str) -> Option<String>;
}

pub fn required_env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| anyhow!("Required environment variable is not set: {}", key))
}

/// Returns `None` for unset and for empty values.
pub fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
