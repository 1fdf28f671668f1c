mod env;
mod tracing_setup;

pub use env::{EnvVars, optional_env_var, required_env_var};
pub use tracing_setup::setup_tracing;
