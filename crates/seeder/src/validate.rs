use seedkit_database::SchemaRegistry;

use crate::error::SeedError;
use crate::selection::distinct_names;

/// Checks `names` against the registry and reports every unregistered name at
/// once, in request order and without repeats. Never touches the store.
pub fn validate(registry: &dyn SchemaRegistry, names: &[String]) -> Result<(), SeedError> {
    let known = registry.registered_names();
    let unregistered = distinct_names(names.iter().filter(|name| !known.contains(name.as_str())));

    if unregistered.is_empty() {
        Ok(())
    } else {
        Err(SeedError::UnregisteredNames(unregistered))
    }
}
