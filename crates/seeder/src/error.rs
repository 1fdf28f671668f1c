use std::fmt;
use std::path::PathBuf;

use seedkit_database::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("not connected to the document store")]
    NotConnected,

    #[error("could not connect to the document store: {0}")]
    Connection(#[source] StoreError),

    #[error("collections not registered: {}", .0.join(", "))]
    UnregisteredNames(Vec<String>),

    #[error("invalid collection selection: {0}")]
    InvalidSelection(String),

    #[error("no tokio runtime available to dispatch store requests")]
    NoRuntime,

    #[error("{} store operation(s) failed: {}", .0.len(), FailureList(.0))]
    StoreFailures(Vec<StoreFailure>),

    #[error("completion was never reported")]
    Abandoned,

    #[error("failed to load seed file {}: {reason}", .path.display())]
    SeedFile { path: PathBuf, reason: String },
}

impl SeedError {
    /// Names that failed validation, empty for every other error.
    pub fn unregistered_names(&self) -> &[String] {
        match self {
            SeedError::UnregisteredNames(names) => names,
            _ => &[],
        }
    }

    pub fn store_failures(&self) -> &[StoreFailure] {
        match self {
            SeedError::StoreFailures(failures) => failures,
            _ => &[],
        }
    }
}

/// One delete or create request that did not succeed.
#[derive(Debug)]
pub struct StoreFailure {
    pub collection: String,
    pub error: StoreError,
}

impl fmt::Display for StoreFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.collection, self.error)
    }
}

struct FailureList<'a>(&'a [StoreFailure]);

impl fmt::Display for FailureList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}
