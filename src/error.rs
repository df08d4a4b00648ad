//! Errors for the fallible edges of the crate.
//!
//! Tree edits and gesture handling never fail; missing nodes resolve to
//! `None`. Only loading descriptions and scripts from outside can go wrong.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid description json: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<LoadError> for io::Error {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Read { source, .. } => source,
            LoadError::Parse(err) => io::Error::new(io::ErrorKind::InvalidData, err),
        }
    }
}
