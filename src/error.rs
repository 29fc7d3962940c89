//! Error types for the lore linker
//!
//! The linking core itself cannot fail; these cover the layers around it
//! (configuration, record store, lore import, write flows).

use std::path::PathBuf;

use lore_types::{RecordError, RecordId};
use thiserror::Error;

/// Main error type for record write flows
#[derive(Error, Debug)]
pub enum LoreError {
    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Record store and lore import errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record {0} not found")]
    NotFound(RecordId),

    #[error("A record with name_id '{0}' already exists")]
    DuplicateNameId(String),

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid lore file {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, LoreError>;
