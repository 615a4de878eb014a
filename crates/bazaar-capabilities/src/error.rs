//! Capability error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while registering or constructing capabilities.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// A descriptor with the same identifier is already in the catalog.
    #[error("capability `{id}` is already registered")]
    Duplicate {
        /// The identifier that collided.
        id: String,
    },

    /// The requested capability is not in the catalog.
    #[error("unknown capability `{id}`")]
    Unknown {
        /// The identifier that was looked up.
        id: String,
    },

    /// The execution context lacks a value the provider needs.
    #[error("capability `{id}` requires configuration value `{name}`")]
    MissingConfig {
        /// The capability being constructed.
        id: String,
        /// The missing configuration value.
        name: String,
    },

    /// Reading or writing the KV store backing file failed.
    #[error("KV store I/O at {path}: {source}")]
    StoreIo {
        /// Backing file location.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The KV store backing file is not a JSON object.
    #[error("KV store at {path} is not a JSON object: {source}")]
    StoreFormat {
        /// Backing file location.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A handler asked for a capability that was not resolved for this call.
    #[error("capability `{name}` was not resolved for this call")]
    NotResolved {
        /// The parameter name the handler asked for.
        name: String,
    },

    /// A handler asked for a capability under the wrong concrete type.
    #[error("capability `{name}` is not of the requested type")]
    WrongType {
        /// The parameter name the handler asked for.
        name: String,
    },
}

/// Result type for capability operations.
pub type CapabilityResult<T> = Result<T, CapabilityError>;
