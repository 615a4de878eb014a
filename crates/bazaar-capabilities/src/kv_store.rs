//! File-backed JSON key-value store.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};
use tracing::{debug, info};

use bazaar_core::ExecContext;

use crate::catalog::CapabilityId;
use crate::error::{CapabilityError, CapabilityResult};

/// Application key-value store persisted as a single JSON object file.
///
/// The whole file is loaded at construction and fully rewritten on every
/// write. Writes are not atomic: a crash mid-write can truncate the file.
/// That is an accepted limitation of this store; durability is out of scope.
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
    data: Mutex<Map<String, Value>>,
}

impl KvStore {
    /// Open the store at the context's configured path.
    ///
    /// A missing backing file is initialized to an empty object and created
    /// on the spot.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::MissingConfig`] when the context has no
    /// store path, [`CapabilityError::StoreIo`] on I/O failure, and
    /// [`CapabilityError::StoreFormat`] when the file exists but does not
    /// hold a JSON object.
    pub fn new(ctx: &ExecContext) -> CapabilityResult<Self> {
        let path = ctx
            .kv_store_path()
            .ok_or_else(|| CapabilityError::MissingConfig {
                id: CapabilityId::KV_STORE.to_string(),
                name: "kv_store_path".to_string(),
            })?
            .to_path_buf();

        let data = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|source| CapabilityError::StoreIo {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| CapabilityError::StoreFormat {
                path: path.clone(),
                source,
            })?
        } else {
            debug!(path = %path.display(), "Initializing empty KV store");
            let empty = Map::new();
            write_file(&path, &empty)?;
            empty
        };

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Read the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Store `value` under `key` and rewrite the backing file.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::StoreIo`] if the rewrite fails; the
    /// in-memory map keeps the new value regardless.
    pub fn set(&self, key: impl Into<String>, value: Value) -> CapabilityResult<()> {
        let key = key.into();
        info!(%key, "Saving KV entry");
        let mut data = self.data.lock().unwrap_or_else(PoisonError::into_inner);
        data.insert(key, value);
        write_file(&self.path, &data)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

fn write_file(path: &PathBuf, data: &Map<String, Value>) -> CapabilityResult<()> {
    let raw = serde_json::to_string(data).map_err(|source| CapabilityError::StoreFormat {
        path: path.clone(),
        source,
    })?;
    fs::write(path, raw).map_err(|source| CapabilityError::StoreIo {
        path: path.clone(),
        source,
    })
}
