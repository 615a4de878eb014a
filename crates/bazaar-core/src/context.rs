//! Immutable execution context passed into every dispatch.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration key for the seller API credential.
pub(crate) const SELLER_API_KEY: &str = "seller_api_key";
/// Configuration key for the KV store backing file.
pub(crate) const KV_STORE_PATH: &str = "kv_store_path";

/// Immutable bundle of configuration values owned by the host runtime.
///
/// An `ExecContext` is the single source of truth for constructing capability
/// instances at dispatch time. It is built once, never mutated afterwards,
/// and shared by reference across all dispatch paths. Handlers never see the
/// context directly, only the capabilities resolved from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecContext {
    values: BTreeMap<String, String>,
}

impl ExecContext {
    /// Start building a context.
    #[must_use]
    pub fn builder() -> ExecContextBuilder {
        ExecContextBuilder::default()
    }

    /// Look up an arbitrary named configuration value.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The seller API credential, if configured.
    #[must_use]
    pub fn seller_api_key(&self) -> Option<&str> {
        self.value(SELLER_API_KEY)
    }

    /// Location of the KV store backing file, if configured.
    #[must_use]
    pub fn kv_store_path(&self) -> Option<&Path> {
        self.value(KV_STORE_PATH).map(Path::new)
    }
}

/// Builder for [`ExecContext`].
#[derive(Debug, Default, Clone)]
pub struct ExecContextBuilder {
    values: BTreeMap<String, String>,
}

impl ExecContextBuilder {
    /// Set the seller API credential.
    #[must_use]
    pub fn seller_api_key(self, key: impl Into<String>) -> Self {
        self.value(SELLER_API_KEY, key)
    }

    /// Set the KV store backing file location.
    #[must_use]
    pub fn kv_store_path(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.value(KV_STORE_PATH, path.to_string_lossy().into_owned())
    }

    /// Set an arbitrary named configuration value.
    #[must_use]
    pub fn value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Finish building; the resulting context is immutable.
    #[must_use]
    pub fn build(self) -> ExecContext {
        ExecContext {
            values: self.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_round_trip() {
        let ctx = ExecContext::builder()
            .seller_api_key("sk-123")
            .kv_store_path("/tmp/db.json")
            .value("region", "eu-1")
            .build();

        assert_eq!(ctx.seller_api_key(), Some("sk-123"));
        assert_eq!(ctx.kv_store_path(), Some(Path::new("/tmp/db.json")));
        assert_eq!(ctx.value("region"), Some("eu-1"));
    }

    #[test]
    fn test_missing_values_are_none() {
        let ctx = ExecContext::builder().build();
        assert_eq!(ctx.seller_api_key(), None);
        assert_eq!(ctx.kv_store_path(), None);
        assert_eq!(ctx.value("unknown"), None);
    }
}
