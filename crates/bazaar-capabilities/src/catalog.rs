//! Capability identifiers, descriptors, and the catalog.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bazaar_core::ExecContext;

use crate::error::{CapabilityError, CapabilityResult};
use crate::kv_store::KvStore;
use crate::seller_api::SellerApi;

/// A constructed capability, type-erased for transport through the registry.
pub type CapabilityInstance = Arc<dyn Any + Send + Sync>;

type Constructor =
    Arc<dyn Fn(&ExecContext) -> CapabilityResult<CapabilityInstance> + Send + Sync>;

/// Canonical identifier of a capability (`seller_api`, `kv_store`, ...).
///
/// The identifier doubles as the untyped-parameter fallback: a handler
/// parameter whose name equals a capability's identifier resolves to that
/// capability even without a declared type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CapabilityId(String);

impl CapabilityId {
    /// Identifier of the built-in seller API client.
    pub const SELLER_API: &'static str = "seller_api";
    /// Identifier of the built-in key-value store.
    pub const KV_STORE: &'static str = "kv_store";

    /// Create an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier of the built-in seller API client.
    #[must_use]
    pub fn seller_api() -> Self {
        Self::new(Self::SELLER_API)
    }

    /// Identifier of the built-in key-value store.
    #[must_use]
    pub fn kv_store() -> Self {
        Self::new(Self::KV_STORE)
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CapabilityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A capability identifier paired with its constructor.
#[derive(Clone)]
pub struct CapabilityDescriptor {
    id: CapabilityId,
    construct: Constructor,
}

impl CapabilityDescriptor {
    /// Create a descriptor from a typed constructor.
    ///
    /// The constructor receives the execution context and must build the
    /// instance from it alone, independently of any other capability.
    pub fn new<T, F>(id: CapabilityId, construct: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&ExecContext) -> CapabilityResult<T> + Send + Sync + 'static,
    {
        Self {
            id,
            construct: Arc::new(move |ctx| {
                let instance = construct(ctx)?;
                Ok(Arc::new(instance) as CapabilityInstance)
            }),
        }
    }

    /// The descriptor's identifier.
    #[must_use]
    pub fn id(&self) -> &CapabilityId {
        &self.id
    }

    /// Construct a fresh instance from `ctx`.
    ///
    /// # Errors
    ///
    /// Propagates the provider's construction error.
    pub fn construct(&self, ctx: &ExecContext) -> CapabilityResult<CapabilityInstance> {
        (self.construct)(ctx)
    }
}

impl fmt::Debug for CapabilityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityDescriptor")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Table of known capabilities, keyed by identifier.
///
/// The catalog is assembled before the declaration phase and read-only
/// afterwards; signature validation and injection resolution both consult it.
#[derive(Debug, Clone, Default)]
pub struct CapabilityCatalog {
    entries: BTreeMap<CapabilityId, CapabilityDescriptor>,
}

impl CapabilityCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The catalog with the two built-in providers.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        // Infallible by construction: the built-in ids cannot collide in an
        // empty catalog.
        let _ = catalog.register(CapabilityDescriptor::new(
            CapabilityId::seller_api(),
            |ctx| Ok(SellerApi::new(ctx)),
        ));
        let _ = catalog.register(CapabilityDescriptor::new(
            CapabilityId::kv_store(),
            KvStore::new,
        ));
        catalog
    }

    /// Register an additional provider.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::Duplicate`] if the identifier is taken.
    pub fn register(&mut self, descriptor: CapabilityDescriptor) -> CapabilityResult<()> {
        let id = descriptor.id().clone();
        if self.entries.contains_key(&id) {
            return Err(CapabilityError::Duplicate { id: id.to_string() });
        }
        self.entries.insert(id, descriptor);
        Ok(())
    }

    /// Whether `id` names a known capability.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(&CapabilityId::new(id))
    }

    /// Look up a descriptor.
    #[must_use]
    pub fn get(&self, id: &CapabilityId) -> Option<&CapabilityDescriptor> {
        self.entries.get(id)
    }

    /// Construct a fresh instance of capability `id` from `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::Unknown`] for an unknown identifier, or the
    /// provider's own construction error.
    pub fn construct(
        &self,
        id: &CapabilityId,
        ctx: &ExecContext,
    ) -> CapabilityResult<CapabilityInstance> {
        let descriptor = self.get(id).ok_or_else(|| CapabilityError::Unknown {
            id: id.to_string(),
        })?;
        descriptor.construct(ctx)
    }

    /// Identifiers of all known capabilities, in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &CapabilityId> {
        self.entries.keys()
    }

    /// Number of registered capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = CapabilityCatalog::builtin();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(CapabilityId::SELLER_API));
        assert!(catalog.contains(CapabilityId::KV_STORE));
        assert!(!catalog.contains("clock"));
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut catalog = CapabilityCatalog::builtin();
        let result = catalog.register(CapabilityDescriptor::new(
            CapabilityId::seller_api(),
            |ctx| Ok(SellerApi::new(ctx)),
        ));
        assert!(matches!(result, Err(CapabilityError::Duplicate { .. })));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_construct_unknown_capability() {
        let catalog = CapabilityCatalog::builtin();
        let ctx = bazaar_core::ExecContext::builder().build();
        let result = catalog.construct(&CapabilityId::new("clock"), &ctx);
        assert!(matches!(result, Err(CapabilityError::Unknown { .. })));
    }

    #[test]
    fn test_construct_seller_api() {
        let catalog = CapabilityCatalog::builtin();
        let ctx = bazaar_core::ExecContext::builder()
            .seller_api_key("sk-test")
            .build();
        let instance = catalog
            .construct(&CapabilityId::seller_api(), &ctx)
            .unwrap();
        assert!(instance.downcast::<SellerApi>().is_ok());
    }
}
