//! Injection resolution: declared parameters to fresh capability instances.

use tracing::trace;

use bazaar_capabilities::{CapabilityCatalog, Injected};
use bazaar_core::ExecContext;
use bazaar_registry::ParamSpec;

use crate::error::{DispatchError, DispatchResult};

/// Construct one fresh capability instance per declared parameter.
///
/// Construction follows declaration order, but each instance is built from
/// the context alone, so no parameter can depend on another. Nothing is
/// cached: two calls with the same context yield distinct instances with
/// equivalent observable state.
///
/// # Errors
///
/// Returns [`DispatchError::MissingContext`] when `ctx` is `None` (checked
/// before any construction), [`DispatchError::UnknownCapability`] when a
/// parameter no longer resolves against the catalog, and
/// [`DispatchError::CapabilityInit`] when a provider's constructor fails.
pub fn resolve(
    params: &[ParamSpec],
    catalog: &CapabilityCatalog,
    ctx: Option<&ExecContext>,
) -> DispatchResult<Injected> {
    let ctx = ctx.ok_or(DispatchError::MissingContext)?;

    let mut injected = Injected::new();
    for param in params {
        let id = param
            .resolve_against(catalog)
            .ok_or_else(|| DispatchError::UnknownCapability {
                name: param.name().to_string(),
            })?;
        trace!(param = param.name(), capability = %id, "Constructing capability");
        let instance =
            catalog
                .construct(&id, ctx)
                .map_err(|source| DispatchError::CapabilityInit {
                    name: param.name().to_string(),
                    source,
                })?;
        injected.insert(param.name(), instance);
    }
    Ok(injected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_capabilities::{CapabilityId, KvStore, SellerApi};
    use serde_json::json;

    fn context(dir: &tempfile::TempDir) -> ExecContext {
        ExecContext::builder()
            .seller_api_key("sk-test")
            .kv_store_path(dir.path().join("store.json"))
            .build()
    }

    #[test]
    fn test_missing_context_fails_before_construction() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CapabilityCatalog::builtin();
        let params = vec![ParamSpec::named("kv_store")];

        let result = resolve(&params, &catalog, None);
        assert!(matches!(result, Err(DispatchError::MissingContext)));
        // No construction happened: the store file was never created.
        assert!(!dir.path().join("store.json").exists());
    }

    #[test]
    fn test_resolves_in_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CapabilityCatalog::builtin();
        let params = vec![
            ParamSpec::typed("store", CapabilityId::kv_store()),
            ParamSpec::named("seller_api"),
        ];

        let injected = resolve(&params, &catalog, Some(&context(&dir))).unwrap();
        let names: Vec<_> = injected.names().collect();
        assert_eq!(names, ["store", "seller_api"]);

        assert!(injected.get::<KvStore>("store").is_ok());
        assert!(injected.get::<SellerApi>("seller_api").is_ok());
    }

    #[test]
    fn test_fresh_instances_with_equivalent_state() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CapabilityCatalog::builtin();
        let ctx = context(&dir);
        let params = vec![ParamSpec::named("kv_store")];

        let first = resolve(&params, &catalog, Some(&ctx)).unwrap();
        let store = first.get::<KvStore>("kv_store").unwrap();
        store.set("seen", json!(true)).unwrap();

        let second = resolve(&params, &catalog, Some(&ctx)).unwrap();
        let other = second.get::<KvStore>("kv_store").unwrap();

        // Distinct instances, same observable state.
        assert!(!std::sync::Arc::ptr_eq(&store, &other));
        assert_eq!(other.get("seen"), Some(json!(true)));
    }

    #[test]
    fn test_constructor_failure_is_reported_per_parameter() {
        let catalog = CapabilityCatalog::builtin();
        // Context with no kv_store_path: the store constructor must fail.
        let ctx = ExecContext::builder().build();
        let params = vec![ParamSpec::named("kv_store")];

        match resolve(&params, &catalog, Some(&ctx)) {
            Err(DispatchError::CapabilityInit { name, .. }) => assert_eq!(name, "kv_store"),
            other => panic!("expected CapabilityInit, got {other:?}"),
        }
    }
}
