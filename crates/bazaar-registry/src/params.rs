//! Declared handler parameters and signature validation.

use bazaar_capabilities::{CapabilityCatalog, CapabilityId};

use crate::error::{RegistryError, RegistryResult};

/// One declared handler parameter.
///
/// Handlers attach an explicit parameter list at registration instead of
/// relying on runtime type introspection. A parameter either declares the
/// capability it wants ([`ParamSpec::typed`]) or leans on the canonical-name
/// fallback: an untyped parameter whose name equals a capability identifier
/// ([`ParamSpec::named`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    name: String,
    capability: Option<CapabilityId>,
}

impl ParamSpec {
    /// A parameter with an explicit capability type.
    #[must_use]
    pub fn typed(name: impl Into<String>, capability: impl Into<CapabilityId>) -> Self {
        Self {
            name: name.into(),
            capability: Some(capability.into()),
        }
    }

    /// An untyped parameter relying on the canonical-name fallback.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capability: None,
        }
    }

    /// The parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared capability, if any.
    #[must_use]
    pub fn capability(&self) -> Option<&CapabilityId> {
        self.capability.as_ref()
    }

    /// The capability this parameter resolves to in `catalog`: the declared
    /// type when the catalog knows it, otherwise the parameter name.
    #[must_use]
    pub fn resolve_against(&self, catalog: &CapabilityCatalog) -> Option<CapabilityId> {
        if let Some(id) = &self.capability
            && catalog.get(id).is_some()
        {
            return Some(id.clone());
        }
        let by_name = CapabilityId::new(&self.name);
        catalog.get(&by_name).is_some().then_some(by_name)
    }
}

/// Check that every declared parameter can be injected from `catalog`.
///
/// Pure, and runs exactly once per handler, at registration. Fails on the
/// first invalid parameter so a handler is never partially registered.
///
/// # Errors
///
/// Returns [`RegistryError::UnknownParameter`] naming the first parameter
/// that is neither a known capability type nor named after one.
pub fn validate(params: &[ParamSpec], catalog: &CapabilityCatalog) -> RegistryResult<()> {
    for param in params {
        if param.resolve_against(catalog).is_none() {
            return Err(RegistryError::UnknownParameter {
                name: param.name().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_parameter_validates() {
        let catalog = CapabilityCatalog::builtin();
        let params = vec![ParamSpec::typed("api", CapabilityId::seller_api())];
        assert!(validate(&params, &catalog).is_ok());
    }

    #[test]
    fn test_name_fallback_validates() {
        let catalog = CapabilityCatalog::builtin();
        let params = vec![ParamSpec::named("kv_store")];
        assert!(validate(&params, &catalog).is_ok());
    }

    #[test]
    fn test_unknown_parameter_is_named_in_error() {
        let catalog = CapabilityCatalog::builtin();
        let params = vec![
            ParamSpec::typed("api", CapabilityId::seller_api()),
            ParamSpec::named("mystery"),
        ];
        match validate(&params, &catalog) {
            Err(RegistryError::UnknownParameter { name }) => assert_eq!(name, "mystery"),
            other => panic!("expected UnknownParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_with_capability_name_falls_back() {
        // Declared type is bogus but the parameter is named after a real
        // capability; the fallback applies to resolution too.
        let catalog = CapabilityCatalog::builtin();
        let param = ParamSpec::typed("seller_api", CapabilityId::new("bogus"));
        assert_eq!(
            param.resolve_against(&catalog),
            Some(CapabilityId::seller_api())
        );
    }

    #[test]
    fn test_resolution_prefers_declared_type() {
        let catalog = CapabilityCatalog::builtin();
        let param = ParamSpec::typed("store", CapabilityId::kv_store());
        assert_eq!(
            param.resolve_against(&catalog),
            Some(CapabilityId::kv_store())
        );
    }
}
