//! The per-call bag of resolved capability instances.

use std::any::Any;
use std::sync::Arc;

use crate::catalog::CapabilityInstance;
use crate::error::{CapabilityError, CapabilityResult};

/// Resolved capability instances for a single handler invocation.
///
/// Entries are keyed by the handler's declared parameter names, in
/// declaration order. Every entry is freshly constructed for this call; the
/// bag is consumed by the handler and dropped with it.
#[derive(Debug, Default)]
pub struct Injected {
    entries: Vec<(String, CapabilityInstance)>,
}

impl Injected {
    /// An empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instance under a parameter name.
    pub fn insert(&mut self, name: impl Into<String>, instance: CapabilityInstance) {
        self.entries.push((name.into(), instance));
    }

    /// Retrieve the instance for parameter `name`, downcast to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::NotResolved`] if no entry exists under
    /// `name`, or [`CapabilityError::WrongType`] if the entry is not a `T`.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> CapabilityResult<Arc<T>> {
        let instance = self
            .entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, instance)| Arc::clone(instance))
            .ok_or_else(|| CapabilityError::NotResolved {
                name: name.to_string(),
            })?;
        instance
            .downcast::<T>()
            .map_err(|_| CapabilityError::WrongType {
                name: name.to_string(),
            })
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of resolved entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_name_and_type() {
        let mut injected = Injected::new();
        injected.insert("answer", Arc::new(42_u32) as CapabilityInstance);

        let value = injected.get::<u32>("answer").unwrap();
        assert_eq!(*value, 42);
    }

    #[test]
    fn test_missing_entry() {
        let injected = Injected::new();
        assert!(matches!(
            injected.get::<u32>("answer"),
            Err(CapabilityError::NotResolved { .. })
        ));
    }

    #[test]
    fn test_wrong_type() {
        let mut injected = Injected::new();
        injected.insert("answer", Arc::new(42_u32) as CapabilityInstance);
        assert!(matches!(
            injected.get::<String>("answer"),
            Err(CapabilityError::WrongType { .. })
        ));
    }

    #[test]
    fn test_names_preserve_declaration_order() {
        let mut injected = Injected::new();
        injected.insert("b", Arc::new(1_u32) as CapabilityInstance);
        injected.insert("a", Arc::new(2_u32) as CapabilityInstance);
        let names: Vec<_> = injected.names().collect();
        assert_eq!(names, ["b", "a"]);
    }
}
