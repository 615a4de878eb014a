//! Prelude module - commonly used types for convenient import.
//!
//! Use `use bazaar_capabilities::prelude::*;` to import all essential types.

// Errors
pub use crate::{CapabilityError, CapabilityResult};

// Catalog
pub use crate::{CapabilityCatalog, CapabilityDescriptor, CapabilityId, CapabilityInstance};

// Per-call resolution
pub use crate::Injected;

// Built-in providers
pub use crate::{KvStore, SellerApi};
