//! Prelude module - commonly used types for convenient import.
//!
//! Use `use bazaar_registry::prelude::*;` to import all essential types.

// Errors
pub use crate::{RegistryError, RegistryResult};

// Declaration
pub use crate::{HandlerRegistry, ParamSpec, ScheduleOptions};

// Dispatch-time surface
pub use crate::{EndpointResponse, Payload, SealedRegistry};
