//! Prelude module - commonly used types for convenient import.
//!
//! Use `use bazaar_runtime::prelude::*;` to import all essential types.

// Errors
pub use crate::{DispatchError, DispatchResult};

// Dispatch
pub use crate::{Dispatcher, WIDGET_ERROR_FRAGMENT, resolve};

// Scheduling
pub use crate::{POLL_INTERVAL, Scheduler};
