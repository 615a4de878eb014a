//! Prelude module - commonly used types for convenient import.
//!
//! Use `use bazaar_core::prelude::*;` to import all essential types.

pub use crate::{EventKind, ExecContext, ExecContextBuilder};
