//! Prelude module - commonly used types for convenient import.
//!
//! Use `use bazaar_cron::prelude::*;` to import all essential types.

pub use crate::{CronError, CronExpr, CronResult};
