//! Bazaar Telemetry - Logging setup for the Bazaar SDK.
//!
//! This crate provides:
//! - Configurable logging setup over the tracing ecosystem
//! - Env-filter based level control with per-target directives
//!
//! # Example
//!
//! ```rust,no_run
//! use bazaar_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), bazaar_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("bazaar_runtime=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("SDK host starting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, setup_default_logging, setup_logging};
