//! Bazaar Capabilities - Injectable dependencies for Bazaar handlers.
//!
//! This crate provides:
//! - [`CapabilityCatalog`], the table mapping capability identifiers to
//!   constructors taking an [`ExecContext`](bazaar_core::ExecContext)
//! - [`Injected`], the bag of per-call capability instances a handler
//!   receives
//! - The two built-in providers: [`SellerApi`] (mocked seller-platform
//!   client) and [`KvStore`] (file-backed JSON key-value store)
//!
//! # Extending the catalog
//!
//! The catalog ships with the built-ins but is not closed; host runtimes can
//! register additional providers:
//!
//! ```
//! use bazaar_capabilities::{CapabilityCatalog, CapabilityDescriptor, CapabilityId};
//!
//! struct Clock;
//!
//! let mut catalog = CapabilityCatalog::builtin();
//! catalog
//!     .register(CapabilityDescriptor::new(
//!         CapabilityId::new("clock"),
//!         |_ctx| Ok(Clock),
//!     ))
//!     .unwrap();
//! assert!(catalog.contains("clock"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod catalog;
mod error;
mod injected;
mod kv_store;
mod seller_api;

pub use catalog::{CapabilityCatalog, CapabilityDescriptor, CapabilityId, CapabilityInstance};
pub use error::{CapabilityError, CapabilityResult};
pub use injected::Injected;
pub use kv_store::KvStore;
pub use seller_api::{CapacitySlot, Order, PackageReceipt, Product, SellerApi, Variant};
