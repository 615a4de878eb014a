//! Bazaar Registry - Handler registration for the Bazaar SDK.
//!
//! This crate provides:
//! - [`ParamSpec`], the explicit declared-parameter list handlers register
//!   with (no runtime reflection)
//! - Declaration-time signature validation against the capability catalog
//! - [`HandlerRegistry`], the append-only store of handlers partitioned by
//!   kind, and [`SealedRegistry`], its immutable dispatch-time snapshot
//!
//! Registration follows the "declare once, dispatch many times" contract:
//! the registry is mutable during the declaration phase only, then sealed.
//! Sealing consumes the registry, so the type system rules out writes after
//! dispatch begins.
//!
//! # Example
//!
//! ```
//! use bazaar_registry::{EndpointResponse, HandlerRegistry, ParamSpec};
//! use serde_json::json;
//!
//! let mut registry = HandlerRegistry::with_builtin_catalog();
//! registry
//!     .endpoint(
//!         "average_order_price",
//!         Some("/average-order-price"),
//!         vec![ParamSpec::named("seller_api")],
//!         |_payload, _caps| async move { Ok(EndpointResponse::ok(json!({}))) },
//!     )
//!     .unwrap();
//!
//! let sealed = registry.seal();
//! assert_eq!(sealed.endpoints().len(), 1);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod params;
mod record;
mod registry;

pub use error::{RegistryError, RegistryResult};
pub use params::{ParamSpec, validate};
pub use record::{
    EndpointFn, EndpointRecord, EndpointResponse, ListenerFn, ListenerRecord, Payload,
    ScheduleOptions, ScheduledTaskRecord, TaskFn, WidgetFn, WidgetRecord,
};
pub use registry::{HandlerRegistry, SealedRegistry};
