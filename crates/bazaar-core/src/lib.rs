//! Bazaar Core - Execution context and shared types for the Bazaar SDK.
//!
//! This crate provides:
//! - [`ExecContext`], the immutable configuration bundle that every dispatch
//!   path carries and from which capabilities are constructed
//! - [`EventKind`], the closed set of event types listeners can register for
//!
//! # Example
//!
//! ```
//! use bazaar_core::ExecContext;
//!
//! let ctx = ExecContext::builder()
//!     .seller_api_key("sk-test")
//!     .kv_store_path("/tmp/store.json")
//!     .build();
//!
//! assert_eq!(ctx.seller_api_key(), Some("sk-test"));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod context;
mod event;

pub use context::{ExecContext, ExecContextBuilder};
pub use event::EventKind;
