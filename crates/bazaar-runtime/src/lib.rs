//! Bazaar Runtime - Dispatch and scheduling for registered handlers.
//!
//! This crate provides:
//! - [`resolve`], the injection resolver that turns a handler's declared
//!   parameters into fresh capability instances
//! - [`Dispatcher`], the endpoint, widget, and event dispatch paths
//! - [`Scheduler`], the cron-driven polling loop for scheduled tasks
//!
//! # Failure containment
//!
//! Each dispatch path has its own, deliberate failure behavior:
//!
//! | Path | Handler failure |
//! |------|-----------------|
//! | Endpoint | propagates to the caller |
//! | Scheduled task | caught, logged, task rescheduled |
//! | Widget | caught, fixed error fragment returned |
//! | Event listener | propagates to the emitter |
//!
//! Missing an execution context is a precondition violation on every
//! injecting path and always propagates.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod dispatch;
mod error;
mod resolver;
mod scheduler;

pub use dispatch::{Dispatcher, WIDGET_ERROR_FRAGMENT};
pub use error::{DispatchError, DispatchResult};
pub use resolver::resolve;
pub use scheduler::{POLL_INTERVAL, Scheduler};
