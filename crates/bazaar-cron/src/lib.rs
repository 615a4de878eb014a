//! Bazaar Cron - Schedule expressions for Bazaar scheduled tasks.
//!
//! This crate provides:
//! - [`CronExpr`], a parsed five- or six-field cron expression
//! - Strictly-after next-occurrence computation over UTC timestamps
//!
//! Five fields are minute, hour, day-of-month, month, day-of-week; a sixth
//! leading field adds seconds. Day-of-month and day-of-week combine with the
//! standard union rule: when both are restricted, a day matching either
//! fires.
//!
//! # Example
//!
//! ```
//! use bazaar_cron::CronExpr;
//! use chrono::{TimeZone, Utc};
//!
//! let expr: CronExpr = "0 9 * * *".parse().unwrap();
//! let after = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
//! let next = expr.next_after(after).unwrap();
//! assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod expr;
mod field;

pub use error::{CronError, CronResult};
pub use expr::CronExpr;
